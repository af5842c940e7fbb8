use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use pixsphere_geom::Voxel;

use crate::params::Radius;

/// Voxels of one shell grouped by their y coordinate.
///
/// Buckets are created on first insert and keep generation order. Iteration
/// over buckets is in increasing y.
#[derive(Clone, Debug)]
pub struct ShellIndex {
    radius: Radius,
    buckets: BTreeMap<i32, Vec<Voxel>>,
    len: usize,
    complete: bool,
}

impl ShellIndex {
    pub fn new(radius: Radius) -> Self {
        Self {
            radius,
            buckets: BTreeMap::new(),
            len: 0,
            complete: false,
        }
    }

    #[inline]
    pub fn radius(&self) -> Radius {
        self.radius
    }

    /// True once a generation pass ran to the end without cancellation.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, v: Voxel) {
        self.buckets.entry(v.y).or_default().push(v);
        self.len += 1;
    }

    /// Inserts the distinct sign reflections of `v`; returns how many were added.
    pub fn insert_reflections(&mut self, v: Voxel) -> usize {
        let mut n = 0;
        for r in v.reflections() {
            self.insert(r);
            n += 1;
        }
        n
    }

    pub fn bucket(&self, y: i32) -> &[Voxel] {
        self.buckets.get(&y).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn buckets(&self) -> impl Iterator<Item = (i32, &[Voxel])> {
        self.buckets.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Buckets with key `<= y`, in increasing order.
    pub fn up_to(&self, y: i32) -> impl Iterator<Item = (i32, &[Voxel])> {
        self.buckets.range(..=y).map(|(k, v)| (*k, v.as_slice()))
    }

    pub fn voxels(&self) -> impl Iterator<Item = &Voxel> {
        self.buckets.values().flatten()
    }

    pub fn contains(&self, v: Voxel) -> bool {
        self.bucket(v.y).contains(&v)
    }

    /// Lowest and highest populated y, if any.
    pub fn key_range(&self) -> Option<RangeInclusive<i32>> {
        let lo = *self.buckets.keys().next()?;
        let hi = *self.buckets.keys().next_back()?;
        Some(lo..=hi)
    }

    pub(crate) fn reset(&mut self, radius: Radius) {
        self.radius = radius;
        self.buckets.clear();
        self.len = 0;
        self.complete = false;
    }

    pub(crate) fn mark_complete(&mut self) {
        self.complete = true;
    }
}
