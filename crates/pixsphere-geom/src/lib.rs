//! Minimal geometry types shared by the sphere crates (no Raylib dependency).
#![forbid(unsafe_code)]

use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const UP: Vec3 = Vec3 {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    #[inline]
    pub fn dot(self, rhs: Vec3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn cross(self, rhs: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn min(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x.min(rhs.x), self.y.min(rhs.y), self.z.min(rhs.z))
    }

    #[inline]
    pub fn max(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x.max(rhs.x), self.y.max(rhs.y), self.z.max(rhs.z))
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn div(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Inverted box that any `include` call replaces.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grows the box so it covers `other`.
    #[inline]
    pub fn include(&mut self, other: Aabb) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }

    #[inline]
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Integer lattice point; the unit cube centered on it is one rendered voxel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Voxel {
    // f32 centers stay exact below 2^20
    #[cfg_attr(test, proptest(strategy = "-(1i32 << 20)..(1i32 << 20)"))]
    pub x: i32,
    #[cfg_attr(test, proptest(strategy = "-(1i32 << 20)..(1i32 << 20)"))]
    pub y: i32,
    #[cfg_attr(test, proptest(strategy = "-(1i32 << 20)..(1i32 << 20)"))]
    pub z: i32,
}

impl Voxel {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Squared distance from the origin.
    #[inline]
    pub const fn dist_sq(self) -> i64 {
        let (x, y, z) = (self.x as i64, self.y as i64, self.z as i64);
        x * x + y * y + z * z
    }

    #[inline]
    pub fn center(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    /// Bounds of the unit cube centered on this point.
    #[inline]
    pub fn bounds(self) -> Aabb {
        let c = self.center();
        Aabb::new(c - Vec3::splat(0.5), c + Vec3::splat(0.5))
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Voxel {
        Voxel::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Sign reflections `(±x, ±y, ±z)` without repeats: a zero coordinate only
    /// has one sign. Order follows `+++, -++, +-+, ++-, --+, +--, -+-, ---`.
    pub fn reflections(self) -> impl Iterator<Item = Voxel> {
        const SIGNS: [(i32, i32, i32); 8] = [
            (1, 1, 1),
            (-1, 1, 1),
            (1, -1, 1),
            (1, 1, -1),
            (-1, -1, 1),
            (1, -1, -1),
            (-1, 1, -1),
            (-1, -1, -1),
        ];
        SIGNS.into_iter().filter_map(move |(sx, sy, sz)| {
            let flips_zero = (sx < 0 && self.x == 0)
                || (sy < 0 && self.y == 0)
                || (sz < 0 && self.z == 0);
            if flips_zero {
                None
            } else {
                Some(Voxel::new(self.x * sx, self.y * sy, self.z * sz))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reflections_of_axis_point_are_two() {
        let r: Vec<Voxel> = Voxel::new(0, 0, 3).reflections().collect();
        assert_eq!(r, vec![Voxel::new(0, 0, 3), Voxel::new(0, 0, -3)]);
    }

    #[test]
    fn reflections_of_origin_is_itself() {
        let r: Vec<Voxel> = Voxel::new(0, 0, 0).reflections().collect();
        assert_eq!(r, vec![Voxel::new(0, 0, 0)]);
    }

    #[test]
    fn empty_aabb_is_replaced_by_include() {
        let mut bb = Aabb::EMPTY;
        assert!(bb.is_empty());
        bb.include(Voxel::new(2, -1, 0).bounds());
        assert_eq!(bb.min, Vec3::new(1.5, -1.5, -0.5));
        assert_eq!(bb.max, Vec3::new(2.5, -0.5, 0.5));
        assert!(!bb.is_empty());
    }

    proptest! {
        #[test]
        fn reflections_keep_distance_and_are_distinct(
            x in -1000i32..=1000, y in -1000i32..=1000, z in -1000i32..=1000
        ) {
            let v = Voxel::new(x, y, z);
            let r: Vec<Voxel> = v.reflections().collect();
            let zeros = [x, y, z].iter().filter(|c| **c == 0).count();
            prop_assert_eq!(r.len(), 1usize << (3 - zeros));
            for (i, a) in r.iter().enumerate() {
                prop_assert_eq!(a.dist_sq(), v.dist_sq());
                for b in &r[i + 1..] {
                    prop_assert_ne!(a, b);
                }
            }
        }

        #[test]
        fn voxel_bounds_are_unit(v in any::<Voxel>()) {
            let e = v.bounds().extent();
            prop_assert_eq!(e, Vec3::splat(1.0));
            prop_assert_eq!(v.bounds().center(), v.center());
        }
    }
}
