use std::collections::BTreeSet;

use pixsphere_shell::{
    GenerationState, Progress, Radius, ShellGenerator, ShellIndex, ShellParams, StepOutcome, Voxel,
    enumerate_chunk,
};
use proptest::prelude::*;

fn radius() -> impl Strategy<Value = u32> {
    1u32..=24
}

fn full_index(r: u32) -> ShellIndex {
    let mut g = ShellGenerator::new(Radius::new(r).unwrap());
    g.generate_blocking();
    g.index().clone()
}

fn as_set(idx: &ShellIndex) -> BTreeSet<Voxel> {
    idx.voxels().copied().collect()
}

proptest! {
    // Every produced voxel lies in [r² - 2r, r²]
    #[test]
    fn voxels_are_inside_the_band(r in radius()) {
        let idx = full_index(r);
        let p = ShellParams::new(Radius::new(r).unwrap());
        let lo = (p.squared_radius - p.double_radius) as i64;
        let hi = p.squared_radius as i64;
        prop_assert!(!idx.is_empty());
        for v in idx.voxels() {
            let d = v.dist_sq();
            prop_assert!(lo <= d && d <= hi, "{:?} d={} not in [{}, {}]", v, d, lo, hi);
        }
    }

    // All sign reflections of a produced voxel are present
    #[test]
    fn octant_symmetry_is_complete(r in radius()) {
        let idx = full_index(r);
        let set = as_set(&idx);
        for v in &set {
            for (sx, sy, sz) in [(1, 1, 1), (-1, 1, 1), (1, -1, 1), (1, 1, -1),
                                 (-1, -1, 1), (1, -1, -1), (-1, 1, -1), (-1, -1, -1)] {
                let m = Voxel::new(v.x * sx, v.y * sy, v.z * sz);
                prop_assert!(set.contains(&m), "{:?} missing reflection {:?}", v, m);
            }
        }
    }

    // Bucket k holds exactly the voxels with y == k, within [-r, r], no duplicates
    #[test]
    fn buckets_hold_their_own_y(r in radius()) {
        let idx = full_index(r);
        let mut count = 0usize;
        for (k, bucket) in idx.buckets() {
            prop_assert!(k >= -(r as i32) && k <= r as i32);
            prop_assert!(!bucket.is_empty());
            for v in bucket {
                prop_assert_eq!(v.y, k);
            }
            count += bucket.len();
        }
        prop_assert_eq!(count, idx.len());
        prop_assert_eq!(as_set(&idx).len(), idx.len());
    }

    // Chunk size only changes scheduling, never the final contents
    #[test]
    fn chunking_matches_single_pass(r in radius(), budget in 0usize..=3000) {
        let p = ShellParams::new(Radius::new(r).unwrap());
        let mut single = ShellIndex::new(Radius::new(r).unwrap());
        let done = enumerate_chunk(&p, GenerationState::default(), usize::MAX, &mut single);
        let finished = matches!(done, Progress::Finished { .. });
        prop_assert!(finished, "single pass suspended: {:?}", done);

        let mut g = ShellGenerator::new(Radius::new(r).unwrap()).with_chunk_budget(budget);
        g.generate();
        let mut steps = 0usize;
        loop {
            match g.step() {
                StepOutcome::Completed { .. } => break,
                StepOutcome::Yielded { .. } => steps += 1,
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }
        prop_assert!(g.index().is_complete());
        prop_assert_eq!(as_set(g.index()), as_set(&single));
        prop_assert_eq!(g.index().len(), single.len());
        // Generation order within each bucket is preserved too
        for ((ka, a), (kb, b)) in g.index().buckets().zip(single.buckets()) {
            prop_assert_eq!(ka, kb);
            prop_assert_eq!(a, b);
        }
        if budget >= single.len() {
            prop_assert_eq!(steps, 0);
        }
    }
}

#[test]
fn radius_one_shell() {
    // band [-1, 1]: origin and the six axis neighbours
    let idx = full_index(1);
    let set = as_set(&idx);
    assert!(set.contains(&Voxel::new(0, 0, 0)));
    for v in [
        Voxel::new(1, 0, 0),
        Voxel::new(-1, 0, 0),
        Voxel::new(0, 1, 0),
        Voxel::new(0, -1, 0),
        Voxel::new(0, 0, 1),
        Voxel::new(0, 0, -1),
    ] {
        assert!(set.contains(&v));
    }
    assert_eq!(set.len(), 7);
    assert_eq!(idx.key_range(), Some(-1..=1));
}

#[test]
fn radius_four_bucket_range() {
    let idx = full_index(4);
    assert_eq!(idx.key_range(), Some(-4..=4));
    assert_eq!(idx.bucket(4), &[Voxel::new(0, 4, 0)]);
}
