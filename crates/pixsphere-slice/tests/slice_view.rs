use std::collections::BTreeSet;

use pixsphere_geom::Vec3;
use pixsphere_mesh_cpu::BatchMeshCPU;
use pixsphere_shell::{Radius, ShellGenerator, ShellIndex, Voxel};
use pixsphere_slice::{Scene, SceneError, SliceError, SliceView};
use proptest::prelude::*;

#[derive(Debug)]
struct Recorded {
    id: u64,
    voxels: BTreeSet<Voxel>,
    // cubes that own at least one emitted quad
    faced: BTreeSet<Voxel>,
}

#[derive(Default)]
struct RecordingScene {
    next_id: u64,
    attached: BTreeSet<u64>,
    fail_next: bool,
}

fn voxels_from_mesh(mesh: &BatchMeshCPU) -> BTreeSet<Voxel> {
    let m = &mesh.mesh;
    let mut out = BTreeSet::new();
    for q in 0..m.quad_count() {
        let mut c = Vec3::ZERO;
        for i in 0..4 {
            let o = (q * 4 + i) * 3;
            c += Vec3::new(m.pos[o], m.pos[o + 1], m.pos[o + 2]);
        }
        let o = q * 4 * 3;
        let n = Vec3::new(m.norm[o], m.norm[o + 1], m.norm[o + 2]);
        let center = c / 4.0 - n * 0.5;
        out.insert(Voxel::new(
            center.x.round() as i32,
            center.y.round() as i32,
            center.z.round() as i32,
        ));
    }
    out
}

impl Scene for RecordingScene {
    type Batch = Recorded;

    fn attach_batch(&mut self, mesh: &BatchMeshCPU) -> Result<Recorded, SceneError> {
        if std::mem::take(&mut self.fail_next) {
            return Err(SceneError::Upload("injected".into()));
        }
        self.next_id += 1;
        self.attached.insert(self.next_id);
        Ok(Recorded {
            id: self.next_id,
            voxels: mesh.voxels.iter().copied().collect(),
            faced: voxels_from_mesh(mesh),
        })
    }

    fn detach_batch(&mut self, batch: Recorded) {
        assert!(self.attached.remove(&batch.id), "detached twice");
    }
}

fn index_for(r: u32) -> ShellIndex {
    let mut g = ShellGenerator::new(Radius::new(r).unwrap());
    g.generate_blocking();
    g.index().clone()
}

#[test]
fn full_rebuild_renders_every_voxel() {
    let idx = index_for(6);
    let mut scene = RecordingScene::default();
    let mut view = SliceView::new();
    view.rebuild_full(&mut scene, &idx).unwrap();
    let all: BTreeSet<Voxel> = idx.voxels().copied().collect();
    let batch = view.batch().unwrap();
    assert_eq!(batch.voxels, all);
    // a radius-6 shell has no fully enclosed cube
    assert_eq!(batch.faced, all);
    assert_eq!(view.visible_voxels(), idx.len());
    assert!(view.outlines().is_empty());
    assert_eq!(view.cut(), None);
    assert_eq!(scene.attached.len(), 1);
}

#[test]
fn radius_four_slice_five_cuts_at_y_one() {
    let idx = index_for(4);
    let mut scene = RecordingScene::default();
    let mut view = SliceView::new();
    let y = view.reveal_up_to(&mut scene, &idx, 5).unwrap();
    assert_eq!(y, 1);
    assert_eq!(view.cut(), Some(1));

    let rendered = &view.batch().unwrap().voxels;
    assert!(rendered.iter().all(|v| v.y <= 1));
    let expected: BTreeSet<Voxel> = idx.voxels().filter(|v| v.y <= 1).copied().collect();
    assert_eq!(rendered, &expected);

    assert_eq!(view.outlines(), idx.bucket(1));
    assert!(view.outlines().iter().all(|v| v.y == 1));
    assert!(!view.outlines().is_empty());
}

#[test]
fn outlines_are_replaced_and_cleared() {
    let idx = index_for(5);
    let mut scene = RecordingScene::default();
    let mut view = SliceView::new();
    view.reveal_up_to(&mut scene, &idx, 3).unwrap();
    assert!(view.outlines().iter().all(|v| v.y == -2));
    view.reveal_up_to(&mut scene, &idx, 7).unwrap();
    assert!(view.outlines().iter().all(|v| v.y == 2));
    view.rebuild_full(&mut scene, &idx).unwrap();
    assert!(view.outlines().is_empty());
}

#[test]
fn incomplete_index_is_refused() {
    let mut g = ShellGenerator::new(Radius::new(20).unwrap()).with_chunk_budget(10);
    g.generate();
    g.step();
    let mut scene = RecordingScene::default();
    let mut view = SliceView::new();
    assert!(matches!(
        view.rebuild_full(&mut scene, g.index()),
        Err(SliceError::GenerationInProgress { radius: 20 })
    ));
    assert!(matches!(
        view.reveal_up_to(&mut scene, g.index(), 3),
        Err(SliceError::GenerationInProgress { .. })
    ));
    assert!(!view.has_batch());
    assert!(scene.attached.is_empty());
}

#[test]
fn out_of_range_slice_keeps_current_view() {
    let idx = index_for(4);
    let mut scene = RecordingScene::default();
    let mut view = SliceView::new();
    view.reveal_up_to(&mut scene, &idx, 5).unwrap();
    let before = view.outlines().to_vec();
    assert!(matches!(
        view.reveal_up_to(&mut scene, &idx, 9),
        Err(SliceError::SliceOutOfRange { value: 9, max: 8 })
    ));
    assert_eq!(view.outlines(), before.as_slice());
    assert_eq!(view.cut(), Some(1));
    assert_eq!(scene.attached.len(), 1);
}

#[test]
fn failed_upload_keeps_previous_batch() {
    let idx = index_for(4);
    let mut scene = RecordingScene::default();
    let mut view = SliceView::new();
    view.rebuild_full(&mut scene, &idx).unwrap();
    let old_id = view.batch().unwrap().id;
    scene.fail_next = true;
    assert!(matches!(
        view.reveal_up_to(&mut scene, &idx, 2),
        Err(SliceError::Scene(SceneError::Upload(_)))
    ));
    assert_eq!(view.batch().unwrap().id, old_id);
    assert_eq!(scene.attached.len(), 1);
}

#[test]
fn discard_detaches_everything() {
    let idx = index_for(4);
    let mut scene = RecordingScene::default();
    let mut view = SliceView::new();
    view.reveal_up_to(&mut scene, &idx, 4).unwrap();
    view.discard(&mut scene);
    assert!(!view.has_batch());
    assert!(view.outlines().is_empty());
    assert!(scene.attached.is_empty());
    assert_eq!(view.visible_voxels(), 0);
}

#[derive(Clone, Debug)]
enum Op {
    Full,
    Reveal(u32),
}

fn op(max: u32) -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Full), (1..=max).prop_map(Op::Reveal)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // Lower cut planes render a subset of higher ones
    #[test]
    fn reveal_is_monotonic(r in 2u32..=10, a in 1u32..=20, b in 1u32..=20) {
        let max = 2 * r;
        let (p1, p2) = (a.min(b).min(max), a.max(b).min(max));
        let idx = index_for(r);
        let mut scene = RecordingScene::default();
        let mut view = SliceView::new();
        view.reveal_up_to(&mut scene, &idx, p1).unwrap();
        let low = view.batch().unwrap().voxels.clone();
        view.reveal_up_to(&mut scene, &idx, p2).unwrap();
        let high = &view.batch().unwrap().voxels;
        prop_assert!(low.is_subset(high));
    }

    // Exactly one batch stays attached after any sequence of calls
    #[test]
    fn single_batch_invariant(ops in proptest::collection::vec(op(12), 1..12)) {
        let idx = index_for(6);
        let mut scene = RecordingScene::default();
        let mut view = SliceView::new();
        for o in ops {
            match o {
                Op::Full => view.rebuild_full(&mut scene, &idx).unwrap(),
                Op::Reveal(p) => {
                    view.reveal_up_to(&mut scene, &idx, p).unwrap();
                }
            }
            prop_assert_eq!(scene.attached.len(), 1);
            prop_assert!(view.has_batch());
            prop_assert!(scene.attached.contains(&view.batch().unwrap().id));
        }
    }
}
