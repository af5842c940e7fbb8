use pixsphere_geom::{Aabb, Vec3};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosY,
    NegY,
    PosX,
    NegX,
    PosZ,
    NegZ,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosY,
        Face::NegY,
        Face::PosX,
        Face::NegX,
        Face::PosZ,
        Face::NegZ,
    ];

    /// Returns the unit-normal vector for this face.
    #[inline]
    pub fn normal(self) -> Vec3 {
        let (dx, dy, dz) = self.delta();
        Vec3::new(dx as f32, dy as f32, dz as f32)
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
            Face::PosX => (1, 0, 0),
            Face::NegX => (-1, 0, 0),
            Face::PosZ => (0, 0, 1),
            Face::NegZ => (0, 0, -1),
        }
    }

    /// Corners of this face of `bb` as a closed cycle (winding fixed later).
    pub fn corners(self, bb: &Aabb) -> [Vec3; 4] {
        let (lo, hi) = (bb.min, bb.max);
        match self {
            Face::PosY => [
                Vec3::new(lo.x, hi.y, lo.z),
                Vec3::new(hi.x, hi.y, lo.z),
                Vec3::new(hi.x, hi.y, hi.z),
                Vec3::new(lo.x, hi.y, hi.z),
            ],
            Face::NegY => [
                Vec3::new(lo.x, lo.y, lo.z),
                Vec3::new(hi.x, lo.y, lo.z),
                Vec3::new(hi.x, lo.y, hi.z),
                Vec3::new(lo.x, lo.y, hi.z),
            ],
            Face::PosX => [
                Vec3::new(hi.x, lo.y, lo.z),
                Vec3::new(hi.x, hi.y, lo.z),
                Vec3::new(hi.x, hi.y, hi.z),
                Vec3::new(hi.x, lo.y, hi.z),
            ],
            Face::NegX => [
                Vec3::new(lo.x, lo.y, lo.z),
                Vec3::new(lo.x, hi.y, lo.z),
                Vec3::new(lo.x, hi.y, hi.z),
                Vec3::new(lo.x, lo.y, hi.z),
            ],
            Face::PosZ => [
                Vec3::new(lo.x, lo.y, hi.z),
                Vec3::new(hi.x, lo.y, hi.z),
                Vec3::new(hi.x, hi.y, hi.z),
                Vec3::new(lo.x, hi.y, hi.z),
            ],
            Face::NegZ => [
                Vec3::new(lo.x, lo.y, lo.z),
                Vec3::new(hi.x, lo.y, lo.z),
                Vec3::new(hi.x, hi.y, lo.z),
                Vec3::new(lo.x, hi.y, lo.z),
            ],
        }
    }

    /// Vertex color used in place of a normal-shaded material.
    #[inline]
    pub fn normal_rgba(self) -> [u8; 4] {
        let n = self.normal();
        let ch = |c: f32| ((c * 0.5 + 0.5) * 255.0).round() as u8;
        [ch(n.x), ch(n.y), ch(n.z), 255]
    }
}
