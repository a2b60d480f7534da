use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Raw triangle as handed over by the asset loader.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Triangle {
    pub v1: Vec3,
    pub v2: Vec3,
    pub v3: Vec3,
}

impl Triangle {
    pub fn new(v1: Vec3, v2: Vec3, v3: Vec3) -> Self {
        Self { v1, v2, v3 }
    }
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v1, self.v2, self.v3]
    }
    pub fn centroid(&self) -> Vec3 {
        (self.v1 + self.v2 + self.v3) / 3.0
    }
    pub fn min(&self) -> Vec3 {
        self.v1.min(self.v2).min(self.v3)
    }
    pub fn max(&self) -> Vec3 {
        self.v1.max(self.v2).max(self.v3)
    }
    /// Unit geometric normal, `None` for zero-area triangles.
    pub fn normal(&self) -> Option<Vec3> {
        (self.v2 - self.v1).cross(self.v3 - self.v1).try_normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_follows_winding() {
        let t = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert_eq!(t.normal(), Some(Vec3::Z));
        let t = Triangle::new(Vec3::ZERO, Vec3::Y, Vec3::X);
        assert_eq!(t.normal(), Some(Vec3::NEG_Z));
    }

    #[test]
    fn collinear_has_no_normal() {
        let t = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        assert_eq!(t.normal(), None);
    }

    #[test]
    fn local_bounds() {
        let t = Triangle::new(
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(-1.0, 4.0, 0.0),
            Vec3::new(0.0, 0.0, 5.0),
        );
        assert_eq!(t.min(), Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(t.max(), Vec3::new(1.0, 4.0, 5.0));
        assert_eq!(t.centroid(), Vec3::new(0.0, 2.0 / 3.0, 8.0 / 3.0));
    }
}
