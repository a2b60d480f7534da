use crate::error::{Error, Result};
use crate::geometry::Triangle;
use glam::Vec3;

/// Axes thinner than this are treated as flat when quantizing.
pub const MIN_EXTENT: f32 = 1e-6;

/// World-space box the whole mesh is quantized against.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshBounds {
    pub min_pos: Vec3,
    pub max_pos: Vec3,
}

impl Default for MeshBounds {
    fn default() -> Self {
        Self {
            min_pos: Vec3::ZERO,
            max_pos: Vec3::ZERO,
        }
    }
}

impl MeshBounds {
    pub fn new(min_pos: Vec3, max_pos: Vec3) -> Self {
        Self { min_pos, max_pos }
    }

    /// Tightest box around every vertex. Fails on an empty slice.
    pub fn from_triangles(triangles: &[Triangle]) -> Result<Self> {
        if triangles.is_empty() {
            return Err(Error::EmptyInput);
        }
        let mut min_pos = Vec3::splat(f32::MAX);
        let mut max_pos = Vec3::splat(f32::MIN);
        for v in triangles.iter().flat_map(Triangle::vertices) {
            min_pos = min_pos.min(v);
            max_pos = max_pos.max(v);
        }
        Ok(Self { min_pos, max_pos })
    }

    pub fn extent(&self) -> Vec3 {
        self.max_pos - self.min_pos
    }

    /// Extent with flat axes widened to 1.0 so quantization never divides by zero.
    pub fn clamped_extent(&self) -> Vec3 {
        let e = self.extent();
        let clamp = |v: f32| if v < MIN_EXTENT { 1.0 } else { v };
        Vec3::new(clamp(e.x), clamp(e.y), clamp(e.z))
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min_pos).all() && p.cmple(self.max_pos).all()
    }

    /// Largest side of the box, falling back to 5.0 for near-empty meshes.
    pub fn view_distance(&self) -> f32 {
        let d = self.extent().max_element();
        if d < 0.1 {
            5.0
        } else {
            d
        }
    }
}
