use crate::geometry::MeshBounds;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

pub const QUANT_MAX: f32 = u16::MAX as f32;

/// Position normalized into `[0, 65535]` on each axis of the mesh bounds.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct QuantizedVec3 {
    pub x: u16,
    pub y: u16,
    pub z: u16,
}

impl QuantizedVec3 {
    pub const MIN: Self = Self::splat(0);
    pub const MAX: Self = Self::splat(u16::MAX);

    pub const fn new(x: u16, y: u16, z: u16) -> Self {
        Self { x, y, z }
    }
    pub const fn splat(v: u16) -> Self {
        Self { x: v, y: v, z: v }
    }
    pub fn axis(&self, axis: usize) -> u16 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }
    pub fn min(self, rhs: Self) -> Self {
        Self::new(self.x.min(rhs.x), self.y.min(rhs.y), self.z.min(rhs.z))
    }
    pub fn max(self, rhs: Self) -> Self {
        Self::new(self.x.max(rhs.x), self.y.max(rhs.y), self.z.max(rhs.z))
    }
    pub fn to_array(self) -> [u16; 3] {
        [self.x, self.y, self.z]
    }
}

/// Maps world positions into the 16-bit grid spanned by a [`MeshBounds`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quantizer {
    min: Vec3,
    extent: Vec3,
}

impl Quantizer {
    pub fn new(bounds: &MeshBounds) -> Self {
        Self {
            min: bounds.min_pos,
            extent: bounds.clamped_extent(),
        }
    }

    /// Points outside the bounds saturate to the nearest face.
    pub fn quantize(&self, v: Vec3) -> QuantizedVec3 {
        let t = ((v - self.min) / self.extent).clamp(Vec3::ZERO, Vec3::ONE);
        let q = (t * QUANT_MAX).round();
        QuantizedVec3::new(q.x as u16, q.y as u16, q.z as u16)
    }

    pub fn dequantize(&self, q: QuantizedVec3) -> Vec3 {
        let t = Vec3::new(q.x as f32, q.y as f32, q.z as f32) / QUANT_MAX;
        self.min + t * self.extent
    }

    /// World-space size of one quantization step on each axis.
    pub fn step(&self) -> Vec3 {
        self.extent / QUANT_MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube10() -> Quantizer {
        Quantizer::new(&MeshBounds::new(Vec3::ZERO, Vec3::splat(10.0)))
    }

    #[test]
    fn midpoint() {
        let q = cube10().quantize(Vec3::splat(5.0));
        for c in q.to_array() {
            assert!((c as i32 - 32767).abs() <= 5, "{c}");
        }
    }

    #[test]
    fn corners_hit_range_ends() {
        let quantizer = cube10();
        assert_eq!(quantizer.quantize(Vec3::ZERO), QuantizedVec3::MIN);
        assert_eq!(quantizer.quantize(Vec3::splat(10.0)), QuantizedVec3::MAX);
    }

    #[test]
    fn outside_points_saturate() {
        let quantizer = cube10();
        let q = quantizer.quantize(Vec3::new(-3.0, 12.0, 5.0));
        assert_eq!(q.x, 0);
        assert_eq!(q.y, u16::MAX);
    }

    #[test]
    fn dequantize_within_one_step() {
        let quantizer = Quantizer::new(&MeshBounds::new(
            Vec3::new(-4.0, 1.0, 100.0),
            Vec3::new(7.5, 2.0, 350.0),
        ));
        let step = quantizer.step();
        for p in [
            Vec3::new(-4.0, 1.0, 100.0),
            Vec3::new(0.3, 1.7, 222.2),
            Vec3::new(7.4, 1.01, 349.0),
        ] {
            let back = quantizer.dequantize(quantizer.quantize(p));
            assert!(((back - p).abs()).cmple(step).all(), "{p} -> {back}");
        }
    }

    #[test]
    fn flat_axis_does_not_produce_nan() {
        let quantizer = Quantizer::new(&MeshBounds::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0)));
        let q = quantizer.quantize(Vec3::new(0.5, 0.5, 0.0));
        assert_eq!(q.z, 0);
    }
}
