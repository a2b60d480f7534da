use crate::cache::{PackedNormal, QuantizedVec3, Quantizer};
use crate::error::{Error, Result};
use crate::geometry::{MeshBounds, Triangle};
use bytemuck::{Pod, Zeroable};

/// Compressed triangle, quantized against the owning [`Object`]'s bounds.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Pod, Zeroable)]
pub struct CachedTriangle {
    pub v1: QuantizedVec3,
    pub v2: QuantizedVec3,
    pub v3: QuantizedVec3,
    pub centroid: QuantizedVec3,
    pub min: QuantizedVec3,
    pub max: QuantizedVec3,
    pub normal: PackedNormal,
}

impl CachedTriangle {
    pub fn new(tri: &Triangle, quantizer: &Quantizer) -> Self {
        Self {
            v1: quantizer.quantize(tri.v1),
            v2: quantizer.quantize(tri.v2),
            v3: quantizer.quantize(tri.v3),
            centroid: quantizer.quantize(tri.centroid()),
            min: quantizer.quantize(tri.min()),
            max: quantizer.quantize(tri.max()),
            normal: tri.normal().map_or(PackedNormal::DEFAULT, PackedNormal::encode),
        }
    }
}

/// The quantized cache of one loaded asset plus the bounds it was quantized with.
#[derive(Debug, Default, Clone)]
pub struct Object {
    pub mesh: Vec<CachedTriangle>,
    pub bounds: MeshBounds,
}

impl Object {
    pub fn new(triangles: &[Triangle], bounds: MeshBounds) -> Result<Self> {
        let mut object = Self {
            mesh: Vec::new(),
            bounds,
        };
        object.load_cache(triangles)?;
        Ok(object)
    }

    /// Rebuilds the whole cache from `triangles` against the current bounds.
    ///
    /// On empty input nothing is touched and [`Error::EmptyInput`] is returned.
    pub fn load_cache(&mut self, triangles: &[Triangle]) -> Result<()> {
        if triangles.is_empty() {
            return Err(Error::EmptyInput);
        }
        let quantizer = Quantizer::new(&self.bounds);
        self.mesh.clear();
        self.mesh.reserve(triangles.len());
        self.mesh
            .extend(triangles.iter().map(|t| CachedTriangle::new(t, &quantizer)));
        log::info!("cached {} triangles (compressed)", self.mesh.len());
        Ok(())
    }

    pub fn quantizer(&self) -> Quantizer {
        Quantizer::new(&self.bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn empty_input_leaves_cache_alone() {
        let mut object = Object::default();
        assert!(matches!(object.load_cache(&[]), Err(Error::EmptyInput)));
        assert!(object.mesh.is_empty());
        assert!(Object::new(&[], MeshBounds::default()).is_err());
    }

    #[test]
    fn keeps_input_order() {
        let triangles = vec![
            Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y),
            Triangle::new(Vec3::splat(9.0), Vec3::splat(10.0), Vec3::new(10.0, 9.0, 10.0)),
        ];
        let bounds = MeshBounds::new(Vec3::ZERO, Vec3::splat(10.0));
        let object = Object::new(&triangles, bounds).unwrap();
        assert_eq!(object.mesh.len(), 2);
        assert_eq!(object.mesh[0].v1, QuantizedVec3::MIN);
        assert_eq!(object.mesh[1].max, QuantizedVec3::MAX);
    }

    #[test]
    fn local_box_and_centroid() {
        let tri = Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(6.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
        );
        let bounds = MeshBounds::new(Vec3::ZERO, Vec3::new(6.0, 3.0, 0.0));
        let object = Object::new(&[tri], bounds).unwrap();
        let cached = object.mesh[0];
        assert_eq!(cached.min, QuantizedVec3::MIN);
        assert_eq!(cached.max, QuantizedVec3::new(u16::MAX, u16::MAX, 0));
        let c = object.quantizer().dequantize(cached.centroid);
        assert!((c - Vec3::new(2.0, 1.0, 0.0)).length() < 1e-3);
        assert_eq!(cached.normal, PackedNormal::encode(Vec3::Z));
    }

    #[test]
    fn degenerate_triangle_gets_default_normal() {
        let tri = Triangle::new(Vec3::ONE, Vec3::ONE, Vec3::ONE);
        let object = Object::new(&[tri], MeshBounds::new(Vec3::ONE, Vec3::ONE)).unwrap();
        assert_eq!(object.mesh[0].normal, PackedNormal::DEFAULT);
        assert_eq!(object.mesh[0].v1, QuantizedVec3::MIN);
    }
}
