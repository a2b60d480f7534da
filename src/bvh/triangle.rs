use crate::cache::{CachedTriangle, PackedNormal, QuantizedVec3};
use bytemuck::{Pod, Zeroable};

/// Triangle as laid out in the GPU triangle buffer.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Pod, Zeroable)]
pub struct RaytraceTriangle {
    pub v1: QuantizedVec3,
    pub v2: QuantizedVec3,
    pub v3: QuantizedVec3,
    pub pad: u16,
    pub normal: PackedNormal,
}

impl From<&CachedTriangle> for RaytraceTriangle {
    fn from(t: &CachedTriangle) -> Self {
        Self {
            v1: t.v1,
            v2: t.v2,
            v3: t.v3,
            pad: 0,
            normal: t.normal,
        }
    }
}

/// Emits the cache in BVH leaf order, so leaf ranges index the result directly.
pub fn write_in_order(mesh: &[CachedTriangle], indices: &[u32]) -> Vec<RaytraceTriangle> {
    indices
        .iter()
        .map(|&i| RaytraceTriangle::from(&mesh[i as usize]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout() {
        assert_eq!(std::mem::size_of::<RaytraceTriangle>(), 24);
    }

    #[test]
    fn follows_index_order() {
        let mesh: Vec<_> = (0..3u16)
            .map(|i| CachedTriangle {
                v1: QuantizedVec3::splat(i),
                ..Default::default()
            })
            .collect();
        let out = write_in_order(&mesh, &[2, 0, 1]);
        let firsts: Vec<_> = out.iter().map(|t| t.v1.x).collect();
        assert_eq!(firsts, vec![2, 0, 1]);
        assert!(out.iter().all(|t| t.normal == PackedNormal::DEFAULT));
    }
}
