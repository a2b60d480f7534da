use crate::cache::QuantizedVec3;
use bytemuck::{Pod, Zeroable};

/// Flat BVH node, 24 bytes, in the same quantized space as the triangle cache.
///
/// Interior node: `left_first` = left child index (right child follows it), `tri_count` = 0.
/// Leaf node: `left_first` = first slot in the index array, `tri_count` > 0.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Node {
    pub aabb_min: QuantizedVec3,
    pub pad1: u16,
    pub aabb_max: QuantizedVec3,
    pub pad2: u16,
    pub left_first: u32,
    pub tri_count: u32,
}

impl Node {
    pub fn leaf(first: u32, count: u32) -> Self {
        Self {
            left_first: first,
            tri_count: count,
            ..Default::default()
        }
    }
    pub fn is_leaf(&self) -> bool {
        self.tri_count > 0
    }
    /// Index range this leaf covers in the index array.
    pub fn range(&self) -> std::ops::Range<usize> {
        let first = self.left_first as usize;
        first..first + self.tri_count as usize
    }
    pub fn surface_area(&self) -> f32 {
        surface_area(self.aabb_min, self.aabb_max)
    }
}

/// `2(wh + wd + hd)` with signed spans, so an inverted box still yields a finite value.
pub fn surface_area(min: QuantizedVec3, max: QuantizedVec3) -> f32 {
    let w = (max.x as i32 - min.x as i32) as f32;
    let h = (max.y as i32 - min.y as i32) as f32;
    let d = (max.z as i32 - min.z as i32) as f32;
    2.0 * (w * h + w * d + h * d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout() {
        assert_eq!(std::mem::size_of::<Node>(), 24);
    }

    #[test]
    fn area() {
        let a = surface_area(QuantizedVec3::splat(0), QuantizedVec3::new(1, 2, 3));
        assert_eq!(a, 22.0);
        let flat = surface_area(QuantizedVec3::splat(4), QuantizedVec3::new(4, 10, 10));
        assert_eq!(flat, 72.0);
        assert_eq!(surface_area(QuantizedVec3::splat(7), QuantizedVec3::splat(7)), 0.0);
    }

    #[test]
    fn leaf_flag() {
        assert!(Node::leaf(3, 2).is_leaf());
        assert_eq!(Node::leaf(3, 2).range(), 3..5);
        assert!(!Node::default().is_leaf());
    }
}
