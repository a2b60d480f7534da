use crate::bvh::node::{surface_area, Node};
use crate::cache::{CachedTriangle, Object, QuantizedVec3};

pub const BINS: usize = 16;
/// Centroid spread (in quantized units) below which a node is not worth splitting.
const MIN_SPLIT_EXTENT: f32 = 1e-4;
/// Keeps the top centroid strictly inside the last bin.
const BIN_SCALE_OFFSET: f32 = 0.1;

/// Termination limits for the recursive split.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BvhConfig {
    pub max_depth: u32,
    pub min_triangles_per_leaf: u32,
}

impl Default for BvhConfig {
    fn default() -> Self {
        Self {
            max_depth: 32,
            min_triangles_per_leaf: 2,
        }
    }
}

/// Summary of a finished build.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub node_count: usize,
    pub leaf_count: usize,
    /// Depth of the deepest node, root is 0.
    pub max_depth: u32,
}

#[derive(Debug, Copy, Clone)]
struct Bounds {
    min: QuantizedVec3,
    max: QuantizedVec3,
}

impl Bounds {
    const EMPTY: Self = Self {
        min: QuantizedVec3::MAX,
        max: QuantizedVec3::MIN,
    };

    fn grow(&mut self, p: QuantizedVec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    fn area(&self) -> f32 {
        surface_area(self.min, self.max)
    }

    /// Axis with the largest span; y and z only win when strictly larger.
    fn widest_axis(&self) -> (usize, i32) {
        let span = |axis| self.max.axis(axis) as i32 - self.min.axis(axis) as i32;
        let extent = [span(0), span(1), span(2)];
        let mut axis = 0;
        if extent[1] > extent[0] {
            axis = 1;
        }
        if extent[2] > extent[0] && extent[2] > extent[1] {
            axis = 2;
        }
        (axis, extent[axis])
    }
}

#[derive(Debug, Copy, Clone)]
struct Bin {
    bounds: Bounds,
    count: u32,
}

impl Bin {
    const EMPTY: Self = Self {
        bounds: Bounds::EMPTY,
        count: 0,
    };

    fn add(&mut self, tri: &CachedTriangle) {
        self.count += 1;
        self.bounds.grow(tri.min);
        // max is the latest triangle's max, not a running maximum.
        self.bounds.max = tri.max;
    }
}

fn bin_index(value: u16, origin: u16, scale: f32) -> usize {
    ((value.saturating_sub(origin) as f32 * scale) as usize).min(BINS - 1)
}

/// Best boundary `i` (bins `0..=i` go left) and its SAH cost.
fn best_split(bins: &[Bin; BINS]) -> Option<(usize, f32)> {
    let mut left_area = [0.0; BINS - 1];
    let mut left_count = [0; BINS - 1];
    let mut right_area = [0.0; BINS - 1];
    let mut right_count = [0; BINS - 1];

    let mut acc = Bounds::EMPTY;
    let mut count = 0;
    for i in 0..BINS - 1 {
        let bin = &bins[i];
        count += bin.count;
        if bin.count > 0 {
            acc.grow(bin.bounds.min);
            acc.grow(bin.bounds.max);
        }
        left_area[i] = acc.area();
        left_count[i] = count;
    }

    acc = Bounds::EMPTY;
    count = 0;
    for i in (0..BINS - 1).rev() {
        let bin = &bins[i + 1];
        count += bin.count;
        if bin.count > 0 {
            acc.grow(bin.bounds.min);
            acc.grow(bin.bounds.max);
        }
        right_area[i] = acc.area();
        right_count[i] = count;
    }

    let mut best = None;
    let mut min_cost = f32::MAX;
    for i in 0..BINS - 1 {
        let cost = left_count[i] as f32 * left_area[i] + right_count[i] as f32 * right_area[i];
        if cost < min_cost {
            min_cost = cost;
            best = Some(i);
        }
    }
    best.map(|i| (i, min_cost))
}

/// Moves every element matching `pred` to the front, returns how many matched.
fn partition<T>(slice: &mut [T], mut pred: impl FnMut(&T) -> bool) -> usize {
    let mut first = 0;
    for i in 0..slice.len() {
        if pred(&slice[i]) {
            slice.swap(first, i);
            first += 1;
        }
    }
    first
}

/// Binned-SAH BVH over a quantized triangle cache.
///
/// Triangles are never moved; `indices` is the permutation that makes every leaf
/// range contiguous. Node 0 is the root.
#[derive(Debug, Default, Clone)]
pub struct Tree {
    pub nodes: Vec<Node>,
    pub indices: Vec<u32>,
    pub stats: BuildStats,
}

impl From<&Object> for Tree {
    fn from(object: &Object) -> Self {
        Self::build(object)
    }
}

impl Tree {
    pub fn build(object: &Object) -> Self {
        Self::build_with(object, &BvhConfig::default())
    }

    pub fn build_with(object: &Object, config: &BvhConfig) -> Self {
        if object.mesh.is_empty() {
            return Self::default();
        }
        let n = object.mesh.len();
        let mut builder = Builder {
            mesh: &object.mesh,
            config,
            nodes: Vec::with_capacity(n * 2),
            indices: (0..n as u32).collect(),
            max_depth: 0,
        };
        builder.nodes.push(Node::leaf(0, n as u32));
        builder.split(0, 0);

        let stats = BuildStats {
            node_count: builder.nodes.len(),
            leaf_count: builder.nodes.iter().filter(|n| n.is_leaf()).count(),
            max_depth: builder.max_depth,
        };
        log::info!(
            "BVH generated: {} nodes ({} leaves), depth {}",
            stats.node_count,
            stats.leaf_count,
            stats.max_depth
        );
        Self {
            nodes: builder.nodes,
            indices: builder.indices,
            stats,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }
    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_leaf())
    }
    /// Triangle ids stored in a leaf, in index-array order.
    pub fn leaf_triangles(&self, leaf: &Node) -> &[u32] {
        &self.indices[leaf.range()]
    }
}

struct Builder<'a> {
    mesh: &'a [CachedTriangle],
    config: &'a BvhConfig,
    nodes: Vec<Node>,
    indices: Vec<u32>,
    max_depth: u32,
}

impl Builder<'_> {
    /// Nodes are only ever addressed by index here: pushing children may reallocate.
    fn split(&mut self, node_idx: usize, depth: u32) {
        self.max_depth = self.max_depth.max(depth);
        let Node {
            left_first: first,
            tri_count: count,
            ..
        } = self.nodes[node_idx];
        let range = first as usize..(first + count) as usize;
        let mesh = self.mesh;

        let mut aabb = Bounds::EMPTY;
        for &i in &self.indices[range.clone()] {
            let tri = &mesh[i as usize];
            aabb.grow(tri.min);
            aabb.grow(tri.max);
        }
        let node = &mut self.nodes[node_idx];
        node.aabb_min = aabb.min;
        node.aabb_max = aabb.max;

        if depth >= self.config.max_depth || count <= self.config.min_triangles_per_leaf {
            return;
        }

        let mut centroids = Bounds::EMPTY;
        for &i in &self.indices[range.clone()] {
            centroids.grow(mesh[i as usize].centroid);
        }
        let (axis, extent) = centroids.widest_axis();
        if (extent as f32) < MIN_SPLIT_EXTENT {
            return;
        }

        let origin = centroids.min.axis(axis);
        let scale = BINS as f32 / (extent as f32 + BIN_SCALE_OFFSET);
        let bin_of = |tri: &CachedTriangle| bin_index(tri.centroid.axis(axis), origin, scale);

        let mut bins = [Bin::EMPTY; BINS];
        for &i in &self.indices[range.clone()] {
            let tri = &mesh[i as usize];
            bins[bin_of(tri)].add(tri);
        }

        let Some((split, split_cost)) = best_split(&bins) else {
            return;
        };
        let leaf_cost = count as f32 * aabb.area();
        if split_cost >= leaf_cost {
            return;
        }

        let left = partition(&mut self.indices[range], |&i| {
            bin_of(&mesh[i as usize]) <= split
        }) as u32;
        if left == 0 || left == count {
            log::trace!(
                "rejected one-sided split of node {node_idx} ({count} triangles, axis {axis})"
            );
            return;
        }

        let left_child = self.nodes.len();
        self.nodes.push(Node::leaf(first, left));
        self.nodes.push(Node::leaf(first + left, count - left));
        let node = &mut self.nodes[node_idx];
        node.left_first = left_child as u32;
        node.tri_count = 0;

        self.split(left_child, depth + 1);
        self.split(left_child + 1, depth + 1);
    }
}
