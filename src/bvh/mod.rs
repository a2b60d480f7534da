pub mod node;
pub mod tree;
pub mod triangle;
pub use node::Node;
pub use tree::{BuildStats, BvhConfig, Tree, BINS};
pub use triangle::{write_in_order, RaytraceTriangle};
