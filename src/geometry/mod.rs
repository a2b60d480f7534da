mod bounds;
mod mesh;
mod triangle;
pub use bounds::{MeshBounds, MIN_EXTENT};
pub use mesh::Mesh;
pub use triangle::Triangle;
