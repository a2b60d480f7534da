//! Turns raw triangle soup into a quantized triangle cache plus a binned-SAH BVH,
//! both laid out for direct upload to GPU buffers.

pub mod bvh;
pub mod cache;
pub mod config;
mod error;
pub mod geometry;
pub mod pipeline;

pub use bvh::{write_in_order, BuildStats, BvhConfig, Node, RaytraceTriangle, Tree};
pub use cache::{CachedTriangle, Object, PackedNormal, QuantizedVec3, Quantizer};
pub use config::Config;
pub use error::{Error, Result};
pub use geometry::{Mesh, MeshBounds, Triangle};
pub use pipeline::{build_model, LoadTask, Model};
