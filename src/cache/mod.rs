//! Quantized triangle cache: 16-bit positions and octahedral normals.

mod normal;
mod object;
mod quantize;
pub use normal::PackedNormal;
pub use object::{CachedTriangle, Object};
pub use quantize::{QuantizedVec3, Quantizer, QUANT_MAX};
