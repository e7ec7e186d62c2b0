//! Client side of the reasoning backend: the `Backend` seam and its HTTP
//! implementation.

pub mod backend;
pub mod decode;
pub mod http;

pub use backend::*;
pub use decode::*;
pub use http::*;
