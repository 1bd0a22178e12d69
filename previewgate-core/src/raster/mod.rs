//! The raster pipeline (§4.2): decode → geometry → mask → encode.

mod codec;
mod gif;
mod mask;
mod orientation;

pub use codec::encode_raster;
