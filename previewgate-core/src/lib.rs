//! Domain logic for the preview/thumbnail gateway: geometry, raster and
//! PDF codecs, request validation, and the upstream clients. Holds no
//! transport or configuration concerns — those live in the `previewgate`
//! binary crate.

pub mod blob;
pub mod error;
pub mod geometry;
pub mod model;
pub mod office;
pub mod pdf;
pub mod raster;
pub mod validate;

pub use error::{CoreResult, PipelineError};
pub use model::{
    AreaSpec, CropAnchor, Fingerprint, Mode, OutFormat, PageRange, Quality, RasterRequest,
    ServiceType, Shape,
};
