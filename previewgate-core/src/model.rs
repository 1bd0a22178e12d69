//! Request-scoped data model (§3).
//!
//! Every entity here is owned by the handler that created it and is
//! released on response completion; nothing is persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The (id, version, owning service) triple used to resolve a blob from
/// the external storage service. Opaque to the core beyond constructing
/// the storage request — never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub identifier: Uuid,
    pub version: u32,
    pub owner: ServiceType,
}

/// `ownerServiceTag` (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Files,
    Chats,
}

impl ServiceType {
    #[must_use]
    pub fn as_wire_str(self) -> &'static str {
        match self {
            Self::Files => "files",
            Self::Chats => "chats",
        }
    }
}

impl std::str::FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "files" => Ok(Self::Files),
            "chats" => Ok(Self::Chats),
            other => Err(format!("unknown service_type '{other}'")),
        }
    }
}

/// A `WxH` area string, parsed per §3. A `0` on either axis means "use
/// the original image's size for that axis".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaSpec {
    pub width: u32,
    pub height: u32,
}

/// Symbolic quality levels, fixed to the QualityTable (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Lowest,
    Low,
    Medium,
    High,
    Highest,
}

impl Quality {
    /// The fixed JPEG/GIF encoder quality integer for this level.
    #[must_use]
    pub fn encoder_value(self) -> u8 {
        match self {
            Self::Lowest => 0,
            Self::Low => 15,
            Self::Medium => 50,
            Self::High => 80,
            Self::Highest => 95,
        }
    }
}

impl std::str::FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lowest" => Ok(Self::Lowest),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "highest" => Ok(Self::Highest),
            other => Err(format!("unknown quality '{other}'")),
        }
    }
}

/// Raster output codec (§3). PDF/office pipelines emit `application/pdf`
/// and are modeled separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutFormat {
    Jpeg,
    Png,
    Gif,
}

impl OutFormat {
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }

    /// The extension the external conversion service is asked to produce.
    /// JPEG and PNG are both sanitized to `png` (§4.4) since the converter
    /// only emits raster via PNG; JPEG re-encoding happens downstream in
    /// the raster codec.
    #[must_use]
    pub fn conversion_extension(self) -> &'static str {
        match self {
            Self::Jpeg | Self::Png => "png",
            Self::Gif => "gif",
        }
    }
}

impl std::str::FromStr for OutFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "gif" => Ok(Self::Gif),
            other => Err(format!("unknown output_format '{other}'")),
        }
    }
}

/// PREVIEW preserves the input's essential shape; THUMBNAIL always crops
/// to a raster image and may mask (§3, GLOSSARY).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Preview,
    Thumbnail,
}

/// Thumbnail masking shape; only meaningful when `mode == Thumbnail` (§9
/// "Shape/crop matrix").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Rectangular,
    Rounded,
}

impl std::str::FromStr for Shape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rectangular" => Ok(Self::Rectangular),
            "rounded" => Ok(Self::Rounded),
            other => Err(format!("unknown shape '{other}'")),
        }
    }
}

/// Where a crop is anchored vertically (§4.1 `cropBox`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropAnchor {
    Top,
    Center,
}

/// A fully validated raster request, ready to hand to the codec (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterRequest {
    pub area: AreaSpec,
    pub quality: Quality,
    pub out_format: OutFormat,
    pub mode: Mode,
    pub shape: Option<Shape>,
    pub crop: bool,
    pub crop_anchor: CropAnchor,
}

impl RasterRequest {
    /// Builds a THUMBNAIL request: always crops, defaults to a CENTER
    /// anchor (§3) unless the caller is a PDF/document thumbnail endpoint,
    /// which uses TOP (§3, §9).
    #[must_use]
    pub fn thumbnail(
        area: AreaSpec,
        quality: Quality,
        out_format: OutFormat,
        shape: Option<Shape>,
        crop_anchor: CropAnchor,
    ) -> Self {
        Self {
            area,
            quality,
            out_format,
            mode: Mode::Thumbnail,
            shape,
            crop: true,
            crop_anchor,
        }
    }

    /// Builds a PREVIEW request. `shape` is never passed for PREVIEW (§9).
    #[must_use]
    pub fn preview(area: AreaSpec, quality: Quality, out_format: OutFormat, crop: bool) -> Self {
        Self {
            area,
            quality,
            out_format,
            mode: Mode::Preview,
            shape: None,
            crop,
            crop_anchor: CropAnchor::Center,
        }
    }
}

/// A validated, one-based, inclusive page range (§3). `last == 0` means
/// "to the end of the document".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub first: u32,
    pub last: u32,
}

impl PageRange {
    /// The default range covering the whole document.
    #[must_use]
    pub const fn whole_document() -> Self {
        Self { first: 1, last: 0 }
    }

    /// True when this range is a full pass-through (§4.3, §8 idempotence).
    #[must_use]
    pub fn is_identity(self) -> bool {
        self.first == 1 && self.last == 0
    }
}
