//! EXIF auto-orientation (SPEC_FULL §10.7), applied to every raster
//! decode except GIF frames (§4.2 — animation frames inherit the
//! decoder's orientation unchanged).

use image::DynamicImage;

/// Reads the EXIF `Orientation` tag (if any) from the raw source bytes.
fn read_orientation(raw: &[u8]) -> Option<u16> {
    let mut cursor = std::io::Cursor::new(raw);
    let exif = exif::Reader::new()
        .read_from_container(&mut cursor)
        .ok()?;
    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    match &field.value {
        exif::Value::Short(values) => values.first().copied(),
        _ => None,
    }
}

/// Applies the 8 standard EXIF orientation transforms to `img`, reading
/// the tag from `raw` (the original encoded bytes, not the decoded
/// image).
#[must_use]
pub fn auto_orient(raw: &[u8], img: DynamicImage) -> DynamicImage {
    match read_orientation(raw) {
        Some(2) => img.fliph(),
        Some(3) => img.rotate180(),
        Some(4) => img.flipv(),
        Some(5) => img.rotate90().fliph(),
        Some(6) => img.rotate90(),
        Some(7) => img.rotate270().fliph(),
        Some(8) => img.rotate270(),
        _ => img,
    }
}
