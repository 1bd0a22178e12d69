//! Decode → geometry → mask → encode (§4.2).
//!
//! [`encode_raster`] never returns an error: a decode failure produces a
//! deterministic `R x R` black RGB image instead (§4.2 "Invalid-input
//! policy"), so the endpoint always answers with the declared media type.

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView as _, Rgb, RgbImage, RgbaImage};

use super::gif as gif_anim;
use super::mask;
use super::orientation::auto_orient;
use crate::geometry::{self, CropBox, ResizePlan};
use crate::model::{CropAnchor, Mode, OutFormat, Quality, RasterRequest, Shape};

/// The padded-canvas working image, either opaque (no rounded PNG mask
/// applied yet) or already alpha-masked.
pub(crate) enum Working {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

/// Runs the full pipeline for one input buffer and request.
#[must_use]
pub fn encode_raster(input: &[u8], req: RasterRequest, min_resolution: u32) -> Vec<u8> {
    if let Some(bytes) = gif_anim::try_encode_animated(input, &req, min_resolution) {
        return bytes;
    }

    let img = decode_or_fallback(input, min_resolution);
    let img = auto_orient(input, img);
    let orig = img.dimensions();
    let target = geometry::resolve_targets(
        orig,
        (req.area.width, req.area.height),
        min_resolution,
    );
    let plan = choose_plan(&req, orig, target, min_resolution);
    let canvas = apply_plan(&img, &plan, req.crop_anchor);
    let working = apply_shape(canvas, &req);
    encode_to_format(working, req.out_format, req.quality)
}

fn decode_or_fallback(input: &[u8], min_resolution: u32) -> DynamicImage {
    image::load_from_memory(input).unwrap_or_else(|_| fallback_image(min_resolution))
}

/// An opaque `R x R` zero-filled RGB image (§4.2 fallback).
pub(crate) fn fallback_image(r: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(r.max(1), r.max(1), Rgb([0, 0, 0])))
}

/// Picks the resize-with-crop or pad-only policy per §4.1: THUMBNAIL (and
/// PREVIEW with `crop = true`) crops; PREVIEW without crop only pads.
pub(crate) fn choose_plan(
    req: &RasterRequest,
    orig: (u32, u32),
    target: (u32, u32),
    r: u32,
) -> ResizePlan {
    let crops = req.mode == Mode::Thumbnail || req.crop;
    if crops {
        geometry::plan_resize_with_crop(orig, target, r, req.crop_anchor)
    } else {
        geometry::plan_resize_with_pad(orig, target, r)
    }
}

/// Scales, optionally crops, then pads onto an opaque RGB canvas (§4.1
/// "Pad": always an opaque RGB canvas regardless of output format).
pub(crate) fn apply_plan(img: &DynamicImage, plan: &ResizePlan, anchor: CropAnchor) -> RgbImage {
    let _ = anchor; // anchor is already baked into plan.crop by the caller
    let resized = if plan.scaled_size == img.dimensions() {
        img.to_rgb8()
    } else {
        img.resize_exact(plan.scaled_size.0, plan.scaled_size.1, FilterType::Lanczos3)
            .to_rgb8()
    };

    let content = match plan.crop {
        Some(CropBox {
            left,
            upper,
            width,
            height,
        }) => image::imageops::crop_imm(&resized, left, upper, width, height).to_image(),
        None => resized,
    };

    let mut canvas = RgbImage::from_pixel(plan.canvas.0, plan.canvas.1, Rgb([0, 0, 0]));
    let (ox, oy) = geometry::pad_offset(plan.canvas, content.dimensions());
    image::imageops::overlay(&mut canvas, &content, i64::from(ox), i64::from(oy));
    canvas
}

/// Applies circular masking when `mode == Thumbnail` and `shape ==
/// Rounded` (§9 "Shape/crop matrix" — never for PREVIEW).
pub(crate) fn apply_shape(canvas: RgbImage, req: &RasterRequest) -> Working {
    if req.mode == Mode::Thumbnail && req.shape == Some(Shape::Rounded) {
        match req.out_format {
            OutFormat::Png => {
                let rgba = DynamicImage::ImageRgb8(canvas).to_rgba8();
                Working::Rgba(mask::blurred_ellipse_mask_alpha(&rgba, 2.0))
            }
            OutFormat::Jpeg | OutFormat::Gif => Working::Rgb(mask::hard_ellipse_mask_opaque(&canvas)),
        }
    } else {
        Working::Rgb(canvas)
    }
}

fn encode_to_format(working: Working, fmt: OutFormat, quality: Quality) -> Vec<u8> {
    match fmt {
        OutFormat::Jpeg => encode_jpeg(&to_rgb(working), quality),
        OutFormat::Png => match working {
            Working::Rgb(img) => encode_png(&DynamicImage::ImageRgb8(img)),
            Working::Rgba(img) => encode_png(&DynamicImage::ImageRgba8(img)),
        },
        OutFormat::Gif => encode_gif(&to_rgb(working), quality),
    }
}

fn to_rgb(working: Working) -> RgbImage {
    match working {
        Working::Rgb(img) => img,
        // JPEG/GIF have no alpha channel; an alpha-masked working image
        // only ever arises for PNG output, but stay defensive (§4.2
        // "if the working image has an alpha channel ... converted to
        // opaque RGB first").
        Working::Rgba(img) => DynamicImage::ImageRgba8(img).to_rgb8(),
    }
}

fn encode_jpeg(img: &RgbImage, quality: Quality) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality.encoder_value().max(1));
    encoder
        .encode_image(img)
        .expect("encoding a well-formed in-memory RGB buffer cannot fail");
    buf
}

fn encode_png(img: &DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("encoding a well-formed in-memory image buffer cannot fail");
    buf
}

fn encode_gif(img: &RgbImage, quality: Quality) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut buf, quality_to_gif_speed(quality));
        let frame = image::Frame::new(DynamicImage::ImageRgb8(img.clone()).to_rgba8());
        encoder
            .encode_frame(frame)
            .expect("encoding a well-formed in-memory RGB buffer cannot fail");
    }
    buf
}

/// Maps the QualityTable's `0..=95` encoder scale onto the GIF encoder's
/// `1..=30` speed scale (1 = slowest/highest quality), since `image`'s
/// GIF encoder has no direct quality knob.
pub(crate) fn quality_to_gif_speed(quality: Quality) -> i32 {
    let v = i32::from(quality.encoder_value());
    (30 - (v * 29 / 95)).clamp(1, 30)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AreaSpec, RasterRequest};

    fn jpeg_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([10, 20, 30])));
        let mut buf = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Jpeg)
            .unwrap();
        buf
    }

    #[test]
    fn floor_invariant_holds_for_tiny_targets() {
        let input = jpeg_bytes(300, 400);
        let req = RasterRequest::preview(
            AreaSpec {
                width: 1,
                height: 1,
            },
            Quality::Medium,
            OutFormat::Png,
            false,
        );
        let out = encode_raster(&input, req, 50);
        let decoded = image::load_from_memory(&out).unwrap();
        assert!(decoded.width() >= 50 && decoded.height() >= 50);
    }

    #[test]
    fn format_fidelity_jpeg() {
        let input = jpeg_bytes(300, 400);
        let req = RasterRequest::preview(
            AreaSpec {
                width: 100,
                height: 200,
            },
            Quality::Medium,
            OutFormat::Jpeg,
            false,
        );
        let out = encode_raster(&input, req, 10);
        assert_eq!(&out[0..3], &[0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn format_fidelity_png() {
        let input = jpeg_bytes(300, 400);
        let req = RasterRequest::preview(
            AreaSpec {
                width: 100,
                height: 200,
            },
            Quality::Medium,
            OutFormat::Png,
            false,
        );
        let out = encode_raster(&input, req, 10);
        assert_eq!(&out[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn invalid_input_falls_back_to_opaque_floor_image() {
        let out = encode_raster(
            b"not an image",
            RasterRequest::preview(
                AreaSpec {
                    width: 0,
                    height: 0,
                },
                Quality::Medium,
                OutFormat::Png,
                false,
            ),
            32,
        );
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 32));
    }

    #[test]
    fn preview_scenario_pads_to_requested_dimensions() {
        // scenario 1 from §8: 300x400 -> 100x200 padded preview, crop=false.
        let input = jpeg_bytes(300, 400);
        let req = RasterRequest::preview(
            AreaSpec {
                width: 100,
                height: 200,
            },
            Quality::Medium,
            OutFormat::Jpeg,
            false,
        );
        let out = encode_raster(&input, req, 50);
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 200));
    }

    #[test]
    fn rounded_png_thumbnail_gets_an_alpha_channel() {
        let input = jpeg_bytes(200, 200);
        let req = RasterRequest::thumbnail(
            AreaSpec {
                width: 50,
                height: 50,
            },
            Quality::Medium,
            OutFormat::Png,
            Some(Shape::Rounded),
            CropAnchor::Center,
        );
        let out = encode_raster(&input, req, 10);
        let decoded = image::load_from_memory(&out).unwrap();
        assert!(decoded.color().has_alpha());
        let rgba = decoded.to_rgba8();
        assert!(rgba.get_pixel(0, 0).0[3] < rgba.get_pixel(25, 25).0[3]);
    }
}
