//! Animated GIF handling (§4.2): every frame is decoded, resized with the
//! geometry plan computed from the first frame, and re-encoded with its
//! original delay preserved. Single-frame GIFs fall through to the
//! ordinary still-image path in [`super::codec`].

use image::codecs::gif::{GifDecoder, GifEncoder, Repeat};
use image::{AnimationDecoder, DynamicImage, Frame, GenericImageView as _};

use super::codec::{apply_plan, apply_shape, choose_plan, quality_to_gif_speed, Working};
use crate::geometry::resolve_targets;
use crate::model::RasterRequest;

/// Returns `Some(encoded_bytes)` when `input` decodes as a GIF with more
/// than one frame; `None` otherwise, so the caller falls back to treating
/// it as a still image (covers non-GIF input and single-frame GIFs).
pub(crate) fn try_encode_animated(
    input: &[u8],
    req: &RasterRequest,
    min_resolution: u32,
) -> Option<Vec<u8>> {
    let decoder = GifDecoder::new(std::io::Cursor::new(input)).ok()?;
    let frames = decoder.into_frames().collect_frames().ok()?;
    if frames.len() <= 1 {
        return None;
    }

    let orig = frames[0].buffer().dimensions();
    let target = resolve_targets(orig, (req.area.width, req.area.height), min_resolution);
    let plan = choose_plan(req, orig, target, min_resolution);

    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut buf, quality_to_gif_speed(req.quality));
        // The original's frames rarely loop a fixed number of times in
        // practice; repeat forever, matching how the source GIF is
        // displayed by default in most viewers.
        encoder.set_repeat(Repeat::Infinite).ok()?;

        for frame in &frames {
            let delay = frame.delay();
            let dynamic = DynamicImage::ImageRgba8(frame.buffer().clone());
            let canvas = apply_plan(&dynamic, &plan, req.crop_anchor);
            let rgba = match apply_shape(canvas, req) {
                Working::Rgba(img) => img,
                Working::Rgb(img) => DynamicImage::ImageRgb8(img).to_rgba8(),
            };
            encoder.encode_frame(Frame::from_parts(rgba, 0, 0, delay)).ok()?;
        }
    }
    Some(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AreaSpec, OutFormat, Quality};
    use image::{Delay, Rgba, RgbaImage};

    fn two_frame_gif(w: u32, h: u32) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut buf);
            for color in [[255, 0, 0, 255], [0, 255, 0, 255]] {
                let frame = RgbaImage::from_pixel(w, h, Rgba(color));
                encoder
                    .encode_frame(Frame::from_parts(frame, 0, 0, Delay::from_numer_denom_ms(100, 1)))
                    .unwrap();
            }
        }
        buf
    }

    #[test]
    fn preserves_frame_count_and_applies_geometry() {
        let input = two_frame_gif(40, 40);
        let req = RasterRequest::preview(
            AreaSpec {
                width: 20,
                height: 20,
            },
            Quality::Medium,
            OutFormat::Gif,
            false,
        );
        let out = try_encode_animated(&input, &req, 10).expect("animated GIF detected");

        let decoder = GifDecoder::new(std::io::Cursor::new(&out)).unwrap();
        let frames = decoder.into_frames().collect_frames().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].buffer().dimensions(), (20, 20));
    }

    #[test]
    fn single_frame_gif_is_not_treated_as_animated() {
        let mut buf = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut buf);
            let frame = RgbaImage::from_pixel(10, 10, Rgba([1, 2, 3, 255]));
            encoder.encode_frame(Frame::new(frame)).unwrap();
        }
        let req = RasterRequest::preview(
            AreaSpec {
                width: 10,
                height: 10,
            },
            Quality::Medium,
            OutFormat::Gif,
            false,
        );
        assert!(try_encode_animated(&buf, &req, 5).is_none());
    }
}
