//! Circular ("rounded") thumbnail masking (§4.2).
//!
//! JPEG/GIF have no alpha channel, so the masked area is painted opaque
//! black (mirroring the original's `paste(0, mask=...)` behavior). PNG
//! keeps the alpha channel and gets a Gaussian-blurred edge instead of a
//! hard one.

use image::imageops::blur;
use image::{GrayImage, Luma, Rgb, RgbImage, RgbaImage};
use imageproc::drawing::draw_filled_ellipse_mut;
use imageproc::point::Point;

/// Paints everything outside the inscribed ellipse opaque black. Used for
/// formats without an alpha channel (JPEG, GIF).
#[must_use]
pub fn hard_ellipse_mask_opaque(img: &RgbImage) -> RgbImage {
    let (w, h) = img.dimensions();
    let mask = ellipse_mask(w, h, 0);
    let mut out = img.clone();
    for (x, y, px) in out.enumerate_pixels_mut() {
        if mask.get_pixel(x, y).0[0] == 0 {
            *px = Rgb([0, 0, 0]);
        }
    }
    out
}

/// Composes a blurred-edge elliptical alpha mask onto `img`'s alpha
/// channel, preserving color data everywhere (§4.2 PNG output).
#[must_use]
pub fn blurred_ellipse_mask_alpha(img: &RgbaImage, blur_radius: f32) -> RgbaImage {
    let (w, h) = img.dimensions();
    let offset = (blur_radius * 2.0) as i32;
    let mask = ellipse_mask(w, h, offset);
    let mask = blur(&mask, blur_radius);

    let mut out = img.clone();
    for (x, y, px) in out.enumerate_pixels_mut() {
        let a = mask.get_pixel(x, y).0[0];
        px.0[3] = ((u32::from(px.0[3]) * u32::from(a)) / 255) as u8;
    }
    out
}

/// A grayscale mask, white (255) inside the ellipse inscribed in
/// `(offset, offset, w - offset, h - offset)`, black (0) outside.
fn ellipse_mask(w: u32, h: u32, offset: i32) -> GrayImage {
    let mut mask = GrayImage::from_pixel(w, h, Luma([0]));
    let cx = w as i32 / 2;
    let cy = h as i32 / 2;
    let rx = (w as i32 / 2 - offset).max(0);
    let ry = (h as i32 / 2 - offset).max(0);
    draw_filled_ellipse_mut(&mut mask, Point::new(cx, cy), rx, ry, Luma([255]));
    mask
}
