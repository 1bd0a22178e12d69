//! Geometry solver (§4.1) — pure functions over integer dimensions.
//!
//! Nothing here touches pixels; [`crate::raster::codec`] is the only
//! consumer and owns all decode/resize/encode work.

use crate::model::CropAnchor;

/// `resolveTargets(orig, req, R)` (§4.1).
#[must_use]
pub fn resolve_targets(orig: (u32, u32), req: (u32, u32), r: u32) -> (u32, u32) {
    let (ow, oh) = orig;
    let (rw, rh) = req;

    let mut tx = if rw == 0 { ow } else { rw };
    let mut ty = if rh == 0 { oh } else { rh };

    if tx < r {
        tx = r;
    }
    if ty < r {
        ty = r;
    }

    if ow < r && tx / 2 > ow {
        tx = r;
    }
    if oh < r && ty / 2 > oh {
        ty = r;
    }

    (tx, ty)
}

/// The smallest `(nw, nh)` with `nw >= tx`, `nh >= ty`, aspect preserved
/// from `(ow, oh)`. Used when crop+pad scales an original that is "large
/// enough" (§4.1 resize policy).
#[must_use]
pub fn scale_up(orig: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (ow, oh) = (orig.0 as u64, orig.1 as u64);
    let (tx, ty) = (target.0 as u64, target.1 as u64);

    // original_ratio = ow/oh, new_ratio = tx/ty; compare via cross
    // multiplication to stay in integer arithmetic.
    if tx * oh == ty * ow {
        return target;
    }
    if tx * oh > ty * ow {
        (target.0, (tx * oh / ow) as u32)
    } else {
        ((ty * ow / oh) as u32, target.1)
    }
}

/// The largest `(nw, nh)` with `nw <= tx`, `nh <= ty`, aspect preserved
/// from `(ow, oh)` (§4.1).
#[must_use]
pub fn scale_down(orig: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (ow, oh) = (orig.0 as u64, orig.1 as u64);
    let (tx, ty) = (target.0 as u64, target.1 as u64);

    if tx * oh == ty * ow {
        return target;
    }
    if tx * oh > ty * ow {
        ((ty * ow / oh) as u32, target.1)
    } else {
        (target.0, (tx * oh / ow) as u32)
    }
}

/// A crop rectangle within a `(cw, ch)`-sized image, in (left, upper,
/// width, height) form — `width`/`height` are the spec's `right`/`bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub left: u32,
    pub upper: u32,
    pub width: u32,
    pub height: u32,
}

/// `cropBox(tx, ty, cw, ch, anchor)` (§4.1).
#[must_use]
pub fn crop_box(target: (u32, u32), current: (u32, u32), anchor: CropAnchor) -> CropBox {
    let (tx, ty) = target;
    let (cw, ch) = current;

    let width = if cw > tx { tx } else { cw };
    let height = if ch > ty { ty } else { ch };
    let left = if cw > tx { cw / 2 - tx / 2 } else { 0 };
    let upper = match anchor {
        CropAnchor::Center => {
            if ch > ty {
                ch / 2 - ty / 2
            } else {
                0
            }
        }
        CropAnchor::Top => 0,
    };

    CropBox {
        left,
        upper,
        width,
        height,
    }
}

/// The final padded-canvas size for a given (possibly cropped) image size
/// and target, floored at `R` (§4.1 "Pad").
#[must_use]
pub fn canvas_size(target: (u32, u32), r: u32) -> (u32, u32) {
    (target.0.max(r), target.1.max(r))
}

/// Where, within a `canvas`-sized opaque frame, to paste a `content`-sized
/// image so it is centered with integer-floor offsets (§4.1 "Pad").
#[must_use]
pub fn pad_offset(canvas: (u32, u32), content: (u32, u32)) -> (u32, u32) {
    (
        canvas.0.saturating_sub(content.0) / 2,
        canvas.1.saturating_sub(content.1) / 2,
    )
}

/// The full resize plan for THUMBNAIL and PREVIEW-with-crop requests
/// (§4.1 "Resize policy"). `target` must already be the output of
/// [`resolve_targets`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePlan {
    /// Size the source image should be scaled to before any crop.
    pub scaled_size: (u32, u32),
    /// Crop to apply to the scaled image, if any.
    pub crop: Option<CropBox>,
    /// Final canvas size once padded.
    pub canvas: (u32, u32),
}

#[must_use]
pub fn plan_resize_with_crop(
    orig: (u32, u32),
    target: (u32, u32),
    r: u32,
    anchor: CropAnchor,
) -> ResizePlan {
    let (ow, oh) = orig;
    let (tx, ty) = target;

    if ow >= tx / 2 && oh >= ty / 2 {
        let scaled = scale_up(orig, target);
        let crop = crop_box(target, scaled, anchor);
        ResizePlan {
            scaled_size: scaled,
            crop: Some(crop),
            canvas: canvas_size((crop.width, crop.height), r),
        }
    } else if ow <= tx / 2 && oh <= ty / 2 {
        ResizePlan {
            scaled_size: orig,
            crop: None,
            canvas: canvas_size(target, r),
        }
    } else {
        let scaled = scale_down(orig, target);
        ResizePlan {
            scaled_size: scaled,
            crop: None,
            canvas: canvas_size(target, r),
        }
    }
}

/// The full resize plan for PREVIEW-without-crop requests (§4.1 "Pad
/// policy").
#[must_use]
pub fn plan_resize_with_pad(orig: (u32, u32), target: (u32, u32), r: u32) -> ResizePlan {
    let (ow, oh) = orig;
    let (tx, ty) = target;

    let scaled_size = if ow >= r && ow <= tx / 2 && oh >= r && oh <= ty / 2 {
        orig
    } else {
        scale_down(orig, target)
    };

    ResizePlan {
        scaled_size,
        crop: None,
        canvas: canvas_size(target, r),
    }
}
