//! PDF engine (§4.3): page-range splitting and single-page rasterization.
//!
//! `split` never fails: a malformed or encrypted input degrades to an
//! empty-but-valid document or a pass-through, respectively, because a
//! PDF response is always expected downstream. `rasterize` is the one
//! place in the pipeline that surfaces `InvalidInput` instead of a
//! placeholder — there is no sensible placeholder for "a PDF page".

use lopdf::{dictionary, Document, Object};
use mupdf::{Colorspace, Matrix};

use crate::error::{messages, CoreResult, PipelineError};
use crate::model::OutFormat;

/// `split(pdfBytes, first, last)` (§4.3). `first`/`last` are 1-based and
/// inclusive; `last == 0` means "to the end of the document".
#[must_use]
pub fn split(pdf_bytes: &[u8], first: u32, last: u32) -> Vec<u8> {
    let Ok(mut doc) = Document::load_mem(pdf_bytes) else {
        return empty_pdf();
    };

    if is_encrypted(&doc) {
        return pdf_bytes.to_vec();
    }

    let pages = doc.get_pages();
    let total = pages.len() as u32;
    let end = if last > 0 { last.min(total) } else { total };

    if first == 1 && end == total {
        return pdf_bytes.to_vec();
    }

    let to_delete: Vec<u32> = pages
        .keys()
        .copied()
        .filter(|&page_number| page_number < first || page_number > end)
        .collect();
    doc.delete_pages(&to_delete);

    let mut buf = Vec::new();
    if doc.save_to(&mut buf).is_err() {
        return empty_pdf();
    }
    buf
}

fn is_encrypted(doc: &Document) -> bool {
    doc.trailer.get(b"Encrypt").is_ok()
}

/// A zero-page, syntactically valid PDF, used whenever `split` cannot
/// produce a real subset (§4.3 "invalid input" fallback).
fn empty_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => Object::Array(vec![]),
            "Count" => 0,
        }),
    );
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    let _ = doc.save_to(&mut buf);
    buf
}

/// `rasterize(pdfBytes, pageIndex, outFormat)` (§4.3): renders at the
/// engine's native resolution — any further scaling happens in
/// [`crate::raster::encode_raster`] afterwards.
pub fn rasterize(pdf_bytes: &[u8], page_index: u32, out_format: OutFormat) -> CoreResult<Vec<u8>> {
    let doc = mupdf::Document::from_bytes(pdf_bytes, "pdf")
        .map_err(|_| PipelineError::InvalidInput(messages::INPUT_ERROR.to_string()))?;
    let page = doc
        .load_page(page_index as i32)
        .map_err(|_| PipelineError::InvalidInput(messages::INPUT_ERROR.to_string()))?;

    let pixmap = page
        .to_pixmap(&Matrix::IDENTITY, &Colorspace::device_rgb(), true, false)
        .map_err(|_| PipelineError::InvalidInput(messages::INPUT_ERROR.to_string()))?;

    let rgba = pixmap_to_rgba(&pixmap)
        .ok_or_else(|| PipelineError::InvalidInput(messages::INPUT_ERROR.to_string()))?;

    let dynamic = image::DynamicImage::ImageRgba8(rgba);
    let mut buf = Vec::new();
    let format = match out_format {
        OutFormat::Jpeg => image::ImageFormat::Jpeg,
        OutFormat::Png => image::ImageFormat::Png,
        OutFormat::Gif => image::ImageFormat::Gif,
    };
    dynamic
        .write_to(&mut std::io::Cursor::new(&mut buf), format)
        .map_err(|_| PipelineError::InvalidInput(messages::INPUT_ERROR.to_string()))?;
    Ok(buf)
}

fn pixmap_to_rgba(pixmap: &mupdf::Pixmap) -> Option<image::RgbaImage> {
    let width = pixmap.width();
    let height = pixmap.height();
    let samples = pixmap.samples();
    let channels = pixmap.n() as usize;

    let mut buf = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height as usize {
        for x in 0..width as usize {
            let offset = (y * width as usize + x) * channels;
            let r = samples.get(offset).copied().unwrap_or(0);
            let g = samples.get(offset + 1).copied().unwrap_or(0);
            let b = samples.get(offset + 2).copied().unwrap_or(0);
            let a = if channels >= 4 {
                samples.get(offset + 3).copied().unwrap_or(255)
            } else {
                255
            };
            buf.extend_from_slice(&[r, g, b, a]);
        }
    }
    image::RgbaImage::from_raw(width, height, buf)
}
