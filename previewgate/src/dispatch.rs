//! Shared application state and the glue between HTTP handlers and the
//! pipelines in `previewgate_core` — the sole place request parameters are
//! turned into domain types and upstream calls are composed (§4.7).

use std::time::Duration;

use previewgate_core::{
    blob, office, pdf, raster, validate, CoreResult, CropAnchor, Fingerprint, OutFormat,
    PageRange, PipelineError, Quality, RasterRequest, ServiceType, Shape,
};
use serde::Deserialize;

use crate::config::Config;

pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn min_resolution(&self) -> u32 {
        self.config.image_constants.minimum_resolution
    }

    fn blob_base(&self) -> String {
        format!(
            "{}://{}:{}",
            self.config.storage.protocol, self.config.storage.ip, self.config.storage.port
        )
    }

    pub fn blob_url(&self, fingerprint: Fingerprint) -> String {
        blob::build_url(
            &self.blob_base(),
            &self.config.storage.download_api,
            fingerprint,
        )
    }

    pub fn storage_health_url(&self) -> String {
        format!("{}/{}", self.blob_base(), self.config.storage.health_check)
    }

    fn converter_base(&self) -> String {
        format!(
            "{}://{}:{}/{}",
            self.config.document_conversion.protocol,
            self.config.document_conversion.ip,
            self.config.document_conversion.port,
            self.config.document_conversion.service_endpoint
        )
    }

    fn convert_api_base(&self) -> String {
        format!(
            "{}/{}",
            self.converter_base(),
            self.config.document_conversion.convert_api
        )
    }

    pub fn converter_health_url(&self) -> String {
        self.converter_base()
    }

    pub fn documents_enabled(&self) -> bool {
        self.config.service.enable_document_preview || self.config.service.enable_document_thumbnail
    }
}

// ---- query parameter shapes -----------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub crop: Option<bool>,
    pub quality: Option<String>,
    pub output_format: Option<String>,
    pub service_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ThumbnailQuery {
    pub shape: Option<String>,
    pub quality: Option<String>,
    pub output_format: Option<String>,
    pub service_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PdfRangeQuery {
    pub first_page: Option<u32>,
    pub last_page: Option<u32>,
    pub service_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceTypeQuery {
    pub service_type: Option<String>,
}

// ---- parameter parsing -----------------------------------------------------

pub fn fingerprint(id: &str, ver: &str, service_type: Option<&str>) -> CoreResult<Fingerprint> {
    Ok(Fingerprint {
        identifier: validate::parse_uuid(id)?,
        version: validate::parse_version(ver)?,
        owner: validate::parse_enum::<ServiceType>(service_type.unwrap_or("files"))?,
    })
}

pub fn page_range(q: &PdfRangeQuery) -> CoreResult<PageRange> {
    validate::parse_page_range(q.first_page.unwrap_or(1), q.last_page.unwrap_or(0))
}

pub fn preview_request(area_raw: &str, q: &PreviewQuery) -> CoreResult<RasterRequest> {
    let area = validate::parse_area(area_raw)?;
    let quality = validate::parse_enum::<Quality>(q.quality.as_deref().unwrap_or("medium"))?;
    let out_format =
        validate::parse_enum::<OutFormat>(q.output_format.as_deref().unwrap_or("jpeg"))?;
    let crop = q.crop.unwrap_or(false);
    Ok(RasterRequest::preview(area, quality, out_format, crop))
}

pub fn thumbnail_request(
    area_raw: &str,
    q: &ThumbnailQuery,
    crop_anchor: CropAnchor,
) -> CoreResult<RasterRequest> {
    let area = validate::parse_area(area_raw)?;
    let quality = validate::parse_enum::<Quality>(q.quality.as_deref().unwrap_or("medium"))?;
    let out_format =
        validate::parse_enum::<OutFormat>(q.output_format.as_deref().unwrap_or("jpeg"))?;
    let shape = validate::parse_enum::<Shape>(q.shape.as_deref().unwrap_or("rectangular"))?;
    Ok(RasterRequest::thumbnail(
        area,
        quality,
        out_format,
        Some(shape),
        crop_anchor,
    ))
}

/// Logs a DEBUG line when the upload's declared `Content-Type` doesn't
/// match the family the route expects. Never rejects the upload (§10.7).
pub fn sniff_content_type(req: &actix_web::HttpRequest, expected_prefix: &str) {
    let declared = req.content_type();
    if !declared.is_empty() && !declared.starts_with(expected_prefix) {
        tracing::debug!(
            declared,
            expected = expected_prefix,
            "upload content-type does not match the route's expected family"
        );
    }
}

// ---- pipeline composition ---------------------------------------------------

/// Fixed per §5 — the blob fetch's timeout is not configurable.
const BLOB_FETCH_TIMEOUT: Duration = Duration::from_secs(60);

pub async fn fetch_source(state: &AppState, fp: Fingerprint) -> CoreResult<Vec<u8>> {
    blob::fetch(&state.http, &state.blob_url(fp), BLOB_FETCH_TIMEOUT).await
}

pub fn render_image(bytes: &[u8], req: RasterRequest, min_resolution: u32) -> Vec<u8> {
    raster::encode_raster(bytes, req, min_resolution)
}

pub fn split_pdf(bytes: &[u8], range: PageRange) -> Vec<u8> {
    pdf::split(bytes, range.first, range.last)
}

async fn convert_to_pdf(state: &AppState, source: Vec<u8>) -> Vec<u8> {
    let timeout = Duration::from_secs(state.config.service.docs_timeout_seconds);
    office::convert(&state.http, &state.convert_api_base(), "pdf", timeout, source).await
}

/// Document preview (§4.7): convert to PDF, then pass through the PDF
/// engine with the identity page range.
pub async fn document_preview(state: &AppState, source: Vec<u8>) -> Vec<u8> {
    let pdf_bytes = convert_to_pdf(state, source).await;
    pdf::split(&pdf_bytes, 1, 0)
}

/// Document thumbnail (§4.7): convert to PDF, rasterize its first page,
/// then run the raster codec's thumbnail pipeline over that page image.
pub async fn document_thumbnail(
    state: &AppState,
    source: Vec<u8>,
    req: RasterRequest,
) -> CoreResult<Vec<u8>> {
    let pdf_bytes = convert_to_pdf(state, source).await;
    pdf_thumbnail(state, &pdf_bytes, req)
}

/// PDF thumbnail (§4.7): rasterize the first page, then run the raster
/// codec's thumbnail pipeline over that page image.
pub fn pdf_thumbnail(state: &AppState, pdf_bytes: &[u8], req: RasterRequest) -> CoreResult<Vec<u8>> {
    let page_bytes = pdf::rasterize(pdf_bytes, 0, req.out_format)?;
    Ok(render_image(&page_bytes, req, state.min_resolution()))
}

pub fn disabled_preview() -> PipelineError {
    PipelineError::DocPreviewDisabled
}

pub fn disabled_thumbnail() -> PipelineError {
    PipelineError::DocThumbnailDisabled
}
