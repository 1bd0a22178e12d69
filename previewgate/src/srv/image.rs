//! Image preview/thumbnail routes (§6 rows 1-4): fetch-by-fingerprint and
//! upload variants, both funneled through the raster codec.

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use previewgate_core::CropAnchor;

use crate::dispatch::{self, AppState, PreviewQuery, ThumbnailQuery};
use crate::error::ApiError;

#[get("/{id}/{ver}/{area}/")]
pub async fn preview_by_id(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
    query: web::Query<PreviewQuery>,
) -> Result<HttpResponse, ApiError> {
    let (id, ver, area) = path.into_inner();
    let fp = dispatch::fingerprint(&id, &ver, query.service_type.as_deref())?;
    let req = dispatch::preview_request(&area, &query)?;
    let source = dispatch::fetch_source(&state, fp).await?;
    let body = dispatch::render_image(&source, req, state.min_resolution());
    Ok(HttpResponse::Ok()
        .content_type(req.out_format.content_type())
        .body(body))
}

#[post("/{area}/")]
pub async fn preview_from_upload(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PreviewQuery>,
    http_req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    dispatch::sniff_content_type(&http_req, "image/");
    let area = path.into_inner();
    let req = dispatch::preview_request(&area, &query)?;
    let out = dispatch::render_image(&body, req, state.min_resolution());
    Ok(HttpResponse::Ok()
        .content_type(req.out_format.content_type())
        .body(out))
}

#[get("/{id}/{ver}/{area}/thumbnail/")]
pub async fn thumbnail_by_id(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
    query: web::Query<ThumbnailQuery>,
) -> Result<HttpResponse, ApiError> {
    let (id, ver, area) = path.into_inner();
    let fp = dispatch::fingerprint(&id, &ver, query.service_type.as_deref())?;
    let req = dispatch::thumbnail_request(&area, &query, CropAnchor::Center)?;
    let source = dispatch::fetch_source(&state, fp).await?;
    let body = dispatch::render_image(&source, req, state.min_resolution());
    Ok(HttpResponse::Ok()
        .content_type(req.out_format.content_type())
        .body(body))
}

#[post("/{area}/thumbnail/")]
pub async fn thumbnail_from_upload(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ThumbnailQuery>,
    http_req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    dispatch::sniff_content_type(&http_req, "image/");
    let area = path.into_inner();
    let req = dispatch::thumbnail_request(&area, &query, CropAnchor::Center)?;
    let out = dispatch::render_image(&body, req, state.min_resolution());
    Ok(HttpResponse::Ok()
        .content_type(req.out_format.content_type())
        .body(out))
}
