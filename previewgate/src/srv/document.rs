//! Office document preview/thumbnail routes (§6 rows 9-12), gated by the
//! `enable_document_preview`/`enable_document_thumbnail` feature flags.

use actix_web::{get, post, web, HttpResponse};
use previewgate_core::CropAnchor;

use crate::dispatch::{self, AppState, ServiceTypeQuery, ThumbnailQuery};
use crate::error::ApiError;

#[get("/{id}/{ver}/")]
pub async fn preview_by_id(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<ServiceTypeQuery>,
) -> Result<HttpResponse, ApiError> {
    if !state.config.service.enable_document_preview {
        return Err(ApiError(dispatch::disabled_preview()));
    }
    let (id, ver) = path.into_inner();
    let fp = dispatch::fingerprint(&id, &ver, query.service_type.as_deref())?;
    let source = dispatch::fetch_source(&state, fp).await?;
    let body = dispatch::document_preview(&state, source).await;
    Ok(HttpResponse::Ok().content_type("application/pdf").body(body))
}

#[post("/")]
pub async fn preview_from_upload(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    if !state.config.service.enable_document_preview {
        return Err(ApiError(dispatch::disabled_preview()));
    }
    let out = dispatch::document_preview(&state, body.to_vec()).await;
    Ok(HttpResponse::Ok().content_type("application/pdf").body(out))
}

#[get("/{id}/{ver}/{area}/thumbnail/")]
pub async fn thumbnail_by_id(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
    query: web::Query<ThumbnailQuery>,
) -> Result<HttpResponse, ApiError> {
    if !state.config.service.enable_document_thumbnail {
        return Err(ApiError(dispatch::disabled_thumbnail()));
    }
    let (id, ver, area) = path.into_inner();
    let fp = dispatch::fingerprint(&id, &ver, query.service_type.as_deref())?;
    let req = dispatch::thumbnail_request(&area, &query, CropAnchor::Top)?;
    let source = dispatch::fetch_source(&state, fp).await?;
    let body = dispatch::document_thumbnail(&state, source, req).await?;
    Ok(HttpResponse::Ok()
        .content_type(req.out_format.content_type())
        .body(body))
}

#[post("/{area}/thumbnail/")]
pub async fn thumbnail_from_upload(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ThumbnailQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    if !state.config.service.enable_document_thumbnail {
        return Err(ApiError(dispatch::disabled_thumbnail()));
    }
    let area = path.into_inner();
    let req = dispatch::thumbnail_request(&area, &query, CropAnchor::Top)?;
    let out = dispatch::document_thumbnail(&state, body.to_vec(), req).await?;
    Ok(HttpResponse::Ok()
        .content_type(req.out_format.content_type())
        .body(out))
}
