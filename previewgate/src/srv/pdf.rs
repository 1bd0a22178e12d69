//! PDF page-range and thumbnail routes (§6 rows 5-8).

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use previewgate_core::CropAnchor;

use crate::dispatch::{self, AppState, PdfRangeQuery, ThumbnailQuery};
use crate::error::ApiError;

#[get("/{id}/{ver}/")]
pub async fn pdf_by_id(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<PdfRangeQuery>,
) -> Result<HttpResponse, ApiError> {
    let (id, ver) = path.into_inner();
    let fp = dispatch::fingerprint(&id, &ver, query.service_type.as_deref())?;
    let range = dispatch::page_range(&query)?;
    let source = dispatch::fetch_source(&state, fp).await?;
    let body = dispatch::split_pdf(&source, range);
    Ok(HttpResponse::Ok().content_type("application/pdf").body(body))
}

#[post("/")]
pub async fn pdf_from_upload(
    query: web::Query<PdfRangeQuery>,
    http_req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    dispatch::sniff_content_type(&http_req, "application/pdf");
    let range = dispatch::page_range(&query)?;
    let out = dispatch::split_pdf(&body, range);
    Ok(HttpResponse::Ok().content_type("application/pdf").body(out))
}

#[get("/{id}/{ver}/{area}/thumbnail/")]
pub async fn pdf_thumbnail_by_id(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
    query: web::Query<ThumbnailQuery>,
) -> Result<HttpResponse, ApiError> {
    let (id, ver, area) = path.into_inner();
    let fp = dispatch::fingerprint(&id, &ver, query.service_type.as_deref())?;
    let req = dispatch::thumbnail_request(&area, &query, CropAnchor::Top)?;
    let source = dispatch::fetch_source(&state, fp).await?;
    let body = dispatch::pdf_thumbnail(&state, &source, req)?;
    Ok(HttpResponse::Ok()
        .content_type(req.out_format.content_type())
        .body(body))
}

#[post("/{area}/thumbnail/")]
pub async fn pdf_thumbnail_from_upload(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ThumbnailQuery>,
    http_req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    dispatch::sniff_content_type(&http_req, "application/pdf");
    let area = path.into_inner();
    let req = dispatch::thumbnail_request(&area, &query, CropAnchor::Top)?;
    let out = dispatch::pdf_thumbnail(&state, &body, req)?;
    Ok(HttpResponse::Ok()
        .content_type(req.out_format.content_type())
        .body(out))
}
