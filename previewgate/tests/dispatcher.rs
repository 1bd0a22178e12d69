//! End-to-end dispatcher tests exercising the literal scenarios, built
//! against synthetic in-memory fixtures rather than files on disk.

use actix_web::web::Data;
use actix_web::{test, App};
use lopdf::{dictionary, Document, Object};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use previewgate::config::Config;
use previewgate::dispatch::AppState;
use previewgate::srv::router;

fn jpeg_fixture(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height));
    let mut buf = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .unwrap();
    buf
}

fn png_fixture(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height));
    let mut buf = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn pdf_fixture(pages: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids = Vec::new();
    for _ in 0..pages {
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 200.into(), 200.into()],
        });
        kids.push(page_id.into());
    }
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => Object::Array(kids),
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

async fn test_app_with(
    config: Config,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    let state = Data::new(AppState::new(config.clone()));
    test::init_service(
        App::new()
            .app_data(state)
            .configure(|c| router(c, &config)),
    )
    .await
}

// Scenario 1: preview-from-upload pads a 300x400 JPEG to 100x200.
#[actix_web::test]
async fn preview_upload_pads_to_requested_area() {
    let app = test_app_with(Config::default()).await;
    let body = jpeg_fixture(300, 400);

    let req = test::TestRequest::post()
        .uri("/preview/image/100x200/?crop=false&quality=medium&output_format=jpeg")
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "image/jpeg"
    );
    let bytes = test::read_body(resp).await;
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (100, 200));
}

// Scenario 3: PDF page-range from upload over a 5-page document yields
// exactly 2 pages.
#[actix_web::test]
async fn pdf_upload_subsets_the_requested_page_range() {
    let app = test_app_with(Config::default()).await;
    let body = pdf_fixture(5);

    let req = test::TestRequest::post()
        .uri("/preview/pdf/?first_page=2&last_page=3")
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/pdf"
    );
    let bytes = test::read_body(resp).await;
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
}

// Scenario 4: document thumbnail from upload while the feature is
// disabled replies 400 with the disabled message.
#[actix_web::test]
async fn document_thumbnail_disabled_feature_gate_rejects_with_400() {
    let mut config = Config::default();
    config.service.enable_document_thumbnail = false;
    let app = test_app_with(config).await;

    let req = test::TestRequest::post()
        .uri("/preview/document/10x10/thumbnail/?output_format=png")
        .set_payload(vec![0u8; 16])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

// Scenario 6: rounded PNG thumbnail carries an alpha channel.
#[actix_web::test]
async fn rounded_thumbnail_upload_yields_alpha_png() {
    let app = test_app_with(Config::default()).await;
    let body = png_fixture(200, 200);

    let req = test::TestRequest::post()
        .uri("/preview/image/50x50/thumbnail/?shape=rounded&output_format=png")
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let bytes = test::read_body(resp).await;
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert!(decoded.color().has_alpha());
}

#[actix_web::test]
async fn unknown_output_format_is_unprocessable() {
    let app = test_app_with(Config::default()).await;

    let req = test::TestRequest::post()
        .uri("/preview/image/10x10/?output_format=bogus")
        .set_payload(jpeg_fixture(10, 10))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 422);
}

// Scenario 2: GET-by-id when the blob store answers 500 ⇒ the gateway
// replies 502.
#[actix_web::test]
async fn preview_by_id_surfaces_502_when_storage_is_down() {
    let storage = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&storage)
        .await;

    let mut config = Config::default();
    let addr = storage.address();
    config.storage.protocol = "http".to_string();
    config.storage.ip = addr.ip();
    config.storage.port = addr.port();

    let app = test_app_with(config).await;

    let req = test::TestRequest::get()
        .uri("/preview/image/da2dcce7-cd87-423c-a6c9-38c527ab6e6a/1/0x0/?service_type=files")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 502);
}

// Scenario 5: `/health/ready/` when documents are enabled and the
// converter is unreachable ⇒ 429.
#[actix_web::test]
async fn health_ready_returns_429_when_converter_unreachable_and_documents_enabled() {
    let mut config = Config::default();
    config.document_conversion.protocol = "http".to_string();
    config.document_conversion.ip = "127.0.0.1".parse().unwrap();
    config.document_conversion.port = 1;
    assert!(config.service.enable_document_preview || config.service.enable_document_thumbnail);

    let app = test_app_with(config).await;

    let req = test::TestRequest::get().uri("/health/ready/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 429);
}
