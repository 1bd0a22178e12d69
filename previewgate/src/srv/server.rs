//! Actix server bootstrap, mirroring the reference's `srv/server.rs`:
//! build an `App` factory closing over shared state, wrap it with the
//! tracing middleware and trailing-slash normalization, and bind it.

use std::future::Future;
use std::pin::Pin;

use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use futures::TryFutureExt as _;
use tracing_actix_web::TracingLogger;

use crate::config::Config;
use crate::dispatch::AppState;
use crate::error::{BootError, BootResult};

pub fn router(cfg: &mut web::ServiceConfig, config: &Config) {
    let svc = &config.service;

    cfg.service(
        web::scope(&svc.name)
            .service(
                web::scope(&svc.image_name)
                    .service(crate::srv::image::preview_by_id)
                    .service(crate::srv::image::preview_from_upload)
                    .service(crate::srv::image::thumbnail_by_id)
                    .service(crate::srv::image::thumbnail_from_upload),
            )
            .service(
                web::scope(&svc.pdf_name)
                    .service(crate::srv::pdf::pdf_by_id)
                    .service(crate::srv::pdf::pdf_from_upload)
                    .service(crate::srv::pdf::pdf_thumbnail_by_id)
                    .service(crate::srv::pdf::pdf_thumbnail_from_upload),
            )
            .service(
                web::scope(&svc.document_name)
                    .service(crate::srv::document::preview_by_id)
                    .service(crate::srv::document::preview_from_upload)
                    .service(crate::srv::document::thumbnail_by_id)
                    .service(crate::srv::document::thumbnail_from_upload),
            ),
    );

    // Health lives under its own top-level name, not nested under
    // `service.name` (§6).
    cfg.service(
        web::scope(&svc.health_name)
            .service(crate::srv::health::report)
            .service(crate::srv::health::ready)
            .service(crate::srv::health::live),
    );
}

type Server = Pin<Box<dyn Future<Output = BootResult<()>>>>;

/// Builds the server future together with the address it will bind.
pub fn new_server(config: Config) -> BootResult<(Server, String)> {
    let bind_addr = format!("{}:{}", config.service.ip, config.service.port);
    let workers = config.service.workers.unwrap_or_else(num_cpus::get);

    let state = Data::new(AppState::new(config));

    let factory = move || {
        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .wrap(NormalizePath::new(TrailingSlash::MergeOnly))
            .configure(|c| router(c, &state.config))
    };

    let server = HttpServer::new(factory)
        .bind(&bind_addr)
        .map_err(|e| BootError::BindingError(e, bind_addr.clone()))?
        .workers(workers)
        .run()
        .err_into();

    Ok((Box::pin(server), bind_addr))
}
