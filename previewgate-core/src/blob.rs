//! Blob storage client (§4.5): a single GET against the storage service,
//! mapped to the wire-visible error taxonomy. Never panics and never
//! propagates a raw transport error — every outcome becomes either bytes
//! or a [`PipelineError`].

use std::time::Duration;

use tracing::error;

use crate::error::{CoreResult, PipelineError};
use crate::model::Fingerprint;

/// Builds the storage fetch URL from the configured base and download
/// endpoint (§6 "Upstream: blob store").
#[must_use]
pub fn build_url(base: &str, download_api: &str, fingerprint: Fingerprint) -> String {
    format!(
        "{}/{}?node={}&version={}&type={}",
        base.trim_end_matches('/'),
        download_api.trim_start_matches('/'),
        fingerprint.identifier,
        fingerprint.version,
        fingerprint.owner.as_wire_str(),
    )
}

/// `fetch(fingerprint)` (§4.5).
pub async fn fetch(client: &reqwest::Client, url: &str, timeout: Duration) -> CoreResult<Vec<u8>> {
    let response = client.get(url).timeout(timeout).send().await.map_err(|err| {
        error!(error = %err, "blob store request failed");
        PipelineError::StorageUnavailable
    })?;

    let status = response.status();
    if status.is_success() || status.is_redirection() {
        return response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|_| PipelineError::StorageUnavailable);
    }
    if status.as_u16() == 404 {
        return Err(PipelineError::ItemNotFound);
    }
    if status.is_client_error() {
        return Err(PipelineError::GenericStorageError {
            status: status.as_u16(),
        });
    }
    Err(PipelineError::StorageUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServiceType;
    use uuid::Uuid;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn build_url_embeds_the_fingerprint() {
        let fp = Fingerprint {
            identifier: Uuid::nil(),
            version: 3,
            owner: ServiceType::Files,
        };
        let url = build_url("http://storage:9000", "download", fp);
        assert_eq!(
            url,
            "http://storage:9000/download?node=00000000-0000-0000-0000-000000000000&version=3&type=files"
        );
    }

    #[tokio::test]
    async fn success_response_returns_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/download"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"payload".to_vec()))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/download", server.uri());
        let out = fetch(&client, &url, Duration::from_secs(1)).await.unwrap();
        assert_eq!(out, b"payload");
    }

    #[tokio::test]
    async fn not_found_maps_to_item_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/download"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/download", server.uri());
        let err = fetch(&client, &url, Duration::from_secs(1)).await.unwrap_err();
        assert!(matches!(err, PipelineError::ItemNotFound));
    }

    #[tokio::test]
    async fn other_client_error_propagates_its_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/download"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/download", server.uri());
        let err = fetch(&client, &url, Duration::from_secs(1)).await.unwrap_err();
        assert!(matches!(err, PipelineError::GenericStorageError { status: 403 }));
    }

    #[tokio::test]
    async fn server_error_maps_to_storage_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/download"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/download", server.uri());
        let err = fetch(&client, &url, Duration::from_secs(1)).await.unwrap_err();
        assert!(matches!(err, PipelineError::StorageUnavailable));
    }
}
