//! Office conversion bridge (§4.4): a thin multipart RPC client over the
//! external document converter. Never fails outward — a rejected or
//! unreachable converter yields an empty byte stream, which the PDF
//! engine then turns into an empty document.

use std::time::Duration;

use reqwest::multipart;
use tracing::{error, warn};

/// `convertFileTo(source, targetExt)` (§4.4). `convert_api_base` is the
/// fully assembled upstream URL up through `{convert_api}`; this function
/// appends the sanitized extension.
pub async fn convert(
    client: &reqwest::Client,
    convert_api_base: &str,
    target_ext: &str,
    timeout: Duration,
    source: Vec<u8>,
) -> Vec<u8> {
    let url = format!("{}/{target_ext}", convert_api_base.trim_end_matches('/'));
    let part = multipart::Part::bytes(source).file_name("docs-editor-file");
    let form = multipart::Form::new().part("files", part);

    let response = client.post(&url).timeout(timeout).multipart(form).send().await;

    match response {
        Ok(resp) if resp.status().is_success() => match resp.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(err) => {
                error!(error = %err, "document converter response body unreadable");
                Vec::new()
            }
        },
        Ok(resp) => {
            error!(status = %resp.status(), "document converter rejected the conversion");
            Vec::new()
        }
        Err(err) if err.is_timeout() => {
            warn!(error = %err, "document converter timed out");
            Vec::new()
        }
        Err(err) => {
            error!(error = %err, critical = true, "document converter request failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn successful_conversion_returns_converted_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/convert/pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 fake".to_vec()))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let out = convert(
            &client,
            &format!("{}/convert", server.uri()),
            "pdf",
            Duration::from_secs(5),
            b"source bytes".to_vec(),
        )
        .await;
        assert_eq!(out, b"%PDF-1.4 fake");
    }

    #[tokio::test]
    async fn failure_response_yields_empty_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/convert/pdf"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let out = convert(
            &client,
            &format!("{}/convert", server.uri()),
            "pdf",
            Duration::from_secs(5),
            b"source bytes".to_vec(),
        )
        .await;
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn unreachable_host_yields_empty_bytes() {
        let client = reqwest::Client::new();
        let out = convert(
            &client,
            "http://127.0.0.1:1",
            "pdf",
            Duration::from_millis(200),
            b"source bytes".to_vec(),
        )
        .await;
        assert!(out.is_empty());
    }
}
