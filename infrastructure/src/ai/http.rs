//! HTTP adapter for the AI estimation workflow service.

use super::wire::{WireEstimateRequest, parse_estimate_response};
use async_trait::async_trait;
use gurubu_application::{AiEstimator, AiEstimatorError, EstimationRequest};
use gurubu_domain::AiEstimate;
use std::time::Duration;
use tracing::debug;

/// Maximum response body size (1 MB)
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Posts the item to the estimation endpoint and reshapes the answer
pub struct HttpAiEstimator {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpAiEstimator {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, AiEstimatorError> {
        Self::with_timeout(endpoint, None)
    }

    /// Build a client whose requests give up after `timeout`
    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, AiEstimatorError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("gurubu/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AiEstimatorError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: None,
        })
    }

    /// Send `Authorization: Bearer <key>` with every request
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn too_large(size: u64) -> AiEstimatorError {
    AiEstimatorError::InvalidResponse(format!(
        "response too large: {} bytes (max: {} bytes)",
        size, MAX_BODY_SIZE
    ))
}

#[async_trait]
impl AiEstimator for HttpAiEstimator {
    async fn estimate(&self, request: &EstimationRequest) -> Result<AiEstimate, AiEstimatorError> {
        debug!("Requesting AI estimate for {} from {}", request.item_key, self.endpoint);

        let mut call = self
            .client
            .post(&self.endpoint)
            .json(&WireEstimateRequest::from(request));
        if let Some(key) = &self.api_key {
            call = call.bearer_auth(key);
        }

        let response = call.send().await.map_err(|e| {
            if e.is_timeout() {
                AiEstimatorError::Timeout
            } else {
                AiEstimatorError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AiEstimatorError::Http {
                status: status.as_u16(),
            });
        }

        // Reject up front when the server announces the size
        if let Some(length) = response.content_length()
            && length > MAX_BODY_SIZE as u64
        {
            return Err(too_large(length));
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                AiEstimatorError::Timeout
            } else {
                AiEstimatorError::Connection(e.to_string())
            }
        })?;
        if body.len() > MAX_BODY_SIZE {
            return Err(too_large(body.len() as u64));
        }

        let text = String::from_utf8_lossy(&body);
        parse_estimate_response(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gurubu_domain::{AiEstimateStatus, PointScale};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    fn request() -> EstimationRequest {
        EstimationRequest::new("PROJ-7", PointScale::new(["1", "2", "3", "5"]).unwrap())
            .with_title("Export report")
    }

    fn http_response(status_line: &str, body: &str) -> Vec<u8> {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        )
        .into_bytes()
    }

    /// Read one request (headers plus a Content-Length body) off the socket
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let body_len = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + body_len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Serve `response` to a single connection and hand back the request seen
    async fn serve_once(response: Vec<u8>) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/estimate", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            // The client may hang up early on oversized bodies
            let _ = socket.write_all(&response).await;
            let _ = socket.shutdown().await;
            request
        });

        (url, handle)
    }

    #[test]
    fn test_empty_api_key_is_dropped() {
        let estimator = HttpAiEstimator::new("http://localhost:1/estimate")
            .unwrap()
            .with_api_key(Some(String::new()));
        assert!(estimator.api_key.is_none());
        assert_eq!(estimator.endpoint(), "http://localhost:1/estimate");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_unavailable() {
        // Port 1 is reserved and nothing listens there
        let estimator = HttpAiEstimator::with_timeout(
            "http://127.0.0.1:1/estimate",
            Some(Duration::from_secs(2)),
        )
        .unwrap();

        let error = estimator.estimate(&request()).await.unwrap_err();
        assert!(error.is_unavailable());
    }

    #[tokio::test]
    async fn test_camel_case_response_and_request_shape() {
        let body = r#"{"estimate": "3", "confidence": 0.7, "reasoning": "Similar to PROJ-2",
            "historicalComparison": "PROJ-2 took 3", "splitRecommendation": true}"#;
        let (url, server) = serve_once(http_response("200 OK", body)).await;

        let estimator = HttpAiEstimator::new(url)
            .unwrap()
            .with_api_key(Some("secret".to_string()));
        let estimate = estimator.estimate(&request()).await.unwrap();

        assert_eq!(estimate.status, AiEstimateStatus::Ok);
        assert_eq!(estimate.label().as_str(), "3");
        assert_eq!(estimate.confidence, 0.7);
        assert_eq!(estimate.historical_comparison, "PROJ-2 took 3");
        assert!(estimate.split_recommendation);

        let seen = server.await.unwrap();
        assert!(seen.starts_with("POST /estimate"));
        assert!(seen.to_ascii_lowercase().contains("authorization: bearer secret"));
        assert!(seen.contains(r#""issueKey":"PROJ-7""#));
        assert!(seen.contains(r#""pointScale":["1","2","3","5"]"#));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_http_status() {
        let (url, _server) =
            serve_once(http_response("500 Internal Server Error", "{}")).await;
        let estimator = HttpAiEstimator::new(url).unwrap();

        let error = estimator.estimate(&request()).await.unwrap_err();
        assert!(matches!(error, AiEstimatorError::Http { status: 500 }));
        assert_eq!(error.into_estimate().status, AiEstimateStatus::Error);
    }

    #[tokio::test]
    async fn test_non_json_body_is_invalid_response() {
        let (url, _server) =
            serve_once(http_response("200 OK", "<html>maintenance</html>")).await;
        let estimator = HttpAiEstimator::new(url).unwrap();

        let error = estimator.estimate(&request()).await.unwrap_err();
        assert!(matches!(error, AiEstimatorError::InvalidResponse(_)));
        assert!(!error.is_unavailable());
    }

    #[tokio::test]
    async fn test_announced_oversized_body_is_rejected() {
        let body = "a".repeat(MAX_BODY_SIZE + 1);
        let (url, _server) = serve_once(http_response("200 OK", &body)).await;
        let estimator = HttpAiEstimator::new(url).unwrap();

        let error = estimator.estimate(&request()).await.unwrap_err();
        match error {
            AiEstimatorError::InvalidResponse(message) => {
                assert!(message.starts_with("response too large"))
            }
            other => panic!("expected InvalidResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unannounced_oversized_body_is_rejected() {
        // No Content-Length: the body runs until the connection closes
        let mut response =
            b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n".to_vec();
        response.extend(std::iter::repeat_n(b'a', MAX_BODY_SIZE + 1));
        let (url, _server) = serve_once(response).await;
        let estimator = HttpAiEstimator::new(url).unwrap();

        let error = estimator.estimate(&request()).await.unwrap_err();
        match error {
            AiEstimatorError::InvalidResponse(message) => {
                assert!(message.starts_with("response too large"))
            }
            other => panic!("expected InvalidResponse, got {:?}", other),
        }
    }
}
