// HTTP gateway to the statistics service
use crate::application::error::AugmentError;
use crate::application::stats_gateway::StatsGateway;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl StatsGateway for HttpGateway {
    async fn post(&self, endpoint: &str, body: Value) -> Result<Value, AugmentError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(%url, "posting to statistics service");

        // `json` sets content-type: application/json
        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AugmentError::Transport(format!("request to {url} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AugmentError::Transport(format!("{url} returned {status}: {body}")));
        }

        let bytes = response.bytes().await.map_err(|e| {
            AugmentError::Transport(format!("failed to read response from {url}: {e}"))
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            AugmentError::MalformedResponse(format!("response body is not JSON: {e}"))
        })
    }
}

/// Serve `router` on an ephemeral local port and return its base URL.
#[cfg(test)]
pub(crate) async fn spawn_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Json(json!({
            "authorization": header("authorization"),
            "accept": header("accept"),
            "body": body,
        }))
    }

    #[tokio::test]
    async fn test_post_sends_bearer_and_json() {
        let url = spawn_stub(Router::new().route("/forecast", post(echo))).await;
        let gateway = HttpGateway::new(format!("{url}/"), "token-123".to_string());

        let reply = gateway.post("forecast", json!({ "fh": 12 })).await.unwrap();

        assert_eq!(reply["authorization"], "Bearer token-123");
        assert_eq!(reply["accept"], "application/json");
        assert_eq!(reply["body"], json!({ "fh": 12 }));
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport_error() {
        let router = Router::new().route(
            "/anomaly_detector",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
        );
        let url = spawn_stub(router).await;
        let gateway = HttpGateway::new(url, String::new());

        match gateway.post("anomaly_detector", json!({})).await {
            Err(AugmentError::Transport(message)) => {
                assert!(message.contains("500"));
                assert!(message.contains("model crashed"));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let router = Router::new().route("/forecast", post(|| async { "<html>oops</html>" }));
        let url = spawn_stub(router).await;
        let gateway = HttpGateway::new(url, String::new());

        assert!(matches!(
            gateway.post("forecast", json!({})).await,
            Err(AugmentError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway = HttpGateway::new(format!("http://{addr}"), String::new());
        assert!(matches!(
            gateway.post("forecast", json!({})).await,
            Err(AugmentError::Transport(_))
        ));
    }
}
