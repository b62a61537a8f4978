// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;

use super::{FetchedImage, NextImageRequest, SavePayload, WorkflowError, WorkflowService};
use crate::config::WorkflowEndpoints;
use crate::format::{decode_data_url, decode_next_image_slice, NextImage};

/// [`WorkflowService`] over HTTP webhooks.
#[derive(Debug, Clone)]
pub struct HttpWorkflowClient {
    http: reqwest::Client,
    endpoints: WorkflowEndpoints,
}

impl HttpWorkflowClient {
    pub fn new(endpoints: WorkflowEndpoints) -> Self {
        Self::with_client(reqwest::Client::new(), endpoints)
    }

    pub fn with_client(http: reqwest::Client, endpoints: WorkflowEndpoints) -> Self {
        Self { http, endpoints }
    }

    pub fn endpoints(&self) -> &WorkflowEndpoints {
        &self.endpoints
    }
}

fn ensure_success(endpoint: &str, response: Response) -> Result<Response, WorkflowError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(WorkflowError::Status { endpoint: endpoint.to_owned(), status: status.as_u16() })
    }
}

#[async_trait]
impl WorkflowService for HttpWorkflowClient {
    async fn next_image(&self, request: &NextImageRequest) -> Result<NextImage, WorkflowError> {
        let endpoint = &self.endpoints.next_image_endpoint;
        tracing::debug!(%endpoint, "requesting next image");
        let response = self.http.post(endpoint).json(request).send().await?;
        let body = ensure_success(endpoint, response)?.bytes().await?;
        Ok(decode_next_image_slice(&body)?)
    }

    async fn save(&self, payload: &SavePayload) -> Result<(), WorkflowError> {
        let endpoint = &self.endpoints.save_endpoint;
        tracing::debug!(
            %endpoint,
            page_index = %payload.page_index,
            file_id = payload.file_id.as_ref().map(|id| id.as_str()),
            "saving annotation"
        );
        let response = self.http.post(endpoint).json(payload).send().await?;
        ensure_success(endpoint, response)?;
        Ok(())
    }

    async fn fetch_image(&self, url: &str) -> Result<FetchedImage, WorkflowError> {
        let checked = self.endpoints.image_policy.check(url)?;
        if checked.scheme() == "data" {
            let inline = decode_data_url(url)?;
            return Ok(FetchedImage { content_type: Some(inline.mime), bytes: inline.bytes });
        }

        let response = self.http.get(checked).send().await?;
        let response = ensure_success(url, response)?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes().await?.to_vec();
        Ok(FetchedImage { content_type, bytes })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::format::SavedContent;
    use crate::model::{ImageIndex, ImageSourcePolicy, RemotePattern, UserId};

    fn new_runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread().enable_all().build().expect("tokio runtime")
    }

    #[derive(Default)]
    struct Recorded {
        next_image: Vec<Value>,
        saved: Vec<Value>,
    }

    type Shared = Arc<Mutex<Recorded>>;

    async fn next_image(State(recorded): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
        recorded.lock().expect("lock").next_image.push(body);
        let data = json!({"savedData": [{"type": "paragraph", "data": {"text": "kept"}}]});
        Json(json!({"image": "https://vision.olevel.ai/up/a.jpg", "data": data.to_string()}))
    }

    async fn save(State(recorded): State<Shared>, Json(body): Json<Value>) -> StatusCode {
        recorded.lock().expect("lock").saved.push(body);
        StatusCode::OK
    }

    async fn image() -> impl IntoResponse {
        ([(CONTENT_TYPE, "image/png")], vec![0x89_u8, b'P', b'N', b'G'])
    }

    async fn broken() -> impl IntoResponse {
        (StatusCode::BAD_GATEWAY, "upstream down")
    }

    async fn not_json() -> &'static str {
        "<html>oops</html>"
    }

    /// Serves a stand-in workflow on an ephemeral port and returns its base URL.
    async fn spawn_workflow(recorded: Shared) -> String {
        let router = Router::new()
            .route("/next", post(next_image))
            .route("/save", post(save))
            .route("/image.png", get(image))
            .route("/broken", post(broken).get(broken))
            .route("/html", post(not_json))
            .with_state(recorded);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        format!("http://{addr}")
    }

    fn workflow_client(base: &str, next: &str, save: &str) -> HttpWorkflowClient {
        let port = url::Url::parse(base).expect("base").port().expect("port");
        HttpWorkflowClient::new(WorkflowEndpoints {
            next_image_endpoint: format!("{base}{next}"),
            save_endpoint: format!("{base}{save}"),
            image_policy: ImageSourcePolicy::new(vec![
                RemotePattern::new("http", "127.0.0.1").with_port(port)
            ]),
        })
    }

    #[test]
    fn next_image_posts_user_and_decodes_response() {
        let runtime = new_runtime();
        runtime.block_on(async {
            let recorded = Shared::default();
            let base = spawn_workflow(recorded.clone()).await;
            let client = workflow_client(&base, "/next", "/save");

            let request = NextImageRequest { user_id: Some(UserId::new("user_7").expect("id")) };
            let next = client.next_image(&request).await.expect("next image");
            assert_eq!(next.image, "https://vision.olevel.ai/up/a.jpg");
            assert!(matches!(next.saved, SavedContent::Restore(_)));

            let anonymous = client.next_image(&NextImageRequest::default()).await.expect("next");
            assert_eq!(anonymous.image, next.image);

            let recorded = recorded.lock().expect("lock");
            assert_eq!(recorded.next_image, vec![json!({"userId": "user_7"}), json!({})]);
        });
    }

    #[test]
    fn save_posts_payload() {
        let runtime = new_runtime();
        runtime.block_on(async {
            let recorded = Shared::default();
            let base = spawn_workflow(recorded.clone()).await;
            let client = workflow_client(&base, "/next", "/save");

            let payload = SavePayload {
                user_id: UserId::new("user_7").expect("id"),
                context: "# Notes".to_owned(),
                file_id: None,
                saved_data: Default::default(),
                page_index: ImageIndex::new(2),
            };
            client.save(&payload).await.expect("save");

            let recorded = recorded.lock().expect("lock");
            assert_eq!(
                recorded.saved,
                vec![json!({
                    "userId": "user_7",
                    "context": "# Notes",
                    "savedData": {"blocks": []},
                    "pageIndex": 2
                })]
            );
        });
    }

    #[test]
    fn non_success_status_and_bad_bodies_are_typed_errors() {
        let runtime = new_runtime();
        runtime.block_on(async {
            let base = spawn_workflow(Shared::default()).await;

            let client = workflow_client(&base, "/broken", "/broken");
            let err = client.next_image(&NextImageRequest::default()).await.unwrap_err();
            assert!(matches!(err, WorkflowError::Status { status: 502, .. }), "{err}");

            let payload = SavePayload {
                user_id: UserId::new("u").expect("id"),
                context: String::new(),
                file_id: None,
                saved_data: Default::default(),
                page_index: ImageIndex::FIRST,
            };
            let err = client.save(&payload).await.unwrap_err();
            assert!(matches!(err, WorkflowError::Status { status: 502, .. }), "{err}");

            let client = workflow_client(&base, "/html", "/save");
            let err = client.next_image(&NextImageRequest::default()).await.unwrap_err();
            assert!(matches!(err, WorkflowError::Decode(_)), "{err}");
        });
    }

    #[test]
    fn fetch_image_returns_bytes_and_content_type() {
        let runtime = new_runtime();
        runtime.block_on(async {
            let base = spawn_workflow(Shared::default()).await;
            let client = workflow_client(&base, "/next", "/save");

            let fetched = client.fetch_image(&format!("{base}/image.png")).await.expect("fetch");
            assert_eq!(fetched.content_type.as_deref(), Some("image/png"));
            assert_eq!(fetched.bytes, b"\x89PNG");

            let inline = client.fetch_image("data:image/gif;base64,R0lG").await.expect("inline");
            assert_eq!(inline.content_type.as_deref(), Some("image/gif"));
            assert_eq!(inline.bytes, b"GIF");
        });
    }

    #[test]
    fn fetch_image_rejects_hosts_outside_the_allow_list() {
        let runtime = new_runtime();
        runtime.block_on(async {
            let client = HttpWorkflowClient::new(WorkflowEndpoints::default());
            let err = client.fetch_image("https://example.com/cat.png").await.unwrap_err();
            assert!(matches!(err, WorkflowError::ImageSource(_)), "{err}");
        });
    }
}
