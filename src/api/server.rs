// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, Multipart};
use axum::http::header::InvalidHeaderName;
use axum::routing::{get, post};
use axum::Router;
use serde_json::Value;
use url::Url;

use super::pages;
use super::types::{
    Reply, FETCH_URL_FAILED, INVALID_URL_FORMAT, NO_IMAGE_PROVIDED, NO_URL_PROVIDED,
    UPLOAD_IMAGE_FAILED,
};
use crate::auth::{HeaderSessionResolver, SessionResolver};
use crate::config::ServerConfig;
use crate::dashboard::EditorConfig;
use crate::format::encode_data_url;
use crate::format::next_image::is_truthy;

const IMAGE_FIELD: &str = "image";

/// Shared, read-only state behind every handler.
pub struct AppState {
    config: ServerConfig,
    sessions: Box<dyn SessionResolver>,
    editor_config: EditorConfig,
}

impl AppState {
    pub fn new(config: ServerConfig, sessions: impl SessionResolver + 'static) -> Self {
        Self { config, sessions: Box::new(sessions), editor_config: EditorConfig::default() }
    }

    /// Builds state that reads sessions from the configured auth header.
    pub fn from_config(config: ServerConfig) -> Result<Self, InvalidHeaderName> {
        let sessions = HeaderSessionResolver::new(&config.auth_header)?;
        Ok(Self::new(config, sessions))
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn sessions(&self) -> &dyn SessionResolver {
        self.sessions.as_ref()
    }

    pub fn editor_config(&self) -> &EditorConfig {
        &self.editor_config
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.upload_limit;
    Router::new()
        .route("/", get(pages::landing))
        .route("/dashboard", get(pages::dashboard))
        .route("/api/fetchUrl", post(fetch_url))
        .route("/api/uploadImage", post(upload_image))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

/// Validates a by-URL image and echoes it back for the editor to load directly.
async fn fetch_url(body: Result<Bytes, BytesRejection>) -> Reply {
    let body = match body {
        Ok(body) => body,
        Err(err) => {
            tracing::error!(error = %err, "failed to read fetchUrl body");
            return Reply::server_error(FETCH_URL_FAILED);
        }
    };
    let body: Value = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(err) => {
            tracing::error!(error = %err, "fetchUrl body is not JSON");
            return Reply::server_error(FETCH_URL_FAILED);
        }
    };
    let url = match body {
        Value::Null => {
            tracing::error!("fetchUrl body is null");
            return Reply::server_error(FETCH_URL_FAILED);
        }
        Value::Object(mut fields) => fields.remove("url").filter(is_truthy),
        _ => None,
    };

    match url {
        None => Reply::bad_request(NO_URL_PROVIDED),
        Some(Value::String(url)) if Url::parse(&url).is_ok() => {
            tracing::debug!(%url, "accepted image url");
            Reply::uploaded(url)
        }
        Some(other) => {
            tracing::debug!(url = %other, "rejected image url");
            Reply::bad_request(INVALID_URL_FORMAT)
        }
    }
}

/// Inlines an uploaded image as a base64 data URL; nothing is stored server-side.
async fn upload_image(multipart: Result<Multipart, MultipartRejection>) -> Reply {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(err) => {
            tracing::error!(error = %err, "uploadImage body is not multipart");
            return Reply::server_error(UPLOAD_IMAGE_FAILED);
        }
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Reply::bad_request(NO_IMAGE_PROVIDED),
            Err(err) => {
                tracing::error!(error = %err, "failed to read uploadImage body");
                return Reply::server_error(UPLOAD_IMAGE_FAILED);
            }
        };
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let mime = field.content_type().unwrap_or_default().to_owned();
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::error!(error = %err, "failed to read uploaded image");
                return Reply::server_error(UPLOAD_IMAGE_FAILED);
            }
        };
        tracing::info!(%mime, bytes = bytes.len(), "inlined uploaded image");
        return Reply::uploaded(encode_data_url(&mime, &bytes));
    }
}
