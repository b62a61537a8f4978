// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

pub const NO_URL_PROVIDED: &str = "No URL provided";
pub const INVALID_URL_FORMAT: &str = "Invalid URL format";
pub const FETCH_URL_FAILED: &str = "Failed to fetch URL";
pub const NO_IMAGE_PROVIDED: &str = "No image provided";
pub const UPLOAD_IMAGE_FAILED: &str = "Failed to upload image";

/// Response envelope expected by the block editor's image tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<UploadedFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub url: String,
}

impl UploadResponse {
    pub fn uploaded(url: impl Into<String>) -> Self {
        Self { success: 1, file: Some(UploadedFile { url: url.into() }), message: None }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: 0, file: None, message: Some(message.into()) }
    }
}

/// An envelope paired with the HTTP status it is sent with.
#[derive(Debug)]
pub(crate) struct Reply {
    status: StatusCode,
    body: UploadResponse,
}

impl Reply {
    pub(crate) fn uploaded(url: impl Into<String>) -> Self {
        Self { status: StatusCode::OK, body: UploadResponse::uploaded(url) }
    }

    pub(crate) fn bad_request(message: &str) -> Self {
        Self { status: StatusCode::BAD_REQUEST, body: UploadResponse::failed(message) }
    }

    pub(crate) fn server_error(message: &str) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, body: UploadResponse::failed(message) }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
