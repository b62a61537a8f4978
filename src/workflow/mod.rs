// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The remote workflow service that hands out images and stores annotations.
//!
//! Two fixed webhooks: "next image" returns the image to annotate (plus any previously saved
//! editor state for it) and "save" stores an annotation. Requests are neither retried nor given
//! timeouts.

use async_trait::async_trait;

use crate::format::{DataUrlError, DecodeError, NextImage};
use crate::model::ImageSourceError;

mod http;
mod types;

pub use http::HttpWorkflowClient;
pub use types::{FetchedImage, NextImageRequest, SavePayload};

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("workflow request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("workflow endpoint {endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    ImageSource(#[from] ImageSourceError),
    #[error("inline image is unreadable: {0}")]
    DataUrl(#[from] DataUrlError),
}

#[async_trait]
pub trait WorkflowService: Send + Sync {
    async fn next_image(&self, request: &NextImageRequest) -> Result<NextImage, WorkflowError>;

    async fn save(&self, payload: &SavePayload) -> Result<(), WorkflowError>;

    /// Fetches the bytes of an image the dashboard is showing, subject to the image-source
    /// allow-list.
    async fn fetch_image(&self, url: &str) -> Result<FetchedImage, WorkflowError>;
}
