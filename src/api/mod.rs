// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! HTTP surface: the block editor's image upload backends and the two pages.
//!
//! - `POST /api/fetchUrl` validates a by-URL image and echoes it back.
//! - `POST /api/uploadImage` inlines an uploaded file as a `data:` URL.
//! - `GET /` is the landing page; signed-in users are sent on to the dashboard.
//! - `GET /dashboard` serves the dashboard shell to signed-in users.

mod pages;
mod server;
mod types;

pub use server::{router, AppState};
pub use types::{
    UploadResponse, UploadedFile, FETCH_URL_FAILED, INVALID_URL_FORMAT, NO_IMAGE_PROVIDED,
    NO_URL_PROVIDED, UPLOAD_IMAGE_FAILED,
};
