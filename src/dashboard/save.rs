// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

use crate::model::{EditorDocument, FileId, ImageIndex};
use crate::workflow::WorkflowError;

pub const SAVE_CONFIRMATION: Duration = Duration::from_secs(3);
pub const EXPORT_FILE_NAME: &str = "note.md";
pub const EXPORT_CONTENT_TYPE: &str = "text/markdown";

const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

/// Failures the host surfaces to the user as a blocking alert; `Display` is the alert text.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("Please sign in.")]
    SignedOut,
    #[error("Editor not ready.")]
    EditorNotReady,
    #[error("Save failed.")]
    Workflow(#[source] WorkflowError),
}

/// The "saved" confirmation shown after a successful save.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveIndicator {
    shown_at: Option<Instant>,
}

impl SaveIndicator {
    pub fn show(&mut self, now: Instant) {
        self.shown_at = Some(now);
    }

    pub fn hide(&mut self) {
        self.shown_at = None;
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.shown_at.is_some_and(|shown_at| now.duration_since(shown_at) < SAVE_CONFIRMATION)
    }
}

/// A Markdown download offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkdownExport {
    pub file_name: String,
    pub content_type: String,
    pub content: String,
}

impl MarkdownExport {
    pub fn new(content: String) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME.to_owned(),
            content_type: EXPORT_CONTENT_TYPE.to_owned(),
            content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishPayload {
    pub content: EditorDocument,
    pub current_image_index: ImageIndex,
}

/// Derives the workflow's file id from an image URL: the text after the last `/` with the first
/// `.jpg`, then `.jpeg`, then `.png` removed. Matching is case-sensitive and a query string is
/// kept, so ids line up with records the workflow already holds.
pub fn derive_file_id(image_url: &str) -> Option<FileId> {
    let mut id = image_url.rsplit('/').next().unwrap_or_default().to_owned();
    for extension in IMAGE_EXTENSIONS {
        id = id.replacen(extension, "", 1);
    }
    FileId::new(id).ok()
}
