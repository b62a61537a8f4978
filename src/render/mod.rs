// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rendering for editor documents.
//!
//! Documents are rendered to an HTML intermediate form first and then converted to the Markdown
//! text the workflow service stores and the export action downloads.

use crate::model::EditorDocument;

pub mod html;
pub mod markdown;

pub use html::render_html;
pub use markdown::html_to_markdown;

/// Renders a document to Markdown via its HTML form.
pub fn render_markdown(document: &EditorDocument) -> String {
    html_to_markdown(&render_html(document))
}
