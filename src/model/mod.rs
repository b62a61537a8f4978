// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Identity, the image cursor, the block-editor document, panel geometry and the image-source
//! allow-list.

pub mod document;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod geometry;
pub mod ids;
pub mod image_source;
pub mod index;
pub mod session;

pub use document::{
    Block, BlockContent, Code, EditorDocument, Header, Image, ImageFile, LinkMeta, LinkTool, List,
    ListItem, ListStyle, Paragraph, Quote, Table, EDITOR_DATA_VERSION,
};
pub use geometry::{CropSelection, DragGesture, PixelRect, Point, Size, ViewTransform};
pub use ids::{FileId, Id, IdError, UserId};
pub use image_source::{ImageSourceError, ImageSourcePolicy, RemotePattern};
pub use index::ImageIndex;
pub use session::Session;
