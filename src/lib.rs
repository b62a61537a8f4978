// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! VisionNote: image annotation with a block editor.
//!
//! The server side is the editor's image upload backends plus the landing and dashboard pages
//! ([`api`]). The dashboard itself is modelled headlessly in [`dashboard`], talking to the remote
//! workflow service through [`workflow`].

pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod format;
pub mod model;
pub mod render;
pub mod workflow;
