// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Session lookup for incoming requests.
//!
//! Authentication itself happens upstream; by the time a request arrives here the auth layer
//! has either attached the signed-in user's id or not.

use axum::http::header::{HeaderName, InvalidHeaderName};
use axum::http::HeaderMap;

use crate::model::{Session, UserId};

pub trait SessionResolver: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> Option<Session>;
}

/// Reads the user id from a trusted request header.
#[derive(Debug, Clone)]
pub struct HeaderSessionResolver {
    header: HeaderName,
}

impl HeaderSessionResolver {
    pub fn new(header: &str) -> Result<Self, InvalidHeaderName> {
        Ok(Self { header: HeaderName::from_bytes(header.trim().as_bytes())? })
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }
}

impl SessionResolver for HeaderSessionResolver {
    fn resolve(&self, headers: &HeaderMap) -> Option<Session> {
        let raw = headers.get(&self.header)?.to_str().ok()?;
        match UserId::new(raw.trim()) {
            Ok(user_id) => Some(Session::new(user_id)),
            Err(err) => {
                tracing::debug!(header = %self.header, error = %err, "ignoring session header");
                None
            }
        }
    }
}
