// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime configuration.
//!
//! Values resolve in order: built-in defaults, then `VISIONNOTE_*` environment variables, then
//! command-line flags (applied by the binary).

use crate::model::ImageSourcePolicy;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_AUTH_HEADER: &str = "x-visionnote-user-id";
pub const DEFAULT_UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

pub const DEFAULT_NEXT_IMAGE_ENDPOINT: &str = "https://n8n.olevel.ai/webhook/getRandomImage";
pub const DEFAULT_SAVE_ENDPOINT: &str = "https://n8n.olevel.ai/webhook/saveData";

pub const ENV_HOST: &str = "VISIONNOTE_HOST";
pub const ENV_PORT: &str = "VISIONNOTE_PORT";
pub const ENV_AUTH_HEADER: &str = "VISIONNOTE_AUTH_HEADER";
pub const ENV_UPLOAD_LIMIT: &str = "VISIONNOTE_UPLOAD_LIMIT";
pub const ENV_NEXT_IMAGE_ENDPOINT: &str = "VISIONNOTE_NEXT_IMAGE_ENDPOINT";
pub const ENV_SAVE_ENDPOINT: &str = "VISIONNOTE_SAVE_ENDPOINT";

/// Settings for the HTTP server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Request header the upstream auth layer uses to pass the signed-in user id.
    pub auth_header: String,
    /// Largest request body `uploadImage` accepts, in bytes.
    pub upload_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            auth_header: DEFAULT_AUTH_HEADER.to_owned(),
            upload_limit: DEFAULT_UPLOAD_LIMIT,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup; unset or unparsable values keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: env_string(&lookup, ENV_HOST).unwrap_or(defaults.host),
            port: env_parse(&lookup, ENV_PORT).unwrap_or(defaults.port),
            auth_header: env_string(&lookup, ENV_AUTH_HEADER).unwrap_or(defaults.auth_header),
            upload_limit: env_parse(&lookup, ENV_UPLOAD_LIMIT).unwrap_or(defaults.upload_limit),
        }
    }
}

/// The two fixed webhooks of the remote workflow service plus the image allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowEndpoints {
    pub next_image_endpoint: String,
    pub save_endpoint: String,
    pub image_policy: ImageSourcePolicy,
}

impl Default for WorkflowEndpoints {
    fn default() -> Self {
        Self {
            next_image_endpoint: DEFAULT_NEXT_IMAGE_ENDPOINT.to_owned(),
            save_endpoint: DEFAULT_SAVE_ENDPOINT.to_owned(),
            image_policy: ImageSourcePolicy::default(),
        }
    }
}

impl WorkflowEndpoints {
    /// Resolves the webhooks from `lookup` (an environment reader), falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            next_image_endpoint: env_string(&lookup, ENV_NEXT_IMAGE_ENDPOINT)
                .unwrap_or(defaults.next_image_endpoint),
            save_endpoint: env_string(&lookup, ENV_SAVE_ENDPOINT).unwrap_or(defaults.save_endpoint),
            image_policy: defaults.image_policy,
        }
    }
}

fn env_string(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).map(|raw| raw.trim().to_owned()).filter(|value| !value.is_empty())
}

fn env_parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Option<T> {
    let raw = env_string(lookup, name)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(variable = name, value = %raw, "ignoring unparsable environment value");
            None
        }
    }
}
