// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Allow-list of remote hosts images may be loaded from.
//!
//! Patterns use the same glob vocabulary as the image CDN configuration they replace:
//! in hostnames `*` stands for exactly one label and `**` for one or more labels; in pathnames
//! `*` stands for one segment and `**` for any remainder (including nothing).

use std::fmt;

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePattern {
    protocol: String,
    hostname: String,
    pathname: Option<String>,
    port: Option<u16>,
}

impl RemotePattern {
    pub fn new(protocol: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self { protocol: protocol.into(), hostname: hostname.into(), pathname: None, port: None }
    }

    pub fn https(hostname: impl Into<String>) -> Self {
        Self::new("https", hostname)
    }

    pub fn with_pathname(mut self, pathname: impl Into<String>) -> Self {
        self.pathname = Some(pathname.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn matches(&self, url: &Url) -> bool {
        if url.scheme() != self.protocol {
            return false;
        }
        let Some(host) = url.host_str() else {
            return false;
        };
        if !glob_match(&self.hostname, host, '.') {
            return false;
        }
        if let Some(port) = self.port {
            if url.port_or_known_default() != Some(port) {
                return false;
            }
        }
        match &self.pathname {
            Some(pathname) => glob_match(pathname, url.path(), '/'),
            None => true,
        }
    }
}

/// Matches `value` against `pattern`, where both are split on `separator`.
fn glob_match(pattern: &str, value: &str, separator: char) -> bool {
    let pattern = pattern.split(separator).collect::<Vec<_>>();
    let value = value.split(separator).collect::<Vec<_>>();
    match_segments(&pattern, &value, separator == '/')
}

fn match_segments(pattern: &[&str], value: &[&str], double_star_may_be_empty: bool) -> bool {
    match pattern.split_first() {
        None => value.is_empty(),
        Some((&"**", rest)) => {
            let min = if double_star_may_be_empty { 0 } else { 1 };
            (min..=value.len())
                .any(|skip| match_segments(rest, &value[skip..], double_star_may_be_empty))
        }
        Some((&"*", rest)) => {
            !value.is_empty()
                && !value[0].is_empty()
                && match_segments(rest, &value[1..], double_star_may_be_empty)
        }
        Some((literal, rest)) => {
            value.first().is_some_and(|segment| segment == literal)
                && match_segments(rest, &value[1..], double_star_may_be_empty)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSourceError {
    InvalidUrl { url: String, reason: String },
    NotAllowed { url: String },
}

impl fmt::Display for ImageSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl { url, reason } => write!(f, "invalid image url '{url}': {reason}"),
            Self::NotAllowed { url } => write!(f, "image host not allowed: {url}"),
        }
    }
}

impl std::error::Error for ImageSourceError {}

/// The set of remote patterns images may be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSourcePolicy {
    patterns: Vec<RemotePattern>,
}

impl Default for ImageSourcePolicy {
    fn default() -> Self {
        Self::new(vec![
            RemotePattern::https("vision.olevel.ai").with_pathname("/up/**"),
            RemotePattern::https("n8n.olevel.ai"),
            RemotePattern::https("**.olevel.ai"),
        ])
    }
}

impl ImageSourcePolicy {
    pub fn new(patterns: Vec<RemotePattern>) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &[RemotePattern] {
        &self.patterns
    }

    pub fn is_allowed(&self, url: &Url) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(url))
    }

    /// Parses `raw` and checks it against the allow-list.
    ///
    /// `data:` URLs are inline content rather than a remote host and are always accepted.
    pub fn check(&self, raw: &str) -> Result<Url, ImageSourceError> {
        let url = Url::parse(raw).map_err(|err| ImageSourceError::InvalidUrl {
            url: raw.to_owned(),
            reason: err.to_string(),
        })?;
        if url.scheme() == "data" || self.is_allowed(&url) {
            Ok(url)
        } else {
            Err(ImageSourceError::NotAllowed { url: raw.to_owned() })
        }
    }
}
