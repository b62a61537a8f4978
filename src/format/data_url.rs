// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! `data:` URLs carrying base64 payloads.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

const PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Encodes `bytes` as `data:<mime>;base64,<payload>`.
///
/// `mime` is written as given; an empty type yields `data:;base64,...`, which readers treat as
/// `text/plain`.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    let payload = STANDARD.encode(bytes);
    let mut out =
        String::with_capacity(PREFIX.len() + mime.len() + BASE64_MARKER.len() + payload.len());
    out.push_str(PREFIX);
    out.push_str(mime);
    out.push_str(BASE64_MARKER);
    out.push_str(&payload);
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum DataUrlError {
    #[error("not a data url")]
    MissingPrefix,
    #[error("data url is not base64-encoded")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    Payload(#[from] base64::DecodeError),
}

/// Decodes a base64 `data:` URL back into its MIME type and bytes.
pub fn decode_data_url(url: &str) -> Result<DataUrl, DataUrlError> {
    let rest = url.strip_prefix(PREFIX).ok_or(DataUrlError::MissingPrefix)?;
    let (mime, payload) = rest.split_once(BASE64_MARKER).ok_or(DataUrlError::NotBase64)?;
    let bytes = STANDARD.decode(payload)?;
    Ok(DataUrl { mime: mime.to_owned(), bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_mime_prefix() {
        assert_eq!(encode_data_url("image/png", b"\x89PNG"), "data:image/png;base64,iVBORw==");
        assert_eq!(encode_data_url("", b"hi"), "data:;base64,aGk=");
    }

    #[test]
    fn decode_reverses_encode() {
        let bytes = (0u8..=255).collect::<Vec<_>>();
        let url = encode_data_url("application/octet-stream", &bytes);
        let decoded = decode_data_url(&url).expect("decode");
        assert_eq!(decoded.mime, "application/octet-stream");
        assert_eq!(decoded.bytes, bytes);
    }

    #[test]
    fn decode_rejects_non_base64_urls() {
        assert!(matches!(decode_data_url("https://x"), Err(DataUrlError::MissingPrefix)));
        assert!(matches!(decode_data_url("data:text/plain,hello"), Err(DataUrlError::NotBase64)));
        assert!(matches!(decode_data_url("data:;base64,@@@"), Err(DataUrlError::Payload(_))));
    }
}
