// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Boundary decoder for the workflow's "next image" response.
//!
//! Wire shape (every field optional on the wire):
//!
//! ```json
//! {"image": "<url>", "data": "<json text>"}
//! ```
//!
//! where the `data` JSON text is `{"savedData": <blocks array | document | json text>,
//! "context": "<markdown>"}`. The image field is required and decoded strictly; the saved state
//! is best effort and never fails the whole response.

use serde_json::{Map, Value};

use crate::model::{Block, EditorDocument};

#[derive(Debug)]
pub struct NextImage {
    pub image: String,
    pub saved: SavedContent,
}

/// What the editor should do with the saved state attached to a response.
#[derive(Debug)]
pub enum SavedContent {
    /// No saved state was sent; the editor keeps whatever it holds.
    Absent,
    /// Clear the editor, then restore this content.
    Restore(RestoredContent),
    /// Saved state was sent but could not be read; the editor keeps whatever it holds.
    Malformed(SavedStateError),
    /// Saved state was read but its content is unusable; the editor is cleared and left blank.
    Unusable(SavedStateError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestoredContent {
    /// Saved state was present but carried nothing restorable.
    Blank,
    /// A bare block array, rendered block by block.
    Blocks(Vec<Block>),
    /// A full document with a `blocks` field.
    Document(EditorDocument),
    /// Only a Markdown context string; restored as a single paragraph.
    Context(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("workflow response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("workflow response is empty")]
    Empty,
    #[error("workflow response is not a JSON object")]
    NotAnObject,
    #[error("workflow response has no `image` field")]
    MissingImage,
    #[error("workflow response `image` field is not a string")]
    ImageNotString,
}

#[derive(Debug, thiserror::Error)]
pub enum SavedStateError {
    #[error("saved state is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("saved state is not a JSON object")]
    NotAnObject,
    #[error("saved editor data does not have the block shape: {0}")]
    Blocks(#[source] serde_json::Error),
}

pub fn decode_next_image_slice(bytes: &[u8]) -> Result<NextImage, DecodeError> {
    let value: Value = serde_json::from_slice(bytes)?;
    decode_next_image(value)
}

pub fn decode_next_image(value: Value) -> Result<NextImage, DecodeError> {
    let mut object = match value {
        Value::Null => return Err(DecodeError::Empty),
        Value::Object(object) => object,
        _ => return Err(DecodeError::NotAnObject),
    };

    let image = match object.remove("image") {
        None | Some(Value::Null) => return Err(DecodeError::MissingImage),
        Some(Value::String(image)) => image,
        Some(_) => return Err(DecodeError::ImageNotString),
    };

    let saved = match take_truthy(&mut object, "data") {
        None => SavedContent::Absent,
        Some(data) => match parse_if_text(data) {
            Err(err) => SavedContent::Malformed(err),
            Ok(state) => match decode_saved_state(state) {
                Ok(restored) => SavedContent::Restore(restored),
                Err(err) => SavedContent::Unusable(err),
            },
        },
    };

    Ok(NextImage { image, saved })
}

fn decode_saved_state(state: Value) -> Result<RestoredContent, SavedStateError> {
    let mut state = match state {
        Value::Object(state) => state,
        _ => return Err(SavedStateError::NotAnObject),
    };

    if let Some(saved) = take_truthy(&mut state, "savedData") {
        return match parse_if_text(saved)? {
            blocks @ Value::Array(_) => serde_json::from_value(blocks)
                .map(RestoredContent::Blocks)
                .map_err(SavedStateError::Blocks),
            Value::Object(document) if document.contains_key("blocks") => {
                serde_json::from_value(Value::Object(document))
                    .map(RestoredContent::Document)
                    .map_err(SavedStateError::Blocks)
            }
            _ => Ok(RestoredContent::Blank),
        };
    }

    match take_truthy(&mut state, "context") {
        Some(Value::String(context)) => Ok(RestoredContent::Context(context)),
        _ => Ok(RestoredContent::Blank),
    }
}

/// Saved state is frequently double-encoded: a JSON string holding JSON text.
fn parse_if_text(value: Value) -> Result<Value, SavedStateError> {
    match value {
        Value::String(text) => serde_json::from_str(&text).map_err(SavedStateError::Json),
        other => Ok(other),
    }
}

fn take_truthy(object: &mut Map<String, Value>, key: &str) -> Option<Value> {
    object.remove(key).filter(is_truthy)
}

/// JavaScript truthiness of a JSON value, which is how the workflow's optional fields are read.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::BlockContent;

    fn restored(value: Value) -> RestoredContent {
        match decode_next_image(value).expect("decode").saved {
            SavedContent::Restore(restored) => restored,
            other => panic!("expected restorable content, got {other:?}"),
        }
    }

    #[test]
    fn image_only_response_leaves_editor_alone() {
        let next =
            decode_next_image(json!({"image": "https://n8n.olevel.ai/a.png"})).expect("decode");
        assert_eq!(next.image, "https://n8n.olevel.ai/a.png");
        assert!(matches!(next.saved, SavedContent::Absent));
    }

    #[test]
    fn image_field_is_required_and_must_be_a_string() {
        assert!(matches!(decode_next_image(json!({})), Err(DecodeError::MissingImage)));
        assert!(matches!(
            decode_next_image(json!({"image": null})),
            Err(DecodeError::MissingImage)
        ));
        assert!(matches!(
            decode_next_image(json!({"image": 42})),
            Err(DecodeError::ImageNotString)
        ));
        assert!(matches!(decode_next_image(Value::Null), Err(DecodeError::Empty)));
        assert!(matches!(decode_next_image(json!([1, 2])), Err(DecodeError::NotAnObject)));
        assert!(matches!(decode_next_image_slice(b"<html>"), Err(DecodeError::Json(_))));
    }

    #[test]
    fn saved_block_array_is_restored_as_blocks() {
        let data =
            json!({"savedData": [{"type": "paragraph", "data": {"text": "hi"}}]}).to_string();
        let RestoredContent::Blocks(blocks) = restored(json!({"image": "u", "data": data})) else {
            panic!("expected blocks");
        };
        assert_eq!(blocks.len(), 1);
        assert!(matches!(&blocks[0].content, BlockContent::Paragraph(p) if p.text == "hi"));
    }

    #[test]
    fn double_encoded_document_is_restored_as_document() {
        let document = json!({
            "time": 1,
            "blocks": [{"type": "header", "data": {"text": "T", "level": 1}}]
        });
        let data = json!({"savedData": document.to_string()}).to_string();
        let RestoredContent::Document(document) = restored(json!({"image": "u", "data": data}))
        else {
            panic!("expected document");
        };
        assert_eq!(document.time, Some(1));
        assert_eq!(document.blocks.len(), 1);
    }

    #[test]
    fn context_is_used_when_no_saved_data() {
        let data = json!({"savedData": null, "context": "# Notes"}).to_string();
        assert_eq!(
            restored(json!({"image": "u", "data": data})),
            RestoredContent::Context("# Notes".to_owned())
        );
    }

    #[test]
    fn object_data_is_accepted_and_unrecognised_saved_data_is_blank() {
        assert_eq!(
            restored(json!({"image": "u", "data": {"savedData": {"foo": 1}}})),
            RestoredContent::Blank
        );
        assert_eq!(restored(json!({"image": "u", "data": "{}"})), RestoredContent::Blank);
    }

    #[test]
    fn malformed_saved_state_does_not_fail_the_image() {
        let next = decode_next_image(json!({"image": "u", "data": "{not json"})).expect("decode");
        assert_eq!(next.image, "u");
        assert!(matches!(next.saved, SavedContent::Malformed(SavedStateError::Json(_))));
    }

    #[test]
    fn readable_state_with_unusable_content_is_distinct_from_unreadable_state() {
        let next = decode_next_image(json!({"image": "u", "data": "[1]"})).expect("decode");
        assert!(matches!(next.saved, SavedContent::Unusable(SavedStateError::NotAnObject)));

        let data = json!({"savedData": "{broken"}).to_string();
        let next = decode_next_image(json!({"image": "u", "data": data})).expect("decode");
        assert!(matches!(next.saved, SavedContent::Unusable(SavedStateError::Json(_))));

        let data = json!({"savedData": [{"no_type": true}]}).to_string();
        let next = decode_next_image(json!({"image": "u", "data": data})).expect("decode");
        assert!(matches!(next.saved, SavedContent::Unusable(SavedStateError::Blocks(_))));
    }
}
