// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use crate::model::{EditorDocument, FileId, ImageIndex, UserId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextImageRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

/// Body posted to the save webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub user_id: UserId,
    /// Markdown rendering of `saved_data`.
    pub context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<FileId>,
    pub saved_data: EditorDocument,
    pub page_index: ImageIndex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::Block;

    #[test]
    fn anonymous_request_omits_user_id() {
        let value = serde_json::to_value(NextImageRequest::default()).expect("json");
        assert_eq!(value, json!({}));

        let request = NextImageRequest { user_id: Some(UserId::new("user_1").expect("id")) };
        assert_eq!(serde_json::to_value(request).expect("json"), json!({"userId": "user_1"}));
    }

    #[test]
    fn save_payload_uses_workflow_field_names() {
        let payload = SavePayload {
            user_id: UserId::new("user_1").expect("id"),
            context: "hello".to_owned(),
            file_id: Some(FileId::new("cat").expect("id")),
            saved_data: EditorDocument::from_blocks(vec![Block::paragraph("hello")]),
            page_index: ImageIndex::new(3),
        };
        assert_eq!(
            serde_json::to_value(payload).expect("json"),
            json!({
                "userId": "user_1",
                "context": "hello",
                "fileId": "cat",
                "savedData": {"blocks": [{"type": "paragraph", "data": {"text": "hello"}}]},
                "pageIndex": 3
            })
        );
    }
}
