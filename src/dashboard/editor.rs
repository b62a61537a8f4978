// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::format::RestoredContent;
use crate::model::{Block, EditorDocument, EDITOR_DATA_VERSION};

pub const EDITOR_HOLDER_ID: &str = "editorjs";
pub const EDITOR_PLACEHOLDER: &str = "Type your description here...";
pub const EDITOR_MIN_HEIGHT: u32 = 400;
pub const UPLOAD_BY_FILE_ENDPOINT: &str = "/api/uploadImage";
pub const UPLOAD_BY_URL_ENDPOINT: &str = "/api/fetchUrl";

/// Block-editor construction options, serialized in the shape the browser editor expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    pub holder: String,
    pub placeholder: String,
    pub min_height: u32,
    pub tools: ToolSet,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            holder: EDITOR_HOLDER_ID.to_owned(),
            placeholder: EDITOR_PLACEHOLDER.to_owned(),
            min_height: EDITOR_MIN_HEIGHT,
            tools: ToolSet::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub name: String,
    pub inline_toolbar: bool,
    pub endpoints: Option<ImageEndpoints>,
}

impl ToolConfig {
    fn plain(name: &str) -> Self {
        Self { name: name.to_owned(), inline_toolbar: false, endpoints: None }
    }

    fn with_inline_toolbar(name: &str) -> Self {
        Self { inline_toolbar: true, ..Self::plain(name) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEndpoints {
    pub by_file: String,
    pub by_url: String,
}

impl Default for ImageEndpoints {
    fn default() -> Self {
        Self {
            by_file: UPLOAD_BY_FILE_ENDPOINT.to_owned(),
            by_url: UPLOAD_BY_URL_ENDPOINT.to_owned(),
        }
    }
}

/// Ordered tool registrations; serialized as a `{name: options}` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSet(Vec<ToolConfig>);

impl ToolSet {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|tool| tool.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&ToolConfig> {
        self.0.iter().find(|tool| tool.name == name)
    }
}

impl Default for ToolSet {
    fn default() -> Self {
        Self(vec![
            ToolConfig::with_inline_toolbar("header"),
            ToolConfig::with_inline_toolbar("list"),
            ToolConfig::plain("linkTool"),
            ToolConfig::plain("inlineCode"),
            ToolConfig::plain("quote"),
            ToolConfig::plain("code"),
            ToolConfig::plain("table"),
            ToolConfig { endpoints: Some(ImageEndpoints::default()), ..ToolConfig::plain("image") },
        ])
    }
}

impl Serialize for ToolSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Options<'a> {
            #[serde(skip_serializing_if = "std::ops::Not::not")]
            inline_toolbar: bool,
            #[serde(skip_serializing_if = "Option::is_none")]
            config: Option<ImageToolConfig<'a>>,
        }

        #[derive(Serialize)]
        struct ImageToolConfig<'a> {
            endpoints: &'a ImageEndpoints,
        }

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for tool in &self.0 {
            let options = Options {
                inline_toolbar: tool.inline_toolbar,
                config: tool.endpoints.as_ref().map(|endpoints| ImageToolConfig { endpoints }),
            };
            map.serialize_entry(&tool.name, &options)?;
        }
        map.end()
    }
}

/// A live block editor bound to the dashboard.
///
/// Holds the working document in memory; `save` snapshots it the way the browser editor's own
/// `save()` does. Dropping the instance is its `destroy()`.
#[derive(Debug)]
pub struct EditorInstance {
    config: EditorConfig,
    document: EditorDocument,
}

impl EditorInstance {
    pub(crate) fn new(config: EditorConfig) -> Self {
        tracing::debug!(holder = %config.holder, "editor constructed");
        Self { config, document: EditorDocument::default() }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn blocks(&self) -> &[Block] {
        &self.document.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    pub fn save(&self) -> EditorDocument {
        let time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0);
        EditorDocument {
            time: Some(time),
            blocks: self.document.blocks.clone(),
            version: Some(EDITOR_DATA_VERSION.to_owned()),
        }
    }

    pub fn clear(&mut self) {
        self.document.blocks.clear();
    }

    /// Replaces the content with a full saved document.
    pub fn render(&mut self, document: EditorDocument) {
        self.document = document;
    }

    /// Replaces the content with a bare block list.
    pub fn render_blocks(&mut self, blocks: Vec<Block>) {
        self.document.blocks = blocks;
    }

    pub fn insert(&mut self, block: Block) {
        self.document.blocks.push(block);
    }

    /// Clears the editor and loads previously saved content into it.
    pub fn restore(&mut self, content: RestoredContent) {
        self.clear();
        match content {
            RestoredContent::Blank => {}
            RestoredContent::Blocks(blocks) => self.render_blocks(blocks),
            RestoredContent::Document(document) => self.render(document),
            RestoredContent::Context(context) => self.insert(Block::paragraph(context)),
        }
    }
}

impl Drop for EditorInstance {
    fn drop(&mut self) {
        tracing::debug!(holder = %self.config.holder, "editor destroyed");
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::BlockContent;

    #[test]
    fn config_serializes_in_browser_editor_shape() {
        let value = serde_json::to_value(EditorConfig::default()).expect("serialize");
        assert_eq!(
            value,
            json!({
                "holder": "editorjs",
                "placeholder": "Type your description here...",
                "minHeight": 400,
                "tools": {
                    "header": {"inlineToolbar": true},
                    "list": {"inlineToolbar": true},
                    "linkTool": {},
                    "inlineCode": {},
                    "quote": {},
                    "code": {},
                    "table": {},
                    "image": {
                        "config": {
                            "endpoints": {
                                "byFile": "/api/uploadImage",
                                "byUrl": "/api/fetchUrl"
                            }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn tools_keep_registration_order() {
        let config = EditorConfig::default();
        assert_eq!(
            config.tools.names().collect::<Vec<_>>(),
            ["header", "list", "linkTool", "inlineCode", "quote", "code", "table", "image"]
        );
        assert!(config.tools.get("image").and_then(|tool| tool.endpoints.as_ref()).is_some());
    }

    #[test]
    fn save_stamps_time_and_version() {
        let mut editor = EditorInstance::new(EditorConfig::default());
        editor.insert(Block::paragraph("hello"));
        let snapshot = editor.save();
        assert!(snapshot.time.is_some());
        assert_eq!(snapshot.version.as_deref(), Some(EDITOR_DATA_VERSION));
        assert_eq!(snapshot.blocks, vec![Block::paragraph("hello")]);
    }

    #[test]
    fn restore_clears_previous_content() {
        let mut editor = EditorInstance::new(EditorConfig::default());
        editor.insert(Block::paragraph("stale"));

        editor.restore(RestoredContent::Context("# Notes".to_owned()));
        assert_eq!(editor.blocks(), [Block::paragraph("# Notes")]);

        editor.restore(RestoredContent::Blank);
        assert!(editor.is_empty());

        let document =
            EditorDocument::from_blocks(vec![Block::image("data:image/png;base64,AA==")]);
        editor.restore(RestoredContent::Document(document));
        assert!(matches!(editor.blocks()[0].content, BlockContent::Image(_)));
    }
}
