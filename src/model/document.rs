// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Block-editor document model.
//!
//! Mirrors the Editor.js "saved data" shape: a document is a list of `{id, type, data}` blocks.
//! Block types the annotation editor is configured with get typed contents; anything else is
//! kept verbatim so it survives a restore/save round trip.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Version string stamped on snapshots produced by [`crate::dashboard::EditorInstance`].
pub const EDITOR_DATA_VERSION: &str = "2.30.7";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl EditorDocument {
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { time: None, blocks, version: None }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock", into = "RawBlock")]
pub struct Block {
    pub id: Option<String>,
    pub content: BlockContent,
    pub tunes: Option<Value>,
}

impl Block {
    pub fn new(content: BlockContent) -> Self {
        Self { id: None, content, tunes: None }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockContent::Paragraph(Paragraph { text: text.into(), ..Paragraph::default() }))
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::new(BlockContent::Image(Image {
            file: ImageFile { url: url.into(), ..ImageFile::default() },
            ..Image::default()
        }))
    }

    pub fn kind(&self) -> &str {
        self.content.kind()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Paragraph(Paragraph),
    Header(Header),
    List(List),
    Image(Image),
    LinkTool(LinkTool),
    Quote(Quote),
    Code(Code),
    Table(Table),
    Unsupported { kind: String, data: Value },
}

impl BlockContent {
    pub fn kind(&self) -> &str {
        match self {
            Self::Paragraph(_) => "paragraph",
            Self::Header(_) => "header",
            Self::List(_) => "list",
            Self::Image(_) => "image",
            Self::LinkTool(_) => "linkTool",
            Self::Quote(_) => "quote",
            Self::Code(_) => "code",
            Self::Table(_) => "table",
            Self::Unsupported { kind, .. } => kind,
        }
    }
}

/// Editor tools write `null` for fields a user never touched; read those as the default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Fields this editor does not model, kept for the save round trip.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default = "default_header_level", deserialize_with = "header_level")]
    pub level: u8,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Header {
    fn default() -> Self {
        Self { text: String::new(), level: default_header_level(), extra: Map::new() }
    }
}

fn default_header_level() -> u8 {
    2
}

fn header_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    Ok(Option::<u8>::deserialize(deserializer)?.unwrap_or_else(default_header_level))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    #[default]
    Unordered,
    Ordered,
    Checklist,
}

/// List block. The v2 list tool's top-level `meta` (`start`, `counterType`) lives in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct List {
    #[serde(default, deserialize_with = "null_as_default")]
    pub style: ListStyle,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<ListItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A list entry. The list tool's v1 format stores bare strings; v2 nests objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListItem {
    Text(String),
    Nested {
        #[serde(default, deserialize_with = "null_as_default")]
        content: String,
        #[serde(default, deserialize_with = "null_as_default")]
        items: Vec<ListItem>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        meta: Option<Value>,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
}

impl ListItem {
    pub fn content(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Nested { content, .. } => content,
        }
    }

    pub fn children(&self) -> &[ListItem] {
        match self {
            Self::Text(_) => &[],
            Self::Nested { items, .. } => items,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageFile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default, deserialize_with = "null_as_default")]
    pub file: ImageFile,
    #[serde(default, deserialize_with = "null_as_default")]
    pub caption: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub with_border: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stretched: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub with_background: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageFile>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkTool {
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: LinkMeta,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Code {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default, deserialize_with = "null_as_default")]
    pub with_headings: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire form of a block; typed contents are resolved from `type` + `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tunes: Option<Value>,
}

impl TryFrom<RawBlock> for Block {
    type Error = serde_json::Error;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        let RawBlock { id, kind, data, tunes } = raw;
        let data = if data.is_null() { Value::Object(Default::default()) } else { data };
        let content = match kind.as_str() {
            "paragraph" => BlockContent::Paragraph(serde_json::from_value(data)?),
            "header" => BlockContent::Header(serde_json::from_value(data)?),
            "list" => BlockContent::List(serde_json::from_value(data)?),
            "image" => BlockContent::Image(serde_json::from_value(data)?),
            "linkTool" => BlockContent::LinkTool(serde_json::from_value(data)?),
            "quote" => BlockContent::Quote(serde_json::from_value(data)?),
            "code" => BlockContent::Code(serde_json::from_value(data)?),
            "table" => BlockContent::Table(serde_json::from_value(data)?),
            _ => BlockContent::Unsupported { kind, data },
        };
        Ok(Self { id, content, tunes })
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        let Block { id, content, tunes } = block;
        let (kind, data) = match content {
            BlockContent::Unsupported { kind, data } => (kind, data),
            typed => {
                let kind = typed.kind().to_owned();
                let data = match typed {
                    BlockContent::Paragraph(data) => serde_json::to_value(data),
                    BlockContent::Header(data) => serde_json::to_value(data),
                    BlockContent::List(data) => serde_json::to_value(data),
                    BlockContent::Image(data) => serde_json::to_value(data),
                    BlockContent::LinkTool(data) => serde_json::to_value(data),
                    BlockContent::Quote(data) => serde_json::to_value(data),
                    BlockContent::Code(data) => serde_json::to_value(data),
                    BlockContent::Table(data) => serde_json::to_value(data),
                    BlockContent::Unsupported { data, .. } => Ok(data),
                };
                // Plain data structs with string keys always serialize.
                (kind, data.unwrap_or(Value::Null))
            }
        };
        Self { id, kind, data, tunes }
    }
}
