// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Deterministic annotation documents for benchmarks (no RNG).

use visionnote::model::{
    Block, BlockContent, Code, EditorDocument, Header, List, ListItem, ListStyle, Quote, Table,
};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    MediumMixed,
    LargeNestedLists,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::MediumMixed => "medium_mixed",
            Self::LargeNestedLists => "large_nested_lists",
        }
    }

    fn sections(self) -> usize {
        match self {
            Self::Small => 1,
            Self::MediumMixed => 12,
            Self::LargeNestedLists => 60,
        }
    }

    fn depth(self) -> usize {
        match self {
            Self::Small | Self::MediumMixed => 1,
            Self::LargeNestedLists => 3,
        }
    }
}

pub fn fixture(case: Case) -> EditorDocument {
    let mut blocks = Vec::new();
    for section in 0..case.sections() {
        blocks.push(Block::new(BlockContent::Header(Header {
            text: format!("Region {section}"),
            ..Header::default()
        })));
        blocks.push(Block::paragraph(format!(
            "Object <b>{section}</b> is a <i>parked car</i> next to a \
             <a href=\"https://x.io/{section}\">lamp post</a> &amp; a bench."
        )));
        blocks.push(Block::new(BlockContent::List(List {
            style: if section % 2 == 0 { ListStyle::Unordered } else { ListStyle::Ordered },
            items: (0..4).map(|item| list_item(section, item, case.depth())).collect(),
            ..List::default()
        })));
        blocks.push(Block::new(BlockContent::Quote(Quote {
            text: format!("Label {section} needs review"),
            caption: "reviewer".to_owned(),
            ..Quote::default()
        })));
        blocks.push(Block::new(BlockContent::Code(Code {
            code: format!("bbox = [{section}, 10, 64, 48]\nclass = \"car\""),
            ..Code::default()
        })));
        blocks.push(Block::new(BlockContent::Table(Table {
            with_headings: true,
            content: vec![
                vec!["label".to_owned(), "confidence".to_owned()],
                vec!["car".to_owned(), format!("0.{section}")],
                vec!["bench".to_owned(), "0.5".to_owned()],
            ],
            ..Table::default()
        })));
        blocks.push(Block::image(format!("https://vision.olevel.ai/up/frame_{section}.jpg")));
    }
    EditorDocument::from_blocks(blocks)
}

fn list_item(section: usize, item: usize, depth: usize) -> ListItem {
    let content = format!("attribute {section}.{item}");
    if depth <= 1 {
        return ListItem::Text(content);
    }
    ListItem::Nested {
        content,
        items: (0..2).map(|child| list_item(section, item * 2 + child, depth - 1)).collect(),
        meta: None,
        extra: Default::default(),
    }
}
