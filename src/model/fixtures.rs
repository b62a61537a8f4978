// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::document::{
    Block, BlockContent, Code, EditorDocument, Header, Image, ImageFile, LinkMeta, LinkTool,
    List, ListItem, ListStyle, Paragraph, Quote, Table,
};
use super::ids::UserId;
use super::session::Session;

pub(crate) fn session(user: &str) -> Session {
    Session::new(UserId::new(user).expect("user id"))
}

fn text(value: &str) -> ListItem {
    ListItem::Text(value.to_owned())
}

/// A document touching every typed block the annotation editor is configured with.
pub(crate) fn street_scene_annotation() -> EditorDocument {
    EditorDocument::from_blocks(vec![
        Block::new(BlockContent::Header(Header {
            text: "Street scene".to_owned(),
            ..Header::default()
        })),
        Block::new(BlockContent::Paragraph(Paragraph {
            text: "A <b>red</b> car waits at the <i>crossing</i>.".to_owned(),
            ..Paragraph::default()
        })),
        Block::new(BlockContent::List(List {
            style: ListStyle::Unordered,
            items: vec![
                text("car"),
                ListItem::Nested {
                    content: "pedestrians".to_owned(),
                    items: vec![text("adult"), text("child")],
                    meta: None,
                    extra: Default::default(),
                },
            ],
            ..List::default()
        })),
        Block::new(BlockContent::Quote(Quote {
            text: "Lighting is overcast".to_owned(),
            caption: "reviewer".to_owned(),
            ..Quote::default()
        })),
        Block::new(BlockContent::Code(Code {
            code: "label = \"car\" && score > 0.9".to_owned(),
            ..Code::default()
        })),
        Block::new(BlockContent::Table(Table {
            with_headings: true,
            content: vec![
                vec!["object".to_owned(), "count".to_owned()],
                vec!["car".to_owned(), "1".to_owned()],
                vec!["person".to_owned(), "2".to_owned()],
            ],
            ..Table::default()
        })),
        Block::new(BlockContent::Image(Image {
            file: ImageFile {
                url: "https://vision.olevel.ai/up/crop-1.jpg".to_owned(),
                ..ImageFile::default()
            },
            caption: "crossing".to_owned(),
            ..Image::default()
        })),
        Block::new(BlockContent::LinkTool(LinkTool {
            link: "https://olevel.ai/guide".to_owned(),
            meta: LinkMeta { title: Some("Labeling guide".to_owned()), ..LinkMeta::default() },
            ..LinkTool::default()
        })),
    ])
}
