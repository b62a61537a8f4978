// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt::Write as _;

use crate::model::{
    Block, BlockContent, Code, EditorDocument, Header, Image, LinkTool, List, ListItem, ListStyle,
    Quote, Table,
};

/// Renders an editor document to an HTML fragment, one element per block.
///
/// Text fields already carry the editor's inline markup (`<b>`, `<i>`, `<a>`, ...) and are
/// emitted as-is. Attribute values and code bodies are escaped. Block types without a renderer
/// are skipped.
pub fn render_html(document: &EditorDocument) -> String {
    let mut out = String::new();
    for block in &document.blocks {
        render_block(&mut out, block);
    }
    out
}

fn render_block(out: &mut String, block: &Block) {
    match &block.content {
        BlockContent::Paragraph(paragraph) => {
            let _ = write!(out, "<p>{}</p>", paragraph.text);
        }
        BlockContent::Header(header) => render_header(out, header),
        BlockContent::List(list) => render_list(out, list),
        BlockContent::Image(image) => render_image(out, image),
        BlockContent::LinkTool(link) => render_link(out, link),
        BlockContent::Quote(quote) => render_quote(out, quote),
        BlockContent::Code(code) => render_code(out, code),
        BlockContent::Table(table) => render_table(out, table),
        BlockContent::Unsupported { kind, .. } => {
            tracing::warn!(block_type = %kind, "no html renderer for block type; skipping");
        }
    }
}

fn render_header(out: &mut String, header: &Header) {
    let level = header.level.clamp(1, 6);
    let _ = write!(out, "<h{level}>{}</h{level}>", header.text);
}

fn render_list(out: &mut String, list: &List) {
    let tag = match list.style {
        ListStyle::Ordered => "ol",
        ListStyle::Unordered | ListStyle::Checklist => "ul",
    };
    render_list_items(out, tag, &list.items);
}

fn render_list_items(out: &mut String, tag: &str, items: &[ListItem]) {
    let _ = write!(out, "<{tag}>");
    for item in items {
        out.push_str("<li>");
        out.push_str(item.content());
        if !item.children().is_empty() {
            render_list_items(out, tag, item.children());
        }
        out.push_str("</li>");
    }
    let _ = write!(out, "</{tag}>");
}

fn render_image(out: &mut String, image: &Image) {
    let _ = write!(
        out,
        "<figure><img src=\"{}\" alt=\"{}\" /></figure>",
        escape_attr(&image.file.url),
        escape_attr(&image.caption)
    );
}

fn render_link(out: &mut String, link: &LinkTool) {
    let text = link.meta.title.as_deref().filter(|title| !title.is_empty()).unwrap_or(&link.link);
    let _ = write!(
        out,
        "<p><a href=\"{}\">{}</a></p>",
        escape_attr(&link.link),
        escape_text(text)
    );
}

fn render_quote(out: &mut String, quote: &Quote) {
    let _ = write!(out, "<blockquote><p>{}</p>", quote.text);
    if !quote.caption.is_empty() {
        let _ = write!(out, "<cite>{}</cite>", quote.caption);
    }
    out.push_str("</blockquote>");
}

fn render_code(out: &mut String, code: &Code) {
    let _ = write!(out, "<pre><code>{}</code></pre>", escape_text(&code.code));
}

fn render_table(out: &mut String, table: &Table) {
    out.push_str("<table>");
    let mut rows = table.content.iter();
    if table.with_headings {
        if let Some(heading) = rows.next() {
            out.push_str("<thead><tr>");
            for cell in heading {
                let _ = write!(out, "<th>{cell}</th>");
            }
            out.push_str("</tr></thead>");
        }
    }
    out.push_str("<tbody>");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{cell}</td>");
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
}

pub(crate) fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::fixtures::street_scene_annotation;

    #[test]
    fn renders_every_configured_block_type() {
        let html = render_html(&street_scene_annotation());
        assert_eq!(
            html,
            concat!(
                "<h2>Street scene</h2>",
                "<p>A <b>red</b> car waits at the <i>crossing</i>.</p>",
                "<ul><li>car</li><li>pedestrians<ul><li>adult</li><li>child</li></ul></li></ul>",
                "<blockquote><p>Lighting is overcast</p><cite>reviewer</cite></blockquote>",
                "<pre><code>label = \"car\" &amp;&amp; score &gt; 0.9</code></pre>",
                "<table><thead><tr><th>object</th><th>count</th></tr></thead>",
                "<tbody><tr><td>car</td><td>1</td></tr><tr><td>person</td><td>2</td></tr></tbody>",
                "</table>",
                "<figure><img src=\"https://vision.olevel.ai/up/crop-1.jpg\" alt=\"crossing\" />",
                "</figure>",
                "<p><a href=\"https://olevel.ai/guide\">Labeling guide</a></p>",
            )
        );
    }

    #[test]
    fn header_level_is_clamped() {
        let document = EditorDocument::from_blocks(vec![Block::new(BlockContent::Header(
            Header { text: "deep".to_owned(), level: 9, ..Header::default() },
        ))]);
        assert_eq!(render_html(&document), "<h6>deep</h6>");
    }

    #[test]
    fn unsupported_blocks_are_skipped() {
        let document = EditorDocument::from_blocks(vec![
            Block::new(BlockContent::Unsupported { kind: "embed".to_owned(), data: json!({}) }),
            Block::paragraph("kept"),
        ]);
        assert_eq!(render_html(&document), "<p>kept</p>");
    }

    #[test]
    fn attribute_values_are_escaped() {
        let mut image = Image::default();
        image.file.url = "https://x/a.png?a=1&b=2".to_owned();
        image.caption = "say \"cheese\"".to_owned();
        let document = EditorDocument::from_blocks(vec![Block::new(BlockContent::Image(image))]);
        assert_eq!(
            render_html(&document),
            concat!(
                "<figure><img src=\"https://x/a.png?a=1&amp;b=2\" ",
                "alt=\"say &quot;cheese&quot;\" /></figure>"
            )
        );
    }
}
