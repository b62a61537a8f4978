// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! HTML fragment to Markdown conversion.
//!
//! The parser is deliberately lenient: unknown tags contribute only their text, stray closing
//! tags are ignored and unclosed elements are closed at the end of input. Output follows
//! CommonMark plus GFM tables and strikethrough.

use std::fmt::Write as _;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "figcaption", "figure", "footer", "h1",
    "h2", "h3", "h4", "h5", "h6", "header", "hr", "main", "nav", "ol", "p", "pre", "section",
    "table", "ul",
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Element(Element),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    fn is_block(&self) -> bool {
        BLOCK_ELEMENTS.contains(&self.name.as_str())
    }
}

/// Converts an HTML fragment to Markdown text.
pub fn html_to_markdown(html: &str) -> String {
    let nodes = parse_fragment(html);
    blocks_of(&nodes).join("\n\n")
}

enum Tag {
    Open { element: Element, self_closing: bool },
    Close(String),
    Ignored,
}

#[derive(Default)]
struct TreeBuilder {
    root: Vec<Node>,
    stack: Vec<Element>,
}

impl TreeBuilder {
    fn children_mut(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(top) => &mut top.children,
            None => &mut self.root,
        }
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let children = self.children_mut();
        if let Some(Node::Text(last)) = children.last_mut() {
            last.push_str(text);
        } else {
            children.push(Node::Text(text.to_owned()));
        }
    }

    fn open(&mut self, element: Element, self_closing: bool) {
        if self_closing || VOID_ELEMENTS.contains(&element.name.as_str()) {
            self.children_mut().push(Node::Element(element));
        } else {
            self.stack.push(element);
        }
    }

    fn close(&mut self, name: &str) {
        if !self.stack.iter().any(|element| element.name == name) {
            return;
        }
        while let Some(element) = self.stack.pop() {
            let done = element.name == name;
            self.children_mut().push(Node::Element(element));
            if done {
                break;
            }
        }
    }

    fn finish(mut self) -> Vec<Node> {
        while let Some(element) = self.stack.pop() {
            self.children_mut().push(Node::Element(element));
        }
        self.root
    }
}

fn parse_fragment(html: &str) -> Vec<Node> {
    let mut builder = TreeBuilder::default();
    let mut rest = html;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.find("-->").map_or("", |end| &after[end + 3..]);
            continue;
        }
        if rest.starts_with('<') {
            match parse_tag(rest) {
                Some((tag, consumed)) => {
                    match tag {
                        Tag::Open { element, self_closing } => builder.open(element, self_closing),
                        Tag::Close(name) => builder.close(&name),
                        Tag::Ignored => {}
                    }
                    rest = &rest[consumed..];
                }
                None => {
                    builder.push_text("<");
                    rest = &rest[1..];
                }
            }
            continue;
        }
        let end = rest.find('<').unwrap_or(rest.len());
        builder.push_text(&decode_entities(&rest[..end]));
        rest = &rest[end..];
    }

    builder.finish()
}

/// Parses one tag at the start of `src` (which begins with `<`). Returns the tag and the number
/// of bytes consumed, or `None` when `src` does not start a well-formed tag.
fn parse_tag(src: &str) -> Option<(Tag, usize)> {
    let body = &src[1..];

    if body.starts_with('!') || body.starts_with('?') {
        let end = body.find('>')?;
        return Some((Tag::Ignored, end + 2));
    }

    if let Some(after) = body.strip_prefix('/') {
        let end = after.find('>')?;
        let name = after[..end].trim().to_ascii_lowercase();
        if name.is_empty() || !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return None;
        }
        return Some((Tag::Close(name), end + 3));
    }

    if !body.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut cursor = Cursor { src: body, pos: 0 };
    let name = cursor.take_while(|c| c.is_ascii_alphanumeric() || c == '-').to_ascii_lowercase();
    let mut attrs = Vec::new();

    loop {
        cursor.take_while(char::is_whitespace);
        if cursor.eat("/>") {
            let element = Element { name, attrs, children: Vec::new() };
            return Some((Tag::Open { element, self_closing: true }, cursor.pos + 1));
        }
        if cursor.eat(">") {
            let element = Element { name, attrs, children: Vec::new() };
            return Some((Tag::Open { element, self_closing: false }, cursor.pos + 1));
        }
        if cursor.eat("/") {
            continue;
        }

        let key = cursor
            .take_while(|c| !c.is_whitespace() && c != '=' && c != '>' && c != '/')
            .to_ascii_lowercase();
        if key.is_empty() {
            // Unterminated tag or a stray character we cannot make sense of.
            cursor.bump()?;
            continue;
        }
        cursor.take_while(char::is_whitespace);
        let value = if cursor.eat("=") {
            cursor.take_while(char::is_whitespace);
            match cursor.peek() {
                Some(quote @ ('"' | '\'')) => {
                    cursor.bump();
                    let value = cursor.take_while(|c| c != quote);
                    cursor.bump()?;
                    decode_entities(value)
                }
                Some(_) => decode_entities(cursor.take_while(|c| !c.is_whitespace() && c != '>')),
                None => return None,
            }
        } else {
            String::new()
        };
        attrs.push((key, value));
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !predicate(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_owned();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start + 1..];
        let decoded = candidate
            .find(';')
            .filter(|&end| end > 0 && end <= 10)
            .and_then(|end| decode_entity(&candidate[..end]).map(|ch| (ch, end)));
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &candidate[end + 1..];
            }
            None => {
                out.push('&');
                rest = candidate;
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(numeric) = name.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}

fn blocks_of(nodes: &[Node]) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inline = String::new();

    for node in nodes {
        match node {
            Node::Element(element) if element.is_block() => {
                flush_inline(&mut inline, &mut blocks);
                let block = block_of(element);
                if !block.trim().is_empty() {
                    blocks.push(block);
                }
            }
            other => render_inline(other, &mut inline),
        }
    }
    flush_inline(&mut inline, &mut blocks);
    blocks
}

fn flush_inline(inline: &mut String, blocks: &mut Vec<String>) {
    let text = finish_inline(inline);
    inline.clear();
    if !text.is_empty() {
        blocks.push(text);
    }
}

/// Trims every line of an inline run and joins them with Markdown hard breaks.
fn finish_inline(inline: &str) -> String {
    inline
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("  \n")
        .trim()
        .to_owned()
}

fn block_of(element: &Element) -> String {
    match element.name.as_str() {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = element.name[1..].parse::<usize>().unwrap_or(1);
            let text = finish_inline(&inline_of(&element.children)).replace("  \n", " ");
            format!("{} {text}", "#".repeat(level))
        }
        "ul" => render_list(element, false),
        "ol" => render_list(element, true),
        "blockquote" => {
            let inner = blocks_of(&element.children).join("\n\n");
            inner
                .lines()
                .map(|line| if line.is_empty() { ">".to_owned() } else { format!("> {line}") })
                .collect::<Vec<_>>()
                .join("\n")
        }
        "pre" => {
            let code = raw_text(&element.children);
            let code = code.strip_suffix('\n').unwrap_or(&code);
            format!("```\n{code}\n```")
        }
        "table" => render_table(element),
        "hr" => "---".to_owned(),
        _ => blocks_of(&element.children).join("\n\n"),
    }
}

fn render_list(element: &Element, ordered: bool) -> String {
    let mut lines = Vec::new();
    let mut number = 1usize;

    for child in &element.children {
        let Node::Element(item) = child else {
            continue;
        };
        if item.name != "li" {
            continue;
        }
        let marker = if ordered { format!("{number}.") } else { "-".to_owned() };
        number += 1;
        let indent = " ".repeat(marker.len() + 1);

        let body = blocks_of(&item.children).join("\n");
        let mut body_lines = body.lines();
        match body_lines.next() {
            Some(first) => lines.push(format!("{marker} {first}")),
            None => lines.push(marker),
        }
        for line in body_lines {
            if line.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("{indent}{line}"));
            }
        }
    }

    lines.join("\n")
}

fn render_table(element: &Element) -> String {
    let mut rows: Vec<Vec<String>> = Vec::new();
    collect_rows(&element.children, &mut rows);
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return String::new();
    }

    let mut out = String::new();
    for (index, row) in rows.iter().enumerate() {
        out.push('|');
        for column in 0..columns {
            let cell = row.get(column).map(String::as_str).unwrap_or("");
            let _ = write!(out, " {} |", cell.replace('|', "\\|"));
        }
        out.push('\n');
        if index == 0 {
            out.push('|');
            for _ in 0..columns {
                out.push_str(" --- |");
            }
            out.push('\n');
        }
    }
    out.truncate(out.trim_end().len());
    out
}

fn collect_rows(nodes: &[Node], rows: &mut Vec<Vec<String>>) {
    for node in nodes {
        let Node::Element(element) = node else {
            continue;
        };
        match element.name.as_str() {
            "thead" | "tbody" | "tfoot" => collect_rows(&element.children, rows),
            "tr" => {
                let cells = element
                    .children
                    .iter()
                    .filter_map(|cell| match cell {
                        Node::Element(cell) if cell.name == "td" || cell.name == "th" => {
                            Some(finish_inline(&inline_of(&cell.children)).replace("  \n", " "))
                        }
                        _ => None,
                    })
                    .collect();
                rows.push(cells);
            }
            _ => {}
        }
    }
}

fn inline_of(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        render_inline(node, &mut out);
    }
    out
}

fn render_inline(node: &Node, out: &mut String) {
    let element = match node {
        Node::Text(text) => {
            push_collapsed(out, text);
            return;
        }
        Node::Element(element) => element,
    };

    match element.name.as_str() {
        "br" => out.push('\n'),
        "strong" | "b" => wrap_inline(out, "**", &element.children),
        "em" | "i" | "cite" => wrap_inline(out, "*", &element.children),
        "s" | "del" | "strike" => wrap_inline(out, "~~", &element.children),
        "code" => {
            let mut code = String::new();
            push_collapsed(&mut code, &raw_text(&element.children));
            let code = code.trim();
            if !code.is_empty() {
                let _ = write!(out, "`{code}`");
            }
        }
        "a" => {
            let text = finish_inline(&inline_of(&element.children));
            match element.attr("href").filter(|href| !href.is_empty()) {
                Some(href) => {
                    let text = if text.is_empty() { href } else { text.as_str() };
                    let _ = write!(out, "[{text}]({href})");
                }
                None => out.push_str(&text),
            }
        }
        "img" => {
            let src = element.attr("src").unwrap_or("");
            if !src.is_empty() {
                let alt = element.attr("alt").unwrap_or("");
                let _ = write!(out, "![{alt}]({src})");
            }
        }
        _ => {
            for child in &element.children {
                render_inline(child, out);
            }
        }
    }
}

/// Wraps the inline rendering of `children` in `marker`, keeping surrounding whitespace outside
/// the markers so emphasis still parses.
fn wrap_inline(out: &mut String, marker: &str, children: &[Node]) {
    let inner = inline_of(children);
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        out.push_str(&inner);
        return;
    }
    if inner.starts_with(char::is_whitespace) {
        push_collapsed(out, " ");
    }
    let _ = write!(out, "{marker}{trimmed}{marker}");
    if inner.ends_with(char::is_whitespace) {
        out.push(' ');
    }
}

fn push_collapsed(out: &mut String, text: &str) {
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !(out.is_empty() || out.ends_with(' ') || out.ends_with('\n')) {
                out.push(' ');
            }
        } else {
            out.push(ch);
        }
    }
}

fn raw_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) if element.name == "br" => out.push('\n'),
            Node::Element(element) => out.push_str(&raw_text(&element.children)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("<h1>Title</h1>", "# Title")]
    #[case("<h3>A <b>bold</b> move</h3>", "### A **bold** move")]
    #[case("<p>one</p><p>two</p>", "one\n\ntwo")]
    #[case("<p>  lots   of\n   space </p>", "lots of space")]
    #[case("<p>line<br>break</p>", "line  \nbreak")]
    #[case("<p>x <i>y</i> <code class=\"inline-code\">z()</code></p>", "x *y* `z()`")]
    #[case("<p><s>old</s> new</p>", "~~old~~ new")]
    #[case("<p>Tom &amp; Jerry &lt;3 &#x1F600; &bogus;</p>", "Tom & Jerry <3 \u{1F600} &bogus;")]
    #[case("<hr/>", "---")]
    #[case(
        "<p><a href=\"https://x.io\">site</a> and <a href=\"https://y.io\"></a></p>",
        "[site](https://x.io) and [https://y.io](https://y.io)"
    )]
    #[case(
        "<img src=\"data:image/jpeg;base64,AA==\" alt=\"crop\" />",
        "![crop](data:image/jpeg;base64,AA==)"
    )]
    #[case("plain <unknown>text</unknown>", "plain text")]
    #[case("<!-- note --><p>after</p>", "after")]
    fn converts(#[case] html: &str, #[case] markdown: &str) {
        assert_eq!(html_to_markdown(html), markdown);
    }

    #[test]
    fn lists_nest_with_indentation() {
        let html = "<ol><li>first<ul><li>a</li><li>b</li></ul></li><li>second</li></ol>";
        assert_eq!(html_to_markdown(html), "1. first\n   - a\n   - b\n2. second");
    }

    #[test]
    fn blockquote_prefixes_every_line() {
        let html = "<blockquote><p>Lighting is overcast</p><cite>reviewer</cite></blockquote>";
        assert_eq!(html_to_markdown(html), "> Lighting is overcast\n>\n> *reviewer*");
    }

    #[test]
    fn pre_keeps_whitespace_and_decodes_entities() {
        let html = "<pre><code>if a &lt; b {\n    go();\n}\n</code></pre>";
        assert_eq!(html_to_markdown(html), "```\nif a < b {\n    go();\n}\n```");
    }

    #[test]
    fn tables_become_pipe_tables() {
        let html = concat!(
            "<table><thead><tr><th>k</th><th>v</th></tr></thead>",
            "<tbody><tr><td>a|b</td><td>1</td></tr><tr><td>c</td></tr></tbody></table>"
        );
        assert_eq!(html_to_markdown(html), "| k | v |\n| --- | --- |\n| a\\|b | 1 |\n| c |  |");
    }

    #[test]
    fn unclosed_and_stray_tags_are_tolerated() {
        assert_eq!(html_to_markdown("<p>open <b>bold"), "open **bold**");
        assert_eq!(html_to_markdown("text</div> more"), "text more");
        assert_eq!(html_to_markdown("a < b"), "a < b");
    }
}
