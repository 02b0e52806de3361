//! Normalization pass used by the description excerpt.
//!
//! The markdown is parsed with the GFM extensions and written back out as
//! markdown in one canonical form: one blank line between blocks, `*` list
//! bullets, fenced code, `***` rules. The excerpt filter in
//! [`crate::content::parsing_utils`] works line by line on this output, so the
//! exact shape of every emitted line matters.

use lazy_static::lazy_static;
use markdown::mdast::{AlignKind, Link, Node, ReferenceKind};
use markdown::ParseOptions;
use regex::Regex;

/// Re-emits `md_text` as normalized markdown.
pub fn normalize_markdown(md_text: &str) -> Result<String, String> {
    let tree = markdown::to_mdast(md_text, &ParseOptions::gfm()).map_err(|e| e.reason)?;
    let mut out = block(&tree);
    if !out.is_empty() {
        out.push('\n');
    }
    Ok(out)
}

fn blocks(nodes: &[Node], separator: &str) -> String {
    nodes.iter()
        .map(block)
        .filter(|b| !b.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn block(node: &Node) -> String {
    match node {
        Node::Root(root) => blocks(&root.children, "\n\n"),
        Node::Heading(heading) => {
            format!("{} {}", "#".repeat(heading.depth as usize), inline(&heading.children))
        }
        Node::Paragraph(paragraph) => inline(&paragraph.children),
        Node::Code(code) => {
            let mut info = code.lang.clone().unwrap_or_default();
            if let Some(ref meta) = code.meta {
                info.push(' ');
                info.push_str(meta);
            }
            format!("```{}\n{}\n```", info, code.value)
        }
        Node::Math(math) => format!("$$\n{}\n$$", math.value),
        Node::Html(html) => html.value.clone(),
        Node::Yaml(yaml) => format!("---\n{}\n---", yaml.value),
        Node::Toml(toml) => format!("+++\n{}\n+++", toml.value),
        Node::ThematicBreak(_) => "***".to_string(),
        Node::Blockquote(quote) => {
            prefix_lines(&blocks(&quote.children, "\n\n"), "> ", ">")
        }
        Node::List(list) => {
            let separator = if list.spread { "\n\n" } else { "\n" };
            let mut number = list.start.unwrap_or(1);
            let mut items = vec![];
            for child in &list.children {
                let marker = if list.ordered {
                    let marker = format!("{}.", number);
                    number += 1;
                    marker
                } else {
                    "*".to_string()
                };
                items.push(list_item(child, &marker));
            }
            items.join(separator)
        }
        Node::ListItem(_) => list_item(node, "*"),
        Node::Table(table) => {
            let mut rows = vec![];
            for (i, row) in table.children.iter().enumerate() {
                rows.push(table_row(row));
                if i == 0 {
                    let delimiter: Vec<&str> = table.align.iter().map(|align| match align {
                        AlignKind::Left => ":--",
                        AlignKind::Right => "--:",
                        AlignKind::Center => ":-:",
                        AlignKind::None => "---",
                    }).collect();
                    rows.push(format!("| {} |", delimiter.join(" | ")));
                }
            }
            rows.join("\n")
        }
        Node::Definition(definition) => {
            let label = definition.label.as_deref().unwrap_or(&definition.identifier);
            format!("[{}]: {}{}", label, definition.url, title_suffix(&definition.title))
        }
        Node::FootnoteDefinition(footnote) => {
            let label = footnote.label.as_deref().unwrap_or(&footnote.identifier);
            let content = blocks(&footnote.children, "\n\n");
            format!("[^{}]: {}", label, indent_rest(&content, "    "))
        }
        other => inline_node(other),
    }
}

fn list_item(node: &Node, marker: &str) -> String {
    let Node::ListItem(item) = node else {
        return block(node);
    };

    let separator = if item.spread { "\n\n" } else { "\n" };
    let mut head = format!("{} ", marker);
    match item.checked {
        Some(true) => head.push_str("[x] "),
        Some(false) => head.push_str("[ ] "),
        None => {}
    }

    let content = blocks(&item.children, separator);
    let indent = " ".repeat(marker.chars().count() + 1);
    format!("{}{}", head, indent_rest(&content, &indent))
}

fn table_row(node: &Node) -> String {
    let cells: Vec<String> = node.children()
        .map(|cells| cells.iter().map(|cell| match cell.children() {
            Some(children) => inline(children),
            None => String::new(),
        }).collect())
        .unwrap_or_default();
    format!("| {} |", cells.join(" | "))
}

fn inline(nodes: &[Node]) -> String {
    nodes.iter().map(inline_node).collect()
}

fn inline_node(node: &Node) -> String {
    match node {
        Node::Text(text) => text.value.clone(),
        Node::Emphasis(emphasis) => format!("*{}*", inline(&emphasis.children)),
        Node::Strong(strong) => format!("**{}**", inline(&strong.children)),
        Node::Delete(delete) => format!("~~{}~~", inline(&delete.children)),
        Node::InlineCode(code) => format!("`{}`", code.value),
        Node::InlineMath(math) => format!("${}$", math.value),
        Node::Break(_) => "\\\n".to_string(),
        Node::Html(html) => html.value.clone(),
        Node::Link(link) => match autolink(link) {
            Some(autolink) => autolink,
            None => format!("[{}]({}{})", inline(&link.children), link.url, title_suffix(&link.title)),
        },
        Node::Image(image) => {
            format!("![{}]({}{})", image.alt, image.url, title_suffix(&image.title))
        }
        Node::LinkReference(reference) => {
            let label = reference.label.as_deref().unwrap_or(&reference.identifier);
            let text = format!("[{}]", inline(&reference.children));
            with_reference(text, &reference.reference_kind, label)
        }
        Node::ImageReference(reference) => {
            let label = reference.label.as_deref().unwrap_or(&reference.identifier);
            let text = format!("![{}]", reference.alt);
            with_reference(text, &reference.reference_kind, label)
        }
        Node::FootnoteReference(reference) => {
            let label = reference.label.as_deref().unwrap_or(&reference.identifier);
            format!("[^{}]", label)
        }
        other => match other.children() {
            Some(children) => inline(children),
            None => String::new(),
        },
    }
}

/// `<url>` form, used when the link text is the url itself (or the address
/// of a `mailto:` url) and there is no title.
fn autolink(link: &Link) -> Option<String> {
    lazy_static! {
        static ref AUTOLINK_URL_REGEX: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z+.\-]+:[^\x00-\x20<>\x7F]*$").unwrap();
    }

    if link.title.is_some() {
        return None;
    }
    let [Node::Text(text)] = link.children.as_slice() else {
        return None;
    };
    let raw = text.value.as_str();
    if raw != link.url && format!("mailto:{}", raw) != link.url {
        return None;
    }
    if !AUTOLINK_URL_REGEX.is_match(&link.url) {
        return None;
    }
    Some(format!("<{}>", raw))
}

/// Keeps the reference style of the source: `[a]`, `[a][]` or `[a][b]`.
fn with_reference(text: String, kind: &ReferenceKind, label: &str) -> String {
    match kind {
        ReferenceKind::Shortcut => text,
        ReferenceKind::Collapsed => format!("{}[]", text),
        ReferenceKind::Full => format!("{}[{}]", text, label),
    }
}

fn title_suffix(title: &Option<String>) -> String {
    match title {
        Some(title) => format!(" \"{}\"", title),
        None => String::new(),
    }
}

/// Prefixes every line; empty lines get `empty_prefix`.
fn prefix_lines(text: &str, prefix: &str, empty_prefix: &str) -> String {
    text.split('\n')
        .map(|line| if line.is_empty() {
            empty_prefix.to_string()
        } else {
            format!("{}{}", prefix, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Indents every non-empty line except the first.
fn indent_rest(text: &str, indent: &str) -> String {
    let mut lines = text.split('\n');
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(indent);
            out.push_str(line);
        }
    }
    out
}
