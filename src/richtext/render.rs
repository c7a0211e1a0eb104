/*!
 * Rendering of rich-text trees into renderable descriptors.
 *
 * The descriptors are plain data, independent of any templating layer;
 * `html` turns them into markup for the built-in server.
 */

use serde::Serialize;
use std::slice;

use super::model::{BlockNode, HeadingTag, InlineNode, ListItemNode, ListType, RichTextTree};

/// Marker used for every bullet list item
pub const BULLET_MARKER: &str = "•";

/// Link target used when a link has no usable URL
pub const PLACEHOLDER_HREF: &str = "#";

/// `rel` value applied to links opening a new window
pub const NEW_TAB_REL: &str = "noopener noreferrer";

const UNSAFE_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:"];

/// Caller-selected rendering defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Level used for headings without a recognised tag
    pub default_heading: HeadingTag,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            default_heading: HeadingTag::H3,
        }
    }
}

/// Rendered inline content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderedInline {
    Text { text: String, bold: bool, italic: bool },
    Link {
        href: String,
        new_tab: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        rel: Option<&'static str>,
        content: Vec<RenderedInline>,
    },
    LineBreak,
}

/// One rendered list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedListItem {
    pub marker: String,
    pub content: Vec<RenderedInline>,
}

/// Rendered block, one per root child
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderedBlock {
    Paragraph { content: Vec<RenderedInline> },
    Heading { level: u8, class: &'static str, content: Vec<RenderedInline> },
    List { ordered: bool, items: Vec<RenderedListItem> },
}

impl HeadingTag {
    /// Numeric level
    pub fn level(&self) -> u8 {
        match self {
            HeadingTag::H1 => 1,
            HeadingTag::H2 => 2,
            HeadingTag::H3 => 3,
            HeadingTag::H4 => 4,
            HeadingTag::H5 => 5,
            HeadingTag::H6 => 6,
        }
    }

    /// Style class keyed by level
    pub fn class(&self) -> &'static str {
        match self {
            HeadingTag::H1 => "rt-heading rt-heading-xl",
            HeadingTag::H2 => "rt-heading rt-heading-lg",
            HeadingTag::H3 => "rt-heading rt-heading-md",
            HeadingTag::H4 => "rt-heading rt-heading-sm",
            HeadingTag::H5 | HeadingTag::H6 => "rt-heading rt-heading-xs",
        }
    }
}

/// Lazy iterator over rendered blocks
///
/// Each clone is an independent cursor over the same borrowed tree.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    nodes: slice::Iter<'a, BlockNode>,
    options: RenderOptions,
}

impl Iterator for Blocks<'_> {
    type Item = RenderedBlock;

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(|node| render_block(node, &self.options))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl ExactSizeIterator for Blocks<'_> {}

/// Render a tree with default options
pub fn render(tree: &RichTextTree) -> Blocks<'_> {
    render_with(tree, RenderOptions::default())
}

/// Render a tree with caller options
pub fn render_with(tree: &RichTextTree, options: RenderOptions) -> Blocks<'_> {
    Blocks {
        nodes: tree.blocks.iter(),
        options,
    }
}

fn render_block(node: &BlockNode, options: &RenderOptions) -> RenderedBlock {
    match node {
        BlockNode::Heading { tag, children } => {
            let tag = tag.unwrap_or(options.default_heading);
            RenderedBlock::Heading {
                level: tag.level(),
                class: tag.class(),
                content: render_inlines(children),
            }
        }
        BlockNode::List { list_type, items } => RenderedBlock::List {
            ordered: *list_type == ListType::Number,
            items: render_items(*list_type, items),
        },
        BlockNode::Paragraph { children } | BlockNode::Unknown { children, .. } => RenderedBlock::Paragraph {
            content: render_inlines(children),
        },
    }
}

fn render_items(list_type: ListType, items: &[ListItemNode]) -> Vec<RenderedListItem> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| RenderedListItem {
            marker: match list_type {
                ListType::Number => format!("{}.", index + 1),
                ListType::Bullet => BULLET_MARKER.to_string(),
            },
            content: render_inlines(&item.children),
        })
        .collect()
}

fn render_inlines(nodes: &[InlineNode]) -> Vec<RenderedInline> {
    let mut rendered = Vec::with_capacity(nodes.len());
    for node in nodes {
        render_inline(node, &mut rendered);
    }
    rendered
}

fn render_inline(node: &InlineNode, out: &mut Vec<RenderedInline>) {
    match node {
        InlineNode::Text { text, format } => out.push(RenderedInline::Text {
            text: text.clone(),
            bold: format.is_bold(),
            italic: format.is_italic(),
        }),
        InlineNode::Link { url, new_tab, children } => out.push(RenderedInline::Link {
            href: safe_href(url.as_deref()),
            new_tab: *new_tab,
            rel: new_tab.then_some(NEW_TAB_REL),
            content: render_inlines(children),
        }),
        InlineNode::LineBreak => out.push(RenderedInline::LineBreak),
        // Wrappers flatten into their parent
        InlineNode::Wrapper { children } => {
            for child in children {
                render_inline(child, out);
            }
        }
    }
}

fn safe_href(url: Option<&str>) -> String {
    let url = url.map(str::trim).unwrap_or_default();
    let lowered = url.to_ascii_lowercase();

    if url.is_empty() || UNSAFE_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme)) {
        return PLACEHOLDER_HREF.to_string();
    }
    url.to_string()
}
