/*!
 * Rich-text tree model.
 *
 * CMS rich text arrives as an editor-state JSON tree: a `root` whose
 * children are block nodes, each holding inline nodes. The tree is parsed
 * once into a closed set of variants; anything missing or malformed is
 * dropped or defaulted so later stages never see raw JSON.
 */

use serde_json::Value;

/// Format bit for bold text
pub const FORMAT_BOLD: u32 = 1;

/// Format bit for italic text
pub const FORMAT_ITALIC: u32 = 1 << 1;

/// Inline formatting bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextFormat(pub u32);

impl TextFormat {
    pub fn is_bold(&self) -> bool {
        self.0 & FORMAT_BOLD != 0
    }

    pub fn is_italic(&self) -> bool {
        self.0 & FORMAT_ITALIC != 0
    }
}

/// Heading level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingTag {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingTag {
    /// Parse `h1`..`h6`; anything else is `None`
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            "h4" => Some(Self::H4),
            "h5" => Some(Self::H5),
            "h6" => Some(Self::H6),
            _ => None,
        }
    }

    /// HTML element name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
        }
    }
}

/// List flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListType {
    #[default]
    Bullet,
    Number,
}

/// Inline content
#[derive(Debug, Clone, PartialEq)]
pub enum InlineNode {
    Text { text: String, format: TextFormat },
    Link { url: Option<String>, new_tab: bool, children: Vec<InlineNode> },
    LineBreak,
    /// Unknown inline node with children; contributes only its children
    Wrapper { children: Vec<InlineNode> },
}

/// One list entry
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItemNode {
    pub children: Vec<InlineNode>,
}

/// Block content, one per child of `root`
#[derive(Debug, Clone, PartialEq)]
pub enum BlockNode {
    Paragraph { children: Vec<InlineNode> },
    /// `tag` is `None` when missing or not h1..h6
    Heading { tag: Option<HeadingTag>, children: Vec<InlineNode> },
    List { list_type: ListType, items: Vec<ListItemNode> },
    /// Unsupported block type, rendered as a paragraph
    Unknown { kind: String, children: Vec<InlineNode> },
}

/// Parsed rich-text document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RichTextTree {
    pub blocks: Vec<BlockNode>,
}

impl RichTextTree {
    /// Parse an editor-state value; unusable input yields an empty tree
    pub fn from_value(value: &Value) -> Self {
        let blocks = value
            .get("root")
            .map(children_of)
            .unwrap_or_default()
            .iter()
            .filter_map(parse_block)
            .collect();

        Self { blocks }
    }

    /// Parse an optional field value
    pub fn from_optional(value: Option<&Value>) -> Self {
        value.map(Self::from_value).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl From<&Value> for RichTextTree {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

fn children_of(node: &Value) -> &[Value] {
    node.get("children")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn node_type(node: &Value) -> &str {
    node.get("type").and_then(Value::as_str).unwrap_or_default()
}

fn parse_inlines(node: &Value) -> Vec<InlineNode> {
    children_of(node).iter().filter_map(parse_inline).collect()
}

fn parse_block(node: &Value) -> Option<BlockNode> {
    if !node.is_object() {
        return None;
    }

    let block = match node_type(node) {
        "paragraph" => BlockNode::Paragraph {
            children: parse_inlines(node),
        },
        "heading" => BlockNode::Heading {
            tag: node.get("tag").and_then(Value::as_str).and_then(HeadingTag::parse),
            children: parse_inlines(node),
        },
        "list" => BlockNode::List {
            list_type: parse_list_type(node),
            items: children_of(node)
                .iter()
                .filter(|item| item.is_object())
                .map(|item| ListItemNode {
                    children: parse_inlines(item),
                })
                .collect(),
        },
        other => BlockNode::Unknown {
            kind: other.to_string(),
            children: parse_inlines(node),
        },
    };

    Some(block)
}

fn parse_list_type(node: &Value) -> ListType {
    let list_type = node.get("listType").and_then(Value::as_str);
    let tag = node.get("tag").and_then(Value::as_str);

    match (list_type, tag) {
        (Some("number"), _) => ListType::Number,
        (None, Some("ol")) => ListType::Number,
        _ => ListType::Bullet,
    }
}

/// Truthy in the loose sense editors produce: `true`, non-zero, `"true"`
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty() && s != "false",
        _ => false,
    }
}

/// Link attributes live under `fields` in newer editor versions
fn link_attribute<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    node.get("fields")
        .and_then(|fields| fields.get(key))
        .or_else(|| node.get(key))
}

fn parse_inline(node: &Value) -> Option<InlineNode> {
    if !node.is_object() {
        return None;
    }

    match node_type(node) {
        "link" | "autolink" => Some(InlineNode::Link {
            url: link_attribute(node, "url")
                .and_then(Value::as_str)
                .map(str::to_string),
            new_tab: is_truthy(link_attribute(node, "newTab")),
            children: parse_inlines(node),
        }),
        "linebreak" => Some(InlineNode::LineBreak),
        _ => {
            if let Some(text) = node.get("text").and_then(Value::as_str) {
                let format = node
                    .get("format")
                    .and_then(Value::as_u64)
                    .and_then(|bits| u32::try_from(bits).ok())
                    .unwrap_or(0);
                return Some(InlineNode::Text {
                    text: text.to_string(),
                    format: TextFormat(format),
                });
            }

            node.get("children")
                .and_then(Value::as_array)
                .map(|_| InlineNode::Wrapper {
                    children: parse_inlines(node),
                })
        }
    }
}
