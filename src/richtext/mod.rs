/*!
 * Rich-content normalization.
 *
 * This module turns CMS rich-text fields into renderable output:
 * - `model`: tree parsed from editor-state JSON into closed variants
 * - `render`: lazy block descriptors (headings, lists, formatted inline runs)
 * - `html`: HTML serialization of the descriptors
 * - `extract`: plain-text summaries for meta descriptions and excerpts
 */

pub mod extract;
pub mod html;
pub mod model;
pub mod render;

pub use extract::{excerpt, extract_text};
pub use html::to_html;
pub use model::{BlockNode, HeadingTag, InlineNode, ListType, RichTextTree, TextFormat};
pub use render::{render, render_with, Blocks, RenderOptions, RenderedBlock, RenderedInline, RenderedListItem};
