/*!
 * HTML serialization of rendered rich-text descriptors.
 */

use std::fmt::Write;

use super::render::{RenderedBlock, RenderedInline};

/// Escape text content and attribute values
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Serialize blocks to an HTML fragment
pub fn to_html<I>(blocks: I) -> String
where
    I: IntoIterator<Item = RenderedBlock>,
{
    let mut html = String::new();
    for block in blocks {
        write_block(&mut html, &block);
    }
    html
}

fn write_block(out: &mut String, block: &RenderedBlock) {
    match block {
        RenderedBlock::Paragraph { content } => {
            out.push_str("<p>");
            write_inlines(out, content);
            out.push_str("</p>");
        }
        RenderedBlock::Heading { level, class, content } => {
            let _ = write!(out, "<h{} class=\"{}\">", level, class);
            write_inlines(out, content);
            let _ = write!(out, "</h{}>", level);
        }
        RenderedBlock::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            let _ = write!(out, "<{}>", tag);
            for item in items {
                let _ = write!(out, "<li><span class=\"rt-marker\">{}</span> ", escape_html(&item.marker));
                write_inlines(out, &item.content);
                out.push_str("</li>");
            }
            let _ = write!(out, "</{}>", tag);
        }
    }
}

fn write_inlines(out: &mut String, inlines: &[RenderedInline]) {
    for inline in inlines {
        match inline {
            // Bold always wraps italic so equal formats serialize identically
            RenderedInline::Text { text, bold, italic } => {
                if *bold {
                    out.push_str("<strong>");
                }
                if *italic {
                    out.push_str("<em>");
                }
                out.push_str(&escape_html(text));
                if *italic {
                    out.push_str("</em>");
                }
                if *bold {
                    out.push_str("</strong>");
                }
            }
            RenderedInline::Link { href, new_tab, rel, content } => {
                let _ = write!(out, "<a href=\"{}\"", escape_html(href));
                if *new_tab {
                    out.push_str(" target=\"_blank\"");
                }
                if let Some(rel) = rel {
                    let _ = write!(out, " rel=\"{}\"", rel);
                }
                out.push('>');
                write_inlines(out, content);
                out.push_str("</a>");
            }
            RenderedInline::LineBreak => out.push_str("<br>"),
        }
    }
}
