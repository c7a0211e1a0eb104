/*!
 * Page assembly.
 *
 * Each page resolves its documents concurrently (fail fast: one failed
 * read fails the page), then maps raw CMS data into a serializable view,
 * substituting hardcoded copy wherever the CMS left a field empty.
 * - `home`: hero, headline stats, featured products and latest articles
 * - `products`: catalog listing and product detail
 * - `articles`: article listing and detail
 * - `company`: company profile and legal pages
 */

use serde::Serialize;
use serde_json::Value;

use crate::content::{absolutize_media_url, ContentResolver, Document, MediaReference};
use crate::errors::StoreError;
use crate::locale::Locale;
use crate::richtext::{excerpt, render, to_html, RenderedBlock, RichTextTree};

pub mod articles;
pub mod company;
pub mod fallback;
pub mod home;
pub mod products;

/// Slug of the global holding site-wide settings
pub const SITE_SETTINGS_SLUG: &str = "site-settings";

/// Maximum characters in generated meta descriptions
pub const META_DESCRIPTION_CHARS: usize = 160;

/// Maximum characters in card excerpts
pub const CARD_EXCERPT_CHARS: usize = 140;

/// Result of assembling a page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "page", rename_all = "snake_case")]
pub enum PageOutcome<T> {
    Found(T),
    NotFound,
}

impl<T> PageOutcome<T> {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PageOutcome::NotFound)
    }

    /// The page, if found
    pub fn found(self) -> Option<T> {
        match self {
            PageOutcome::Found(page) => Some(page),
            PageOutcome::NotFound => None,
        }
    }
}

/// Title and description for the document head
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

/// Contact details shown in header and footer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactDetails {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub whatsapp: String,
}

/// Site-wide settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSettingsView {
    pub site_name: String,
    pub logo: String,
    pub footer_text: String,
    pub contact: ContactDetails,
}

/// A fully assembled page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub locale: Locale,
    pub meta: PageMeta,
    pub settings: SiteSettingsView,
    pub content: T,
}

/// Rich text rendered both as descriptors and as HTML
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RichTextView {
    pub blocks: Vec<RenderedBlock>,
    pub html: String,
}

impl RichTextView {
    pub fn from_tree(tree: &RichTextTree) -> Self {
        let blocks: Vec<RenderedBlock> = render(tree).collect();
        let html = to_html(blocks.iter().cloned());
        Self { blocks, html }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Shared state for page assembly
#[derive(Debug, Clone)]
pub struct PageContext {
    resolver: ContentResolver,
    media_base_url: String,
}

impl PageContext {
    pub fn new(resolver: ContentResolver, media_base_url: impl Into<String>) -> Self {
        Self {
            resolver,
            media_base_url: media_base_url.into(),
        }
    }

    pub fn resolver(&self) -> &ContentResolver {
        &self.resolver
    }

    /// Media URL, absolutized; empty when unresolvable
    pub fn media_url(&self, reference: &MediaReference) -> String {
        absolutize_media_url(reference.url(), &self.media_base_url)
    }

    /// Media URL, absolutized, with a site-local placeholder for empty results
    pub fn media_url_or(&self, reference: &MediaReference, placeholder: &str) -> String {
        match reference.url() {
            "" => placeholder.to_string(),
            url => absolutize_media_url(url, &self.media_base_url),
        }
    }

    /// Media URL of a raw value
    pub fn media_value_url(&self, value: Option<&Value>) -> String {
        self.media_url(&MediaReference::from_optional(value))
    }

    /// Site settings, or hardcoded defaults when the global is absent
    pub async fn site_settings(&self, locale: Locale) -> Result<SiteSettingsView, StoreError> {
        let settings = self.resolver.global(SITE_SETTINGS_SLUG, locale).await?;
        Ok(self.settings_view(settings.as_ref(), locale))
    }

    pub(crate) fn settings_view(&self, settings: Option<&Document>, locale: Locale) -> SiteSettingsView {
        let copy = fallback::copy(locale);
        let empty = Document::default();
        let doc = settings.unwrap_or(&empty);

        SiteSettingsView {
            site_name: doc.str_or("siteName", copy.site_name),
            logo: self.media_url_or(&doc.media("logo"), fallback::LOGO_PLACEHOLDER),
            footer_text: doc.str_or("footerText", copy.footer_text),
            contact: ContactDetails {
                email: doc.str_or("contact.email", fallback::CONTACT_EMAIL),
                phone: doc.str_or("contact.phone", fallback::CONTACT_PHONE),
                address: doc.str_or("contact.address", fallback::CONTACT_ADDRESS),
                whatsapp: doc.str_or("contact.whatsapp", fallback::CONTACT_PHONE),
            },
        }
    }
}

/// Meta description from a rich-text field, with a fallback
pub(crate) fn meta_description(tree: &RichTextTree, fallback: &str) -> String {
    excerpt(tree, META_DESCRIPTION_CHARS, fallback)
}
