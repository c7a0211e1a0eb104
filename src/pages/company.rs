use serde::Serialize;

use super::articles::published_on;
use super::fallback;
use super::{meta_description, Page, PageContext, PageMeta, PageOutcome, RichTextView};
use crate::content::Document;
use crate::errors::StoreError;
use crate::locale::Locale;

pub const COMPANY_SLUG: &str = "company-profile";
pub const LEGAL_COLLECTION: &str = "legal-pages";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueView {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyView {
    pub title: String,
    pub about: RichTextView,
    /// Used when `about` is empty
    pub about_fallback: String,
    pub vision: String,
    pub mission: String,
    pub values: Vec<ValueView>,
    pub image: String,
    pub map_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegalView {
    pub title: String,
    pub content: RichTextView,
    pub updated_on: String,
}

/// Company profile; renders from fallback copy when the global is absent
pub async fn company_page(ctx: &PageContext, locale: Locale) -> Result<PageOutcome<Page<CompanyView>>, StoreError> {
    let (company, settings) = tokio::try_join!(
        ctx.resolver().global(COMPANY_SLUG, locale),
        ctx.site_settings(locale),
    )?;

    let copy = fallback::copy(locale);
    let company = company.unwrap_or_default();
    let about = company.rich_text("about");

    let values = company
        .array("values")
        .iter()
        .map(|value| {
            let value = Document::new(value.clone());
            ValueView {
                title: value.str_or("title", ""),
                description: value.str_or("description", ""),
            }
        })
        .filter(|value| !value.title.is_empty())
        .collect();

    let title = company.str_or("title", copy.company_title);
    let meta = PageMeta {
        title: format!("{} | {}", title, settings.site_name),
        description: meta_description(&about, copy.company_about),
    };

    let view = CompanyView {
        about: RichTextView::from_tree(&about),
        about_fallback: copy.company_about.to_string(),
        vision: company.str_or("vision", ""),
        mission: company.str_or("mission", ""),
        values,
        image: ctx.media_url_or(&company.media("image"), fallback::HERO_PLACEHOLDER),
        map_url: company.str_or("mapEmbedUrl", ""),
        title,
    };

    Ok(PageOutcome::Found(Page {
        locale,
        meta,
        settings,
        content: view,
    }))
}

/// Legal page (privacy policy, terms) by slug
pub async fn legal_page(ctx: &PageContext, slug: &str, locale: Locale) -> Result<PageOutcome<Page<LegalView>>, StoreError> {
    let (legal, settings) = tokio::try_join!(
        ctx.resolver().by_slug(LEGAL_COLLECTION, slug, locale),
        ctx.site_settings(locale),
    )?;

    let Some(legal) = legal else {
        return Ok(PageOutcome::NotFound);
    };

    let content = legal.rich_text("content");
    let title = legal.str_or("title", slug);

    Ok(PageOutcome::Found(Page {
        locale,
        meta: PageMeta {
            title: format!("{} | {}", title, settings.site_name),
            description: meta_description(&content, &title),
        },
        settings,
        content: LegalView {
            content: RichTextView::from_tree(&content),
            updated_on: published_on(&legal.str_or("updatedAt", "")),
            title,
        },
    }))
}
