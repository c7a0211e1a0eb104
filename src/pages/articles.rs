use chrono::{DateTime, NaiveDate};
use serde::Serialize;

use super::fallback;
use super::{meta_description, Page, PageContext, PageMeta, PageOutcome, RichTextView, CARD_EXCERPT_CHARS};
use crate::content::{Document, ListOptions};
use crate::errors::StoreError;
use crate::locale::Locale;
use crate::richtext::excerpt;

pub const ARTICLES_COLLECTION: &str = "articles";

/// Articles per listing page
pub const ARTICLE_LIST_LIMIT: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleCard {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub cover_image: String,
    /// `YYYY-MM-DD`, empty when unknown
    pub published_on: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleDetail {
    pub title: String,
    pub slug: String,
    pub author: String,
    pub published_on: String,
    pub cover_image: String,
    pub content: RichTextView,
    pub related: Vec<ArticleCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleListView {
    pub title: String,
    pub articles: Vec<ArticleCard>,
}

/// Date part of an ISO timestamp or plain date
pub fn published_on(raw: &str) -> String {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.date_naive().to_string();
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .map(|date| date.to_string())
        .unwrap_or_default()
}

pub(crate) fn article_card(ctx: &PageContext, article: &Document) -> ArticleCard {
    ArticleCard {
        title: article.str_or("title", ""),
        slug: article.str_or("slug", ""),
        excerpt: excerpt(
            &article.rich_text("content"),
            CARD_EXCERPT_CHARS,
            &article.str_or("excerpt", ""),
        ),
        cover_image: ctx.media_url_or(&article.media("coverImage"), fallback::CARD_PLACEHOLDER),
        published_on: published_on(&article.str_or("publishedAt", "")),
    }
}

/// Newest articles first
pub async fn article_list_page(ctx: &PageContext, locale: Locale) -> Result<PageOutcome<Page<ArticleListView>>, StoreError> {
    let options = ListOptions::latest(ARTICLE_LIST_LIMIT);

    let (articles, settings) = tokio::try_join!(
        ctx.resolver().list(ARTICLES_COLLECTION, &options, locale),
        ctx.site_settings(locale),
    )?;

    let copy = fallback::copy(locale);

    Ok(PageOutcome::Found(Page {
        locale,
        meta: PageMeta {
            title: format!("{} | {}", copy.articles_title, settings.site_name),
            description: copy.meta_description.to_string(),
        },
        settings,
        content: ArticleListView {
            title: copy.articles_title.to_string(),
            articles: articles.iter().map(|a| article_card(ctx, a)).collect(),
        },
    }))
}

/// Article detail by slug, with up to three other recent articles
pub async fn article_page(ctx: &PageContext, slug: &str, locale: Locale) -> Result<PageOutcome<Page<ArticleDetail>>, StoreError> {
    let recent = ListOptions::latest(4);

    let (article, settings, latest) = tokio::try_join!(
        ctx.resolver().by_slug(ARTICLES_COLLECTION, slug, locale),
        ctx.site_settings(locale),
        ctx.resolver().list(ARTICLES_COLLECTION, &recent, locale),
    )?;

    let Some(article) = article else {
        return Ok(PageOutcome::NotFound);
    };

    let copy = fallback::copy(locale);
    let content = article.rich_text("content");
    let title = article.str_or("title", copy.articles_title);

    let related = latest
        .iter()
        .filter(|other| other.str("slug") != Some(slug))
        .take(3)
        .map(|other| article_card(ctx, other))
        .collect();

    let meta = PageMeta {
        title: format!("{} | {}", title, settings.site_name),
        description: article.str_or(
            "meta.description",
            &meta_description(&content, &article.str_or("excerpt", copy.meta_description)),
        ),
    };

    let detail = ArticleDetail {
        slug: article.str_or("slug", slug),
        author: article
            .str("author.name")
            .or_else(|| article.str("author"))
            .unwrap_or_default()
            .to_string(),
        published_on: published_on(&article.str_or("publishedAt", "")),
        cover_image: ctx.media_url_or(&article.media("coverImage"), fallback::CARD_PLACEHOLDER),
        content: RichTextView::from_tree(&content),
        related,
        title,
    };

    Ok(PageOutcome::Found(Page {
        locale,
        meta,
        settings,
        content: detail,
    }))
}
