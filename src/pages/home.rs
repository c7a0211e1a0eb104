use log::debug;
use serde::Serialize;

use super::fallback::{self, FallbackCopy};
use super::products::{product_card, ProductCard, PRODUCTS_COLLECTION};
use super::articles::{article_card, ArticleCard, ARTICLES_COLLECTION};
use super::{meta_description, Page, PageContext, PageMeta, PageOutcome, RichTextView};
use crate::content::{Document, ListOptions};
use crate::errors::StoreError;
use crate::locale::Locale;

/// Slug of the home page global
pub const HOME_SLUG: &str = "home-page";

/// Featured products and articles shown on the home page
pub const HOME_CARD_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroView {
    pub headline: String,
    pub subheadline: String,
    pub background_image: String,
    pub cta_label: String,
    pub cta_link: String,
}

/// One headline figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatView {
    pub number: String,
    pub label: String,
    /// Empty when the CMS has no usable image
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureView {
    pub title: String,
    pub description: RichTextView,
    /// Used when `description` is empty
    pub description_fallback: String,
    pub stats: Vec<StatView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    pub hero: HeroView,
    pub main_feature: FeatureView,
    pub featured_products: Vec<ProductCard>,
    pub latest_articles: Vec<ArticleCard>,
}

/// Assemble the home page
///
/// The home global, site settings, featured products and latest articles
/// are fetched concurrently. A missing home global is not an error: the
/// page renders entirely from fallback copy.
pub async fn home_page(ctx: &PageContext, locale: Locale) -> Result<PageOutcome<Page<HomeView>>, StoreError> {
    let resolver = ctx.resolver();
    let featured = ListOptions {
        sort: Some("order".to_string()),
        limit: Some(HOME_CARD_LIMIT),
        ..ListOptions::default()
    };
    let latest = ListOptions::latest(HOME_CARD_LIMIT);

    let (home, settings, products, articles) = tokio::try_join!(
        resolver.global(HOME_SLUG, locale),
        ctx.site_settings(locale),
        resolver.list(PRODUCTS_COLLECTION, &featured, locale),
        resolver.list(ARTICLES_COLLECTION, &latest, locale),
    )?;

    if home.is_none() {
        debug!("Home global missing for {}, using fallback copy", locale);
    }

    let copy = fallback::copy(locale);
    let home = home.unwrap_or_default();

    let view = HomeView {
        hero: hero_view(ctx, &home, locale, copy),
        main_feature: feature_view(ctx, &home, copy),
        featured_products: products.iter().map(|p| product_card(ctx, p)).collect(),
        latest_articles: articles.iter().map(|a| article_card(ctx, a)).collect(),
    };

    let meta = PageMeta {
        title: home.str_or("meta.title", &settings.site_name),
        description: home.str_or(
            "meta.description",
            &meta_description(&home.rich_text("mainFeature.description"), copy.meta_description),
        ),
    };

    Ok(PageOutcome::Found(Page {
        locale,
        meta,
        settings,
        content: view,
    }))
}

fn hero_view(ctx: &PageContext, home: &Document, locale: Locale, copy: &FallbackCopy) -> HeroView {
    HeroView {
        headline: home.str_or("hero.headline", copy.hero_headline),
        subheadline: home.str_or("hero.subheadline", copy.hero_subheadline),
        background_image: ctx.media_url_or(&home.media("hero.backgroundImage"), fallback::HERO_PLACEHOLDER),
        cta_label: home.str_or("hero.ctaLabel", copy.cta_label),
        cta_link: home
            .str("hero.ctaLink")
            .map(str::to_string)
            .unwrap_or_else(|| format!("/{}/company#contact", locale.code())),
    }
}

fn feature_view(ctx: &PageContext, home: &Document, copy: &FallbackCopy) -> FeatureView {
    let stats: Vec<StatView> = home
        .array("mainFeature.stats")
        .iter()
        .map(|stat| {
            let stat = Document::new(stat.clone());
            StatView {
                number: stat.display("number").unwrap_or_default(),
                label: stat.str_or("label", ""),
                image: ctx.media_url(&stat.media("image")),
            }
        })
        .collect();

    let stats = if stats.is_empty() {
        copy.stats
            .iter()
            .map(|stat| StatView {
                number: stat.number.to_string(),
                label: stat.label.to_string(),
                image: String::new(),
            })
            .collect()
    } else {
        stats
    };

    FeatureView {
        title: home.str_or("mainFeature.title", copy.feature_title),
        description: RichTextView::from_tree(&home.rich_text("mainFeature.description")),
        description_fallback: copy.feature_description.to_string(),
        stats,
    }
}
