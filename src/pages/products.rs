use serde::Serialize;

use super::fallback;
use super::{meta_description, Page, PageContext, PageMeta, PageOutcome, RichTextView, CARD_EXCERPT_CHARS};
use crate::content::{Document, ListOptions};
use crate::errors::StoreError;
use crate::locale::Locale;
use crate::richtext::excerpt;

pub const PRODUCTS_COLLECTION: &str = "products";

/// Product summary for listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub name: String,
    pub slug: String,
    pub category: String,
    pub excerpt: String,
    pub image: String,
}

/// One row of a product's specification table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecificationView {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub name: String,
    pub slug: String,
    pub category: String,
    pub image: String,
    pub description: RichTextView,
    pub specifications: Vec<SpecificationView>,
    pub gallery: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductListView {
    pub title: String,
    pub products: Vec<ProductCard>,
}

pub(crate) fn product_card(ctx: &PageContext, product: &Document) -> ProductCard {
    let short = product.str_or("shortDescription", "");

    ProductCard {
        name: product_name(product),
        slug: product.str_or("slug", ""),
        category: product.str_or("category.name", ""),
        excerpt: excerpt(&product.rich_text("description"), CARD_EXCERPT_CHARS, &short),
        image: ctx.media_url_or(&product.media("image"), fallback::CARD_PLACEHOLDER),
    }
}

fn product_name(product: &Document) -> String {
    product
        .str("name")
        .or_else(|| product.str("title"))
        .unwrap_or_default()
        .to_string()
}

/// Catalog listing ordered by the editor-defined `order` field
pub async fn product_list_page(ctx: &PageContext, locale: Locale) -> Result<PageOutcome<Page<ProductListView>>, StoreError> {
    let options = ListOptions {
        sort: Some("order".to_string()),
        ..ListOptions::default()
    };

    let (products, settings) = tokio::try_join!(
        ctx.resolver().list(PRODUCTS_COLLECTION, &options, locale),
        ctx.site_settings(locale),
    )?;

    let copy = fallback::copy(locale);
    let view = ProductListView {
        title: copy.products_title.to_string(),
        products: products.iter().map(|p| product_card(ctx, p)).collect(),
    };

    Ok(PageOutcome::Found(Page {
        locale,
        meta: PageMeta {
            title: format!("{} | {}", copy.products_title, settings.site_name),
            description: copy.meta_description.to_string(),
        },
        settings,
        content: view,
    }))
}

/// Product detail by slug; an unknown slug is "not found", not an error
pub async fn product_page(ctx: &PageContext, slug: &str, locale: Locale) -> Result<PageOutcome<Page<ProductDetail>>, StoreError> {
    let (product, settings) = tokio::try_join!(
        ctx.resolver().by_slug(PRODUCTS_COLLECTION, slug, locale),
        ctx.site_settings(locale),
    )?;

    let Some(product) = product else {
        return Ok(PageOutcome::NotFound);
    };

    let copy = fallback::copy(locale);
    let description = product.rich_text("description");
    let name = product_name(&product);

    let specifications = product
        .array("specifications")
        .iter()
        .map(|row| {
            let row = Document::new(row.clone());
            SpecificationView {
                label: row.str_or("label", ""),
                value: row.display("value").unwrap_or_default(),
            }
        })
        .filter(|row| !row.label.is_empty())
        .collect();

    let gallery = product
        .array("gallery")
        .iter()
        .map(|item| {
            // Gallery entries are either media fields or `{image: media}` rows
            let item = Document::new(item.clone());
            match item.get("image") {
                Some(image) => ctx.media_value_url(Some(image)),
                None => ctx.media_value_url(Some(item.as_value())),
            }
        })
        .filter(|url| !url.is_empty())
        .collect();

    let meta = PageMeta {
        title: format!("{} | {}", name, settings.site_name),
        description: product.str_or(
            "meta.description",
            &meta_description(&description, &product.str_or("shortDescription", copy.meta_description)),
        ),
    };

    let detail = ProductDetail {
        slug: product.str_or("slug", slug),
        category: product.str_or("category.name", ""),
        image: ctx.media_url_or(&product.media("image"), fallback::CARD_PLACEHOLDER),
        description: RichTextView::from_tree(&description),
        specifications,
        gallery,
        name,
    };

    Ok(PageOutcome::Found(Page {
        locale,
        meta,
        settings,
        content: detail,
    }))
}
