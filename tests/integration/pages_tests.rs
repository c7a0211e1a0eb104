/*!
 * Page assembly against the bundled fixture site
 */

use parksite::locale::Locale;
use parksite::pages::fallback;
use parksite::pages::{articles, company, home, products};
use parksite::richtext::RenderedBlock;
use parksite::store::MemoryStore;

use crate::common;

#[tokio::test]
async fn test_homePage_english_shouldResolveHeroSettingsAndCards() {
    common::init_logging();
    let store = common::fixture_store();
    let ctx = common::page_context(&store);

    let page = home::home_page(&ctx, Locale::En).await.unwrap().found().unwrap();

    assert_eq!(page.locale, Locale::En);
    assert_eq!(page.settings.site_name, "Nusantara Industrial Estate");
    assert_eq!(page.settings.logo, "/media/logo.svg");
    assert_eq!(page.content.hero.headline, "A Strategic Location for Your Industry");
    assert_eq!(page.content.hero.background_image, "/media/hero.jpg");
    assert_eq!(page.content.hero.cta_link, "/contact");
    assert_eq!(page.meta.title, "Nusantara Industrial Estate");
    assert_eq!(page.meta.description, "Complete managed infrastructure.");

    let products: Vec<&str> = page.content.featured_products.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(products, vec!["industrial-land", "warehouse"]);

    let articles: Vec<&str> = page.content.latest_articles.iter().map(|a| a.slug.as_str()).collect();
    assert_eq!(articles, vec!["new-toll-gate", "solar-rooftops"]);
}

#[tokio::test]
async fn test_homePage_stats_shouldResolveEveryImageShape() {
    let store = common::fixture_store();
    let page = home::home_page(&common::page_context(&store), Locale::En)
        .await
        .unwrap()
        .found()
        .unwrap();

    let stats = &page.content.main_feature.stats;
    let images: Vec<&str> = stats.iter().map(|s| s.image.as_str()).collect();
    let numbers: Vec<&str> = stats.iter().map(|s| s.number.as_str()).collect();

    assert_eq!(images, vec!["/media/stats/land.png", "/images/stats/tenants.png", ""]);
    assert_eq!(numbers, vec!["500+", "120", "24"]);
    assert_eq!(stats[1].label, "Tenants");
}

#[tokio::test]
async fn test_homePage_mainFeature_shouldRenderFormattingAndBullets() {
    let store = common::fixture_store();
    let page = home::home_page(&common::page_context(&store), Locale::En)
        .await
        .unwrap()
        .found()
        .unwrap();

    let description = &page.content.main_feature.description;
    assert!(description.html.contains("<strong><em>managed</em></strong>"));
    match &description.blocks[1] {
        RenderedBlock::List { ordered, items } => {
            assert!(!ordered);
            assert_eq!(items.len(), 2);
        }
        other => panic!("expected a list, got {:?}", other),
    }
}

#[tokio::test]
async fn test_homePage_chinese_shouldFallBackPerField() {
    let store = common::fixture_store();
    let page = home::home_page(&common::page_context(&store), Locale::Zh)
        .await
        .unwrap()
        .found()
        .unwrap();

    assert_eq!(page.settings.site_name, "努山塔拉工业园");
    // Untranslated headline comes from the default content locale
    assert_eq!(page.content.hero.headline, "Lokasi Strategis untuk Industri Anda");
    assert_eq!(page.content.hero.subheadline, "可即建用地，直通高速公路。");
}

#[tokio::test]
async fn test_homePage_withEmptyStore_shouldRenderFromFallbackCopy() {
    let store = MemoryStore::new(Locale::Id);
    let page = home::home_page(&common::page_context(&store), Locale::Id)
        .await
        .unwrap()
        .found()
        .unwrap();

    let copy = fallback::copy(Locale::Id);
    assert_eq!(page.settings.site_name, copy.site_name);
    assert_eq!(page.settings.logo, fallback::LOGO_PLACEHOLDER);
    assert_eq!(page.content.hero.headline, copy.hero_headline);
    assert!(page.content.featured_products.is_empty());
    assert_eq!(page.content.main_feature.stats.len(), copy.stats.len());
}

#[tokio::test]
async fn test_homePage_withUnreachableStore_shouldFail() {
    let store = MemoryStore::unreachable();
    let result = home::home_page(&common::page_context(&store), Locale::En).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_productPage_shouldRenderNumberedDescriptionAndSpecifications() {
    let store = common::fixture_store();
    let page = products::product_page(&common::page_context(&store), "industrial-land", Locale::En)
        .await
        .unwrap()
        .found()
        .unwrap();

    let product = &page.content;
    assert_eq!(product.name, "Industrial Land");
    assert_eq!(product.category, "Land");
    assert_eq!(product.image, "/media/stats/land.png");
    assert_eq!(product.gallery, vec!["/media/hero.jpg"]);

    let specs: Vec<(&str, &str)> = product
        .specifications
        .iter()
        .map(|s| (s.label.as_str(), s.value.as_str()))
        .collect();
    assert_eq!(specs, vec![("Minimum plot", "1 ha"), ("Power", "150")]);

    match &product.description.blocks[1] {
        RenderedBlock::List { ordered, items } => {
            assert!(ordered);
            let markers: Vec<&str> = items.iter().map(|i| i.marker.as_str()).collect();
            assert_eq!(markers, vec!["1.", "2.", "3."]);
        }
        other => panic!("expected a list, got {:?}", other),
    }
    assert_eq!(page.meta.description, "Flat, compacted plots with utilities at the boundary.");
}

#[tokio::test]
async fn test_productPage_withUnknownSlug_shouldBeNotFound() {
    let store = common::fixture_store();
    let outcome = products::product_page(&common::page_context(&store), "nope", Locale::En)
        .await
        .unwrap();
    assert!(outcome.is_not_found());
}

#[tokio::test]
async fn test_productListPage_shouldOrderByEditorOrder() {
    let store = common::fixture_store();
    let page = products::product_list_page(&common::page_context(&store), Locale::Id)
        .await
        .unwrap()
        .found()
        .unwrap();

    let names: Vec<&str> = page.content.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Lahan Industri", "Gudang"]);
    assert_eq!(page.content.products[1].image, "/images/warehouse.jpg");
}

#[tokio::test]
async fn test_articlePage_shouldRenderLinksAndRelatedArticles() {
    let store = common::fixture_store();
    let page = articles::article_page(&common::page_context(&store), "new-toll-gate", Locale::En)
        .await
        .unwrap()
        .found()
        .unwrap();

    let article = &page.content;
    assert_eq!(article.title, "New Toll Gate Opens");
    assert_eq!(article.author, "Estate Team");
    assert_eq!(article.published_on, "2024-05-02");
    assert!(article
        .content
        .html
        .contains("<a href=\"https://example.com/toll\" target=\"_blank\" rel=\"noopener noreferrer\">Details</a>"));

    let related: Vec<&str> = article.related.iter().map(|a| a.slug.as_str()).collect();
    assert_eq!(related, vec!["solar-rooftops"]);
}

#[tokio::test]
async fn test_articleListPage_shouldListNewestFirstWithPlaceholders() {
    let store = common::fixture_store();
    let page = articles::article_list_page(&common::page_context(&store), Locale::En)
        .await
        .unwrap()
        .found()
        .unwrap();

    let cards = &page.content.articles;
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].published_on, "2024-05-02");
    assert_eq!(cards[1].cover_image, fallback::CARD_PLACEHOLDER);
}

#[tokio::test]
async fn test_companyPage_shouldRenderAboutAndValues() {
    let store = common::fixture_store();
    let page = company::company_page(&common::page_context(&store), Locale::En)
        .await
        .unwrap()
        .found()
        .unwrap();

    let view = &page.content;
    assert_eq!(view.title, "About Us");
    assert!(view
        .about
        .html
        .starts_with("<h2 class=\"rt-heading rt-heading-lg\">Since 1995</h2>"));
    assert_eq!(view.values.len(), 2);
    assert_eq!(view.image, "/media/hero.jpg");
}

#[tokio::test]
async fn test_companyPage_withoutTranslation_shouldLeaveAboutEmpty() {
    let store = common::fixture_store();
    let page = company::company_page(&common::page_context(&store), Locale::Id)
        .await
        .unwrap()
        .found()
        .unwrap();

    assert!(page.content.about.is_empty());
    assert_eq!(page.content.about_fallback, fallback::copy(Locale::Id).company_about);
    assert_eq!(page.content.vision, "");
}

#[tokio::test]
async fn test_legalPage_shouldFallBackToDefaultLocaleContent() {
    let store = common::fixture_store();
    let page = company::legal_page(&common::page_context(&store), "privacy-policy", Locale::En)
        .await
        .unwrap()
        .found()
        .unwrap();

    assert_eq!(page.content.title, "Privacy Policy");
    assert_eq!(page.content.updated_on, "2024-01-15");
    assert!(page.content.content.html.contains("Data Anda"));
}
