/*!
 * Tests for locale parsing and negotiation
 */

use parksite::locale::{
    locale_from_accept_language, locale_from_cookie, negotiate, split_locale_prefix, Locale,
};

#[test]
fn test_default_shouldBeIndonesian() {
    assert_eq!(Locale::default(), Locale::Id);
    assert_eq!(Locale::default().code(), "id");
}

#[test]
fn test_serde_shouldUseLowercaseCodes() {
    assert_eq!(serde_json::to_string(&Locale::Zh).unwrap(), "\"zh\"");
    let parsed: Locale = serde_json::from_str("\"en\"").unwrap();
    assert_eq!(parsed, Locale::En);
    assert!(serde_json::from_str::<Locale>("\"fr\"").is_err());
}

#[test]
fn test_parseTag_shouldAcceptRegionsAndLegacyCodes() {
    assert_eq!(Locale::parse_tag("en-US"), Some(Locale::En));
    assert_eq!(Locale::parse_tag("zh-Hans-CN"), Some(Locale::Zh));
    assert_eq!(Locale::parse_tag("in"), Some(Locale::Id));
    assert_eq!(Locale::parse_tag("de-DE"), None);
}

#[test]
fn test_splitLocalePrefix_withoutPrefix_shouldReturnPathUnchanged() {
    assert_eq!(split_locale_prefix("/products/x"), (None, "/products/x"));
    assert_eq!(split_locale_prefix("/zh"), (Some(Locale::Zh), "/"));
}

#[test]
fn test_localeFromCookie_shouldIgnoreOtherCookies() {
    assert_eq!(locale_from_cookie("session=abc; locale=en"), Some(Locale::En));
    assert_eq!(locale_from_cookie("session=abc"), None);
    assert_eq!(locale_from_cookie("locale=fr"), None);
}

#[test]
fn test_localeFromAcceptLanguage_shouldSkipRefusedAndUnknown() {
    assert_eq!(locale_from_accept_language("fr-FR, en;q=0.5, zh;q=0"), Some(Locale::En));
    assert_eq!(locale_from_accept_language("de, fr"), None);
}

#[test]
fn test_negotiate_withNothingUsable_shouldUseDefault() {
    assert_eq!(negotiate(None, None, Locale::Id), Locale::Id);
    assert_eq!(negotiate(Some("a=b"), Some("de"), Locale::En), Locale::En);
    assert_eq!(negotiate(None, Some("zh-TW"), Locale::Id), Locale::Zh);
}
