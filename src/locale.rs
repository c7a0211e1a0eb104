use anyhow::{anyhow, Result};
use isolang::Language;
use serde::{Deserialize, Serialize};

/// Locale handling for localized pages
///
/// The site is published in a closed set of locales. Requests name their
/// locale in the path prefix; when it is absent the locale is negotiated from
/// the `locale` cookie, then `Accept-Language`, then the default.
/// Supported content locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    // @locale: English
    En,
    // @locale: Indonesian, the default content locale
    #[default]
    Id,
    // @locale: Chinese
    Zh,
}

/// Name of the cookie remembering an explicit locale choice
pub const LOCALE_COOKIE: &str = "locale";

impl Locale {
    /// All supported locales, default first
    pub const ALL: [Locale; 3] = [Locale::Id, Locale::En, Locale::Zh];

    // @returns: Two-letter code used in paths and store queries
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Id => "id",
            Self::Zh => "zh",
        }
    }

    // @returns: English name of the language
    pub fn english_name(&self) -> String {
        Language::from_639_1(self.code())
            .map(|lang| lang.to_name().to_string())
            .unwrap_or_else(|| self.code().to_string())
    }

    // @returns: Name of the language in itself, for the language switcher
    pub fn native_name(&self) -> String {
        Language::from_639_1(self.code())
            .and_then(|lang| lang.to_autonym())
            .map(str::to_string)
            .unwrap_or_else(|| self.english_name())
    }

    /// Parse a locale code leniently: case-insensitive, region suffix ignored
    pub fn parse_tag(tag: &str) -> Option<Self> {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match primary.as_str() {
            "en" => Some(Self::En),
            "id" | "in" => Some(Self::Id),
            "zh" => Some(Self::Zh),
            _ => None,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Locale {
    type Err = anyhow::Error;

    // Strict: path segments and CLI arguments must name an exact code
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "en" => Ok(Self::En),
            "id" => Ok(Self::Id),
            "zh" => Ok(Self::Zh),
            _ => Err(anyhow!("Unsupported locale: {}", s)),
        }
    }
}

/// Split a request path into its locale prefix and the remainder
///
/// `/en/products/x` gives `(Some(En), "/products/x")`; a path without a
/// supported prefix is returned unchanged.
pub fn split_locale_prefix(path: &str) -> (Option<Locale>, &str) {
    let trimmed = path.trim_start_matches('/');
    let (first, rest) = match trimmed.find('/') {
        Some(pos) => (&trimmed[..pos], &trimmed[pos..]),
        None => (trimmed, ""),
    };

    match first.parse::<Locale>() {
        Ok(locale) => (Some(locale), if rest.is_empty() { "/" } else { rest }),
        Err(_) => (None, path),
    }
}

/// Read the locale cookie out of a raw `Cookie` header
pub fn locale_from_cookie(cookie_header: &str) -> Option<Locale> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == LOCALE_COOKIE)
        .and_then(|(_, value)| value.trim().parse().ok())
}

/// Pick the best supported locale from an `Accept-Language` header
///
/// Entries are ranked by q-value; ties keep header order. `q=0` entries are
/// refusals and never selected.
pub fn locale_from_accept_language(header: &str) -> Option<Locale> {
    let mut ranked: Vec<(f32, usize, Locale)> = header
        .split(',')
        .enumerate()
        .filter_map(|(position, entry)| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            let quality = parts
                .filter_map(|param| param.trim().split_once('='))
                .find(|(key, _)| key.trim() == "q")
                .and_then(|(_, value)| value.trim().parse::<f32>().ok())
                .unwrap_or(1.0)
                .clamp(0.0, 1.0);

            if quality <= 0.0 {
                return None;
            }
            Locale::parse_tag(tag).map(|locale| (quality, position, locale))
        })
        .collect();

    ranked.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
    ranked.first().map(|(_, _, locale)| *locale)
}

/// Negotiate a locale for a request that carries no locale prefix
pub fn negotiate(cookie_header: Option<&str>, accept_language: Option<&str>, default: Locale) -> Locale {
    cookie_header
        .and_then(locale_from_cookie)
        .or_else(|| accept_language.and_then(locale_from_accept_language))
        .unwrap_or(default)
}
