use crate::locale::Locale;

/// Hardcoded copy shown when the CMS leaves a field empty

pub const LOGO_PLACEHOLDER: &str = "/images/logo.svg";
pub const HERO_PLACEHOLDER: &str = "/images/hero-placeholder.jpg";
pub const CARD_PLACEHOLDER: &str = "/images/card-placeholder.jpg";

pub const CONTACT_EMAIL: &str = "marketing@example.com";
pub const CONTACT_PHONE: &str = "+62 21 0000 0000";
pub const CONTACT_ADDRESS: &str = "Jl. Industri Raya No. 1, Indonesia";

/// A fallback headline figure
#[derive(Debug, Clone, Copy)]
pub struct FallbackStat {
    pub number: &'static str,
    pub label: &'static str,
}

/// Per-locale fallback copy
#[derive(Debug)]
pub struct FallbackCopy {
    pub site_name: &'static str,
    pub footer_text: &'static str,
    pub hero_headline: &'static str,
    pub hero_subheadline: &'static str,
    pub cta_label: &'static str,
    pub feature_title: &'static str,
    pub feature_description: &'static str,
    pub stats: [FallbackStat; 3],
    pub products_title: &'static str,
    pub articles_title: &'static str,
    pub company_title: &'static str,
    pub company_about: &'static str,
    pub meta_description: &'static str,
}

static EN: FallbackCopy = FallbackCopy {
    site_name: "Industrial Park",
    footer_text: "Integrated industrial and business estate.",
    hero_headline: "Your Strategic Business Location",
    hero_subheadline: "Ready-to-build industrial land, warehouses and commercial lots.",
    cta_label: "Contact Us",
    feature_title: "Why Invest With Us",
    feature_description: "Complete infrastructure, direct toll road access and round-the-clock estate management.",
    stats: [
        FallbackStat { number: "500+", label: "Hectares" },
        FallbackStat { number: "120+", label: "Tenants" },
        FallbackStat { number: "24/7", label: "Security" },
    ],
    products_title: "Our Products",
    articles_title: "News & Articles",
    company_title: "About Us",
    company_about: "We develop and manage an integrated industrial estate for manufacturing and logistics.",
    meta_description: "Industrial land, warehouses and commercial lots in an integrated business park.",
};

static ID: FallbackCopy = FallbackCopy {
    site_name: "Kawasan Industri",
    footer_text: "Kawasan industri dan bisnis terpadu.",
    hero_headline: "Lokasi Bisnis Strategis Anda",
    hero_subheadline: "Lahan industri siap bangun, gudang, dan kavling komersial.",
    cta_label: "Hubungi Kami",
    feature_title: "Mengapa Berinvestasi Bersama Kami",
    feature_description: "Infrastruktur lengkap, akses langsung jalan tol, dan pengelolaan kawasan 24 jam.",
    stats: [
        FallbackStat { number: "500+", label: "Hektar" },
        FallbackStat { number: "120+", label: "Tenant" },
        FallbackStat { number: "24/7", label: "Keamanan" },
    ],
    products_title: "Produk Kami",
    articles_title: "Berita & Artikel",
    company_title: "Tentang Kami",
    company_about: "Kami mengembangkan dan mengelola kawasan industri terpadu untuk manufaktur dan logistik.",
    meta_description: "Lahan industri, gudang, dan kavling komersial di kawasan bisnis terpadu.",
};

static ZH: FallbackCopy = FallbackCopy {
    site_name: "工业园区",
    footer_text: "综合性工业与商业园区。",
    hero_headline: "您的战略商业选址",
    hero_subheadline: "可即建工业用地、仓库及商业地块。",
    cta_label: "联系我们",
    feature_title: "为何选择我们",
    feature_description: "完善的基础设施、直通高速公路以及全天候园区管理。",
    stats: [
        FallbackStat { number: "500+", label: "公顷" },
        FallbackStat { number: "120+", label: "入驻企业" },
        FallbackStat { number: "24/7", label: "安保" },
    ],
    products_title: "我们的产品",
    articles_title: "新闻与文章",
    company_title: "关于我们",
    company_about: "我们开发并管理面向制造与物流的综合工业园区。",
    meta_description: "综合商业园区内的工业用地、仓库及商业地块。",
};

/// Fallback copy for a locale
pub fn copy(locale: Locale) -> &'static FallbackCopy {
    match locale {
        Locale::En => &EN,
        Locale::Id => &ID,
        Locale::Zh => &ZH,
    }
}
