use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of block kinds the builder knows how to place.
///
/// Anything else read from a persisted template is kept verbatim as
/// [`BlockKind::Custom`] so it survives a load/save cycle and can still be
/// shown as a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKind {
    ArticleGrid,
    ArticleList,
    ArticleSlider,
    BigHero,
    FeaturedArticle,
    CategoryTabs,
    BreakingTicker,
    VideoGallery,
    MostRead,
    AdBanner,
    Newsletter,
    HtmlEmbed,
    Custom(String),
}

impl BlockKind {
    /// Every built-in kind, in palette order
    pub const BUILTIN: [BlockKind; 12] = [
        BlockKind::ArticleGrid,
        BlockKind::ArticleList,
        BlockKind::ArticleSlider,
        BlockKind::BigHero,
        BlockKind::FeaturedArticle,
        BlockKind::CategoryTabs,
        BlockKind::BreakingTicker,
        BlockKind::VideoGallery,
        BlockKind::MostRead,
        BlockKind::AdBanner,
        BlockKind::Newsletter,
        BlockKind::HtmlEmbed,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            BlockKind::ArticleGrid => "article-grid",
            BlockKind::ArticleList => "article-list",
            BlockKind::ArticleSlider => "article-slider",
            BlockKind::BigHero => "big-hero",
            BlockKind::FeaturedArticle => "featured-article",
            BlockKind::CategoryTabs => "category-tabs",
            BlockKind::BreakingTicker => "breaking-ticker",
            BlockKind::VideoGallery => "video-gallery",
            BlockKind::MostRead => "most-read",
            BlockKind::AdBanner => "ad-banner",
            BlockKind::Newsletter => "newsletter",
            BlockKind::HtmlEmbed => "html-embed",
            BlockKind::Custom(name) => name,
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, BlockKind::Custom(_))
    }
}

impl From<&str> for BlockKind {
    fn from(s: &str) -> Self {
        match s {
            "article-grid" => BlockKind::ArticleGrid,
            "article-list" => BlockKind::ArticleList,
            "article-slider" => BlockKind::ArticleSlider,
            "big-hero" => BlockKind::BigHero,
            "featured-article" => BlockKind::FeaturedArticle,
            "category-tabs" => BlockKind::CategoryTabs,
            "breaking-ticker" => BlockKind::BreakingTicker,
            "video-gallery" => BlockKind::VideoGallery,
            "most-read" => BlockKind::MostRead,
            "ad-banner" => BlockKind::AdBanner,
            "newsletter" => BlockKind::Newsletter,
            "html-embed" => BlockKind::HtmlEmbed,
            other => BlockKind::Custom(other.to_string()),
        }
    }
}

impl From<String> for BlockKind {
    fn from(s: String) -> Self {
        match BlockKind::from(s.as_str()) {
            BlockKind::Custom(_) => BlockKind::Custom(s),
            kind => kind,
        }
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Custom(name) => name,
            kind => kind.as_str().to_string(),
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_round_trip() {
        for kind in BlockKind::BUILTIN {
            assert_eq!(BlockKind::from(kind.as_str()), kind);
            assert!(kind.is_builtin());
        }
    }

    #[test]
    fn test_unknown_kind_is_kept_verbatim() {
        let kind: BlockKind = serde_json::from_str("\"weather-widget\"").unwrap();
        assert_eq!(kind, BlockKind::Custom("weather-widget".to_string()));
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"weather-widget\"");
    }
}
