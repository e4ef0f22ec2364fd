use pagecraft_document::BlockKind;
use serde::Serialize;

/// What the canvas draws in place of a block's real rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placeholder {
    pub icon: &'static str,
    pub label: String,
}

pub fn placeholder(kind: &BlockKind, variant: &str) -> Placeholder {
    let icon = match kind {
        BlockKind::ArticleGrid => "grid",
        BlockKind::ArticleList => "list",
        BlockKind::ArticleSlider => "slides",
        BlockKind::BigHero => "hero",
        BlockKind::FeaturedArticle => "star",
        BlockKind::CategoryTabs => "tabs",
        BlockKind::BreakingTicker => "ticker",
        BlockKind::VideoGallery => "video",
        BlockKind::MostRead => "trending",
        BlockKind::AdBanner => "ad",
        BlockKind::Newsletter => "mail",
        BlockKind::HtmlEmbed => "code",
        BlockKind::Custom(_) => "unknown",
    };

    Placeholder {
        icon,
        label: format!("{}/{}", kind, variant),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_shows_raw_type_and_variant() {
        let p = placeholder(&BlockKind::Custom("weather".to_string()), "today");
        assert_eq!(p.icon, "unknown");
        assert_eq!(p.label, "weather/today");
    }
}
