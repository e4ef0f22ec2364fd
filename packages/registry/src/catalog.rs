use crate::{BlockMeta, BlockRegistry, VariantDef};
use pagecraft_document::{BlockConfig, BlockKind};
use serde_json::{json, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct KindEntry {
    meta: BlockMeta,
    variants: Vec<VariantDef>,
}

/// Registry table keyed by block kind, then variant name.
#[derive(Debug, Clone, Default)]
pub struct BuiltinRegistry {
    entries: BTreeMap<BlockKind, KindEntry>,
    palette: Vec<BlockKind>,
}

impl BuiltinRegistry {
    /// Catalog with every built-in block kind
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for kind in BlockKind::BUILTIN {
            let (display_name, localized_name, variants) = builtin_entry(&kind);
            registry.register(
                kind,
                BlockMeta {
                    display_name: display_name.to_string(),
                    localized_name: localized_name.to_string(),
                },
                variants,
            );
        }
        registry
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Add or replace a kind. The first variant becomes the default.
    pub fn register(&mut self, kind: BlockKind, meta: BlockMeta, variants: Vec<VariantDef>) {
        if !self.entries.contains_key(&kind) {
            self.palette.push(kind.clone());
        }
        self.entries.insert(kind, KindEntry { meta, variants });
    }
}

impl BlockRegistry for BuiltinRegistry {
    fn block_meta(&self, kind: &BlockKind) -> Option<&BlockMeta> {
        self.entries.get(kind).map(|e| &e.meta)
    }

    fn variants(&self, kind: &BlockKind) -> &[VariantDef] {
        self.entries
            .get(kind)
            .map(|e| e.variants.as_slice())
            .unwrap_or(&[])
    }

    fn kinds(&self) -> Vec<BlockKind> {
        self.palette.clone()
    }
}

fn variant(name: &str, display_name: &str, defaults: Value) -> VariantDef {
    let default_config = match defaults {
        Value::Object(map) => map,
        _ => BlockConfig::new(),
    };
    VariantDef {
        name: name.to_string(),
        display_name: display_name.to_string(),
        default_config,
    }
}

fn builtin_entry(kind: &BlockKind) -> (&'static str, &'static str, Vec<VariantDef>) {
    match kind {
        BlockKind::ArticleGrid => (
            "Article Grid",
            "شبكة مقالات",
            vec![
                variant(
                    "grid-3",
                    "Three columns",
                    json!({ "columns": 3, "limit": 6, "showImage": true, "showExcerpt": false, "showCategory": true }),
                ),
                variant(
                    "grid-4",
                    "Four columns",
                    json!({ "columns": 4, "limit": 8, "showImage": true, "showExcerpt": false, "showCategory": true }),
                ),
                variant(
                    "mosaic",
                    "Mosaic",
                    json!({ "columns": 3, "limit": 5, "featuredFirst": true, "showImage": true }),
                ),
            ],
        ),
        BlockKind::ArticleList => (
            "Article List",
            "قائمة مقالات",
            vec![
                variant("compact", "Compact", json!({ "limit": 5, "showImage": false, "showDate": true })),
                variant(
                    "thumbnails",
                    "With thumbnails",
                    json!({ "limit": 5, "showImage": true, "imagePosition": "start", "showDate": true }),
                ),
            ],
        ),
        BlockKind::ArticleSlider => (
            "Article Slider",
            "شريط مقالات متحرك",
            vec![
                variant(
                    "carousel",
                    "Carousel",
                    json!({ "limit": 6, "autoplay": true, "interval": 5000, "showDots": true }),
                ),
                variant(
                    "cards",
                    "Cards",
                    json!({ "limit": 8, "slidesPerView": 3, "autoplay": false }),
                ),
            ],
        ),
        BlockKind::BigHero => (
            "Big Hero",
            "واجهة رئيسية كبيرة",
            vec![
                variant(
                    "overlay",
                    "Text over image",
                    json!({ "height": "large", "overlayOpacity": 0.5, "showExcerpt": true }),
                ),
                variant(
                    "split",
                    "Split",
                    json!({ "imagePosition": "end", "showExcerpt": true, "showAuthor": true }),
                ),
            ],
        ),
        BlockKind::FeaturedArticle => (
            "Featured Article",
            "مقال مميز",
            vec![
                variant("card", "Card", json!({ "showImage": true, "showAuthor": true, "showExcerpt": true })),
                variant("minimal", "Minimal", json!({ "showImage": false, "showAuthor": false })),
            ],
        ),
        BlockKind::CategoryTabs => (
            "Category Tabs",
            "تبويبات الأقسام",
            vec![
                variant("tabs", "Tabs", json!({ "categoryIds": [], "limit": 4 })),
                variant("pills", "Pills", json!({ "categoryIds": [], "limit": 4, "rounded": true })),
            ],
        ),
        BlockKind::BreakingTicker => (
            "Breaking News Ticker",
            "شريط الأخبار العاجلة",
            vec![variant(
                "scrolling",
                "Scrolling",
                json!({ "label": "Breaking", "speed": 50, "limit": 10 }),
            )],
        ),
        BlockKind::VideoGallery => (
            "Video Gallery",
            "معرض الفيديو",
            vec![
                variant("grid", "Grid", json!({ "limit": 6, "columns": 3 })),
                variant("playlist", "Playlist", json!({ "limit": 10, "autoplayFirst": false })),
            ],
        ),
        BlockKind::MostRead => (
            "Most Read",
            "الأكثر قراءة",
            vec![
                variant("numbered", "Numbered", json!({ "limit": 5, "period": "day" })),
                variant("tabs", "Tabbed periods", json!({ "limit": 5, "periods": ["day", "week"] })),
            ],
        ),
        BlockKind::AdBanner => (
            "Ad Banner",
            "مساحة إعلانية",
            vec![
                variant("leaderboard", "Leaderboard", json!({ "slot": "", "width": 728, "height": 90 })),
                variant("rectangle", "Rectangle", json!({ "slot": "", "width": 300, "height": 250 })),
            ],
        ),
        BlockKind::Newsletter => (
            "Newsletter",
            "النشرة البريدية",
            vec![
                variant("inline", "Inline", json!({ "title": "Subscribe", "buttonLabel": "Sign up" })),
                variant(
                    "boxed",
                    "Boxed",
                    json!({ "title": "Subscribe", "buttonLabel": "Sign up", "showDescription": true }),
                ),
            ],
        ),
        BlockKind::HtmlEmbed => (
            "HTML Embed",
            "كود HTML",
            vec![variant("raw", "Raw HTML", json!({ "html": "" }))],
        ),
        BlockKind::Custom(_) => ("Custom", "مخصص", Vec::new()),
    }
}
