//! Public renderer
//!
//! A pure projection of [`AggregatedContent`] into the home page sections,
//! in fixed order: hero, stats, metrics, focus areas, testimonials, then
//! the static call-to-action banner. Missing optional fields stay absent.

pub mod html;

use serde::Serialize;
use std::fmt;

use crate::aggregate::AggregatedContent;
use crate::model::{FocusArea, StatIcon};

pub use html::{render_analytics, render_community, render_contact, render_home, render_theme};

pub const DEFAULT_HERO_TITLE: &str = "AI-Powered Advocacy for Inclusive Ghana";
pub const DEFAULT_PRIMARY_TEXT: &str = "Explore Analytics";
pub const DEFAULT_SECONDARY_TEXT: &str = "Join Community";

/// Navigation targets reachable from the public site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Analytics,
    Community,
    Auth,
    Theme(String),
    /// A link stored in the content store
    Custom(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Analytics => "/analytics".to_string(),
            Route::Community => "/community".to_string(),
            Route::Auth => "/auth".to_string(),
            Route::Theme(slug) => format!("/themes/{}", urlencoding::encode(slug)),
            Route::Custom(path) => path.clone(),
        }
    }

    /// Stored link, or `fallback` when the link is empty or not a site path
    /// or http(s) URL
    fn stored_or(link: Option<&str>, fallback: Route) -> Route {
        match safe_url(link) {
            Some(l) => Route::Custom(l),
            None => fallback,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl Serialize for Route {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: String,
    pub href: Route,
}

impl Button {
    fn new(label: impl Into<String>, href: Route) -> Self {
        Self {
            label: label.into(),
            href,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroView {
    pub title: String,
    pub subtitle: String,
    pub image_url: Option<String>,
    pub primary: Button,
    pub secondary: Button,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatView {
    pub icon: StatIcon,
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricView {
    pub value: String,
    pub label: String,
    pub growth: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusAreaView {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub hashtags: Vec<String>,
    pub learn_more: Button,
}

impl From<&FocusArea> for FocusAreaView {
    fn from(area: &FocusArea) -> Self {
        Self {
            title: area.title.clone(),
            description: area.description.clone(),
            image_url: safe_url(area.image_url.as_deref()),
            hashtags: area.hashtags.clone(),
            learn_more: Button::new("Learn More", Route::Theme(area.slug.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestimonialView {
    pub quote: String,
    pub author_name: String,
    pub author_title: String,
    pub organization: String,
}

/// Heading and lead line of a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub title: &'static str,
    pub lead: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub title: &'static str,
    pub body: &'static str,
    pub button: Button,
}

impl Default for CallToAction {
    fn default() -> Self {
        Self {
            title: "Ready to Make a Difference?",
            body: "Join our community of advocates, researchers, and changemakers \
                   working toward a more inclusive Ghana.",
            button: Button::new("Get In Touch", Route::Auth),
        }
    }
}

pub const METRICS_HEADING: Heading = Heading {
    title: "Driving Real Impact",
    lead: "Our data-driven approach delivers measurable results for social change.",
};

pub const FOCUS_AREAS_HEADING: Heading = Heading {
    title: "Our Four Focus Areas",
    lead: "We monitor, analyze, and amplify conversations around these critical social issues in Ghana.",
};

pub const TESTIMONIALS_HEADING: Heading = Heading {
    title: "Trusted by Leading Organizations",
    lead: "See how advocacy organizations across Ghana are using our platform to drive meaningful change.",
};

/// The home page, sections in render order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomePage {
    pub hero: HeroView,
    pub stats: Vec<StatView>,
    pub metrics: Vec<MetricView>,
    pub focus_areas: Vec<FocusAreaView>,
    pub testimonials: Vec<TestimonialView>,
    pub call_to_action: CallToAction,
}

impl HomePage {
    pub fn project(content: &AggregatedContent) -> Self {
        Self {
            hero: project_hero(content),
            stats: content
                .stats
                .iter()
                .map(|s| StatView {
                    icon: StatIcon::resolve(&s.icon),
                    value: s.value.clone(),
                    label: s.label.clone(),
                })
                .collect(),
            metrics: content
                .metrics
                .iter()
                .map(|m| MetricView {
                    value: m.value.clone(),
                    label: m.label.clone(),
                    growth: m.growth_percentage.clone(),
                })
                .collect(),
            focus_areas: content.focus_areas.iter().map(FocusAreaView::from).collect(),
            testimonials: content
                .testimonials
                .iter()
                .map(|t| TestimonialView {
                    quote: t.quote.clone(),
                    author_name: t.author_name.clone(),
                    author_title: t.author_title.clone(),
                    organization: t.organization.clone(),
                })
                .collect(),
            call_to_action: CallToAction::default(),
        }
    }
}

fn project_hero(content: &AggregatedContent) -> HeroView {
    let hero = content.hero.as_ref();

    let text_or = |text: Option<&str>, fallback: &str| match text {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => fallback.to_string(),
    };

    HeroView {
        title: text_or(hero.map(|h| h.title.as_str()), DEFAULT_HERO_TITLE),
        subtitle: hero.map(|h| h.subtitle.clone()).unwrap_or_default(),
        image_url: safe_url(hero.and_then(|h| h.hero_image_url.as_deref())),
        primary: Button::new(
            text_or(hero.map(|h| h.cta_primary_text.as_str()), DEFAULT_PRIMARY_TEXT),
            Route::stored_or(hero.map(|h| h.cta_primary_link.as_str()), Route::Analytics),
        ),
        secondary: Button::new(
            text_or(hero.map(|h| h.cta_secondary_text.as_str()), DEFAULT_SECONDARY_TEXT),
            Route::stored_or(hero.map(|h| h.cta_secondary_link.as_str()), Route::Community),
        ),
    }
}

/// A stored link or image URL that may be placed in `href` or `src`:
/// a site-relative path or an absolute http(s) URL. Anything else,
/// `javascript:` and `data:` included, is dropped.
fn safe_url(s: Option<&str>) -> Option<String> {
    let s = s?.trim();
    let lower = s.to_ascii_lowercase();
    let allowed = (s.starts_with('/') && !s.starts_with("//"))
        || lower.starts_with("https://")
        || lower.starts_with("http://");
    allowed.then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeroContent, RecordId, StatCard};

    #[test]
    fn test_absent_hero_uses_defaults() {
        let page = HomePage::project(&AggregatedContent::default());
        assert_eq!(page.hero.title, "AI-Powered Advocacy for Inclusive Ghana");
        assert_eq!(page.hero.subtitle, "");
        assert_eq!(page.hero.primary.label, "Explore Analytics");
        assert_eq!(page.hero.primary.href.path(), "/analytics");
        assert_eq!(page.hero.secondary.label, "Join Community");
        assert_eq!(page.hero.secondary.href.path(), "/community");
        assert_eq!(page.call_to_action.button.href, Route::Auth);
    }

    #[test]
    fn test_stored_hero_links_win() {
        let content = AggregatedContent {
            hero: Some(HeroContent {
                id: RecordId::new(),
                title: "Voices".into(),
                subtitle: "Heard".into(),
                hero_image_url: Some(" ".into()),
                cta_primary_text: "See data".into(),
                cta_primary_link: "/analytics?tab=reach".into(),
                cta_secondary_text: String::new(),
                cta_secondary_link: String::new(),
                unset: Default::default(),
            }),
            ..Default::default()
        };
        let page = HomePage::project(&content);
        assert_eq!(page.hero.title, "Voices");
        assert_eq!(page.hero.image_url, None);
        assert_eq!(page.hero.primary.href.path(), "/analytics?tab=reach");
        assert_eq!(page.hero.secondary.label, "Join Community");
        assert_eq!(page.hero.secondary.href, Route::Community);
    }

    fn hero_with_links(primary: &str, image: &str) -> AggregatedContent {
        AggregatedContent {
            hero: Some(HeroContent {
                id: RecordId::new(),
                title: "Voices".into(),
                subtitle: String::new(),
                hero_image_url: Some(image.into()),
                cta_primary_text: "See data".into(),
                cta_primary_link: primary.into(),
                cta_secondary_text: String::new(),
                cta_secondary_link: "https://example.org/join".into(),
                unset: Default::default(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_script_links_fall_back_to_defaults() {
        for link in ["javascript:alert(1)", " JavaScript:alert(1)", "data:text/html,x", "//evil.example"] {
            let page = HomePage::project(&hero_with_links(link, link));
            assert_eq!(page.hero.primary.href, Route::Analytics, "{link}");
            assert_eq!(page.hero.primary.label, "See data");
            assert_eq!(page.hero.image_url, None, "{link}");
        }
    }

    #[test]
    fn test_http_links_are_kept() {
        let page = HomePage::project(&hero_with_links(
            "HTTPS://example.org/report",
            "http://cdn.example.org/hero.jpg",
        ));
        assert_eq!(page.hero.primary.href.path(), "HTTPS://example.org/report");
        assert_eq!(page.hero.secondary.href.path(), "https://example.org/join");
        assert_eq!(
            page.hero.image_url.as_deref(),
            Some("http://cdn.example.org/hero.jpg")
        );
    }

    #[test]
    fn test_unknown_stat_icon_renders_fallback() {
        let content = AggregatedContent {
            stats: vec![StatCard {
                id: RecordId::new(),
                label: "Reach".into(),
                value: "2.3M".into(),
                icon: "Unknown".into(),
                display_order: Some(0),
                unset: Default::default(),
            }],
            ..Default::default()
        };
        let page = HomePage::project(&content);
        assert_eq!(page.stats[0].icon, StatIcon::FALLBACK);
    }

    #[test]
    fn test_theme_route_encodes_slug() {
        assert_eq!(Route::Theme("mental-health".into()).path(), "/themes/mental-health");
        assert_eq!(Route::Theme("a b".into()).path(), "/themes/a%20b");
    }
}
