//! Server-side HTML for the public pages

use std::fmt::Write;

use super::{
    Button, FocusAreaView, HomePage, FOCUS_AREAS_HEADING, METRICS_HEADING, TESTIMONIALS_HEADING,
};
use crate::dashboard::{AnalyticsPage, CommunityPage, SeriesPoint, SummaryCard};

fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<link rel=\"stylesheet\" href=\"/static/site.css\">\n</head>\n\
         <body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

fn button(out: &mut String, b: &Button, class: &str) {
    let _ = writeln!(
        out,
        "<a class=\"{}\" href=\"{}\">{}</a>",
        class,
        escape(&b.href.path()),
        escape(&b.label)
    );
}

fn focus_area_card(out: &mut String, area: &FocusAreaView) {
    out.push_str("<article class=\"card focus-area\">\n");
    if let Some(url) = &area.image_url {
        let _ = writeln!(
            out,
            "<img class=\"card-image\" src=\"{}\" alt=\"\">",
            escape(url)
        );
    }
    let _ = writeln!(out, "<h3>{}</h3>", escape(&area.title));
    let _ = writeln!(out, "<p>{}</p>", escape(&area.description));
    out.push_str("<div class=\"hashtags\">");
    for tag in &area.hashtags {
        let _ = write!(out, "<span>{}</span>", escape(tag));
    }
    out.push_str("</div>\n");
    button(out, &area.learn_more, "button outline");
    out.push_str("</article>\n");
}

/// The home page document
pub fn render_home(home: &HomePage) -> String {
    let mut out = String::new();

    let hero = &home.hero;
    out.push_str("<section class=\"hero\">\n");
    if let Some(url) = &hero.image_url {
        let _ = writeln!(out, "<img class=\"hero-image\" src=\"{}\" alt=\"\">", escape(url));
    }
    let _ = writeln!(out, "<h1>{}</h1>", escape(&hero.title));
    let _ = writeln!(out, "<p class=\"lead\">{}</p>", escape(&hero.subtitle));
    button(&mut out, &hero.primary, "button");
    button(&mut out, &hero.secondary, "button outline");
    out.push_str("</section>\n");

    out.push_str("<section class=\"stats\">\n");
    for stat in &home.stats {
        let _ = writeln!(
            out,
            "<div class=\"card\"><i class=\"icon icon-{}\"></i><div class=\"value\">{}</div><div class=\"label\">{}</div></div>",
            stat.icon.name(),
            escape(&stat.value),
            escape(&stat.label)
        );
    }
    out.push_str("</section>\n");

    out.push_str("<section class=\"metrics\">\n");
    let _ = writeln!(out, "<h2>{}</h2>\n<p>{}</p>", METRICS_HEADING.title, METRICS_HEADING.lead);
    for metric in &home.metrics {
        let _ = writeln!(
            out,
            "<div class=\"card\"><div class=\"value\">{}</div><div class=\"label\">{}</div><div class=\"growth\">{}</div></div>",
            escape(&metric.value),
            escape(&metric.label),
            escape(&metric.growth)
        );
    }
    out.push_str("</section>\n");

    out.push_str("<section class=\"focus-areas\">\n");
    let _ = writeln!(
        out,
        "<h2>{}</h2>\n<p>{}</p>",
        FOCUS_AREAS_HEADING.title, FOCUS_AREAS_HEADING.lead
    );
    for area in &home.focus_areas {
        focus_area_card(&mut out, area);
    }
    out.push_str("</section>\n");

    out.push_str("<section class=\"testimonials\">\n");
    let _ = writeln!(
        out,
        "<h2>{}</h2>\n<p>{}</p>",
        TESTIMONIALS_HEADING.title, TESTIMONIALS_HEADING.lead
    );
    for t in &home.testimonials {
        let _ = writeln!(
            out,
            "<blockquote class=\"card\"><p>\"{}\"</p><footer><strong>{}</strong><span>{}</span><span>{}</span></footer></blockquote>",
            escape(&t.quote),
            escape(&t.author_name),
            escape(&t.author_title),
            escape(&t.organization)
        );
    }
    out.push_str("</section>\n");

    let cta = &home.call_to_action;
    out.push_str("<section class=\"cta\">\n");
    let _ = writeln!(out, "<h2>{}</h2>\n<p>{}</p>", cta.title, cta.body);
    button(&mut out, &cta.button, "button");
    out.push_str("</section>\n");

    page(&hero.title, &out)
}

/// Stand-alone page for one focus area
pub fn render_theme(area: &FocusAreaView) -> String {
    let mut out = String::new();
    out.push_str("<section class=\"theme\">\n");
    focus_area_card(&mut out, area);
    out.push_str("<a class=\"button outline\" href=\"/\">Back</a>\n</section>\n");
    page(&area.title, &out)
}

fn summary_cards(out: &mut String, cards: &[SummaryCard]) {
    out.push_str("<section class=\"stats\">\n");
    for c in cards {
        let _ = writeln!(
            out,
            "<div class=\"card\"><div class=\"label\">{}</div><div class=\"value\">{}</div><div class=\"growth\">{}</div></div>",
            escape(&c.title),
            escape(&c.value),
            escape(&c.change)
        );
    }
    out.push_str("</section>\n");
}

fn series_table(out: &mut String, caption: &str, points: &[SeriesPoint]) {
    let _ = writeln!(out, "<table class=\"series\">\n<caption>{}</caption>", escape(caption));
    for p in points {
        let _ = writeln!(out, "<tr><th>{}</th><td>{}</td></tr>", escape(&p.name), p.value);
    }
    out.push_str("</table>\n");
}

/// Public analytics page, target of the primary hero button
pub fn render_analytics(page_data: &AnalyticsPage) -> String {
    let mut out = String::from("<h1>Analytics</h1>\n");
    summary_cards(&mut out, &page_data.summary);
    series_table(&mut out, "Monthly engagement", &page_data.engagement);
    series_table(&mut out, "Weekly reach", &page_data.reach);
    series_table(&mut out, "Conversations by focus area", &page_data.themes);
    out.push_str("<a class=\"button outline\" href=\"/\">Back</a>\n");
    page("Analytics", &out)
}

/// Public community page, target of the secondary hero button
pub fn render_community(page_data: &CommunityPage) -> String {
    let mut out = String::from("<h1>Community</h1>\n");
    summary_cards(&mut out, &page_data.summary);
    out.push_str("<section class=\"members\">\n");
    for m in &page_data.members {
        let _ = writeln!(
            out,
            "<div class=\"card\"><span class=\"avatar\">{}</span><strong>{}</strong><span>{}</span></div>",
            escape(&m.initials),
            escape(&m.name),
            escape(&m.role)
        );
    }
    out.push_str("</section>\n<a class=\"button outline\" href=\"/\">Back</a>\n");
    page("Community", &out)
}

/// Landing page for the "Get In Touch" call to action
pub fn render_contact() -> String {
    page(
        "Get In Touch",
        "<section class=\"cta\">\n<h1>Get In Touch</h1>\n\
         <p>Sign-in for advocates and partners is not open yet.</p>\n\
         <a class=\"button outline\" href=\"/\">Back</a>\n</section>\n",
    )
}
