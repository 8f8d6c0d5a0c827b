//! Terminal rendering of assistant replies.
//!
//! Reply text goes through `termimad`; links and timestamps are styled with
//! `console`. Every method returns a `String` so callers can print through
//! stdout or a readline `SharedWriter`.

use chrono::{DateTime, Local, Utc};
use concierge_types::reply::{Link, LinkKind};
use termimad::crossterm::style::Color;
use termimad::MadSkin;

pub const ASSISTANT_NAME: &str = "Vera";

pub struct ReplyRenderer {
    skin: MadSkin,
}

impl ReplyRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);
        Self { skin }
    }

    /// Render reply prose, indented to sit under the speaker header.
    pub fn render_text(&self, text: &str) -> String {
        let rendered = self.skin.term_text(text).to_string();
        rendered
            .lines()
            .map(|line| format!("  {}", line.trim_end()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// "Vera · 14:03"
    pub fn speaker_header(&self, name: &str, timestamp: DateTime<Utc>) -> String {
        format!(
            "  {} {} {}",
            console::style(name).cyan().bold(),
            console::style("\u{00b7}").dim(),
            console::style(format_time(timestamp)).dim(),
        )
    }

    /// One line per link: internal links point at a site section, external
    /// ones open elsewhere.
    pub fn render_links(&self, links: &[Link]) -> Vec<String> {
        links
            .iter()
            .map(|link| {
                format!(
                    "    {} {} {}",
                    console::style(link_marker(link.kind())).cyan(),
                    console::style(&link.label).bold(),
                    console::style(&link.target).dim(),
                )
            })
            .collect()
    }

    pub fn render_navigation(&self, target: &str) -> String {
        format!(
            "  {}",
            console::style(format!("\u{21aa} navigating to {target}")).dim()
        )
    }
}

impl Default for ReplyRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Local wall-clock `HH:MM`.
pub fn format_time(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

pub fn link_marker(kind: LinkKind) -> &'static str {
    match kind {
        LinkKind::Internal => "\u{2192}",
        LinkKind::External => "\u{2197}",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_is_hh_mm() {
        let formatted = format_time(Utc::now());
        assert_eq!(formatted.len(), 5);
        assert_eq!(formatted.as_bytes()[2], b':');
    }

    #[test]
    fn test_link_markers_differ_by_kind() {
        assert_ne!(link_marker(LinkKind::Internal), link_marker(LinkKind::External));
    }

    #[test]
    fn test_render_links_one_line_each() {
        let renderer = ReplyRenderer::new();
        let links = vec![
            Link::new("Book a call", "https://cal.com/veridian-ai/discovery"),
            Link::new("Contact form", "/#contact"),
        ];
        let lines = renderer.render_links(&links);
        assert_eq!(lines.len(), 2);

        let first = console::strip_ansi_codes(&lines[0]).to_string();
        assert!(first.contains("Book a call"));
        assert!(first.contains(link_marker(LinkKind::External)));
        let second = console::strip_ansi_codes(&lines[1]).to_string();
        assert!(second.contains(link_marker(LinkKind::Internal)));
    }

    #[test]
    fn test_render_text_keeps_words() {
        let renderer = ReplyRenderer::new();
        let out = renderer.render_text("You're welcome!");
        assert!(console::strip_ansi_codes(&out).contains("welcome"));
    }
}
