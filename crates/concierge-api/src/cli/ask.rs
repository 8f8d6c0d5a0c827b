//! One-shot resolution: `concierge ask <text>`.

use anyhow::Result;
use chrono::Utc;
use concierge_core::assistant::normalize::is_blank;
use concierge_core::assistant::resolver::Resolution;
use concierge_types::error::ChatError;
use console::style;

use super::chat::renderer::{ASSISTANT_NAME, ReplyRenderer};
use crate::state::AppState;

/// Resolve `text` immediately (no thinking delay) and print the reply.
///
/// `--quiet` prints the bare reply text and nothing else.
pub fn ask(state: &AppState, text: &str, json: bool, quiet: bool) -> Result<()> {
    if is_blank(text) {
        return Err(ChatError::EmptyUtterance.into());
    }

    let resolution = state.resolver.resolve(text);

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        return Ok(());
    }

    for line in answer_lines(&resolution, quiet) {
        println!("{line}");
    }
    Ok(())
}

fn answer_lines(resolution: &Resolution, quiet: bool) -> Vec<String> {
    if quiet {
        return vec![resolution.reply.text.clone()];
    }

    let renderer = ReplyRenderer::new();
    let mut lines = vec![
        String::new(),
        renderer.speaker_header(ASSISTANT_NAME, Utc::now()),
        renderer.render_text(&resolution.reply.text),
    ];
    lines.extend(renderer.render_links(&resolution.reply.links));
    if let Some(target) = &resolution.reply.navigate_to {
        lines.push(renderer.render_navigation(target));
    }

    let matched = match resolution.detail {
        Some(detail) => format!("{} > {detail}", resolution.rule),
        None => resolution.rule.to_string(),
    };
    lines.push(String::new());
    lines.push(format!("  {} {}", style("rule:").dim(), style(matched).dim()));
    lines.push(String::new());
    lines
}
