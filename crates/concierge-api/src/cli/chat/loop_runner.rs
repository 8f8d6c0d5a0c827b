//! Main interactive chat loop.
//!
//! Waits on two sources at once: lines from the readline prompt and events
//! from the widget. Replies arrive after the thinking delay, so they are
//! printed from the event stream, never inline after a submission.

use std::io::Write;

use concierge_core::chat::ChatWidget;
use concierge_types::chat::{ChatMessage, Sender};
use concierge_types::error::ChatError;
use concierge_types::event::WidgetEvent;
use console::style;
use rustyline_async::SharedWriter;
use tokio::sync::broadcast;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::{ASSISTANT_NAME, ReplyRenderer, format_time};
use crate::state::AppState;

enum Flow {
    Continue,
    Exit,
}

/// Run an interactive session against a fresh widget.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let widget = ChatWidget::spawn(state.resolver, &state.config.widget);
    let mut events = widget.subscribe();

    // A terminal session is the open widget.
    if !widget.snapshot().await.is_open {
        widget.toggle_open().await;
        let _ = events.try_recv();
    }

    print_welcome_banner(&widget.id().to_string(), widget.thinking_delay());

    let renderer = ReplyRenderer::new();
    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, mut writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;
    let mut is_open = true;

    loop {
        tokio::select! {
            input = chat_input.read_line() => {
                let flow = match input {
                    InputEvent::Eof => Flow::Exit,
                    InputEvent::Interrupted => {
                        writeln!(writer, "\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim())?;
                        Flow::Continue
                    }
                    InputEvent::Message(text) => {
                        handle_line(&text, &widget, &mut chat_input, &mut writer, &renderer).await?
                    }
                };
                if let Flow::Exit = flow {
                    break;
                }
            }
            event = events.recv() => match event {
                Ok(event) => {
                    if let WidgetEvent::VisibilityChanged { is_open: open, .. } = &event {
                        is_open = *open;
                    }
                    print_event(event, is_open, &mut writer, &renderer)?;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Chat loop lagged behind widget events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    writeln!(writer, "\n  {}", style("Session ended.").dim())?;
    chat_input.flush();
    widget.shutdown();
    Ok(())
}

async fn handle_line(
    text: &str,
    widget: &ChatWidget,
    chat_input: &mut ChatInput,
    writer: &mut SharedWriter,
    renderer: &ReplyRenderer,
) -> anyhow::Result<Flow> {
    if text.trim().is_empty() {
        return Ok(Flow::Continue);
    }

    let Some(cmd) = commands::parse(text) else {
        match widget.submit(text).await {
            Ok(_) | Err(ChatError::EmptyUtterance) => {}
            Err(e) => writeln!(writer, "\n  {} {e}", style("!").red().bold())?,
        }
        return Ok(Flow::Continue);
    };

    match cmd {
        ChatCommand::Help => commands::print_help(),
        ChatCommand::Clear => chat_input.clear(),
        ChatCommand::Exit => return Ok(Flow::Exit),
        ChatCommand::History => {
            writeln!(writer)?;
            for message in widget.transcript().await {
                print_message(&message, writer, renderer)?;
            }
            writeln!(writer)?;
        }
        ChatCommand::Open => {
            widget.toggle_open().await;
        }
        ChatCommand::Minimize => {
            widget.toggle_minimize().await;
        }
        ChatCommand::Cancel => widget.cancel_pending().await,
        ChatCommand::Unknown(name) => writeln!(
            writer,
            "\n  {} Unknown command: {}. Type /help for available commands.\n",
            style("?").yellow().bold(),
            style(name).dim()
        )?,
    }

    Ok(Flow::Continue)
}

fn print_event(
    event: WidgetEvent,
    is_open: bool,
    writer: &mut SharedWriter,
    renderer: &ReplyRenderer,
) -> anyhow::Result<()> {
    match event {
        // The prompt already echoed the user's own line.
        WidgetEvent::MessageAppended { message } if message.sender == Sender::User => {}
        WidgetEvent::MessageAppended { message } => {
            if is_open {
                writeln!(writer)?;
                print_message(&message, writer, renderer)?;
                writeln!(writer)?;
            } else {
                writeln!(
                    writer,
                    "  {}",
                    style(format!("{ASSISTANT_NAME} replied while the widget was closed (/history)")).dim()
                )?;
            }
        }
        WidgetEvent::TypingChanged { is_typing: true } if is_open => {
            writeln!(writer, "  {}", style(format!("{ASSISTANT_NAME} is typing...")).dim())?;
        }
        WidgetEvent::TypingChanged { .. } => {}
        WidgetEvent::NavigationRequested { target } => {
            writeln!(writer, "{}", renderer.render_navigation(&target))?;
        }
        WidgetEvent::VisibilityChanged { is_open, is_minimized } => {
            let label = match (is_open, is_minimized) {
                (false, _) => "Widget closed",
                (true, true) => "Widget minimized",
                (true, false) => "Widget open",
            };
            writeln!(writer, "  {}", style(label).dim())?;
        }
        WidgetEvent::AttentionChanged { active: true } => {
            writeln!(writer, "  {}", style(format!("\u{2726} {ASSISTANT_NAME} is waiting")).cyan())?;
        }
        WidgetEvent::AttentionChanged { active: false } => {}
        WidgetEvent::SessionClosed => {
            writeln!(writer, "  {}", style("Session closed").dim())?;
        }
        WidgetEvent::ReplyCancelled { trigger_id } => {
            writeln!(
                writer,
                "  {}",
                style(format!("Reply to message #{trigger_id} cancelled")).dim()
            )?;
        }
    }
    Ok(())
}

fn print_message(
    message: &ChatMessage,
    writer: &mut SharedWriter,
    renderer: &ReplyRenderer,
) -> anyhow::Result<()> {
    match message.sender {
        Sender::User => writeln!(
            writer,
            "  {} {} {}",
            style("You").green().bold(),
            style(format_time(message.timestamp)).dim(),
            message.content
        )?,
        Sender::Bot => {
            writeln!(writer, "{}", renderer.speaker_header(ASSISTANT_NAME, message.timestamp))?;
            writeln!(writer, "{}", renderer.render_text(&message.content))?;
            for line in renderer.render_links(&message.links) {
                writeln!(writer, "{line}")?;
            }
        }
    }
    Ok(())
}
