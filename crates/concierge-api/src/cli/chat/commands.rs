//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and control the widget rather than talking to
//! the assistant.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Show the widget transcript.
    History,
    /// Toggle the widget open or closed.
    Open,
    /// Toggle the minimized flag.
    Minimize,
    /// Drop every reply still waiting to be delivered.
    Cancel,
    /// Exit the chat session.
    Exit,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/history" => Some(ChatCommand::History),
        "/open" | "/close" => Some(ChatCommand::Open),
        "/minimize" | "/min" => Some(ChatCommand::Minimize),
        "/cancel" => Some(ChatCommand::Cancel),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}     {}", style("/help").cyan(), "Show this help message");
    println!("  {}    {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}  {}", style("/history").cyan(), "Show the transcript");
    println!("  {}     {}", style("/open").cyan(), "Open or close the widget");
    println!("  {} {}", style("/minimize").cyan(), "Minimize or restore the widget");
    println!("  {}   {}", style("/cancel").cyan(), "Drop replies Vera is still preparing");
    println!("  {}     {}", style("/exit").cyan(), "End the chat session");
    println!();
    println!(
        "  {}",
        style("Ctrl+D to exit, Ctrl+C safe (no message loss)").dim()
    );
    println!();
}
