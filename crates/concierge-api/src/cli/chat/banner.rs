//! Welcome banner display for chat sessions.

use std::time::Duration;

use console::style;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(session_id: &str, thinking_delay: Duration) {
    println!();
    println!("  {} {}", style("✦").cyan(), style("Vera").cyan().bold());
    println!("  {}", style("Veridian AI's website assistant").dim());
    println!();
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!(
        "  {}    {}",
        style("Delay:").bold(),
        style(format!("{}ms", thinking_delay.as_millis())).dim()
    );
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
