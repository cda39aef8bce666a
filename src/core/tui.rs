use crate::core::error::LearnsyncError;
use std::env;

const MIN_BOX_WIDTH: usize = 40;
const MAX_BOX_WIDTH: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoxStyle {
    Info,
    Success,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ItemStatus {
    Created,
    Removed,
    Skipped,
    Failed,
    Info,
    Pass,
}

impl ItemStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            ItemStatus::Created => "✨",
            ItemStatus::Removed => "🧹",
            ItemStatus::Skipped => "⏭",
            ItemStatus::Failed => "💥",
            ItemStatus::Info => "💡",
            ItemStatus::Pass => "✅",
        }
    }
}

pub fn terminal_width() -> usize {
    env::var("TERM_WIDTH")
        .ok()
        .and_then(|w| w.parse().ok())
        .or_else(|| env::var("COLUMNS").ok().and_then(|c| c.parse().ok()))
        .unwrap_or(80)
}

fn effective_width() -> usize {
    terminal_width().clamp(MIN_BOX_WIDTH, MAX_BOX_WIDTH)
}

pub fn box_top(width: usize) -> String {
    format!("╔{}╗", "═".repeat(width.saturating_sub(2)))
}

pub fn box_bottom(width: usize) -> String {
    format!("╚{}╝", "═".repeat(width.saturating_sub(2)))
}

pub fn box_row(content: &str, width: usize) -> String {
    let padding = width
        .saturating_sub(2)
        .saturating_sub(content.chars().count());
    let left_pad = padding / 2;
    let right_pad = padding - left_pad;
    format!(
        "║{}{}{}║",
        " ".repeat(left_pad),
        content,
        " ".repeat(right_pad)
    )
}

pub fn render_box(title: &str, subtitle: &str, style: BoxStyle) {
    use colored::{ColoredString, Colorize};

    let width = effective_width();
    let paint = |s: String| -> ColoredString {
        match style {
            BoxStyle::Info => s.bright_cyan(),
            BoxStyle::Success => s.bright_green(),
        }
    };

    println!("{}", paint(box_top(width)));
    println!("{}", paint(box_row(title, width)).bold());
    if !subtitle.is_empty() {
        println!("{}", paint(box_row(subtitle, width)));
    }
    println!("{}", paint(box_bottom(width)));
}

pub fn print_section(title: &str) {
    use colored::Colorize;
    println!();
    println!("  {}", title.bold());
}

pub fn print_status_line(message: &str, status: ItemStatus) {
    use colored::Colorize;

    let icon = status.icon();
    let icon = match status {
        ItemStatus::Created | ItemStatus::Pass => icon.bright_green(),
        ItemStatus::Removed => icon.bright_yellow(),
        ItemStatus::Skipped => icon.bright_black(),
        ItemStatus::Failed => icon.bright_red(),
        ItemStatus::Info => icon.cyan(),
    };
    println!("  {} {}", icon, message.bright_white());
}

/// Final tally of a sync run.
pub fn print_sync_summary(succeeded: usize, failed: usize) {
    use colored::Colorize;

    println!();
    println!(
        "  {} {} synced   {} {} failed",
        "✅".bright_green(),
        succeeded.to_string().bright_green().bold(),
        "❌".bright_red(),
        if failed > 0 {
            failed.to_string().bright_red().bold()
        } else {
            failed.to_string().bright_black()
        }
    );
    if failed > 0 {
        println!(
            "  {}",
            "Failed learnings stay pending and will be retried on the next sync.".bright_black()
        );
    }
}

/// Report a command-level failure. Never exits the process.
pub fn render_error(command: &str, err: &LearnsyncError) {
    use colored::Colorize;

    println!();
    println!("  {} {} {}", "❌".bright_red(), command.bold(), "failed".bright_red());
    println!("     {}", err.to_string().bright_white());
    if let LearnsyncError::ValidationFailed(inner) = err {
        tracing::debug!(cause = ?inner, "validation failure");
    }
}
