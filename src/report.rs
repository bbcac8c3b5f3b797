//! Console rendering of run progress and the final summary.

use crate::runner::{EventCallback, RunEvent};
use crate::summary::RunSummary;
use colored::*;

pub fn event_printer() -> EventCallback {
    Box::new(|event| println!("{}", render_event(&event)))
}

pub fn render_event(event: &RunEvent) -> String {
    match event {
        RunEvent::Progress { index, total, url } => {
            format!("\n{} {}", format!("📊 [{}/{}]", index, total).bold(), url)
        }
        RunEvent::InvalidUrl { url, error } => {
            format!("{} {}: {}", "❌ Invalid URL".red(), url, error)
        }
        RunEvent::Skipped { repo } => {
            format!("{} {}", "⏭️  Skipping own repository".yellow(), repo)
        }
        RunEvent::AlreadyStarred { repo } => {
            format!("{} {}", "✅ Already starred".green(), repo)
        }
        RunEvent::Starred { repo } => format!("{} {}", "⭐ Starred".green().bold(), repo),
        RunEvent::StarFailed { repo, failure } => {
            format!("{} {} ({})", "❌ Failed to star".red(), repo, failure)
        }
        RunEvent::Waiting { delay } => format!(
            "{}",
            format!("⏳ Waiting {}ms before the next repository...", delay.as_millis()).dimmed()
        ),
    }
}

pub fn render_summary(summary: &RunSummary) -> String {
    let mut lines = vec![
        format!("\n{}", "🎉 Done!".bold().green()),
        "=".repeat(50).dimmed().to_string(),
        format!("✅ Succeeded: {} repositories", summary.success_count),
        format!("  ├─ Newly starred:   {}", summary.newly_starred_count),
        format!("  └─ Already starred: {}", summary.already_starred_count),
        format!("❌ Failed: {} repositories", summary.fail_count),
        format!("⏭️  Skipped: {} repositories (your own)", summary.skip_count),
        format!("📊 Total: {} repositories", summary.total),
    ];

    if summary.newly_starred_count > 0 {
        let highlight = format!(
            "🎯 Starred {} new repositories this run!",
            summary.newly_starred_count
        );
        lines.push(format!("\n{}", highlight.bold()));
    } else {
        lines.push("\n💡 Every repository was already starred; nothing new to do.".to_string());
    }

    lines.push(format!("\n{}", "📈 API usage:".bold()));
    lines.push(format!(
        "- Requests issued: ~{} (status check + star per repository)",
        summary.estimated_requests()
    ));
    lines.push(match summary.success_rate() {
        Some(rate) => format!("- Success rate: {}%", rate),
        None => "- Success rate: n/a".to_string(),
    });

    lines.join("\n")
}

pub fn print_summary(summary: &RunSummary) {
    println!("{}", render_summary(summary));
}
