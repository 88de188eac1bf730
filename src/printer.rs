use colored::{Color, Colorize};

use crate::{
    diff::{DiffLine, DiffTag, UnifiedOptions},
    history::HistoryEntry,
    response::{ExecutionOutcome, Response},
};

pub fn print_command(command: &str) {
    println!("{} {}", "$".dimmed(), command);
}

pub fn print_response(response: &Response, preview: Option<usize>) {
    let outcome = match response.outcome {
        ExecutionOutcome::Completed => None,
        ExecutionOutcome::Cancelled => Some("cancelled".yellow()),
        ExecutionOutcome::SpawnFailed => Some("not started".red()),
    };

    print!(
        "{} {} {}",
        "Status:".bold(),
        response.status_text().color(status_color(response)),
        format!("({})", response.formatted_duration()).dimmed()
    );
    match outcome {
        Some(label) => println!(" {label}"),
        None => println!(),
    }

    let headers = response.header_pairs();
    if !headers.is_empty() {
        println!("{}", "Response headers".bold());
        for (name, value) in &headers {
            println!("  {}: {}", name.cyan(), value.dimmed());
        }
    }

    let body = response.pretty_body();
    if !body.is_empty() {
        println!("{}", "Body".bold());
        println!("{}", truncate(&body, preview));
    }

    if !response.error_output.trim().is_empty() {
        println!("{}", "stderr".bold().red());
        println!("{}", response.error_output.trim_end().red());
    }
}

pub fn print_diff(lines: &[DiffLine], options: UnifiedOptions) {
    let visible = lines
        .iter()
        .filter(|line| !(options.changes_only && line.tag == DiffTag::Unchanged));
    for line in visible {
        let rendered = format!("{}{}", line.tag.symbol(), line.text);
        match line.tag {
            DiffTag::Added => println!("{}", rendered.green()),
            DiffTag::Removed => println!("{}", rendered.red()),
            DiffTag::Unchanged => println!("{}", rendered.dimmed()),
        }
    }
}

pub fn print_history<'a>(entries: impl IntoIterator<Item = &'a HistoryEntry>) {
    let mut empty = true;
    for entry in entries {
        empty = false;
        let status = entry
            .status_code
            .map(|code| code.to_string())
            .unwrap_or_else(|| "---".to_string());
        println!(
            "{} {} {:>7} {} {} {}",
            if entry.pinned { "*".yellow() } else { " ".normal() },
            entry.short_id().dimmed(),
            entry.method.bold(),
            status.color(code_color(entry.status_code)),
            entry.url.cyan(),
            format!("({:.2} ms)", entry.duration_ms).dimmed()
        );
    }
    if empty {
        println!("{}", "No history yet".dimmed());
    }
}

fn status_color(response: &Response) -> Color {
    if response.outcome != ExecutionOutcome::Completed {
        return Color::Red;
    }
    code_color(response.status_code)
}

fn code_color(code: Option<u16>) -> Color {
    match code {
        Some(code) if code >= 400 => Color::Red,
        Some(code) if code >= 300 => Color::Yellow,
        Some(_) => Color::Green,
        None => Color::Red,
    }
}

/// Cuts `text` to at most `limit` bytes on a char boundary.
fn truncate(text: &str, limit: Option<usize>) -> String {
    let Some(limit) = limit else {
        return text.to_string();
    };
    if text.len() <= limit {
        return text.to_string();
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}\n... ({} more bytes)", &text[..end], text.len() - end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::time::Duration;

    fn response(status_code: Option<u16>, outcome: ExecutionOutcome) -> Response {
        Response {
            timestamp: Local::now(),
            command: "curl https://example.com".to_string(),
            status_code,
            headers: "HTTP/1.1 404 Not Found\r\nContent-Type: application/json".to_string(),
            body: r#"{"error":"missing"}"#.to_string(),
            error_output: String::new(),
            duration: Duration::from_millis(3),
            success: true,
            outcome,
        }
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", None), "héllo");
        assert_eq!(truncate("héllo", Some(10)), "héllo");
        assert_eq!(truncate("héllo", Some(2)), "h\n... (5 more bytes)");
    }

    #[test]
    fn colors_follow_status_class() {
        assert_eq!(code_color(Some(200)), Color::Green);
        assert_eq!(code_color(Some(301)), Color::Yellow);
        assert_eq!(code_color(Some(503)), Color::Red);
        assert_eq!(code_color(None), Color::Red);
        assert_eq!(
            status_color(&response(Some(200), ExecutionOutcome::Cancelled)),
            Color::Red
        );
    }

    #[test]
    fn printing_does_not_panic() {
        print_response(&response(Some(404), ExecutionOutcome::Completed), Some(4));
        print_response(&response(None, ExecutionOutcome::SpawnFailed), None);
        print_command("curl -L https://example.com");
        print_diff(
            &crate::diff::diff_texts("a\nb", "a\nc"),
            UnifiedOptions { changes_only: true },
        );
        print_history(std::iter::empty());
    }
}
