//! Styled terminal messages
//!
//! Progress goes through the task indicators; this module covers the lines
//! printed around them. Failures and advisories go to stderr.

use console::Style;

/// Kind of a one-line status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Done,
    Failed,
    Advisory,
    Note,
}

impl Status {
    fn mark(self) -> &'static str {
        match self {
            Status::Done => "✓",
            Status::Failed => "✗",
            Status::Advisory => "⚠",
            Status::Note => "ℹ",
        }
    }

    fn style(self) -> Style {
        let style = Style::new().bold();
        match self {
            Status::Done => style.green(),
            Status::Failed => style.red(),
            Status::Advisory => style.yellow(),
            Status::Note => style.blue(),
        }
    }

    fn uses_stderr(self) -> bool {
        matches!(self, Status::Failed | Status::Advisory)
    }
}

fn status_line(status: Status, msg: &str) -> String {
    format!("{} {}", status.style().apply_to(status.mark()), msg)
}

fn print_status(status: Status, msg: &str) {
    let line = status_line(status, msg);
    if status.uses_stderr() {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}

pub fn success(msg: &str) {
    print_status(Status::Done, msg);
}

pub fn error(msg: &str) {
    print_status(Status::Failed, msg);
}

pub fn warning(msg: &str) {
    print_status(Status::Advisory, msg);
}

pub fn info(msg: &str) {
    print_status(Status::Note, msg);
}

fn section_title(title: &str) -> String {
    format!("\n{}", Style::new().bold().underlined().apply_to(title))
}

/// One row per template, names padded to a common column
fn template_rows(rows: &[(&str, &str)]) -> Vec<String> {
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let name_style = Style::new().cyan();
    rows.iter()
        .map(|(name, detail)| {
            format!(
                "  {}  {}",
                name_style.apply_to(format!("{:<width$}", name)),
                Style::new().dim().apply_to(detail)
            )
        })
        .collect()
}

/// Print the template table printed by `scaffold list`
pub fn templates(rows: &[(&str, &str)]) {
    println!("{}", section_title("Available templates"));
    for row in template_rows(rows) {
        println!("{}", row);
    }
}

fn step_lines(commands: &[String]) -> Vec<String> {
    commands
        .iter()
        .enumerate()
        .map(|(i, cmd)| format!("  {}. {}", i + 1, Style::new().cyan().apply_to(cmd)))
        .collect()
}

/// Print the numbered commands to run inside a freshly created project
pub fn next_steps(commands: &[String]) {
    println!("{}", section_title("Next steps"));
    for line in step_lines(commands) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Status::Done, "✓ Created app")]
    #[case(Status::Failed, "✗ Created app")]
    #[case(Status::Advisory, "⚠ Created app")]
    #[case(Status::Note, "ℹ Created app")]
    fn status_line_prefixes_mark(#[case] status: Status, #[case] expected: &str) {
        console::set_colors_enabled(false);

        assert_eq!(status_line(status, "Created app"), expected);
    }

    #[test]
    fn only_failures_and_advisories_go_uses_stderr() {
        assert!(Status::Failed.uses_stderr());
        assert!(Status::Advisory.uses_stderr());
        assert!(!Status::Done.uses_stderr());
        assert!(!Status::Note.uses_stderr());
    }

    #[test]
    fn template_rows_align_details() {
        console::set_colors_enabled(false);

        let rows = template_rows(&[("vue", "Vue 3 starter"), ("react-ts", "React + TS")]);

        assert_eq!(
            rows,
            vec![
                "  vue       Vue 3 starter".to_string(),
                "  react-ts  React + TS".to_string(),
            ]
        );
    }

    #[test]
    fn step_lines_are_numbered() {
        console::set_colors_enabled(false);

        let lines = step_lines(&["cd app".to_string(), "pnpm install".to_string()]);

        assert_eq!(lines, vec!["  1. cd app", "  2. pnpm install"]);
    }
}
