//! Plain-text table output.
//!
//! Layout is computed on the display width of the raw cell text; colour
//! codes are only added once every cell has been padded, so widths never
//! count escape sequences.

use owo_colors::{AnsiColors, OwoColorize};
use unicode_width::UnicodeWidthStr;

use crate::clients::FetchError;
use crate::models::views::{Diagnostic, Report, TableRow};

const RAINBOW: [AnsiColors; 5] = [
    AnsiColors::Red,
    AnsiColors::Yellow,
    AnsiColors::Green,
    AnsiColors::Blue,
    AnsiColors::Magenta,
];

/// How a table is drawn. Built once from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStyle {
    /// No borders, no padding, single-space column separator.
    pub bare: bool,
    /// Cycle border characters through the rainbow.
    pub rainbow: bool,
    /// Allow ANSI colour at all.
    pub color: bool,
}

impl RenderStyle {
    pub fn from_flags(bare: bool, rainbow: bool, no_color: bool) -> Self {
        Self {
            bare,
            rainbow,
            color: !no_color && std::env::var_os("NO_COLOR").is_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Highlighted last row (the TOTAL line of `--stats`).
    pub footer: Option<Vec<String>>,
}

impl Table {
    pub fn from_report<R: TableRow>(report: &Report<R>) -> Self {
        Self {
            headers: R::HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: report.rows.iter().map(TableRow::cells).collect(),
            footer: report.total.as_ref().map(TableRow::cells),
        }
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in self.rows.iter().chain(self.footer.iter()) {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.width();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }

    pub fn render(&self, style: &RenderStyle) -> String {
        let widths = self.widths();
        let mut out = Painter::new(style, widths);

        out.rule('┌', '┬', '┐');
        out.row(&self.headers, true);
        out.rule('├', '┼', '┤');
        for row in &self.rows {
            out.row(row, false);
        }
        if let Some(footer) = &self.footer {
            if !self.rows.is_empty() {
                out.rule('├', '┼', '┤');
            }
            out.row(footer, true);
        }
        out.rule('└', '┴', '┘');

        out.finish()
    }
}

struct Painter<'a> {
    style: &'a RenderStyle,
    widths: Vec<usize>,
    lines: Vec<String>,
    hue: usize,
}

impl<'a> Painter<'a> {
    fn new(style: &'a RenderStyle, widths: Vec<usize>) -> Self {
        Self {
            style,
            widths,
            lines: Vec::new(),
            hue: 0,
        }
    }

    fn border(&mut self, s: &str) -> String {
        if !(self.style.rainbow && self.style.color) {
            return s.to_string();
        }
        let mut painted = String::new();
        for c in s.chars() {
            if c == ' ' {
                painted.push(c);
            } else {
                painted.push_str(&c.color(RAINBOW[self.hue % RAINBOW.len()]).to_string());
                self.hue += 1;
            }
        }
        painted
    }

    fn rule(&mut self, left: char, mid: char, right: char) {
        if self.style.bare {
            return;
        }
        let mut line = String::new();
        line.push(left);
        let segments: Vec<String> = self.widths.iter().map(|w| "─".repeat(w + 2)).collect();
        line.push_str(&segments.join(&mid.to_string()));
        line.push(right);
        let line = self.border(&line);
        self.lines.push(line);
    }

    fn row(&mut self, cells: &[String], highlight: bool) {
        let last = self.widths.len().saturating_sub(1);
        let mut line = String::new();

        if !self.style.bare {
            line.push_str(&self.border("│"));
        }
        for i in 0..self.widths.len() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let text = if self.style.bare && i == last {
                cell.to_string()
            } else {
                pad(cell, self.widths[i])
            };
            let text = if highlight && self.style.color {
                text.red().to_string()
            } else {
                text
            };

            if self.style.bare {
                if i > 0 {
                    line.push(' ');
                }
                line.push_str(&text);
            } else {
                line.push(' ');
                line.push_str(&text);
                line.push(' ');
                line.push_str(&self.border("│"));
            }
        }

        self.lines.push(line);
    }

    fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// Left-aligns `cell` in `width` terminal columns.
fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{}{}", cell, " ".repeat(fill))
}

/// The two lines printed for a server that could not be queried.
pub fn diagnostic_lines(d: &Diagnostic) -> [String; 2] {
    let status = match &d.error {
        FetchError::Status(code) => code.to_string(),
        other => format!("unknown ({})", other),
    };
    [
        format!("Something has gone wrong with :: {}", d.site),
        format!("Status Code :: {}", status),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::views::{ProblemRow, SummaryRow};

    fn plain() -> RenderStyle {
        RenderStyle::default()
    }

    fn summary_table() -> Table {
        let rows = vec![
            SummaryRow {
                site: "amsterdam".into(),
                host_count: 12,
                service_count: 140,
                problem_count: 3,
            },
            SummaryRow {
                site: "lon".into(),
                host_count: 1,
                service_count: 2,
                problem_count: 1,
            },
        ];
        let total = SummaryRow::total(&rows);
        Table::from_report(&Report {
            rows,
            total: Some(total),
            diagnostics: Vec::new(),
        })
    }

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn boxed_summary() {
        let expected = "\
┌───────────┬───────┬──────────┬──────────┐
│ Site      │ Hosts │ Services │ Problems │
├───────────┼───────┼──────────┼──────────┤
│ amsterdam │ 12    │ 140      │ 3        │
│ lon       │ 1     │ 2        │ 1        │
├───────────┼───────┼──────────┼──────────┤
│ TOTAL     │ 13    │ 142      │ 4        │
└───────────┴───────┴──────────┴──────────┘
";
        assert_eq!(summary_table().render(&plain()), expected);
    }

    #[test]
    fn bare_summary() {
        let style = RenderStyle {
            bare: true,
            ..plain()
        };
        let expected = "\
Site      Hosts Services Problems
amsterdam 12    140      3
lon       1     2        1
TOTAL     13    142      4
";
        assert_eq!(summary_table().render(&style), expected);
    }

    #[test]
    fn empty_problem_table_keeps_headers() {
        let table = Table::from_report::<ProblemRow>(&Report {
            rows: Vec::new(),
            total: None,
            diagnostics: Vec::new(),
        });
        let expected = "\
┌───────────────┬──────┬───────┬─────────┐
│ Nagios Server │ Host │ Check │ Message │
├───────────────┼──────┼───────┼─────────┤
└───────────────┴──────┴───────┴─────────┘
";
        assert_eq!(table.render(&plain()), expected);
    }

    #[test]
    fn rainbow_only_touches_borders() {
        let style = RenderStyle {
            rainbow: true,
            color: true,
            bare: false,
        };
        let colored = summary_table().render(&style);
        assert!(colored.contains('\u{1b}'));
        assert_eq!(strip_ansi(&colored), summary_table().render(&plain()));
    }

    #[test]
    fn rainbow_without_color_is_plain() {
        let style = RenderStyle {
            rainbow: true,
            ..plain()
        };
        assert!(!summary_table().render(&style).contains('\u{1b}'));
    }

    #[test]
    fn color_highlights_header_and_total() {
        let style = RenderStyle {
            color: true,
            ..plain()
        };
        let out = summary_table().render(&style);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].contains('\u{1b}'));
        assert!(lines[6].contains('\u{1b}'));
        assert!(!lines[3].contains('\u{1b}'));
        assert_eq!(strip_ansi(&out), summary_table().render(&plain()));
    }

    #[test]
    fn widths_follow_display_columns() {
        let table = Table {
            headers: vec!["Host".into()],
            rows: vec![
                vec!["hôte".into()],
                vec!["ab".into()],
                vec!["数据库".into()],
            ],
            footer: None,
        };
        let out = table.render(&plain());
        let expected = "\
┌────────┐
│ Host   │
├────────┤
│ hôte   │
│ ab     │
│ 数据库 │
└────────┘
";
        assert_eq!(out, expected);
    }

    #[test]
    fn diagnostics_name_site_and_status() {
        let lines = diagnostic_lines(&Diagnostic {
            site: "par".into(),
            error: FetchError::Status(500),
        });
        assert_eq!(lines[0], "Something has gone wrong with :: par");
        assert_eq!(lines[1], "Status Code :: 500");

        let lines = diagnostic_lines(&Diagnostic {
            site: "ber".into(),
            error: FetchError::EmptyResponse,
        });
        assert!(lines[1].starts_with("Status Code :: unknown (empty response"));
    }
}
