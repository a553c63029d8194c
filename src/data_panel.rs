// Draws the extracted-data view into a terminal rectangle
use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::io::{self, Write};

use crate::data_view::{RenderedView, Section, FULL_TEXT_TITLE, STRUCTURED_TITLE, SUMMARY_TITLE};
use crate::json_tree::tree_lines;
use crate::theme;
use crate::types::Area;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Heading,
    Bold,
    Body,
    JsonKey,
    Collapsed,
    Chart,
    Dim,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub text: String,
    pub style: LineStyle,
}

impl StyledLine {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self { text: text.into(), style }
    }

    fn blank() -> Self {
        Self::new("", LineStyle::Body)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PanelOptions {
    pub width: usize,
    pub expand_depth: usize,
    pub show_full_text: bool,
}

/// Undoes `escape_dollars`; other backslashes are part of the text.
pub fn unescape_dollars(text: &str) -> String {
    text.replace("\\$", "$")
}

/// Word wrap by char count; words wider than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for raw in text.split('\n') {
        let raw = raw.replace('\t', "    ");
        let mut current = String::new();
        let mut current_len = 0;

        for word in raw.split(' ') {
            let mut word: Vec<char> = word.chars().filter(|c| !c.is_control()).collect();
            let sep = usize::from(current_len > 0);

            if current_len + sep + word.len() <= width {
                if sep == 1 {
                    current.push(' ');
                }
                current.extend(word.iter());
                current_len += sep + word.len();
                continue;
            }

            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            while word.len() > width {
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            current_len = word.len();
            current = word.into_iter().collect();
        }
        lines.push(current);
    }
    lines
}

/// Hard wrap at `width` chars. Spacing is kept as is, tabs become four spaces.
pub fn wrap_literal(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for raw in text.split('\n') {
        let chars: Vec<char> = raw
            .replace('\t', "    ")
            .chars()
            .filter(|c| !c.is_control())
            .collect();
        if chars.is_empty() {
            lines.push(String::new());
            continue;
        }
        for chunk in chars.chunks(width) {
            lines.push(chunk.iter().collect());
        }
    }
    lines
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

pub fn view_lines(view: &RenderedView, opts: PanelOptions) -> Vec<StyledLine> {
    let width = opts.width.max(10);
    let mut lines = Vec::new();

    for section in &view.sections {
        match section {
            Section::Summary(markdown) => {
                lines.push(StyledLine::new(SUMMARY_TITLE, LineStyle::Heading));
                for line in wrap(&unescape_dollars(markdown), width) {
                    lines.push(StyledLine::new(line, LineStyle::Bold));
                }
            }
            Section::Structured(value) => {
                lines.push(StyledLine::new(STRUCTURED_TITLE, LineStyle::Heading));
                for node in tree_lines(value, opts.expand_depth) {
                    let style = if node.collapsed {
                        LineStyle::Collapsed
                    } else if node.key.is_some() {
                        LineStyle::JsonKey
                    } else {
                        LineStyle::Body
                    };
                    let marker = if node.collapsed { "▸ " } else { "" };
                    let text = format!("{}{}", marker, node.plain());
                    lines.push(StyledLine::new(truncate(&text, width), style));
                }
            }
            Section::Chart { chart, total } => {
                lines.push(StyledLine::new(chart.title.clone(), LineStyle::Heading));
                for line in chart.render_lines(width) {
                    lines.push(StyledLine::new(truncate(&line, width), LineStyle::Chart));
                }
                if let Some(total) = total {
                    let text = format!("Total {}: {}", chart.y_field, crate::chart::format_value(*total));
                    lines.push(StyledLine::new(text, LineStyle::Dim));
                }
            }
            Section::FullText(text) => {
                if opts.show_full_text {
                    lines.push(StyledLine::new(format!("▾ {}", FULL_TEXT_TITLE), LineStyle::Heading));
                    for line in wrap_literal(text, width) {
                        lines.push(StyledLine::new(line, LineStyle::Body));
                    }
                } else {
                    lines.push(StyledLine::new(format!("▸ {}", FULL_TEXT_TITLE), LineStyle::Heading));
                    lines.push(StyledLine::new("(f to expand)", LineStyle::Dim));
                }
            }
            Section::Notice(notice) => {
                for line in wrap(&notice.message(), width) {
                    lines.push(StyledLine::new(line, LineStyle::Error));
                }
            }
        }
        lines.push(StyledLine::blank());
    }
    lines
}

fn color_for(style: LineStyle) -> Color {
    match style {
        LineStyle::Heading => theme::HEADER_INVOICE,
        LineStyle::Bold | LineStyle::Body => theme::TEXT_PRIMARY,
        LineStyle::JsonKey => theme::JSON_KEY,
        LineStyle::Collapsed => theme::WARNING,
        LineStyle::Chart => theme::CHART_BAR,
        LineStyle::Dim => theme::TEXT_DIM,
        LineStyle::Error => theme::ERROR,
    }
}

#[derive(Debug, Default)]
pub struct DataPanel {
    pub scroll: usize,
    last_height: usize,
    last_len: usize,
}

impl DataPanel {
    pub fn reset(&mut self) {
        self.scroll = 0;
    }

    fn max_scroll(&self) -> usize {
        self.last_len.saturating_sub(self.last_height)
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = (self.scroll + lines).min(self.max_scroll());
    }

    pub fn render(&mut self, stdout: &mut impl Write, lines: &[StyledLine], area: Area) -> io::Result<()> {
        let height = area.height as usize;
        let width = area.width as usize;
        self.last_height = height;
        self.last_len = lines.len();
        self.scroll = self.scroll.min(self.max_scroll());

        for row in 0..height {
            execute!(stdout, MoveTo(area.x, area.y + row as u16))?;
            match lines.get(self.scroll + row) {
                Some(line) => {
                    let text = truncate(&line.text, width);
                    if matches!(line.style, LineStyle::Heading | LineStyle::Bold) {
                        execute!(stdout, SetAttribute(Attribute::Bold))?;
                    }
                    execute!(
                        stdout,
                        SetForegroundColor(color_for(line.style)),
                        Print(format!("{:<width$}", text, width = width)),
                        SetAttribute(Attribute::Reset),
                        ResetColor
                    )?;
                }
                None => execute!(stdout, Print(" ".repeat(width)))?,
            }
        }

        // Scroll hint in the bottom-right corner
        if self.max_scroll() > 0 && height > 0 && width > 12 {
            let hint = format!(" {}/{} ", self.scroll + 1, self.max_scroll() + 1);
            let x = area.x + (width - hint.len()) as u16;
            execute!(
                stdout,
                MoveTo(x, area.y + area.height - 1),
                SetForegroundColor(theme::TEXT_DIM),
                Print(hint),
                ResetColor
            )?;
        }
        stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_catalog;
    use crate::data_view::render;
    use serde_json::json;

    fn opts(show_full_text: bool) -> PanelOptions {
        PanelOptions { width: 40, expand_depth: 2, show_full_text }
    }

    fn view(structured: &str) -> RenderedView {
        let doc = json!({
            "inv1.pdf": {"summary": "$100 due", "structured": structured, "full": "FULL TEXT $5 **raw**"}
        });
        render(&parse_catalog(&doc.to_string()).unwrap(), "inv1.pdf")
    }

    fn lines_of(structured: &str) -> Vec<StyledLine> {
        view_lines(&view(structured), opts(false))
    }

    #[test]
    fn only_dollar_escapes_are_removed_for_display() {
        assert_eq!(unescape_dollars("\\$100 due"), "$100 due");
        assert_eq!(unescape_dollars("trailing \\"), "trailing \\");
        assert_eq!(unescape_dollars("C:\\Vendors\\ACME"), "C:\\Vendors\\ACME");
    }

    #[test]
    fn summary_backslashes_survive_the_round_trip() {
        let doc = json!({
            "inv1.pdf": {"summary": "Paid $5 to C:\\Vendors\\ACME", "structured": "{}", "full": ""}
        });
        let view = render(&parse_catalog(&doc.to_string()).unwrap(), "inv1.pdf");
        let lines = view_lines(&view, opts(false));
        assert_eq!(lines[1].text, "Paid $5 to C:\\Vendors\\ACME");
    }

    #[test]
    fn literal_wrap_keeps_indentation() {
        assert_eq!(wrap_literal("  Qty  Price\n    1  100", 40), ["  Qty  Price", "    1  100"]);
        assert_eq!(wrap_literal("abcdef", 4), ["abcd", "ef"]);
        assert_eq!(wrap_literal("a\n\n\tb", 10), ["a", "", "    b"]);
    }

    #[test]
    fn full_text_columns_are_not_reflowed() {
        let doc = json!({
            "inv1.pdf": {"summary": "s", "structured": "{}", "full": "  Qty  Price\n    1  100"}
        });
        let view = render(&parse_catalog(&doc.to_string()).unwrap(), "inv1.pdf");
        let lines = view_lines(&view, opts(true));
        assert!(lines.iter().any(|l| l.text == "  Qty  Price"));
        assert!(lines.iter().any(|l| l.text == "    1  100"));
    }

    #[test]
    fn wrap_respects_width() {
        assert_eq!(wrap("one two three", 7), ["one two", "three"]);
        assert_eq!(wrap("abcdefghij", 4), ["abcd", "efgh", "ij"]);
        assert_eq!(wrap("a\n\nb", 10), ["a", "", "b"]);
        for line in wrap("the quick brown fox jumps over the lazy dog", 9) {
            assert!(line.chars().count() <= 9);
        }
    }

    #[test]
    fn summary_shows_plain_dollars_in_bold() {
        let lines = lines_of("{}");
        assert_eq!(lines[0], StyledLine::new(SUMMARY_TITLE, LineStyle::Heading));
        assert_eq!(lines[1], StyledLine::new("$100 due", LineStyle::Bold));
    }

    #[test]
    fn full_text_is_collapsible_and_literal() {
        let v = view("{}");
        let collapsed = view_lines(&v, opts(false));
        assert!(!collapsed.iter().any(|l| l.text.contains("FULL TEXT")));

        let expanded = view_lines(&v, opts(true));
        assert!(expanded.iter().any(|l| l.text == "FULL TEXT $5 **raw**"));
    }

    #[test]
    fn chart_and_total_follow_structured_data() {
        let lines = lines_of(r#"{"line_items": [{"item": "Widget", "price": 100}, {"item": "Bolt", "price": 5}]}"#);
        let heading = lines.iter().position(|l| l.text == "Invoice Breakdown").unwrap();
        let structured = lines.iter().position(|l| l.text == STRUCTURED_TITLE).unwrap();
        assert!(structured < heading);
        assert!(lines[heading + 2].text.starts_with("Widget"));
        assert!(lines.iter().any(|l| l.text == "Total price: 105"));
    }

    #[test]
    fn bad_json_notice_is_styled_as_error() {
        let lines = lines_of("not json");
        assert!(lines
            .iter()
            .any(|l| l.style == LineStyle::Error && l.text.starts_with("Error displaying data")));
    }

    #[test]
    fn scrolling_is_clamped_to_content() {
        let lines: Vec<StyledLine> = (0..30).map(|i| StyledLine::new(format!("{i}"), LineStyle::Body)).collect();
        let mut panel = DataPanel::default();
        let mut out = Vec::new();
        panel.render(&mut out, &lines, Area::new(0, 0, 20, 10)).unwrap();

        panel.scroll_down(100);
        assert_eq!(panel.scroll, 20);
        panel.scroll_up(5);
        assert_eq!(panel.scroll, 15);
        panel.reset();
        assert_eq!(panel.scroll, 0);
    }
}
