use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind},
    execute,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use nucleo::pattern::{CaseMatching, Normalization};
use nucleo::{Config, Nucleo};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use crate::theme;

const LIST_TOP: u16 = 5;

/// Every invoice filename in catalog order, narrowed by a fuzzy query.
/// Selections are reported as catalog indices.
pub struct InvoicePicker {
    nucleo: Nucleo<usize>,
    query: String,
    matches: Vec<usize>,
    selected: usize,
    scroll: usize,
}

impl InvoicePicker {
    pub fn new(filenames: &[String], current: usize) -> Self {
        let nucleo = Nucleo::<usize>::new(Config::DEFAULT, Arc::new(|| {}), None, 1);

        let injector = nucleo.injector();
        for (index, name) in filenames.iter().enumerate() {
            let name = name.clone();
            let _ = injector.push(index, move |_, cols| {
                cols[0] = name.as_str().into();
            });
        }

        let mut picker = Self {
            nucleo,
            query: String::new(),
            matches: Vec::new(),
            selected: 0,
            scroll: 0,
        };
        picker.refresh();
        picker.selected = picker.matches.iter().position(|&i| i == current).unwrap_or(0);
        picker
    }

    /// Let the matcher finish and pull the new match list.
    pub fn refresh(&mut self) {
        for _ in 0..100 {
            if !self.nucleo.tick(10).running {
                break;
            }
        }
        let snapshot = self.nucleo.snapshot();
        self.matches = snapshot.matched_items(..).map(|item| *item.data).collect();
        self.selected = self.selected.min(self.matches.len().saturating_sub(1));
    }

    fn reparse(&mut self, append: bool) {
        self.nucleo
            .pattern
            .reparse(0, &self.query, CaseMatching::Smart, Normalization::Smart, append);
        self.selected = 0;
        self.scroll = 0;
        self.refresh();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.reparse(true);
    }

    pub fn pop_char(&mut self) {
        if self.query.pop().is_some() {
            self.reparse(false);
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    pub fn move_by(&mut self, delta: isize) {
        let last = self.matches.len().saturating_sub(1) as isize;
        self.selected = (self.selected as isize + delta).clamp(0, last.max(0)) as usize;
    }

    /// Catalog index under the highlight.
    pub fn selected_index(&self) -> Option<usize> {
        self.matches.get(self.selected).copied()
    }

    fn draw(&mut self, stdout: &mut impl Write, filenames: &[String], current: usize) -> io::Result<usize> {
        let (term_width, term_height) = terminal::size().unwrap_or((80, 24));
        let width = term_width as usize;
        let visible = (term_height as usize).saturating_sub(LIST_TOP as usize + 3).max(1);

        if self.selected >= self.scroll + visible {
            self.scroll = self.selected + 1 - visible;
        } else if self.selected < self.scroll {
            self.scroll = self.selected;
        }

        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        execute!(
            stdout,
            SetBackgroundColor(theme::HEADER_TITLE),
            SetForegroundColor(theme::TEXT_HEADER),
            SetAttribute(Attribute::Bold),
            Print(format!("  {:<w$}", "Select an invoice to view:", w = width.saturating_sub(2))),
            SetAttribute(Attribute::Reset),
            ResetColor
        )?;
        execute!(
            stdout,
            MoveTo(0, 2),
            SetForegroundColor(theme::HEADER_INVOICE),
            Print("  Search: "),
            SetForegroundColor(theme::TEXT_PRIMARY),
            Print(&self.query),
            SetForegroundColor(theme::TEXT_DIM),
            Print("_"),
            ResetColor
        )?;

        for (row, &index) in self.matches.iter().skip(self.scroll).take(visible).enumerate() {
            let name: String = filenames[index].chars().take(width.saturating_sub(12)).collect();
            let marker = if index == current { " (current)" } else { "" };
            execute!(stdout, MoveTo(0, LIST_TOP + row as u16))?;
            if self.scroll + row == self.selected {
                execute!(
                    stdout,
                    SetForegroundColor(theme::SUCCESS),
                    Print("  ▶ "),
                    SetForegroundColor(theme::TEXT_PRIMARY),
                    Print(name),
                    SetForegroundColor(theme::TEXT_DIM),
                    Print(marker),
                    ResetColor
                )?;
            } else {
                execute!(
                    stdout,
                    Print("    "),
                    SetForegroundColor(theme::TEXT_SECONDARY),
                    Print(name),
                    SetForegroundColor(theme::TEXT_DIM),
                    Print(marker),
                    ResetColor
                )?;
            }
        }

        let footer = format!(
            "  {} of {} invoices  •  ↑/↓ Navigate  •  Enter Select  •  Esc Cancel  •  Type to filter",
            self.matches.len(),
            filenames.len()
        );
        execute!(
            stdout,
            MoveTo(0, term_height.saturating_sub(1)),
            SetForegroundColor(theme::TEXT_DIM),
            Print(footer.chars().take(width).collect::<String>()),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(visible)
    }
}

/// Match position under screen `row`, if that row shows one of the
/// `visible` list entries.
fn list_row_at(row: u16, scroll: usize, visible: usize, matches: usize) -> Option<usize> {
    let offset = row.checked_sub(LIST_TOP)? as usize;
    if offset >= visible {
        return None;
    }
    let position = scroll + offset;
    (position < matches).then_some(position)
}

/// Modal selector on the already-active alternate screen.
/// Returns the chosen catalog index, or `None` when cancelled.
pub fn pick_invoice(filenames: &[String], current: usize) -> Result<Option<usize>> {
    let mut stdout = io::stdout();
    let mut picker = InvoicePicker::new(filenames, current);

    loop {
        let visible = picker.draw(&mut stdout, filenames, current)?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    if matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
                        return Ok(None);
                    }
                    continue;
                }
                match key.code {
                    KeyCode::Esc => return Ok(None),
                    KeyCode::Enter => {
                        if let Some(index) = picker.selected_index() {
                            return Ok(Some(index));
                        }
                    }
                    KeyCode::Up => picker.move_by(-1),
                    KeyCode::Down => picker.move_by(1),
                    KeyCode::PageUp => picker.move_by(-(visible as isize)),
                    KeyCode::PageDown => picker.move_by(visible as isize),
                    KeyCode::Home => picker.move_by(isize::MIN / 2),
                    KeyCode::End => picker.move_by(isize::MAX / 2),
                    KeyCode::Backspace => picker.pop_char(),
                    KeyCode::Char(c) => picker.push_char(c),
                    _ => {}
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => picker.move_by(-3),
                MouseEventKind::ScrollDown => picker.move_by(3),
                MouseEventKind::Down(MouseButton::Left) => {
                    if let Some(clicked) = list_row_at(mouse.row, picker.scroll, visible, picker.matches.len()) {
                        picker.selected = clicked;
                        return Ok(picker.selected_index());
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        ["acme-widgets-0042.pdf", "bolt-supply-7.pdf", "zeta-freight.pdf"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn empty_query_lists_every_invoice_with_current_selected() {
        let picker = InvoicePicker::new(&names(), 2);
        assert_eq!(picker.matches(), [0, 1, 2]);
        assert_eq!(picker.selected_index(), Some(2));
    }

    #[test]
    fn typing_filters_and_backspace_restores() {
        let mut picker = InvoicePicker::new(&names(), 0);
        for c in "bolt".chars() {
            picker.push_char(c);
        }
        assert_eq!(picker.query(), "bolt");
        assert_eq!(picker.selected_index(), Some(1));

        for _ in 0..4 {
            picker.pop_char();
        }
        assert_eq!(picker.matches().len(), 3);
    }

    #[test]
    fn selection_is_clamped() {
        let mut picker = InvoicePicker::new(&names(), 0);
        picker.move_by(-5);
        assert_eq!(picker.selected_index(), Some(0));
        picker.move_by(50);
        assert_eq!(picker.selected_index(), Some(2));
    }

    #[test]
    fn clicks_only_land_on_drawn_rows() {
        // 24-row terminal: 16 rows drawn from LIST_TOP, footer on row 23
        let visible = 16;
        assert_eq!(list_row_at(LIST_TOP, 0, visible, 30), Some(0));
        assert_eq!(list_row_at(LIST_TOP + 15, 4, visible, 30), Some(19));
        assert_eq!(list_row_at(LIST_TOP + 16, 0, visible, 30), None);
        assert_eq!(list_row_at(23, 0, visible, 30), None);
        assert_eq!(list_row_at(LIST_TOP - 1, 0, visible, 30), None);
        // drawn rows past the end of a short list
        assert_eq!(list_row_at(LIST_TOP + 3, 0, visible, 2), None);
    }

    #[test]
    fn no_match_selects_nothing() {
        let mut picker = InvoicePicker::new(&names(), 1);
        for c in "qqqq".chars() {
            picker.push_char(c);
        }
        assert!(picker.matches().is_empty());
        assert_eq!(picker.selected_index(), None);
    }
}
