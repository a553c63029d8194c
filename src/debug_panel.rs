use crossterm::{
    cursor::MoveTo,
    event::{MouseEvent, MouseEventKind},
    execute,
    style::{Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};

use crate::theme;
use crate::types::Area;

/// Scrollable view over the debug log. Sticks to the newest line until the
/// user scrolls up.
pub struct DebugPanel {
    pub logs: Vec<String>,
    pub scroll_offset: usize,
    pub follow_tail: bool,
    pub last_area: Option<Area>,
}

impl Default for DebugPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugPanel {
    pub fn new() -> Self {
        Self {
            logs: Vec::new(),
            scroll_offset: 0,
            follow_tail: true,
            last_area: None,
        }
    }

    pub fn sync(&mut self, logs: Vec<String>) {
        self.logs = logs;
    }

    fn max_scroll(&self, height: usize) -> usize {
        self.logs.len().saturating_sub(height)
    }

    pub fn render(&mut self, stdout: &mut impl Write, area: Area) -> io::Result<()> {
        self.last_area = Some(area);
        let height = area.height as usize;
        let width = area.width as usize;

        if self.follow_tail {
            self.scroll_offset = self.max_scroll(height);
        } else {
            self.scroll_offset = self.scroll_offset.min(self.max_scroll(height));
        }

        for row in 0..height {
            execute!(stdout, MoveTo(area.x, area.y + row as u16))?;
            let line = self
                .logs
                .get(self.scroll_offset + row)
                .map(|log| log.chars().take(width).collect::<String>())
                .unwrap_or_default();

            let color = if line.contains("ERROR:") {
                theme::ERROR
            } else if line.contains("WARNING:") {
                theme::WARNING
            } else if line.contains("TIMING:") {
                theme::TEXT_DIM
            } else {
                theme::TEXT_SECONDARY
            };
            execute!(
                stdout,
                SetForegroundColor(color),
                Print(format!("{:<width$}", line, width = width)),
                ResetColor
            )?;
        }
        stdout.flush()
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.follow_tail = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let height = self.last_area.map(|a| a.height as usize).unwrap_or(10);
        let max = self.max_scroll(height);
        self.scroll_offset = (self.scroll_offset + lines).min(max);
        self.follow_tail = self.scroll_offset >= max;
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let Some(area) = self.last_area else {
            return false;
        };
        if !area.contains(mouse.column, mouse.row) {
            return false;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.scroll_up(3);
                true
            }
            MouseEventKind::ScrollDown => {
                self.scroll_down(3);
                true
            }
            _ => false,
        }
    }
}
