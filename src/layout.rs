// Screen layout: title, tab bar, navigation sidebar, main pane, status bar
use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use std::io::{self, Write};

use invoice_review::config::Layout;
use invoice_review::navigation::Session;
use invoice_review::screen_mode::ScreenMode;
use invoice_review::theme;
use invoice_review::types::Area;

pub const APP_TITLE: &str = "Invoice Review Dashboard";
const MAX_SIDEBAR_WIDTH: u16 = 30;
const MIN_SIDEBAR_WIDTH: u16 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub title: Area,
    pub tabs: Area,
    pub sidebar: Area,
    pub main: Area,
    pub status: Area,
    pub prev_button: Area,
    pub next_button: Area,
    pub picker_button: Area,
}

pub fn compute(width: u16, height: u16) -> Frame {
    let sidebar_width = (width / 4).clamp(MIN_SIDEBAR_WIDTH, MAX_SIDEBAR_WIDTH).min(width);
    let body_top = 2;
    let body_height = height.saturating_sub(body_top + 1);

    let sidebar = Area::new(0, body_top, sidebar_width, body_height);
    let button_width = sidebar_width.saturating_sub(2);

    Frame {
        title: Area::new(0, 0, width, 1),
        tabs: Area::new(0, 1, width, 1),
        sidebar,
        main: Area::new(
            sidebar_width + 1,
            body_top,
            width.saturating_sub(sidebar_width + 1),
            body_height,
        ),
        status: Area::new(0, height.saturating_sub(1), width, 1),
        prev_button: sidebar_row(sidebar, 2, button_width),
        next_button: sidebar_row(sidebar, 3, button_width),
        picker_button: sidebar_row(sidebar, 10, button_width),
    }
}

/// One-line button area `row` lines into the sidebar; zero-sized when the
/// sidebar is too short to show it.
fn sidebar_row(sidebar: Area, row: u16, width: u16) -> Area {
    if row < sidebar.height {
        Area::new(sidebar.x + 1, sidebar.y + row, width, 1)
    } else {
        Area::default()
    }
}

/// Left/right panes for the split layout; the PDF gets `pdf_percent` of the width.
pub fn split_main(main: Area, pdf_percent: u16) -> (Area, Area) {
    let pdf_width = (main.width as u32 * pdf_percent as u32 / 100) as u16;
    let pdf = Area::new(main.x, main.y, pdf_width, main.height);
    let data = Area::new(
        main.x + pdf_width + 1,
        main.y,
        main.width.saturating_sub(pdf_width + 1),
        main.height,
    );
    (pdf, data)
}

/// Everything below a one-line pane header.
pub fn pane_body(area: Area) -> Area {
    Area::new(area.x, area.y + 1, area.width, area.height.saturating_sub(1))
}

fn fit(text: &str, width: usize) -> String {
    let clipped: String = text.chars().take(width).collect();
    format!("{:<width$}", clipped, width = width)
}

pub fn render_title(stdout: &mut impl Write, frame: &Frame) -> io::Result<()> {
    execute!(
        stdout,
        MoveTo(frame.title.x, frame.title.y),
        SetBackgroundColor(theme::HEADER_TITLE),
        SetForegroundColor(theme::TEXT_HEADER),
        SetAttribute(Attribute::Bold),
        Print(fit(&format!(" {}", APP_TITLE), frame.title.width as usize)),
        SetAttribute(Attribute::Reset),
        ResetColor
    )
}

pub fn render_tabs(stdout: &mut impl Write, frame: &Frame, active: ScreenMode, layout: Layout) -> io::Result<()> {
    execute!(stdout, MoveTo(frame.tabs.x, frame.tabs.y))?;
    let mut used = 0usize;
    for (i, &tab) in ScreenMode::tabs(layout).iter().enumerate() {
        let label = format!(" {} {} ", i + 1, tab.title(layout));
        used += label.chars().count() + 1;
        if tab == active {
            execute!(
                stdout,
                SetBackgroundColor(theme::SELECTION_BG),
                SetForegroundColor(theme::TEXT_PRIMARY),
                SetAttribute(Attribute::Bold),
                Print(label),
                SetAttribute(Attribute::Reset),
                ResetColor,
                Print(" ")
            )?;
        } else {
            execute!(stdout, SetForegroundColor(theme::TEXT_DIM), Print(label), ResetColor, Print(" "))?;
        }
    }
    let rest = (frame.tabs.width as usize).saturating_sub(used);
    execute!(stdout, Print(" ".repeat(rest)))
}

fn render_button(stdout: &mut impl Write, area: Area, label: &str, enabled: bool) -> io::Result<()> {
    if area.is_empty() {
        return Ok(());
    }
    let fg = if enabled { theme::TEXT_PRIMARY } else { theme::BUTTON_DISABLED_FG };
    let bg = if enabled { theme::BUTTON_BG } else { theme::SIDEBAR_BG };
    let width = area.width as usize;
    let clipped: String = label.chars().take(width).collect();
    execute!(
        stdout,
        MoveTo(area.x, area.y),
        SetBackgroundColor(bg),
        SetForegroundColor(fg),
        Print(format!("{:^width$}", clipped, width = width)),
        ResetColor
    )
}

fn sidebar_text(stdout: &mut impl Write, area: Area, row: u16, text: &str, color: Color) -> io::Result<()> {
    if row >= area.height {
        return Ok(());
    }
    execute!(
        stdout,
        MoveTo(area.x + 1, area.y + row),
        SetBackgroundColor(theme::SIDEBAR_BG),
        SetForegroundColor(color),
        Print(fit(text, (area.width as usize).saturating_sub(2))),
        ResetColor
    )
}

pub fn render_sidebar(stdout: &mut impl Write, frame: &Frame, session: &Session) -> io::Result<()> {
    let area = frame.sidebar;
    let width = area.width as usize;
    let cursor = session.cursor();

    for row in 0..area.height {
        execute!(
            stdout,
            MoveTo(area.x, area.y + row),
            SetBackgroundColor(theme::SIDEBAR_BG),
            Print(" ".repeat(width)),
            ResetColor
        )?;
    }

    sidebar_text(stdout, area, 0, "Navigation", theme::HEADER_INVOICE)?;
    render_button(stdout, frame.prev_button, "◀ Previous", cursor.can_previous())?;
    render_button(stdout, frame.next_button, "Next ▶", cursor.can_next())?;

    sidebar_text(
        stdout,
        area,
        5,
        &format!("Invoice {} of {}", cursor.index() + 1, cursor.len()),
        theme::TEXT_SECONDARY,
    )?;
    sidebar_text(stdout, area, 6, session.current_filename(), theme::TEXT_PRIMARY)?;
    sidebar_text(stdout, area, 8, &"─".repeat(width.saturating_sub(2)), theme::BORDER)?;
    sidebar_text(stdout, area, 9, "Select an invoice to view:", theme::TEXT_SECONDARY)?;
    render_button(stdout, frame.picker_button, "/ Invoice files", true)
}

pub fn render_pane_header(stdout: &mut impl Write, area: Area, title: &str, color: Color) -> io::Result<()> {
    execute!(
        stdout,
        MoveTo(area.x, area.y),
        SetBackgroundColor(color),
        SetForegroundColor(theme::TEXT_HEADER),
        Print(fit(&format!(" {}", title), area.width as usize)),
        ResetColor
    )
}

pub fn render_status_bar(stdout: &mut impl Write, frame: &Frame, tab: &str, session: &Session, message: &str) -> io::Result<()> {
    let cursor = session.cursor();
    let status = format!(
        " {} | Invoice {}/{} | {} | ←/→: Prev/Next | /: Select | Tab: Switch | q: Quit ",
        tab.to_uppercase(),
        cursor.index() + 1,
        cursor.len(),
        if message.is_empty() { "Ready" } else { message }
    );
    execute!(
        stdout,
        MoveTo(frame.status.x, frame.status.y),
        SetBackgroundColor(theme::BG_STATUS),
        SetForegroundColor(theme::FG_STATUS),
        Print(fit(&status, frame.status.width as usize)),
        ResetColor
    )
}
