// Invoice review dashboard: PDF on one side, extracted data on the other
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent, MouseEventKind},
    execute,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use invoice_review::catalog::{self, InvoiceCatalog};
use invoice_review::config::{self, Config, Layout};
use invoice_review::data_panel::{self, DataPanel, PanelOptions};
use invoice_review::data_view;
use invoice_review::debug_log;
use invoice_review::debug_panel::DebugPanel;
use invoice_review::invoice_picker::pick_invoice;
use invoice_review::json_tree;
use invoice_review::navigation::{Move, Session};
use invoice_review::pdf_renderer::{self, PdfPage, PdfRenderer, SystemPdfRenderer};
use invoice_review::screen_mode::ScreenMode;
use invoice_review::theme;
use invoice_review::types::{AppFlags, Area};
use invoice_review::viuer_display;
use invoice_review::{debug_error, debug_timing};

mod keyboard;
mod layout;

use layout::Frame;

#[derive(Parser, Debug)]
#[command(name = "invoice-review")]
#[command(about = "Review invoice PDFs side by side with their extracted data")]
struct Args {
    /// YAML config with the `processing` section
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Validate config, catalog and PDFs, then exit
    #[arg(long)]
    check: bool,
}

pub struct App {
    pub config: Config,
    pub catalog: InvoiceCatalog,
    pub session: Session,
    pub screen_mode: ScreenMode,
    pub flags: AppFlags,
    pub data_panel: DataPanel,
    pub debug_panel: DebugPanel,
    pub pdf_renderer: Box<dyn PdfRenderer>,
    pub pdf_page: usize,
    pub pdf_page_count: Option<usize>,
    pub expand_depth: usize,
    pub status_message: String,
    pub open_picker: bool,
    last_frame: Option<Frame>,
    last_rendered_screen: Option<ScreenMode>,
}

impl App {
    fn new(config: Config, catalog: InvoiceCatalog, session: Session) -> Self {
        let mut flags = AppFlags::REDRAW;
        if config.ui.dark_mode {
            flags.insert(AppFlags::DARK_MODE);
        }
        if config.ui.show_full_text {
            flags.insert(AppFlags::SHOW_FULL_TEXT);
        }

        Self {
            pdf_renderer: Box::new(SystemPdfRenderer::new(config.ui.render_size)),
            expand_depth: config.ui.json_expand_depth,
            config,
            catalog,
            session,
            screen_mode: ScreenMode::Invoice,
            flags,
            data_panel: DataPanel::default(),
            debug_panel: DebugPanel::new(),
            pdf_page: 0,
            pdf_page_count: None,
            status_message: String::new(),
            open_picker: false,
            last_frame: None,
            last_rendered_screen: None,
        }
    }

    /// Every navigation path (buttons, keys, selector) ends up here.
    pub fn navigate(&mut self, step: Move) {
        match self.session.apply(step) {
            Ok(true) => {
                let _ = viuer_display::clear_graphics();
                self.data_panel.reset();
                self.pdf_page = 0;
                self.pdf_page_count = None;
                self.status_message.clear();
                self.flags.insert(AppFlags::REDRAW);
            }
            Ok(false) => {}
            Err(e) => {
                debug_error!("navigation: {}", e);
                self.status_message = e.to_string();
                self.flags.insert(AppFlags::REDRAW);
            }
        }
    }

    pub fn set_screen(&mut self, mode: ScreenMode) {
        if self.screen_mode != mode {
            let _ = viuer_display::clear_graphics();
            self.screen_mode = mode;
            self.flags.insert(AppFlags::REDRAW);
        }
    }

    pub fn change_pdf_page(&mut self, delta: isize) {
        let Some(count) = self.pdf_page_count else {
            return;
        };
        let target = (self.pdf_page as isize + delta).clamp(0, count.saturating_sub(1) as isize) as usize;
        if target != self.pdf_page {
            let _ = viuer_display::clear_graphics();
            self.pdf_page = target;
            self.flags.insert(AppFlags::REDRAW);
        }
    }

    /// Nesting depth of the current record's structured data; 0 when it does not parse.
    pub fn structured_depth(&self) -> usize {
        self.catalog
            .get(self.session.current_filename())
            .and_then(|record| record.structured_value().ok())
            .map(|value| json_tree::max_depth(&value))
            .unwrap_or(0)
    }

    fn current_pdf(&mut self) -> Result<Arc<PdfPage>, invoice_review::types::PdfRenderError> {
        let filename = self.session.current_filename().to_string();
        let path = self.config.pdf_path(&filename);
        let page = self.pdf_renderer.render_pdf(&path, &pdf_renderer::session_key(&filename), self.pdf_page)?;
        self.pdf_page_count = Some(page.page_count);
        Ok(page)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.screen_mode == ScreenMode::Debug && self.debug_panel.handle_mouse(mouse) {
            self.flags.insert(AppFlags::REDRAW);
            return;
        }
        let Some(frame) = self.last_frame else {
            return;
        };

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if frame.prev_button.contains(mouse.column, mouse.row) {
                    self.navigate(Move::Previous);
                } else if frame.next_button.contains(mouse.column, mouse.row) {
                    self.navigate(Move::Next);
                } else if frame.picker_button.contains(mouse.column, mouse.row) {
                    self.open_picker = true;
                }
            }
            MouseEventKind::ScrollUp if self.screen_mode.shows_data(self.config.ui.layout) => {
                self.data_panel.scroll_up(3);
                self.flags.insert(AppFlags::REDRAW);
            }
            MouseEventKind::ScrollDown if self.screen_mode.shows_data(self.config.ui.layout) => {
                self.data_panel.scroll_down(3);
                self.flags.insert(AppFlags::REDRAW);
            }
            _ => {}
        }
    }
}

/// Config, catalog, PDF check and the initial session. Nothing here touches the terminal.
fn startup(config_path: &Path) -> Result<(Config, InvoiceCatalog, Session)> {
    let config = config::load_config(config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    debug_log(format!("config loaded from {}", config_path.display()));

    let start = Instant::now();
    let catalog = catalog::load_catalog(&config.processing.output_file)
        .with_context(|| format!("loading catalog {}", config.processing.output_file.display()))?;
    debug_log(format!("catalog loaded: {} invoices", catalog.len()));
    debug_timing!("catalog load", start);

    let folder = &config.processing.local_download_folder;
    catalog::verify_pdfs(&catalog, folder).context("verifying invoice PDFs")?;
    debug_log(format!("all {} PDFs present in {}", catalog.len(), folder.display()));

    match catalog::unreferenced_pdfs(&catalog, folder) {
        Ok(extra) if !extra.is_empty() => debug_log(format!(
            "WARNING: {} PDF(s) in {} not referenced by the catalog: {}",
            extra.len(),
            folder.display(),
            extra.join(", ")
        )),
        Ok(_) => {}
        Err(e) => debug_error!("listing {}: {}", folder.display(), e),
    }

    let session = Session::new(catalog.filenames().to_vec()).context("starting review session")?;
    Ok((config, catalog, session))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (config, catalog, session) = startup(&args.config)?;
    if args.check {
        println!("OK: {} invoices", catalog.len());
        return Ok(());
    }

    let mut app = App::new(config, catalog, session);

    setup_terminal()?;
    // A panic message printed now would land on the alternate screen
    let outcome = debug_log::with_panics_logged(|| run_app(&mut app));
    restore_terminal()?;

    match outcome {
        Ok(result) => result,
        Err(payload) => Err(anyhow::anyhow!(
            "review UI panicked: {}",
            debug_log::panic_message(payload.as_ref())
        )),
    }
}

fn setup_terminal() -> Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, Hide, EnableMouseCapture)?;
    Ok(())
}

fn restore_terminal() -> Result<()> {
    let _ = viuer_display::clear_graphics();
    execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
    execute!(io::stdout(), Show, LeaveAlternateScreen, DisableMouseCapture)?;
    disable_raw_mode()?;
    Ok(())
}

fn run_app(app: &mut App) -> Result<()> {
    let mut stdout = io::stdout();
    let mut last_term_size = (0, 0);

    loop {
        let (term_width, term_height) = terminal::size()?;

        if (term_width, term_height) != last_term_size || app.last_rendered_screen != Some(app.screen_mode) {
            app.flags.insert(AppFlags::REDRAW);
            last_term_size = (term_width, term_height);
            app.last_rendered_screen = Some(app.screen_mode);
        }

        if app.open_picker {
            app.open_picker = false;
            let _ = viuer_display::clear_graphics();
            let current = app.session.cursor().index();
            if let Some(index) = pick_invoice(app.session.filenames(), current)? {
                app.navigate(Move::JumpTo(index));
            }
            app.flags.insert(AppFlags::REDRAW);
        }

        if app.flags.contains(AppFlags::REDRAW) {
            let start = Instant::now();
            draw(app, &mut stdout, term_width, term_height)?;
            stdout.flush()?;
            app.flags.remove(AppFlags::REDRAW);
            debug_timing!("frame", start);
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if !keyboard::handle_input(app, key)? || app.flags.contains(AppFlags::EXIT) {
                        break;
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(_, _) => {
                    let _ = viuer_display::clear_graphics();
                    app.flags.insert(AppFlags::REDRAW);
                }
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw(app: &mut App, stdout: &mut impl Write, term_width: u16, term_height: u16) -> Result<()> {
    let _ = viuer_display::clear_graphics();
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    let frame = layout::compute(term_width, term_height);
    app.last_frame = Some(frame);
    let ui_layout = app.config.ui.layout;

    layout::render_title(stdout, &frame)?;
    layout::render_tabs(stdout, &frame, app.screen_mode, ui_layout)?;
    layout::render_sidebar(stdout, &frame, &app.session)?;

    match (app.screen_mode, ui_layout) {
        (ScreenMode::Invoice, Layout::Split) => {
            let (pdf_area, data_area) = layout::split_main(frame.main, app.config.ui.pdf_width_percent());
            draw_pdf(app, stdout, pdf_area)?;
            draw_data(app, stdout, data_area)?;
        }
        (ScreenMode::Invoice, Layout::Tabs) => draw_pdf(app, stdout, frame.main)?,
        (ScreenMode::ExtractedData, _) => draw_data(app, stdout, frame.main)?,
        (ScreenMode::Debug, _) => {
            layout::render_pane_header(stdout, frame.main, "Debug log", theme::HEADER_DEBUG)?;
            app.debug_panel.sync(debug_log::snapshot());
            app.debug_panel.render(stdout, layout::pane_body(frame.main))?;
        }
    }

    let tab = app.screen_mode.title(ui_layout);
    layout::render_status_bar(stdout, &frame, tab, &app.session, &app.status_message)?;
    Ok(())
}

fn draw_pdf(app: &mut App, stdout: &mut impl Write, area: Area) -> Result<()> {
    let filename = app.session.current_filename().to_string();
    let body = layout::pane_body(area);

    match app.current_pdf() {
        Ok(page) => {
            let title = format!("Invoice: {} (page {}/{})", filename, page.page + 1, page.page_count);
            layout::render_pane_header(stdout, area, &title, theme::HEADER_INVOICE)?;
            stdout.flush()?;
            let dark_mode = app.flags.contains(AppFlags::DARK_MODE);
            if let Err(e) = viuer_display::display_page(&page.image, body, dark_mode) {
                debug_error!("displaying {}: {}", filename, e);
                pane_notice(stdout, body, &format!("Could not display {}: {}", filename, e))?;
            }
        }
        Err(e) => {
            debug_error!("rendering {}: {}", filename, e);
            layout::render_pane_header(stdout, area, &format!("Invoice: {}", filename), theme::HEADER_INVOICE)?;
            pane_notice(stdout, body, &format!("Could not render {}: {}", filename, e))?;
        }
    }
    Ok(())
}

fn draw_data(app: &mut App, stdout: &mut impl Write, area: Area) -> Result<()> {
    let filename = app.session.current_filename().to_string();
    layout::render_pane_header(stdout, area, &format!("Extracted Data: {}", filename), theme::HEADER_INVOICE)?;

    let view = data_view::render(&app.catalog, &filename);

    let body = layout::pane_body(area);
    let opts = PanelOptions {
        width: body.width as usize,
        expand_depth: app.expand_depth,
        show_full_text: app.flags.contains(AppFlags::SHOW_FULL_TEXT),
    };
    let lines = data_panel::view_lines(&view, opts);
    app.data_panel.render(stdout, &lines, body)?;
    Ok(())
}

fn pane_notice(stdout: &mut impl Write, area: Area, message: &str) -> io::Result<()> {
    for (row, line) in data_panel::wrap(message, area.width.max(1) as usize)
        .iter()
        .take(area.height as usize)
        .enumerate()
    {
        execute!(
            stdout,
            MoveTo(area.x, area.y + row as u16),
            SetForegroundColor(theme::ERROR),
            Print(line),
            ResetColor
        )?;
    }
    Ok(())
}
