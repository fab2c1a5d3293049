use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::widgets::{Block, Borders, Padding};
use ratatui::{Frame, Terminal};

use crate::archive;
use crate::config;
use crate::corpus::codec;
use crate::corpus::demo::demo_corpus;
use crate::corpus::store::Corpus;
use crate::tui::input::{self, Action, Direction};
use crate::tui::render::{self, BrowseRenderData, FlatRow};
use crate::view::controller::ViewController;
use crate::view::filter::distinct_values;
use crate::view::layout::LayoutOptions;
use crate::view::state::{FilterChoice, FilterDim};

struct AppState {
    corpus: Corpus,
    controller: ViewController,
    /// Position within the selectable rows of the catalog pane.
    cursor: usize,
    scroll: u16,
    list_view_rows: usize,
    show_help: bool,
    status_message: Option<String>,
    /// `None` in demo mode; view state is then never written to disk.
    root: Option<PathBuf>,
}

impl AppState {
    fn load(root: &Path, start: Option<String>) -> Result<Self> {
        let corpus = codec::load_from(&archive::corpus_path(root))?;
        let config = config::load(root)?;
        let link = start.unwrap_or_else(|| archive::read_link(root));
        let controller =
            ViewController::from_link(&link, &corpus, LayoutOptions::from_config(&config));
        Ok(Self {
            corpus,
            controller,
            cursor: 0,
            scroll: 0,
            list_view_rows: 0,
            show_help: false,
            status_message: None,
            root: Some(root.to_path_buf()),
        })
    }

    fn load_demo(start: Option<String>) -> Self {
        let corpus = demo_corpus();
        let link = start.unwrap_or_else(|| "/".to_string());
        let controller = ViewController::from_link(&link, &corpus, LayoutOptions::default());
        Self {
            corpus,
            controller,
            cursor: 0,
            scroll: 0,
            list_view_rows: 0,
            show_help: false,
            status_message: Some("demo mode: state is not persisted".to_string()),
            root: None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        self.status_message = None;
        self.apply(input::action_for_key(key))
    }

    fn apply(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::Quit => return Ok(true),
            Action::ToggleHelp => {
                self.show_help = !self.show_help;
            }
            Action::Cancel => {
                if self.show_help {
                    self.show_help = false;
                } else if self.controller.state.selected_id.is_some() {
                    self.controller.clear_selection();
                    self.persist_link()?;
                }
            }
            Action::Move(direction) => {
                let len = self.visible_ids().len();
                match direction {
                    Direction::Up => self.cursor = self.cursor.saturating_sub(1),
                    Direction::Down => {
                        if len != 0 {
                            self.cursor = (self.cursor + 1).min(len - 1);
                        }
                    }
                }
            }
            Action::Activate => {
                let ids = self.visible_ids();
                if let Some(id) = ids.get(self.cursor) {
                    self.controller.select(&self.corpus, id);
                    self.persist_link()?;
                }
            }
            Action::NextRecord => {
                let ids = self.visible_ids();
                if !ids.is_empty() {
                    let next = self
                        .controller
                        .state
                        .selected_id
                        .as_deref()
                        .and_then(|id| ids.iter().position(|candidate| candidate == id))
                        .map(|pos| (pos + 1) % ids.len())
                        .unwrap_or(0);
                    self.controller.select(&self.corpus, &ids[next]);
                    self.cursor = next;
                    self.persist_link()?;
                }
            }
            Action::CycleCategory => self.cycle_filter(FilterDim::Category)?,
            Action::CycleRole => self.cycle_filter(FilterDim::Role)?,
            Action::CycleUniverse => self.cycle_filter(FilterDim::Universe)?,
            Action::ToggleFocus => {
                self.controller.toggle_focus();
                self.persist_link()?;
                self.status_message = Some(format!(
                    "focus {}",
                    if self.controller.state.focus_mode {
                        "on"
                    } else {
                        "off"
                    }
                ));
            }
            Action::ToggleGraph => {
                self.controller.toggle_graph();
                self.persist_link()?;
                self.status_message = Some(format!(
                    "graph {}",
                    if self.controller.state.graph_mode {
                        "on"
                    } else {
                        "off"
                    }
                ));
            }
            Action::Noop => {}
        }
        Ok(false)
    }

    /// Advance one filter dimension through "all" and each distinct value.
    fn cycle_filter(&mut self, dim: FilterDim) -> Result<()> {
        let values = distinct_values(self.corpus.all(), dim);
        let next = match self.controller.state.filters.get(dim) {
            FilterChoice::All => values
                .first()
                .map(|v| FilterChoice::Value(v.clone()))
                .unwrap_or_default(),
            FilterChoice::Value(current) => values
                .iter()
                .position(|v| v == current)
                .and_then(|pos| values.get(pos + 1))
                .map(|v| FilterChoice::Value(v.clone()))
                .unwrap_or_default(),
        };
        let label = next.label().to_string();
        self.controller.set_filter(dim, next);
        self.cursor = 0;
        self.scroll = 0;
        self.persist_link()?;
        self.status_message = Some(format!("{}: {}", dim.key(), label));
        Ok(())
    }

    fn persist_link(&self) -> Result<()> {
        if let Some(root) = &self.root {
            archive::write_link(root, &self.controller.link(&self.corpus))?;
        }
        Ok(())
    }

    /// Selectable record ids, in catalog pane order.
    fn visible_ids(&self) -> Vec<String> {
        let instruction = self.controller.render(&self.corpus);
        render::flat_rows(&instruction)
            .iter()
            .filter_map(|row| match row {
                FlatRow::Item(item) => Some(item.id.clone()),
                _ => None,
            })
            .collect()
    }

    fn draw(&mut self, frame: &mut Frame) {
        self.update_list_view_rows(frame.area());
        let instruction = self.controller.render(&self.corpus);

        let selectable: Vec<usize> = render::flat_rows(&instruction)
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| matches!(row, FlatRow::Item(_)).then_some(idx))
            .collect();
        if !selectable.is_empty() && self.cursor >= selectable.len() {
            self.cursor = selectable.len() - 1;
        }
        let cursor_line = selectable.get(self.cursor).copied();
        self.update_scroll(cursor_line);

        let data = BrowseRenderData {
            instruction: &instruction,
            cursor_line,
            scroll: self.scroll,
            show_help: self.show_help,
            message: self.status_message.as_deref(),
            demo: self.root.is_none(),
        };
        render::draw(frame, &data);
    }

    fn update_list_view_rows(&mut self, frame_area: Rect) {
        let area = frame_area.inner(Margin {
            horizontal: 3,
            vertical: 1,
        });
        let outer_inner = Block::default()
            .borders(Borders::ALL)
            .padding(Padding::new(2, 2, 1, 1))
            .inner(area);
        let [panes_area, _gap, _status_area] = Layout::vertical([
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .areas(outer_inner);
        let [left_outer, _separator, _detail_outer] = Layout::horizontal([
            Constraint::Percentage(55),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .areas(panes_area);
        let list_inner = Block::default().borders(Borders::ALL).inner(left_outer);
        self.list_view_rows = list_inner.height.max(1) as usize;
    }

    fn update_scroll(&mut self, cursor_line: Option<usize>) {
        let Some(line) = cursor_line else {
            self.scroll = 0;
            return;
        };
        let rows = self.list_view_rows.max(1);
        let mut scroll = self.scroll as usize;
        if line < scroll {
            scroll = line;
        } else if line >= scroll + rows {
            scroll = line + 1 - rows;
        }
        self.scroll = scroll as u16;
    }
}

pub fn run(root: &Path, start: Option<String>) -> Result<()> {
    let app = AppState::load(root, start)?;
    event_loop(app)
}

pub fn run_demo(start: Option<String>) -> Result<()> {
    event_loop(AppState::load_demo(start))
}

fn event_loop(mut app: AppState) -> Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| app.draw(f))?;
        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if matches!(key.kind, KeyEventKind::Release | KeyEventKind::Repeat) {
                continue;
            }
            if app.handle_key(key)? {
                break;
            }
        }
    }

    Ok(())
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
