//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. All state transitions go
//! through [`AppState`], which never touches the terminal and takes the
//! current time as an argument so debouncing is testable.

use crate::{
    commands::{self, Command},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        help::HelpPopup,
        query_bar::{QueryBar, QueryBarState},
        results::{ResultView, ResultsPane, ResultsState},
        schedule_grid::{ParityBar, ScheduleBody, ScheduleView},
        tab_bar::{TabBar, TabLabel, TabStatus},
    },
};
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lookup_core::{
    config::Config, debounce::Debouncer, notice::Notice, DatasetKind, LoadEvent, Parity,
    SearchError, Session,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::UnboundedReceiver;

const FRAME: Duration = Duration::from_millis(16);

const TABS: [DatasetKind; 3] = [DatasetKind::Credentials, DatasetKind::Roster, DatasetKind::Schedule];

// ---------------------------------------------------------------------------
// Focus + tab types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    QueryBar,
    Results,
    /// Vim-style `:` command line is active.
    Command,
}

pub struct TabState {
    pub kind: DatasetKind,
    pub query: QueryBarState,
    pub results: ResultsState,
}

impl TabState {
    fn new(kind: DatasetKind) -> Self {
        Self { kind, query: QueryBarState::default(), results: ResultsState::new(kind) }
    }

    fn searchable(&self) -> bool {
        self.kind != DatasetKind::Schedule
    }
}

/// A typed query waiting out the quiet period.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingSearch {
    tab: usize,
    text: String,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub session: Session,
    pub tabs: Vec<TabState>,
    pub active_tab: usize,
    pub focus: Focus,
    /// Focus before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub show_schedule: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
    debouncer: Debouncer<PendingSearch>,
}

impl AppState {
    pub fn new(config: Config, theme: Theme, session: Session) -> Self {
        Self {
            session,
            tabs: TABS.into_iter().map(TabState::new).collect(),
            active_tab: 0,
            focus: Focus::QueryBar,
            prev_focus: Focus::QueryBar,
            theme,
            show_help: false,
            show_schedule: config.ui.show_schedule,
            command_bar: CommandBarState::default(),
            quit: false,
            debouncer: Debouncer::new(config.search.debounce()),
            config,
        }
    }

    pub fn active(&self) -> &TabState {
        &self.tabs[self.active_tab]
    }

    fn active_mut(&mut self) -> &mut TabState {
        &mut self.tabs[self.active_tab]
    }

    /// True while a typed query waits out its quiet period.
    pub fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Install a finished dataset load. A tab that was told "still loading"
    /// re-runs its query now that the data is here; a tab with nothing to
    /// show yet reports a failed load straight away.
    pub fn apply_load(&mut self, event: LoadEvent) {
        let kind = event.kind();
        self.session.apply(event);
        let Some(idx) = TABS.iter().position(|k| *k == kind) else {
            return;
        };
        let view = self.tabs[idx].results.view().notice();
        let idle = matches!(view, Some(Notice::Welcome(_) | Notice::Loading(_)));
        let waiting = matches!(view, Some(Notice::Loading(_)));

        let notice =
            Notice::from_error(&SearchError::NotReady { dataset: kind }, kind, &self.session);
        if idle && matches!(notice, Notice::LoadFailed { .. }) {
            tracing::debug!(dataset = %kind, "showing load failure");
            self.tabs[idx].results.show(ResultView::Notice(notice));
            return;
        }

        if waiting && !self.tabs[idx].query.query.trim().is_empty() {
            tracing::debug!(dataset = %kind, "re-running query after load");
            let text = self.tabs[idx].query.query.clone();
            self.run_search(idx, &text);
        }
    }

    /// Fire a debounced search whose quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(pending) = self.debouncer.poll(now) {
            // Only run if nothing changed since it was scheduled.
            if pending.tab == self.active_tab && self.tabs[pending.tab].query.query == pending.text {
                self.run_search(pending.tab, &pending.text);
            }
        }
    }

    pub fn handle(&mut self, event: AppEvent, now: Instant) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return;
        }

        if self.focus == Focus::Command {
            self.handle_command_mode(event);
            return;
        }

        let typing = self.focus == Focus::QueryBar;
        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }
            AppEvent::Char('?') if !typing => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }
            AppEvent::Char(':') if !typing => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }
            AppEvent::NextTab => self.select_tab((self.active_tab + 1) % self.tabs.len()),
            AppEvent::SelectTab(idx) if idx < self.tabs.len() => self.select_tab(idx),
            AppEvent::QueryFocus if self.active().searchable() => {
                tracing::debug!("focus -> QueryBar");
                self.focus = Focus::QueryBar;
            }
            AppEvent::ParityOdd => self.session.set_parity(Parity::Odd),
            AppEvent::ParityEven => self.session.set_parity(Parity::Even),
            AppEvent::ToggleParity => {
                self.session.toggle_parity();
            }
            AppEvent::ToggleSchedule => {
                self.show_schedule = !self.show_schedule;
                tracing::debug!(show = self.show_schedule, "schedule visibility toggled");
            }
            AppEvent::Escape if typing => {
                self.clear_query();
                self.focus = Focus::Results;
            }
            AppEvent::Enter if typing => {
                self.debouncer.cancel();
                let text = self.active().query.query.clone();
                self.run_search(self.active_tab, &text);
            }
            AppEvent::Resize(_, _) => {}
            other if typing => {
                if self.active_mut().query.handle(&other) {
                    self.on_edit(now);
                } else {
                    self.active_mut().results.handle(&other);
                }
            }
            other => self.active_mut().results.handle(&other),
        }
    }

    fn handle_command_mode(&mut self, event: AppEvent) {
        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = self.prev_focus;
            }
            AppEvent::Enter => match Command::parse(&self.command_bar.input) {
                Ok(cmd) => {
                    tracing::debug!(command = ?cmd, "executing command");
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                    commands::execute(self, cmd);
                }
                Err(msg) if msg.is_empty() => {
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                }
                Err(msg) => self.command_bar.error = Some(msg),
            },
            AppEvent::Quit => self.quit = true,
            other => self.command_bar.handle(&other),
        }
    }

    fn select_tab(&mut self, idx: usize) {
        if idx == self.active_tab {
            return;
        }
        tracing::debug!(from = self.active_tab, to = idx, "tab switched");
        self.debouncer.cancel();
        self.active_tab = idx;
        if !self.active().searchable() && self.focus == Focus::QueryBar {
            self.focus = Focus::Results;
        }
    }

    /// Typing only searches on the credentials tab, and only once the query
    /// is long enough. Clearing the text returns to the welcome view.
    fn on_edit(&mut self, now: Instant) {
        let kind = self.active().kind;
        let text = self.active().query.query.clone();
        let trimmed_len = text.trim().chars().count();
        if trimmed_len == 0 {
            self.debouncer.cancel();
            self.active_mut().results.show(ResultView::Notice(Notice::Welcome(kind)));
        } else if kind == DatasetKind::Credentials && trimmed_len >= self.config.search.min_live_chars {
            self.debouncer.schedule(PendingSearch { tab: self.active_tab, text }, now);
        } else {
            self.debouncer.cancel();
        }
    }

    pub fn clear_query(&mut self) {
        self.debouncer.cancel();
        let tab = self.active_mut();
        tab.query.clear();
        let kind = tab.kind;
        tab.results.show(ResultView::Notice(Notice::Welcome(kind)));
    }

    fn run_search(&mut self, idx: usize, raw: &str) {
        let kind = self.tabs[idx].kind;
        let view = match kind {
            DatasetKind::Credentials => match self.session.search_credentials(raw) {
                Ok(outcome) if outcome.is_empty() => ResultView::Notice(Notice::NoCredentials {
                    query: outcome.query.to_string(),
                }),
                Ok(outcome) => ResultView::Credentials(outcome),
                Err(err) => ResultView::Notice(Notice::from_error(&err, kind, &self.session)),
            },
            DatasetKind::Roster => match self.session.search_roster(raw) {
                Ok(outcome) if outcome.is_empty() => {
                    ResultView::Notice(Notice::roster_miss(&outcome.query))
                }
                Ok(outcome) => ResultView::Roster(outcome),
                Err(err) => ResultView::Notice(Notice::from_error(&err, kind, &self.session)),
            },
            DatasetKind::Schedule => return,
        };
        tracing::debug!(dataset = %kind, query = raw, "search ran");
        self.tabs[idx].results.show(view);
    }

    fn tab_labels(&self) -> Vec<TabLabel> {
        self.tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                let (pending, failed) = match tab.kind {
                    DatasetKind::Credentials => {
                        (self.session.credentials().is_pending(), self.session.credentials().error().is_some())
                    }
                    DatasetKind::Roster => {
                        (self.session.roster().is_pending(), self.session.roster().error().is_some())
                    }
                    DatasetKind::Schedule => {
                        (self.session.schedule().is_pending(), self.session.schedule().error().is_some())
                    }
                };
                let status = if pending {
                    TabStatus::Pending
                } else if failed {
                    TabStatus::Failed
                } else {
                    TabStatus::Ready
                };
                TabLabel { text: format!("{}:{}", i + 1, tab.kind), status }
            })
            .collect()
    }

    fn schedule_body(&self) -> ScheduleBody {
        if !self.show_schedule {
            return ScheduleBody::Hidden;
        }
        match self.session.schedule_grid() {
            Ok(grid) => ScheduleBody::Grid(grid),
            Err(err) => ScheduleBody::Notice(Notice::from_error(&err, DatasetKind::Schedule, &self.session)),
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    loads: UnboundedReceiver<LoadEvent>,
}

impl App {
    pub fn new(config: Config, theme: Theme, session: Session, loads: UnboundedReceiver<LoadEvent>) -> Self {
        App { state: AppState::new(config, theme, session), loads }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
        loop {
            while let Ok(load) = self.loads.try_recv() {
                self.state.apply_load(load);
            }
            self.state.tick(Instant::now());

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            let timeout = self
                .state
                .debouncer
                .remaining(Instant::now())
                .map_or(FRAME, |left| left.min(FRAME));
            if ct_event::poll(timeout)? {
                let raw = ct_event::read()?;
                if let Event::Key(key) = &raw {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                }
                // Use insert-mode mapping when a text widget is focused
                let app_event = if is_insert_mode(self.state.focus) {
                    event::to_app_event_insert(raw)
                } else {
                    event::to_app_event(raw)
                };
                if let Some(ev) = app_event {
                    tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                    self.state.handle(ev, Instant::now());
                }
            }
        }
        Ok(())
    }
}

fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::QueryBar | Focus::Command)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line tab bar | body | 3-line query bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Length(1), Constraint::Fill(1), Constraint::Length(3)])
        .split(area);

    let labels = state.tab_labels();
    frame.render_widget(TabBar::new(&labels, state.active_tab, &state.theme), vert[0]);

    let tab = state.active();
    let query_focused = state.focus == Focus::QueryBar;
    match tab.kind {
        DatasetKind::Schedule => {
            let body = state.schedule_body();
            frame.render_widget(ScheduleView::new(&body, &state.theme), vert[1]);
            frame.render_widget(ParityBar::new(state.session.parity(), &state.theme), vert[2]);
        }
        kind => {
            let (title, bar_title) = match kind {
                DatasetKind::Credentials => ("Default credentials", "Brand, model or device type"),
                _ => ("Duty roster", "Student name or weekday"),
            };
            frame.render_widget(
                ResultsPane::new(&tab.results, state.focus == Focus::Results, &state.theme, title),
                vert[1],
            );
            let status = if state.search_pending() { "searching… " } else { "" };
            frame.render_widget(
                QueryBar::new(&tab.query, query_focused, &state.theme)
                    .title(bar_title)
                    .status(status),
                vert[2],
            );
        }
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if query_focused && tab.searchable() {
        let qb = QueryBar::new(&tab.query, true, &state.theme);
        frame.set_cursor_position(qb.cursor_position(vert[2]));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
