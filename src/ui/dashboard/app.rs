use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::core::config::Config;
use crate::core::monitor::diff::SnapshotTracker;
use crate::core::monitor::fetcher::fetch_items;
use crate::core::monitor::items::Item;
use crate::core::monitor::notify::notify_new_items;
use crate::core::zabbix::Session;
use crate::platform::open_url;

use super::event_handler::{map_key, DashboardEvent};
use super::render::render_ui;

/// Poll loop states.
///
/// `Fetching` is the only state performing network I/O; `Waiting` is the
/// only state reading keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Fetching,
    Rendering,
    Waiting,
    Stopped,
}

/// Dashboard application state
pub struct DashboardApp<'a> {
    session: &'a Session,
    config: &'a Config,
    snapshots: SnapshotTracker,
    pub selected_index: usize,
    pub state: PollState,
    deadline: Instant,
}

impl<'a> DashboardApp<'a> {
    pub fn new(session: &'a Session, config: &'a Config) -> Self {
        Self {
            session,
            config,
            snapshots: SnapshotTracker::new(),
            selected_index: 0,
            state: PollState::Fetching,
            deadline: Instant::now(),
        }
    }

    /// The item collection of the last completed cycle.
    pub fn items(&self) -> &[Item] {
        self.snapshots.items()
    }

    /// Run one blocking fetch cycle and rotate the snapshot.
    pub fn fetch(&mut self) -> crate::error::Result<()> {
        let fetched = fetch_items(self.session, self.config)?;
        self.snapshots.rotate(fetched);
        self.clamp_selection();
        self.state = PollState::Rendering;
        Ok(())
    }

    /// Diff against the previous snapshot and notify, then discard it.
    ///
    /// The tracker yields no previous snapshot on the first cycle, so the
    /// first poll can never notify.
    pub fn notify_changes(&mut self) {
        if let Some(previous) = self.snapshots.take_previous() {
            if self.config.notify {
                notify_new_items(self.snapshots.items(), &previous);
            }
        }
    }

    /// Arm the refresh timer and enter the waiting state.
    pub fn arm_deadline(&mut self, tick_rate: Duration) {
        self.deadline = Instant::now() + tick_rate;
        self.state = PollState::Waiting;
    }

    /// Seconds left until the next automatic refresh.
    pub fn seconds_until_refresh(&self) -> u64 {
        self.deadline
            .saturating_duration_since(Instant::now())
            .as_secs()
    }

    /// Handle a keyboard event while waiting.
    pub fn handle_event(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::Quit => self.state = PollState::Stopped,
            DashboardEvent::RefreshNow => self.state = PollState::Fetching,
            DashboardEvent::OpenUrl => {
                if let Some(item) = self.snapshots.items().get(self.selected_index) {
                    if let Err(e) = open_url(&item.url) {
                        warn!("scope=opening_url error={}", e);
                    }
                }
            }
            DashboardEvent::RowUp => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                }
            }
            DashboardEvent::RowDown => {
                let max_index = self.snapshots.items().len().saturating_sub(1);
                if self.selected_index < max_index {
                    self.selected_index += 1;
                }
            }
            DashboardEvent::None => {}
        }
    }

    /// Keep the cursor inside the (possibly shrunken) item list.
    fn clamp_selection(&mut self) {
        let max_index = self.snapshots.items().len().saturating_sub(1);
        if self.selected_index > max_index {
            self.selected_index = max_index;
        }
    }
}

/// Run the dashboard TUI application
pub fn run_dashboard_app(session: &Session, config: &Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_loop(&mut terminal, session, config);

    // Restore terminal before surfacing any loop error
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// The poll state machine: Fetching -> Rendering -> Waiting -> Fetching,
/// until Stopped.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &Session,
    config: &Config,
) -> Result<()> {
    let mut app = DashboardApp::new(session, config);
    let tick_rate = Duration::from_secs(config.refresh);

    loop {
        match app.state {
            PollState::Fetching => {
                app.fetch().context("Failed to fetch items")?;
                // keys buffered while the blocking fetch ran are discarded;
                // a refresh request arriving mid-fetch must not queue a
                // second cycle
                drain_pending_input().context("Event drain failed")?;
            }
            PollState::Rendering => {
                terminal.draw(|frame| render_ui(frame, &app))?;
                app.notify_changes();
                app.arm_deadline(tick_rate);
            }
            PollState::Waiting => {
                let remaining = app
                    .deadline
                    .saturating_duration_since(Instant::now());
                // wake at least once per second to update the countdown
                let timeout = remaining.min(Duration::from_secs(1));

                if event::poll(timeout).context("Event poll failed")? {
                    if let Event::Key(key) = event::read().context("Event read failed")? {
                        if key.kind == KeyEventKind::Press {
                            app.handle_event(map_key(key));
                        }
                    }
                }

                if app.state == PollState::Waiting {
                    terminal.draw(|frame| render_ui(frame, &app))?;
                    if Instant::now() >= app.deadline {
                        app.state = PollState::Fetching;
                    }
                }
            }
            PollState::Stopped => break,
        }
    }

    Ok(())
}

/// Throw away any input buffered during a blocking fetch.
fn drain_pending_input() -> io::Result<()> {
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }
    Ok(())
}
