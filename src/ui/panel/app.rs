use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::core::config::SharedSettings;
use crate::core::glances::{GlancesClient, MetricSource};
use crate::core::presentation::PresentationAdapter;
use crate::core::scheduler::{Clock, CycleReport, ExtractionConfig, PollScheduler, SystemClock};
use crate::ui::formatters::{format_time, summarize_cycle};
use crate::web::{ControlCommand, DeviceStatus};

use super::event_handler::PanelEvent;
use super::layout::build_widgets;
use super::model::PanelModel;
use super::render::{render_panel, StatusLine};

/// Pause between loop iterations
pub const LOOP_YIELD: Duration = Duration::from_millis(5);

/// Why the panel loop returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Quit,
    Restart,
}

/// Configuration for the panel loop
pub struct PanelOptions {
    pub headless: bool,
    pub settings: SharedSettings,
    pub commands: Option<Receiver<ControlCommand>>,
    pub status: Arc<DeviceStatus>,
    /// Cleared by the process's Ctrl-C handler; headless runs stop when it drops.
    pub running: Arc<AtomicBool>,
}

/// Panel application state
pub struct PanelApp<S: MetricSource, C: Clock = SystemClock> {
    pub adapter: PresentationAdapter<PanelModel>,
    pub scheduler: PollScheduler<C>,
    pub source: S,
    pub status_line: StatusLine,
    pub last_report: Option<CycleReport>,
    settings: SharedSettings,
    commands: Option<Receiver<ControlCommand>>,
    status: Arc<DeviceStatus>,
    running: Arc<AtomicBool>,
    target: (String, u16),
    debug_mode: bool,
}

impl<S: MetricSource> PanelApp<S, SystemClock> {
    pub fn new(source: S, options: PanelOptions) -> Self {
        let extraction = ExtractionConfig::from_settings(&options.settings.lock());
        Self::with_scheduler(source, PollScheduler::new(extraction), options)
    }
}

impl<S: MetricSource, C: Clock> PanelApp<S, C> {
    pub fn with_scheduler(source: S, scheduler: PollScheduler<C>, options: PanelOptions) -> Self {
        let (theme, target, debug_mode) = {
            let settings = options.settings.lock();
            (
                settings.active_theme(),
                (settings.glances_host.clone(), settings.glances_port),
                settings.debug_mode,
            )
        };

        let mut model = PanelModel::new();
        let widgets = build_widgets(&mut model, &theme);
        let adapter = PresentationAdapter::new(model, widgets, theme);

        let status_line = StatusLine {
            target: format!("{}:{}", target.0, target.1),
            ..StatusLine::default()
        };

        Self {
            adapter,
            scheduler,
            source,
            status_line,
            last_report: None,
            settings: options.settings,
            commands: options.commands,
            status: options.status,
            running: options.running,
            target,
            debug_mode,
        }
    }

    /// One loop iteration minus drawing and input.
    ///
    /// Returns `Some` when a control command asks the loop to stop.
    pub fn step(&mut self, now: Instant) -> Option<LoopExit> {
        self.adapter.advance(now);
        self.status.record_loop_tick(now);
        self.sync_settings();

        if let Some(report) = self.scheduler.tick(&mut self.source, &mut self.adapter) {
            log::debug!("{}", summarize_cycle(&report));
            self.status_line.last_poll = Some(format_time(report.started_at));
            self.status_line.failures = report.failures();
            self.last_report = Some(report);
        }

        self.drain_commands()
    }

    /// Handle a key press
    pub fn handle_event(&mut self, event: PanelEvent) -> Option<LoopExit> {
        match event {
            PanelEvent::Quit => Some(LoopExit::Quit),
            PanelEvent::ToggleTheme => {
                let theme = {
                    let mut settings = self.settings.lock();
                    let dark = !settings.dark_mode;
                    settings.set_dark_mode(dark);
                    if let Err(e) = settings.save() {
                        log::warn!("Failed to save settings: {:#}", e);
                    }
                    settings.active_theme()
                };
                self.adapter.apply_theme(theme);
                None
            }
            PanelEvent::None => None,
        }
    }

    /// Pick up host, extraction and debug changes made through the web surface.
    fn sync_settings(&mut self) {
        let (target, extraction, debug_mode) = {
            let settings = self.settings.lock();
            (
                (settings.glances_host.clone(), settings.glances_port),
                ExtractionConfig::from_settings(&settings),
                settings.debug_mode,
            )
        };

        if target != self.target {
            log::info!("Glances target changed to {}:{}", target.0, target.1);
            self.source.reconfigure(&target.0, target.1);
            self.status_line.target = format!("{}:{}", target.0, target.1);
            self.target = target;
        }

        self.scheduler.set_extraction(extraction);

        if debug_mode != self.debug_mode {
            crate::apply_debug_mode(debug_mode);
            self.debug_mode = debug_mode;
        }
    }

    fn drain_commands(&mut self) -> Option<LoopExit> {
        let receiver = self.commands.as_ref()?;
        loop {
            match receiver.try_recv() {
                Ok(ControlCommand::ThemeChanged) => {
                    let theme = self.settings.lock().active_theme();
                    self.adapter.apply_theme(theme);
                }
                Ok(ControlCommand::DisplaySleep(sleep)) => {
                    self.adapter.set_display_awake(!sleep);
                    self.status.set_display_awake(!sleep);
                }
                Ok(ControlCommand::Restart) => {
                    log::info!("Restart requested");
                    return Some(LoopExit::Restart);
                }
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    log::debug!("Control channel closed");
                    self.commands = None;
                    return None;
                }
            }
        }
    }
}

/// Run the panel until quit or restart
pub fn run_panel(options: PanelOptions) -> Result<LoopExit> {
    let client = GlancesClient::from_settings(&options.settings.lock())
        .context("Failed to create Glances client")?;
    let headless = options.headless;
    let mut app = PanelApp::new(client, options);

    if headless {
        run_headless(&mut app)
    } else {
        run_terminal(&mut app)
    }
}

fn run_headless<S: MetricSource, C: Clock>(app: &mut PanelApp<S, C>) -> Result<LoopExit> {
    log::info!("Panel running headless; press Ctrl-C to stop");

    let running = Arc::clone(&app.running);
    let mut reported = None;
    while running.load(Ordering::SeqCst) {
        if let Some(exit) = app.step(Instant::now()) {
            return Ok(exit);
        }

        let latest = app.scheduler.state().last_poll();
        if latest != reported {
            if let Some(report) = &app.last_report {
                log::info!("{}", summarize_cycle(report));
            }
            reported = latest;
        }

        std::thread::sleep(LOOP_YIELD);
    }

    Ok(LoopExit::Quit)
}

fn run_terminal<S: MetricSource>(app: &mut PanelApp<S>) -> Result<LoopExit> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = terminal_loop(&mut terminal, app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

fn terminal_loop<S: MetricSource>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut PanelApp<S>,
) -> Result<LoopExit> {
    loop {
        if let Some(exit) = app.step(Instant::now()) {
            return Ok(exit);
        }

        terminal.draw(|frame| render_panel(frame, &app.adapter, &app.status_line))?;

        if event::poll(LOOP_YIELD).context("Event poll failed")? {
            if let Event::Key(key) = event::read().context("Event read failed")? {
                if key.kind == KeyEventKind::Press {
                    if let Some(exit) = app.handle_event(PanelEvent::from_key(key.code)) {
                        return Ok(exit);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Settings;
    use crate::core::extract::CardKind;
    use crate::core::glances::{Endpoint, EndpointResult, MetricSnapshot};
    use crate::core::scheduler::ManualClock;
    use crate::error::FetchError;
    use serde_json::json;
    use std::sync::mpsc;

    struct LoadOnly {
        targets: Vec<(String, u16)>,
    }

    impl MetricSource for LoadOnly {
        fn fetch(&mut self, endpoint: Endpoint) -> EndpointResult {
            match endpoint {
                Endpoint::Load => Ok(MetricSnapshot::new(json!({"min1": 0.42}))),
                _ => Err(FetchError::HttpError(404)),
            }
        }

        fn reconfigure(&mut self, host: &str, port: u16) {
            self.targets.push((host.to_string(), port));
        }
    }

    fn app_with_channel() -> (
        PanelApp<LoadOnly, ManualClock>,
        mpsc::Sender<ControlCommand>,
        SharedSettings,
    ) {
        let settings = Settings {
            glances_host: "10.0.0.2".into(),
            ..Settings::default()
        }
        .into_shared();
        let (tx, rx) = mpsc::channel();
        let options = PanelOptions {
            headless: true,
            settings: settings.clone(),
            commands: Some(rx),
            status: DeviceStatus::shared(),
            running: Arc::new(AtomicBool::new(true)),
        };
        let scheduler = PollScheduler::with_clock(ManualClock::new(), ExtractionConfig::default());
        let app = PanelApp::with_scheduler(LoadOnly { targets: Vec::new() }, scheduler, options);
        (app, tx, settings)
    }

    #[test]
    fn test_first_step_polls() {
        let (mut app, _tx, _settings) = app_with_channel();
        assert_eq!(app.step(Instant::now()), None);

        assert_eq!(app.adapter.card_text(CardKind::Load), Some("Load: 0.4"));
        assert!(app.status_line.last_poll.is_some());
        assert_eq!(app.status_line.failures, 7);
    }

    #[test]
    fn test_restart_command_stops_loop() {
        let (mut app, tx, _settings) = app_with_channel();
        tx.send(ControlCommand::Restart).unwrap();
        assert_eq!(app.step(Instant::now()), Some(LoopExit::Restart));
    }

    #[test]
    fn test_headless_restart_can_repeat() {
        let (mut app, tx, _settings) = app_with_channel();
        tx.send(ControlCommand::Restart).unwrap();
        tx.send(ControlCommand::Restart).unwrap();

        let exits: Vec<LoopExit> = (0..2).map(|_| run_headless(&mut app).unwrap()).collect();
        assert_eq!(exits, vec![LoopExit::Restart, LoopExit::Restart]);
    }

    #[test]
    fn test_headless_stops_when_flag_cleared() {
        let (mut app, _tx, _settings) = app_with_channel();
        app.running.store(false, Ordering::SeqCst);
        assert_eq!(run_headless(&mut app).unwrap(), LoopExit::Quit);
    }

    #[test]
    fn test_display_sleep_command() {
        let (mut app, tx, _settings) = app_with_channel();
        tx.send(ControlCommand::DisplaySleep(true)).unwrap();
        app.step(Instant::now());
        assert!(!app.adapter.target().is_awake());

        tx.send(ControlCommand::DisplaySleep(false)).unwrap();
        app.step(Instant::now());
        assert!(app.adapter.target().is_awake());
    }

    #[test]
    fn test_theme_changed_recolors() {
        let (mut app, tx, settings) = app_with_channel();
        settings.lock().set_dark_mode(false);
        tx.send(ControlCommand::ThemeChanged).unwrap();
        app.step(Instant::now());

        let light = settings.lock().active_theme();
        assert_eq!(app.adapter.theme(), &light);
        assert_eq!(app.adapter.target().background(), light.bg_color);
    }

    #[test]
    fn test_host_change_reconfigures_source() {
        let (mut app, _tx, settings) = app_with_channel();
        app.step(Instant::now());
        assert!(app.source.targets.is_empty());

        settings.lock().set_glances_host("10.0.0.9");
        app.step(Instant::now());
        assert_eq!(app.source.targets, vec![("10.0.0.9".to_string(), 61208)]);
        assert_eq!(app.status_line.target, "10.0.0.9:61208");
    }

    #[test]
    fn test_quit_key() {
        let (mut app, _tx, _settings) = app_with_channel();
        assert_eq!(app.handle_event(PanelEvent::Quit), Some(LoopExit::Quit));
        assert_eq!(app.handle_event(PanelEvent::None), None);
    }
}
