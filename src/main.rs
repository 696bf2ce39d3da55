use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::{info, warn};
use typespeed::{
    app::{App, AppAction},
    app_dirs::{init_logging, AppDirs},
    config::{Config, ConfigStore, FileConfigStore},
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    samples::{SampleDeck, SAMPLE_TEXTS},
};

/// terminal typing speed test
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the sample sentence as quickly and accurately as possible. The timer starts on your first keystroke; WPM and accuracy are shown once the sentence matches exactly."
)]
pub struct Cli {
    /// sample sentence to start with (1-based, wraps around)
    #[clap(short = 's', long)]
    sample: Option<usize>,

    /// timer refresh interval in milliseconds
    #[clap(short = 't', long)]
    tick_rate_ms: Option<u64>,

    /// read settings from this config file instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write logs to this file instead of the default location
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// print the sample sentences and exit
    #[clap(long)]
    list_samples: bool,
}

impl Cli {
    /// Command line flags take precedence over the stored config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(sample) = self.sample {
            config.start_sample = sample;
        }
        if let Some(ms) = self.tick_rate_ms {
            config.tick_rate_ms = ms;
        }
        config
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.list_samples {
        for (i, text) in SAMPLE_TEXTS.iter().enumerate() {
            println!("{}. {}", i + 1, text);
        }
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(log_path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        // logging is best effort, the test still runs without it
        if let Err(e) = init_logging(&log_path) {
            eprintln!("{e}");
        }
    }

    let store = cli.config_store();
    let stored = match store.try_load() {
        Ok(cfg) => cfg.unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "ignoring unreadable config");
            Config::default()
        }
    };
    let config = cli.apply(stored);
    info!(?config, path = %store.path().display(), "starting");

    let deck = SampleDeck::with_start(&SAMPLE_TEXTS, config.start_index());
    let mut app = App::new(deck);
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(config.tick_rate_ms.max(1))),
    );

    enable_raw_mode()?;
    let _restore = RestoreOnDrop(restore_terminal);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    start_tui(&mut terminal, &mut app, &runner)
}

/// Runs the wrapped closure when dropped, including on early `?` returns
struct RestoreOnDrop<F: FnMut()>(F);

impl<F: FnMut()> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        (self.0)()
    }
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        warn!(error = %e, "failed to disable raw mode");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
        warn!(error = %e, "failed to leave alternate screen");
    }
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let redraw = match runner.step() {
            AppEvent::Tick => app.on_tick(Instant::now()),
            AppEvent::Resize => true,
            AppEvent::Disconnected => {
                warn!("terminal event source closed");
                break;
            }
            AppEvent::Key(key) => match app.handle_key(key, Instant::now()) {
                AppAction::Quit => break,
                AppAction::Redraw => true,
                AppAction::None => false,
            },
        };

        if redraw {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        }
    }

    Ok(())
}
