use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use dwell_hangman::{
    app_dirs::AppDirs,
    config::{ConfigStore, FileConfigStore, GameConfig},
    game::Game,
    logging,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    session::WordSession,
    words::WordBank,
    App,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Instant,
};
use tracing::{info, warn};

const FRAMES_PER_SECOND: u32 = 30;

/// hangman played by resting the mouse pointer on letters
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Hangman in the terminal. Letters are picked by holding the mouse pointer over a button until its progress fill completes; no clicking required."
)]
pub struct Cli {
    /// config file to load (default: config.json in the platform config dir)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// JSON file mapping category names to word lists
    #[clap(short, long)]
    words: Option<PathBuf>,

    /// seconds the pointer has to rest on a button to press it
    #[clap(short, long)]
    dwell: Option<f64>,

    /// play this word first, given as category:word
    #[clap(long, value_parser = parse_fixed_word)]
    word: Option<FixedWord>,

    /// where to write the log (default: ~/.local/state/dwell-hangman/dwell-hangman.log)
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// log hover and activation details
    #[clap(short, long)]
    verbose: bool,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Command line values win over the config file.
    fn apply(&self, config: &mut GameConfig) {
        if let Some(dwell) = self.dwell {
            config.dwell_secs = dwell;
        }
        if let Some(words) = &self.words {
            config.words_file = Some(words.clone());
        }
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FixedWord {
    category: String,
    word: String,
}

fn parse_fixed_word(s: &str) -> Result<FixedWord, String> {
    let (category, word) = s
        .split_once(':')
        .ok_or_else(|| format!("expected category:word, got '{s}'"))?;
    if category.is_empty() {
        return Err("category must not be empty".to_string());
    }
    if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(format!("'{word}' must be a non-empty run of letters"));
    }
    Ok(FixedWord {
        category: category.to_string(),
        word: word.to_ascii_lowercase(),
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    match cli.log_file.clone().or_else(AppDirs::log_path) {
        Some(path) => {
            if let Err(e) = logging::init_file_logging(&path, cli.verbose) {
                eprintln!("logging disabled: {e}");
                logging::init_silent();
            }
        }
        None => logging::init_silent(),
    }

    let store = cli.config_store();
    let mut config = store.load()?;
    cli.apply(&mut config);
    config.validate()?;

    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "saved config");
    }

    let bank = match &config.words_file {
        Some(path) => WordBank::from_file(path)?,
        None => WordBank::builtin()?,
    };
    info!(
        categories = bank.categories().len(),
        dwell_secs = config.dwell_secs,
        "starting"
    );

    let game = match cli.word {
        Some(FixedWord { category, word }) => {
            let session = WordSession::new(category, &word, config.loss_threshold);
            Game::with_session(config, bank, StdRng::from_entropy(), session)?
        }
        None => Game::new(config, bank)?,
    };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, game);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen,
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        warn!(error = %e, "exited with an error");
    }
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, game: Game) -> Result<(), Box<dyn Error>> {
    let size = terminal.size()?;
    let mut app = App::new(
        game,
        Rect::new(0, 0, size.width, size.height),
        Instant::now(),
    );

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::per_second(FRAMES_PER_SECOND),
    );
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| {
            app.resize(f.area());
            f.render_widget(&app, f.area());
        })?;

        let event = runner.step();
        let now = Instant::now();
        let is_tick = matches!(event, GameEvent::Tick);
        app.handle(event, now);

        // a steady stream of mouse motion must not starve the dwell clock
        if is_tick {
            last_tick = now;
        } else if now.duration_since(last_tick) >= runner.tick_interval() {
            app.tick(now);
            last_tick = now;
        }

        if app.should_quit {
            info!(moves = app.game.session().move_count(), "quit");
            return Ok(());
        }
    }
}
