//! Tilde entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::{Dispatcher, Frontend, OpenOutcome, open_document};
use core_config::{Config, load_from};
use core_events::Key;
use core_input::{KeyDecoder, StdinSource};
use core_render::Compositor;
use core_state::{Document, EditorState};
use core_terminal::{CrosstermBackend, TerminalBackend, clear_screen, window_size};
use std::io::{self, Write, stdout};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;
use std::time::Instant;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "tilde.log";
const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "tilde", version, about = "Tilde text editor")]
struct Args {
    /// File to open. A path that does not exist yet is created on first save.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `tilde.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    fn configure_logging(&mut self) {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_ansi(false)
            .with_writer(nb_writer)
            .try_init()
            .is_ok()
        {
            self.log_guard = Some(guard);
        }
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }

    /// Enter raw mode, run the editor, and restore the terminal on every
    /// exit path. The screen is cleared before the terminal is released.
    fn run(&mut self, args: &Args) -> Result<()> {
        let config = load_from(args.config.clone())?;
        self.backend.set_title("tilde")?;
        let guard = self.backend.enter_guard()?;

        let result = EditorRuntime::bootstrap(args, &config).and_then(|mut rt| rt.run());

        let cleared = clear_screen(&mut stdout());
        let left = guard.leave();
        result?;
        cleared?;
        left
    }
}

/// Terminal-backed frontend: frames go to stdout, keys come from stdin.
struct TerminalFrontend {
    decoder: KeyDecoder<StdinSource>,
    compositor: Compositor,
    out: io::Stdout,
}

impl TerminalFrontend {
    fn new(config: &Config) -> Self {
        Self {
            decoder: KeyDecoder::new(StdinSource::new(config.escape_timeout())),
            compositor: Compositor::new(),
            out: stdout(),
        }
    }
}

impl Frontend for TerminalFrontend {
    fn refresh(&mut self, state: &mut EditorState) -> Result<()> {
        let mut out = self.out.lock();
        self.compositor.refresh(&mut out, state, Instant::now())?;
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key> {
        Ok(self.decoder.read_key()?)
    }
}

struct EditorRuntime {
    state: EditorState,
    dispatcher: Dispatcher,
    frontend: TerminalFrontend,
}

impl EditorRuntime {
    fn bootstrap(args: &Args, config: &Config) -> Result<Self> {
        let size = window_size()?;
        let (document, outcome) = match args.path.as_deref() {
            Some(path) => open_document(path),
            None => (Document::new(), OpenOutcome::Loaded),
        };
        info!(
            target: "runtime.startup",
            path = args.path.as_deref().map(|p| p.display().to_string()),
            rows = document.num_rows(),
            outcome = ?outcome,
            screen_rows = size.rows,
            screen_cols = size.cols,
            quit_times = config.quit_times(),
            "bootstrap_complete"
        );
        let mut state = EditorState::new(
            document,
            usize::from(size.text_rows()),
            usize::from(size.cols),
        )
        .with_message_timeout(config.message_timeout());
        state.set_status(startup_message(&outcome));
        Ok(Self {
            state,
            dispatcher: Dispatcher::new(config.quit_times()),
            frontend: TerminalFrontend::new(config),
        })
    }

    fn run(&mut self) -> Result<()> {
        let span = tracing::debug_span!(target: "runtime", "event_loop");
        let _enter = span.enter();
        loop {
            self.frontend.refresh(&mut self.state)?;
            let key = self.frontend.read_key()?;
            let result = self
                .dispatcher
                .dispatch(key, &mut self.state, &mut self.frontend)?;
            if result.quit {
                info!(
                    target: "runtime.shutdown",
                    dirty = self.state.document.dirty(),
                    "quit_requested"
                );
                return Ok(());
            }
        }
    }
}

fn startup_message(outcome: &OpenOutcome) -> &str {
    outcome.message().unwrap_or(HELP_MESSAGE)
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    startup.configure_logging();
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let code = match startup.run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(target: "runtime", error = ?err, "fatal");
            let _ = writeln!(io::stderr(), "tilde: {err:#}");
            ExitCode::FAILURE
        }
    };
    info!(target: "runtime.shutdown", "complete");
    drop(startup.log_guard.take());
    code
}
