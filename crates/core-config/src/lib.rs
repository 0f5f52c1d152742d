//! Configuration loading and parsing.
//!
//! Parses `tilde.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [editor]
//! quit_times = 3
//! message_timeout_secs = 5
//!
//! [input]
//! escape_timeout_ms = 100
//! ```
//!
//! Every key is optional. A missing file or one that fails to parse yields
//! the defaults. Out-of-range values are clamped when the config is built
//! (`quit_times >= 1`, `escape_timeout_ms` within 10..=1000), logging under
//! the `config` target. Unknown fields are ignored.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf, time::Duration};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "tilde.toml";

const MIN_ESCAPE_TIMEOUT_MS: u64 = 10;
const MAX_ESCAPE_TIMEOUT_MS: u64 = 1000;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_quit_times")]
    pub quit_times: u32,
    #[serde(default = "EditorConfig::default_message_timeout_secs")]
    pub message_timeout_secs: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            quit_times: Self::default_quit_times(),
            message_timeout_secs: Self::default_message_timeout_secs(),
        }
    }
}

impl EditorConfig {
    const fn default_quit_times() -> u32 {
        3
    }
    const fn default_message_timeout_secs() -> u64 {
        5
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_escape_timeout_ms")]
    pub escape_timeout_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            escape_timeout_ms: Self::default_escape_timeout_ms(),
        }
    }
}

impl InputConfig {
    const fn default_escape_timeout_ms() -> u64 {
        100
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data, clamped
    pub source: Option<PathBuf>,
}

/// Config path: `./tilde.toml` when present, else the platform config dir
/// (`$XDG_CONFIG_HOME/tilde/tilde.toml` and friends).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("tilde").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(mut file) => {
            clamp(&mut file);
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
                source: Some(path),
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_error");
            Ok(Config::default())
        }
    }
}

fn clamp(file: &mut ConfigFile) {
    let raw = file.editor.quit_times;
    if raw == 0 {
        file.editor.quit_times = 1;
        info!(target: "config", raw, clamped = 1, "quit_times_clamped");
    }
    let raw = file.input.escape_timeout_ms;
    let clamped = raw.clamp(MIN_ESCAPE_TIMEOUT_MS, MAX_ESCAPE_TIMEOUT_MS);
    if clamped != raw {
        file.input.escape_timeout_ms = clamped;
        info!(
            target: "config",
            raw,
            clamped,
            min = MIN_ESCAPE_TIMEOUT_MS,
            max = MAX_ESCAPE_TIMEOUT_MS,
            "escape_timeout_clamped"
        );
    }
}

impl Config {
    pub fn quit_times(&self) -> u32 {
        self.file.editor.quit_times
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.file.editor.message_timeout_secs)
    }

    /// Per-byte read timeout for terminal input.
    pub fn escape_timeout(&self) -> Duration {
        Duration::from_millis(self.file.input.escape_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl Write for LockedWriter<'_> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn load_str(toml: &str) -> Config {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), toml).unwrap();
        load_from(Some(tmp.path().to_path_buf())).unwrap()
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.quit_times(), 3);
        assert_eq!(cfg.message_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.escape_timeout(), Duration::from_millis(100));
        assert!(cfg.source.is_none());
    }

    #[test]
    fn parses_all_fields() {
        let cfg = load_str(
            "[editor]\nquit_times = 5\nmessage_timeout_secs = 2\n[input]\nescape_timeout_ms = 250\n",
        );
        assert_eq!(cfg.quit_times(), 5);
        assert_eq!(cfg.message_timeout(), Duration::from_secs(2));
        assert_eq!(cfg.escape_timeout(), Duration::from_millis(250));
        assert!(cfg.raw.is_some());
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let cfg = load_str("[input]\nescape_timeout_ms = 50\n");
        assert_eq!(cfg.quit_times(), 3);
        assert_eq!(cfg.escape_timeout(), Duration::from_millis(50));
    }

    #[test]
    fn parse_error_falls_back_to_defaults() {
        let cfg = load_str("[editor\nquit_times = ");
        assert_eq!(cfg.file, ConfigFile::default());
        assert!(cfg.raw.is_none());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let cfg = load_str("[editor]\nquit_times = 0\n[input]\nescape_timeout_ms = 5000\n");
        assert_eq!(cfg.quit_times(), 1);
        assert_eq!(cfg.escape_timeout(), Duration::from_millis(1000));
        let cfg = load_str("[input]\nescape_timeout_ms = 1\n");
        assert_eq!(cfg.escape_timeout(), Duration::from_millis(10));
    }

    #[test]
    fn clamp_logging_uses_config_target() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[input]\nescape_timeout_ms = 2\n").unwrap();
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let cfg = with_default(subscriber, || load_from(Some(tmp.path().to_path_buf())).unwrap());

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("INFO config:"));
        assert!(log_output.contains("escape_timeout_clamped"));
        assert_eq!(cfg.escape_timeout(), Duration::from_millis(10));
    }
}
