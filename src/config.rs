use crate::store::FileStore;
use std::env;
use std::io;
use std::path::PathBuf;

/// Per-question countdown used when nothing else is configured.
pub const DEFAULT_QUESTION_SECONDS: u64 = 30;

/// Directory used for the file store when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Environment variable naming the file store directory.
pub const DATA_DIR_VAR: &str = "QUIZFOLD_DATA_DIR";

/// Environment variable holding the per-question countdown in seconds.
pub const QUESTION_SECONDS_VAR: &str = "QUIZFOLD_QUESTION_SECONDS";

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub question_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            question_seconds: DEFAULT_QUESTION_SECONDS,
        }
    }
}

impl Config {
    /// Read settings from the environment, loading a `.env` file first if one
    /// exists. Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            log::warn!("quizfold: ignoring unreadable .env file: {e}");
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();

        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(QUESTION_SECONDS_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.question_seconds = secs,
                _ => log::warn!(
                    "quizfold: {QUESTION_SECONDS_VAR}={raw:?} is not a positive integer, using {DEFAULT_QUESTION_SECONDS}"
                ),
            }
        }

        config
    }

    /// Open the file store in [`Config::data_dir`].
    pub fn open_store(&self) -> io::Result<FileStore> {
        FileStore::open(&self.data_dir)
    }
}
