//! Settings with the override order defaults → config file → env → CLI flags.
//!
//! The config file lives at `~/.quiz/config.toml`; every key is optional.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use quiz_core::model::{DEFAULT_QUESTION_COUNT, Mode, SessionConfig};
use simplelog::LevelFilter;

use crate::cli::Args;

//
// ─── FILE SHAPE ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct QuizConfig {
    #[serde(default)]
    pub session: SessionSection,
    #[serde(default)]
    pub bank: BankSection,
    #[serde(default)]
    pub export: ExportSection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SessionSection {
    pub mode: Option<Mode>,
    pub count: Option<usize>,
    pub shuffle_questions: Option<bool>,
    pub shuffle_options: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BankSection {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ExportSection {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LogSection {
    pub file: Option<PathBuf>,
    pub level: Option<String>,
}

//
// ─── DEFAULTS ──────────────────────────────────────────────────────────────────
//

pub const DEFAULT_BANK: &str = "questions.csv";
pub const DEFAULT_EXPORT: &str = "quiz_review.csv";
pub const DEFAULT_LOG_FILE: &str = "quiz.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
pub const BANK_ENV: &str = "QUIZ_QUESTIONS";

/// Concrete values after every layer has been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub questions: PathBuf,
    pub session: SessionConfig,
    pub export_path: PathBuf,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error ({path}): {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

//
// ─── LOADING ───────────────────────────────────────────────────────────────────
//

/// `~/.quiz/config.toml`, when a home directory exists.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".quiz").join("config.toml"))
}

/// Load the config file.
///
/// An explicit path must exist. The default location is optional and a
/// missing file yields `QuizConfig::default()`.
///
/// # Errors
///
/// Returns `ConfigError::Io` if the file cannot be read and
/// `ConfigError::Parse` if it is not valid TOML for this shape.
pub fn load_config(explicit: Option<&Path>) -> Result<QuizConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match config_path() {
            Some(path) if path.exists() => path,
            Some(path) => {
                debug!("no config file at {}, using defaults", path.display());
                return Ok(QuizConfig::default());
            }
            None => {
                warn!("could not determine home directory, using default config");
                return Ok(QuizConfig::default());
            }
        },
    };
    read_config(&path)
}

fn read_config(path: &Path) -> Result<QuizConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: QuizConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("loaded config from {}", path.display());
    debug!("config: {config:?}");
    Ok(config)
}

//
// ─── RESOLUTION ────────────────────────────────────────────────────────────────
//

/// Collapse defaults, the config file, the bank env var and CLI flags.
///
/// The `--no-shuffle-*` flags can only switch shuffling off.
pub fn resolve(config: &QuizConfig, args: &Args, env_bank: Option<String>) -> ResolvedConfig {
    let questions = args
        .questions
        .clone()
        .or_else(|| env_bank.filter(|value| !value.trim().is_empty()).map(PathBuf::from))
        .or_else(|| config.bank.path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BANK));

    let mode = args.mode.or(config.session.mode).unwrap_or_default();
    let count = args
        .count
        .or(config.session.count)
        .unwrap_or(DEFAULT_QUESTION_COUNT);
    let shuffle_questions =
        !args.no_shuffle_questions && config.session.shuffle_questions.unwrap_or(true);
    let shuffle_options =
        !args.no_shuffle_options && config.session.shuffle_options.unwrap_or(true);

    let log_level = args
        .log_level
        .as_deref()
        .or(config.log.level.as_deref())
        .map_or(DEFAULT_LOG_LEVEL, parse_level);

    ResolvedConfig {
        questions,
        session: SessionConfig::new(mode, count)
            .with_shuffle_questions(shuffle_questions)
            .with_shuffle_options(shuffle_options),
        export_path: args
            .export
            .clone()
            .or_else(|| config.export.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT)),
        log_file: args
            .log_file
            .clone()
            .or_else(|| config.log.file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        log_level,
    }
}

fn parse_level(raw: &str) -> LevelFilter {
    LevelFilter::from_str(raw.trim()).unwrap_or_else(|_| {
        warn!("unknown log level {raw:?}, using {DEFAULT_LOG_LEVEL}");
        DEFAULT_LOG_LEVEL
    })
}
