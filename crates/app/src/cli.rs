use std::path::PathBuf;

use clap::Parser;
use quiz_core::model::Mode;

#[derive(Parser, Debug, Default)]
#[command(name = "quiz", about = "Multiple-choice quiz runner")]
pub struct Args {
    /// Question bank CSV, or a base name that gets `.csv` appended
    #[arg(short, long)]
    pub questions: Option<PathBuf>,

    /// practice (instant feedback) or exam (score at end)
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// Number of questions per session
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Keep questions in bank order
    #[arg(long)]
    pub no_shuffle_questions: bool,

    /// Keep answer options in A–E order
    #[arg(long)]
    pub no_shuffle_options: bool,

    /// Where `export` writes the review CSV
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Config file (default: ~/.quiz/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log file (default: quiz.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace or off
    #[arg(long)]
    pub log_level: Option<String>,

    /// Skip the home screen and start a session right away
    #[arg(long)]
    pub start: bool,
}
