#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use demodb::db;

/// Create a fresh SQLite database pre-loaded with demo data.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Destination for the database file; any existing file there is
    /// replaced. Defaults to a fixed path in the system temp directory.
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli.path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("demodb: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: Option<PathBuf>) -> Result<(), db::DbError> {
    let init = db::init_db(path)?;
    info!("Database path: {:?}", init.path);

    let summary = db::summarize(&init.connection)?;
    info!(
        users = summary.users,
        posts = summary.posts,
        tags = summary.tags,
        "Database seeded"
    );

    Ok(())
}
