use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use acchelper_backup::cli::{handle_backup_command, BackupArgs};
use acchelper_backup::config::{BackupPaths, Settings};

#[derive(Parser)]
#[command(
    name = "backup-db",
    version,
    about = "Backup AccHelper SQLite database",
    long_about = "Creates a timestamped copy of the AccHelper database and keeps \
                  the last N backups. Run it at most once per second: backups \
                  taken within the same second share a name."
)]
struct Cli {
    /// Base directory of the AccHelper installation [default: current directory]
    #[arg(long, value_name = "PATH", env = "ACCHELPER_BASE_DIR")]
    base_dir: Option<PathBuf>,

    #[command(flatten)]
    backup: BackupArgs,
}

/// Initialize tracing on stderr so stdout only carries the action lines
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let paths = BackupPaths::resolve(cli.base_dir)?;
    let settings = Settings::load_or_default(&paths)?;

    handle_backup_command(&paths, &settings, cli.backup)?;

    Ok(())
}
