mod app;
mod bootstrap;
mod menu;
mod settings;

use std::io;

use anyhow::{Context, Result};
use helper_data::JsonStore;

use crate::app::Toolkit;
use crate::menu::Console;
use crate::settings::Settings;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Immigrant Helper v{} starting", env!("CARGO_PKG_VERSION"));

    let store = JsonStore::resolve(settings.data_dir.as_deref());
    tracing::info!("Data directory: {}", store.dir().display());

    let (mut toolkit, summary) = Toolkit::load(store, !settings.no_demo_data)
        .context("Start-up aborted; fix or remove the file named above and try again")?;

    println!("Welcome to Immigrant Helper!");
    if !summary.seeded.is_empty() {
        println!("Loaded demo data into {}.", summary.seeded.join(" and "));
    }
    if summary.skipped > 0 {
        println!(
            "Skipped {} invalid or duplicate records; see the log for details.",
            summary.skipped
        );
    }
    for backup in &summary.backups {
        println!("The original file was kept at {}.", backup.display());
    }

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    menu::run(&mut console, &mut toolkit).context("Console I/O failed")?;

    tracing::info!("Immigrant Helper exiting");
    Ok(())
}
