pub mod effects;
pub mod logging;
pub mod shell;

use std::io;
use std::path::PathBuf;

use listing_logging::{harvest_info, harvest_warn};

use effects::EffectRunner;
use shell::Shell;

/// Runs the interactive menu on stdin/stdout until the user quits.
pub fn run_shell() -> anyhow::Result<()> {
    let output_dir = std::env::current_dir().unwrap_or_else(|err| {
        harvest_warn!("Cannot resolve current directory ({err}); writing to '.'");
        PathBuf::from(".")
    });
    harvest_info!("Output directory: {}", output_dir.display());

    let runner = EffectRunner::new(output_dir)?;
    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout(), runner);
    shell.run()?;
    harvest_info!("Shell closed after {} run(s)", shell.state().completed_runs());
    Ok(())
}
