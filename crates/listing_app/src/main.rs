mod platform;

use platform::logging::{self, LogDestination};

fn main() -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);
    platform::run_shell()
}
