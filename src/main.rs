//! jcrtracker main entrypoint.

use jcrtracker::ui::messages::error;
use jcrtracker::{init_tracing, run};

fn main() {
    init_tracing();
    if let Err(e) = run() {
        tracing::debug!(error = ?e, "command failed");
        error(&e);
        std::process::exit(1);
    }
}
