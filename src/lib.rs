//! Two small HTTP fetch tools sharing one library.
//!
//! [`fetch`] streams bodies to stdout one URL at a time and stops at the first
//! failure. [`fetchall`] fetches every URL at once into `file1..fileN` and
//! prints one line per fetch in completion order.

pub mod error;
pub mod fetch;
pub mod fetchall;
pub mod utils;

pub use error::FetchError;

use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default
/// `warn` level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}
