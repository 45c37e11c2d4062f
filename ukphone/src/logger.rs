//! Logger setup for the ukphone binary and its tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger` on stderr.
///
/// `RUST_LOG` applies unless `level` is given, in which case it wins.
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None);
    let _ = builder.try_init();
}
