/// Logging setup: one `tracing` fmt subscriber writing to stderr, so the
/// report on stdout stays clean.
use tracing::Level;

/// Install the global subscriber. Later calls are ignored.
pub fn init(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
