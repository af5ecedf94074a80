use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber on stderr
///
/// `RUST_LOG` takes precedence; otherwise `warn`, or `info` with `--verbose`.
pub fn init(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
