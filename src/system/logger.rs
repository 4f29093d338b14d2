use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global `tracing` subscriber. Filter precedence:
/// `LINKSTRESS_LOG`, then `RUST_LOG`, then `debug`/`info` from `verbose`.
pub fn init_logging(verbose: bool, no_color: bool) {
    let filter = std::env::var("LINKSTRESS_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| default_filter(verbose),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| default_filter(verbose)),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    }
}
