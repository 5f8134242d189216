pub mod extent;

pub use self::extent::*;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Sets up a logging and a panic handler that logs panics.
///
/// Calling it more than once is harmless; only the first call installs anything.
pub fn setup_logger() {
    tracing_log::LogTracer::init().ok();
    let env = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| "info".to_owned());
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::new(env))
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        log_panics::init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_logger_twice() {
        setup_logger();
        setup_logger();
        tracing::info!("still alive");
    }
}
