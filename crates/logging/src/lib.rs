use time::macros::format_description;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "info";

/// Filter for the subscriber. An explicit `level` wins over `RUST_LOG`; an
/// unparsable filter falls back to `info`.
pub fn build_filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)),
    }
}

/// Installs the global subscriber. Records emitted through the `log` facade
/// by the library crates are forwarded to it.
pub fn init_logger(level: Option<&str>) {
    let time_format =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:2]");

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_timer(fmt::time::LocalTime::new(time_format))
                .with_target(false)
                .with_level(true)
                .with_thread_names(false)
                .with_line_number(false)
                .with_file(false)
                .with_span_events(fmt::format::FmtSpan::NONE)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(build_filter(level))
        .init();
    tracing::debug!("logger initialised");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn explicit_level_is_used() {
        assert_eq!(
            build_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn invalid_level_falls_back_to_info() {
        assert_eq!(
            build_filter(Some("topic=notalevel")).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }
}
