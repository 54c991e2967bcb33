use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default directives: our crates at info, the db stacks quieted.
/// Override with RUST_LOG.
const DEFAULT_FILTER: &str = "info,backend=info,data=info,migration=info,sqlx=warn,sea_orm=warn";

pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer().with_target(true).with_ansi(false).json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::EnvFilter;

    use super::DEFAULT_FILTER;

    #[test]
    fn default_filter_directives_parse() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
