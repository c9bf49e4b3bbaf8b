use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize a tracing subscriber writing to stderr.
///
/// Stdout is reserved for the result record. `RUST_LOG` selects the level,
/// defaulting to "warn", or "debug" when `verbose` is set.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    let default_level = if verbose { "debug" } else { "warn" };
    let filter_layer = if verbose {
        EnvFilter::try_new(default_level)?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, warn};

    #[test]
    fn test_logging_init() {
        // Only one global subscriber per process
        let _ = init(true);

        debug!("This is a debug message");
        warn!("This is a warning message");
    }
}
