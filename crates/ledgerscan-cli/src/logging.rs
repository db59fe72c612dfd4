//! Tracing setup for the binary.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub fn default_directives(debug: bool) -> &'static str {
    if debug {
        "info,ledgerscan_cli=debug,ledgerscan_extractor=debug,ledgerscan_openai=debug"
    } else {
        "info"
    }
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the `--debug` flag.
pub fn init(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        for debug in [false, true] {
            assert!(EnvFilter::try_new(default_directives(debug)).is_ok());
        }
    }

    #[test]
    fn test_debug_enables_crate_logging() {
        assert_eq!(default_directives(false), "info");
        assert!(default_directives(true).contains("ledgerscan_openai=debug"));
    }
}
