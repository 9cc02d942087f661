use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "ARCHDECK_LOG";

/// Tracing directive for the `-v`/`-q` flags.
pub const fn verbosity_to_directive(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber, writing to stderr. `ARCHDECK_LOG` takes
/// precedence over the flags.
pub fn init(verbosity: u8, quiet: bool, color: bool) {
    let directive = verbosity_to_directive(verbosity, quiet);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(color)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(verbosity_to_directive(0, false), "warn");
        assert_eq!(verbosity_to_directive(1, false), "info");
        assert_eq!(verbosity_to_directive(2, false), "debug");
        assert_eq!(verbosity_to_directive(9, false), "trace");
    }

    #[test]
    fn test_quiet_wins() {
        assert_eq!(verbosity_to_directive(3, true), "error");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(0, false, false);
        init(2, false, true);
    }
}
