/// Logging setup
///
/// Everything goes to stderr so it never ends up inside a rendered message.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "COMMIT_SCOPES_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Pick the filter directive: env var, then --verbose, then config, then warn
pub fn filter_directive(env_value: Option<String>, verbose: bool, configured: Option<&str>) -> String {
    if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        return value;
    }
    if verbose {
        return "commit_scopes_lib=debug,commit_scopes=debug".to_string();
    }
    configured.unwrap_or(DEFAULT_FILTER).to_string()
}

/// Install the global subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool, configured: Option<&str>) {
    let directive = filter_directive(std::env::var(LOG_ENV).ok(), verbose, configured);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_wins() {
        let directive = filter_directive(Some("trace".to_string()), true, Some("info"));
        assert_eq!(directive, "trace");
    }

    #[test]
    fn test_verbose_over_config() {
        let directive = filter_directive(None, true, Some("info"));
        assert!(directive.contains("debug"));
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(filter_directive(Some("  ".to_string()), false, Some("info")), "info");
        assert_eq!(filter_directive(None, false, None), "warn");
    }
}
