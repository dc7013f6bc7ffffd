//! Tracing setup for stdio MCP servers
//!
//! Everything goes to stderr: stdout belongs to the protocol and a single
//! stray line there breaks the client's JSON-RPC framing.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the default filter directive for a server crate.
///
/// Quiet servers only report warnings and errors unless `RUST_LOG` says
/// otherwise.
pub fn default_directive(crate_name: &str, quiet: bool) -> String {
    let level = if quiet { "warn" } else { "info" };
    format!("{}={}", crate_name, level)
}

/// Initialize tracing/logging for an MCP server
///
/// - stderr only, no ANSI colors
/// - `RUST_LOG` filtering on top of [`default_directive`]
/// - `LOG_FORMAT=json` switches to structured JSON lines
///
/// ```rust,ignore
/// mcp_common::init_tracing("ga4_mcp", config.server.quiet_startup)?;
/// ```
pub fn init_tracing(crate_name: &str, quiet: bool) -> anyhow::Result<()> {
    let filter =
        EnvFilter::from_default_env().add_directive(default_directive(crate_name, quiet).parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_levels() {
        assert_eq!(default_directive("ga4_mcp", false), "ga4_mcp=info");
        assert_eq!(default_directive("ga4_mcp", true), "ga4_mcp=warn");
    }

    #[test]
    fn test_default_directive_parses() {
        let directive: Result<tracing_subscriber::filter::Directive, _> =
            default_directive("some_mcp", true).parse();
        assert!(directive.is_ok());
    }
}
