use std::io::{self, IsTerminal};

use tracing::Level;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

/// Workspace crates whose level follows `DEBUG` when `RUST_LOG` is unset.
const WORKSPACE_TARGETS: [&str; 4] = [
    "artheon_backend",
    "api",
    "ai_llm_service",
    "language_analyzer",
];

/// RFC3339 UTC timer, e.g. `2025-09-12T10:20:30Z`.
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        w.write_str(&now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
    }
}

/// `RUST_LOG` if set, otherwise `warn` globally and `info`/`debug` for our crates.
fn env_filter(debug: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if debug { Level::DEBUG } else { Level::INFO };
    let directives = WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{target}={}", level.as_str().to_lowercase()))
        .collect::<Vec<_>>()
        .join(",");
    EnvFilter::new(format!("warn,{directives}"))
}

/// Installs the global subscriber. Call once, before the first event.
pub fn init(debug: bool) -> Result<(), TryInitError> {
    let layer = fmt::layer()
        .with_timer(ChronoRfc3339Utc)
        .with_target(true)
        .with_file(debug)
        .with_line_number(debug)
        .with_ansi(io::stdout().is_terminal())
        .with_span_events(if debug {
            fmt::format::FmtSpan::CLOSE
        } else {
            fmt::format::FmtSpan::NONE
        })
        .compact();

    tracing_subscriber::registry()
        .with(env_filter(debug))
        .with(layer)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_filter_scopes_workspace_crates() {
        // Only meaningful when the test runner has no RUST_LOG of its own.
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let rendered = env_filter(true).to_string();
        assert!(rendered.contains("language_analyzer=debug"));
        assert!(rendered.contains("api=debug"));
        assert!(env_filter(false).to_string().contains("ai_llm_service=info"));
    }
}
