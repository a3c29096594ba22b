//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable read for log directives.
pub const LOG_ENV_VAR: &str = "TABSIEVE_LOG";

/// Directive used when `TABSIEVE_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "tabsieve=info";

/// Initialize the tabsieve tracing/logging system.
///
/// Reads `TABSIEVE_LOG` for per-module log levels.
/// Format: `TABSIEVE_LOG=tabsieve_analysis::density=debug,tabsieve_analysis=info`
///
/// Falls back to `tabsieve=info` if `TABSIEVE_LOG` is not set or is invalid.
///
/// Idempotent. A subscriber installed by the host application wins.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
