//! # Structured Logging
//!
//! Environment-aware console logging on top of `tracing`.
//!
//! - Environment from `DISPATCH_ENV`, falling back to `APP_ENV`
//! - Level from `LOG_LEVEL`, then `RUST_LOG`, then a per-environment default
//! - ANSI colours only when stdout is a terminal
//! - `LOG_FORMAT=json` switches to one JSON object per line
//!
//! The `log_dispatch!` and `log_batch!` macros emit an `operation` field, any
//! extra key/value pairs and an RFC 3339 timestamp, so order and batch events
//! can be filtered uniformly downstream.

use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize console logging once per process. Later calls are no-ops, and an
/// already-installed global subscriber is left in place.
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);
        let use_ansi = IsTerminal::is_terminal(&std::io::stdout());
        let json = use_json_format();

        let console_layer: Box<dyn Layer<Registry> + Send + Sync> = if json {
            fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_filter(EnvFilter::new(&log_level))
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(use_ansi)
                .with_filter(EnvFilter::new(&log_level))
                .boxed()
        };

        if tracing_subscriber::registry()
            .with(console_layer)
            .try_init()
            .is_err()
        {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        } else {
            tracing::info!(
                environment = %environment,
                log_level = %log_level,
                ansi_colors = use_ansi,
                json,
                "Structured logging initialized"
            );
        }
    });
}

fn get_environment() -> String {
    std::env::var("DISPATCH_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

fn get_log_level(environment: &str) -> String {
    if let Ok(level) = std::env::var("LOG_LEVEL") {
        return level.to_lowercase();
    }

    if let Ok(level) = std::env::var("RUST_LOG") {
        return level.to_lowercase();
    }

    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

fn use_json_format() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Log an order-level dispatch event
#[macro_export]
macro_rules! log_dispatch {
    // With order id
    ($level:ident, $operation:expr, order_id: $order_id:expr, $($key:ident: $value:expr),* $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            order_id = %$order_id,
            $($key = ?$value,)*
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "DISPATCH_{}", $operation
        );
    };
    ($level:ident, $operation:expr $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "DISPATCH_{}", $operation
        );
    };
    ($level:ident, $operation:expr, $($key:ident: $value:expr),+ $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            $($key = ?$value,)*
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "DISPATCH_{}", $operation
        );
    };
}

/// Log a batch-level event
#[macro_export]
macro_rules! log_batch {
    ($level:ident, $operation:expr, batch_id: $batch_id:expr, $($key:ident: $value:expr),* $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            batch_id = %$batch_id,
            $($key = ?$value,)*
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "BATCH_{}", $operation
        );
    };
    ($level:ident, $operation:expr $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "BATCH_{}", $operation
        );
    };
}
