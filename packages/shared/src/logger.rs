//! Logging setup for classpoll binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Logging is enabled for the server library crate and for the binary itself.
/// The level can be overridden with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "classpoll-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use classpoll_shared::logger::setup_logger;
///
/// setup_logger("classpoll-server", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the filter directives used when `RUST_LOG` is not set.
fn default_directives(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "classpoll_server={level},{bin}={level},tower_http={level}",
        level = default_log_level,
        bin = binary_name.replace('-', "_"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_cover_library_and_binary() {
        // テスト項目: RUST_LOG 未設定時のフィルタがライブラリとバイナリの両方を含む
        // given (前提条件):
        let binary_name = "classpoll-server";

        // when (操作):
        let directives = default_directives(binary_name, "debug");

        // then (期待する結果):
        assert!(directives.contains("classpoll_server=debug"));
        assert!(directives.contains("tower_http=debug"));
        assert!(!directives.contains('-'));
    }
}
