//! Helper functions for reading environment variables in tests

use resultset_engine::test_helpers::load_dotenv;

/// Routes `log` output through the test harness; safe to call repeatedly.
#[allow(dead_code)]
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Get the ODBC_TEST_DSN connection string from environment
/// Returns None if not set (tests should be skipped in this case)
#[allow(dead_code)]
pub fn get_test_dsn() -> Option<String> {
    load_dotenv();
    std::env::var("ODBC_TEST_DSN")
        .ok()
        .filter(|s| !s.is_empty())
}

/// Checks whether E2E tests should run.
/// Runs only when ENABLE_E2E_TESTS is explicitly enabled and a DSN is set.
#[allow(dead_code)]
pub fn should_run_e2e_tests() -> bool {
    load_dotenv();

    fn parse_env_bool(raw: &str) -> Option<bool> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        match normalized.as_str() {
            "1" | "true" | "yes" | "y" => Some(true),
            "0" | "false" | "no" | "n" => Some(false),
            _ => None,
        }
    }

    let enabled = std::env::var("ENABLE_E2E_TESTS")
        .ok()
        .as_deref()
        .and_then(parse_env_bool)
        == Some(true);

    enabled && get_test_dsn().is_some()
}
