//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::sync::Once;

static TRACING: Once = Once::new();

/// Installs an env-filtered subscriber once per test binary (`RUST_LOG=trace`
/// shows folded `try_` errors).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Renders `rows` as one line each.
pub fn table<I, S>(rows: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for row in rows {
        out.push_str(row.as_ref());
        out.push('\n');
    }
    out
}
