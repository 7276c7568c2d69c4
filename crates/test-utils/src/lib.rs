pub mod builders;
pub mod recording;

use std::io::Write;
use std::sync::Once;
use std::time::Duration;

use passgraph::logging::{LOG_ENV_VAR, build_filter};
use tempfile::NamedTempFile;

static INIT: Once = Once::new();

/// Initialise tracing for tests, once per test binary.
///
/// Uses the same filter rules as the binary (`PASSGRAPH_LOG`, falling back
/// to `RUST_LOG`), with `with_test_writer()` so output is only shown for
/// failing tests unless run with `-- --nocapture`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let env = std::env::var(LOG_ENV_VAR)
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok();

        let _ = tracing_subscriber::fmt()
            .with_env_filter(build_filter(None, env.as_deref()))
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Write `contents` to a fresh temporary `.toml` pipeline file.
///
/// The file is deleted when the returned handle drops.
pub fn pipeline_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("Passgraph")
        .suffix(".toml")
        .tempfile()
        .expect("create temporary pipeline file");
    file.write_all(contents.as_bytes())
        .expect("write temporary pipeline file");
    file.flush().expect("flush temporary pipeline file");
    file
}

/// Await `f`, failing the test if it takes longer than five seconds.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(Duration::from_secs(5), f)
        .await
        .expect("test timed out after 5 seconds")
}
