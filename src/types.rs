use std::str::FromStr;
use serde::Deserialize;

/// What watch mode does when a changed pipeline fails to load or compile.
///
/// - `KeepLast`: log the error and keep running the last good schedule
///   (default).
/// - `Exit`: stop the runtime and return the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReloadFailureBehaviour {
    KeepLast,
    Exit,
}

impl Default for ReloadFailureBehaviour {
    fn default() -> Self {
        ReloadFailureBehaviour::KeepLast
    }
}

impl FromStr for ReloadFailureBehaviour {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keep_last" | "keep-last" => Ok(ReloadFailureBehaviour::KeepLast),
            "exit" => Ok(ReloadFailureBehaviour::Exit),
            other => Err(format!(
                "invalid on_reload_error: {other} (expected \"keep_last\" or \"exit\")"
            )),
        }
    }
}
