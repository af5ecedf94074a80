use super::error::{LoadMapError, Result};
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};

/// Default location of the pbsnodes executable
pub const DEFAULT_PBSNODES: &str = "/usr/local/bin/pbsnodes";

/// Run pbsnodes (no arguments) and capture its standard output
///
/// Fails with `CommandFailed` when the executable can't be spawned or exits
/// with a non-zero status.
pub async fn run_pbsnodes(pbsnodes: impl AsRef<Path>) -> Result<String> {
    let pbsnodes = pbsnodes.as_ref();
    info!("Executing {}", pbsnodes.display());

    let output = Command::new(pbsnodes)
        .output()
        .await
        .map_err(|e| LoadMapError::CommandFailed {
            command: pbsnodes.to_path_buf(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(LoadMapError::CommandFailed {
            command: pbsnodes.to_path_buf(),
            reason: format!("{} ({})", output.status, stderr.trim()),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    debug!("pbsnodes produced {} bytes", stdout.len());
    Ok(stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_executable() {
        let err = run_pbsnodes("/nonexistent/bin/pbsnodes").await.unwrap_err();
        assert!(matches!(err, LoadMapError::CommandFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_executable() {
        let err = run_pbsnodes("false").await.unwrap_err();
        match err {
            LoadMapError::CommandFailed { command, .. } => {
                assert_eq!(command, Path::new("false"))
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_executable() {
        // `true` prints nothing and exits 0
        let output = run_pbsnodes("true").await.unwrap();
        assert!(output.is_empty());
    }
}
