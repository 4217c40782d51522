//! Run log persistence.
//!
//! One pretty-printed JSON file per run under `<workspace>/tests/testlogs`.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tstai_application::ports::{RunLogError, RunLogSink};
use tstai_domain::RunLog;

use crate::serialization::to_json_stable_bytes;

/// Directory for run logs, relative to the workspace.
pub const LOG_DIR: &str = "tests/testlogs";

/// Writes run logs into a directory, never overwriting an existing file.
#[derive(Debug, Clone)]
pub struct FileRunLogWriter {
    dir: PathBuf,
}

impl FileRunLogWriter {
    /// Writer for an explicit directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Writer for `<workspace>/tests/testlogs`.
    #[must_use]
    pub fn in_workspace(workspace: &Path) -> Self {
        Self::new(workspace.join(LOG_DIR))
    }

    fn io_error(path: &Path, source: std::io::Error) -> RunLogError {
        RunLogError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Writes `content` to a file that must not exist yet. A failed write
    /// removes the file again.
    async fn write_new(path: &Path, content: &[u8]) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await?;
        let written = async {
            file.write_all(content).await?;
            file.flush().await
        }
        .await;
        if written.is_err() {
            let _ = fs::remove_file(path).await;
        }
        written
    }

    /// Writes to the first free `<id>.json`, `<id>-1.json`, ... file.
    async fn write_log(&self, log: &RunLog) -> Result<PathBuf, RunLogError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| Self::io_error(&self.dir, e))?;

        let base_id = log.test_run_id.as_str();
        let mut log = log.clone();
        let mut attempt = 0usize;
        loop {
            log.test_run_id = if attempt == 0 {
                base_id.to_string()
            } else {
                format!("{base_id}-{attempt}")
            };
            let content =
                to_json_stable_bytes(&log).map_err(|e| RunLogError::Encode(e.to_string()))?;
            let path = self.dir.join(format!("{}.json", log.test_run_id));

            match Self::write_new(&path, &content).await {
                Ok(()) => {
                    tracing::debug!(
                        path = %path.display(),
                        entries = log.tests.len(),
                        "wrote run log"
                    );
                    return Ok(path);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(Self::io_error(&path, e)),
            }
        }
    }
}

impl RunLogSink for FileRunLogWriter {
    fn write<'a>(
        &'a self,
        log: &'a RunLog,
    ) -> Pin<Box<dyn Future<Output = Result<PathBuf, RunLogError>> + Send + 'a>> {
        Box::pin(self.write_log(log))
    }
}
