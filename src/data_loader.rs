//! Data loader module for discovering and parsing journal exports
//!
//! Practice journal exports are JSONL files, one session per line. This
//! module discovers the export directories and provides streaming access
//! so large journals never have to be fully resident.
//!
//! # Discovery
//!
//! The `PJSTAT_DATA_PATH` environment variable overrides discovery when
//! set. Otherwise two locations are searched:
//! - the platform data directory (`~/.local/share/pjstat` on Linux,
//!   `~/Library/Application Support/pjstat` on macOS, `%APPDATA%\pjstat`
//!   on Windows)
//! - `~/.pjstat`
//!
//! # Examples
//!
//! ```no_run
//! use pjstat::data_loader::DataLoader;
//! use futures::StreamExt;
//!
//! # async fn example() -> pjstat::Result<()> {
//! let data_loader = DataLoader::new().await?;
//!
//! let sessions = data_loader.load_sessions();
//! tokio::pin!(sessions);
//! while let Some(result) = sessions.next().await {
//!     let session = result?;
//!     println!("{} minutes", session.minutes);
//! }
//! # Ok(())
//! # }
//! ```

use futures::StreamExt;
use futures::stream::Stream;
use pjstat_core::error::{PjstatError, Result};
use pjstat_core::types::{PracticeSession, RawJournalEntry};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

/// Data loader for discovering and streaming journal JSONL files
pub struct DataLoader {
    /// Discovered journal data directories
    journal_paths: Vec<PathBuf>,
}

impl DataLoader {
    /// Create a new DataLoader by discovering journal directories
    ///
    /// # Errors
    ///
    /// Returns [`PjstatError::NoJournalDirectory`] when no directory is
    /// found in any of the search locations.
    pub async fn new() -> Result<Self> {
        let paths = Self::discover_journal_paths();
        if paths.is_empty() {
            return Err(PjstatError::NoJournalDirectory);
        }

        debug!("Discovered {} journal data directories", paths.len());
        Ok(Self {
            journal_paths: paths,
        })
    }

    /// Discover journal data directories on the system
    ///
    /// `PJSTAT_DATA_PATH` is authoritative when set; platform locations
    /// are only searched without it.
    fn discover_journal_paths() -> Vec<PathBuf> {
        if let Ok(custom_path) = std::env::var("PJSTAT_DATA_PATH") {
            let path = PathBuf::from(custom_path);
            return if path.exists() { vec![path] } else { Vec::new() };
        }

        let mut paths = Vec::new();

        if let Some(data_dir) = dirs::data_dir() {
            let path = data_dir.join("pjstat");
            if path.exists() {
                paths.push(path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let path = home.join(".pjstat");
            if path.exists() {
                paths.push(path);
            }
        }

        paths
    }

    /// Find all JSONL files in the discovered directories
    pub async fn find_jsonl_files(&self) -> Result<Vec<PathBuf>> {
        let mut jsonl_files = Vec::new();

        for base_path in &self.journal_paths {
            if let Ok(mut entries) = tokio::fs::read_dir(base_path).await {
                while let Some(entry) = entries.next_entry().await? {
                    let path = entry.path();
                    if path.extension().and_then(|s| s.to_str()) == Some("jsonl") {
                        jsonl_files.push(path);
                    }
                }
            }
        }

        debug!("Found {} JSONL files", jsonl_files.len());
        Ok(jsonl_files)
    }

    /// Load practice sessions as an async stream
    ///
    /// Streams validated sessions from all discovered JSONL files. Lines
    /// that fail to parse are logged and skipped so one corrupt row never
    /// sinks a whole report.
    pub fn load_sessions(&self) -> impl Stream<Item = Result<PracticeSession>> + '_ {
        async_stream::stream! {
            let files = match self.find_jsonl_files().await {
                Ok(files) => files,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            for file_path in files {
                let sessions = Self::parse_jsonl_stream(file_path);
                tokio::pin!(sessions);
                while let Some(result) = sessions.next().await {
                    yield result;
                }
            }
        }
    }

    /// Parse a single JSONL file as a stream of sessions
    fn parse_jsonl_stream(path: PathBuf) -> impl Stream<Item = Result<PracticeSession>> {
        async_stream::stream! {
            let file = match tokio::fs::File::open(&path).await {
                Ok(f) => f,
                Err(e) => {
                    yield Err(e.into());
                    return;
                }
            };

            let reader = BufReader::new(file);
            let mut lines = reader.lines();
            let mut line_number = 0;

            while let Ok(Some(line)) = lines.next_line().await {
                line_number += 1;

                if line.trim().is_empty() {
                    continue;
                }

                match serde_json::from_str::<RawJournalEntry>(&line) {
                    Ok(raw) => {
                        // from_raw drops deleted and malformed rows
                        if let Some(session) = PracticeSession::from_raw(raw) {
                            yield Ok(session);
                        }
                    }
                    Err(e) => {
                        warn!(
                            "Failed to parse line {} in {}: {}",
                            line_number,
                            path.display(),
                            e
                        );
                    }
                }
            }
        }
    }

    /// Get the discovered journal directories
    pub fn paths(&self) -> &[PathBuf] {
        &self.journal_paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn test_jsonl_parsing() {
        let temp_dir = TempDir::new().unwrap();
        let jsonl_path = temp_dir.path().join("journal.jsonl");

        let mut file = tokio::fs::File::create(&jsonl_path).await.unwrap();
        file.write_all(
            br#"{"start":"2024-03-15T09:00:00Z","practiceTime":30,"instrument":"Piano"}"#,
        )
        .await
        .unwrap();
        file.write_all(b"\n").await.unwrap();
        file.write_all(br#"{"start":"2024-03-14T20:00:00Z","end":"2024-03-14T20:45:00Z"}"#)
            .await
            .unwrap();
        file.write_all(b"\n").await.unwrap();
        // A deleted row and a corrupt row, both skipped
        file.write_all(br#"{"start":"2024-03-13T10:00:00Z","practiceTime":15,"deleted":true}"#)
            .await
            .unwrap();
        file.write_all(b"\nnot json at all\n").await.unwrap();

        let stream = DataLoader::parse_jsonl_stream(jsonl_path);
        tokio::pin!(stream);

        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.minutes, 30);
        assert_eq!(first.instrument.as_deref(), Some("Piano"));

        let second = stream.next().await.unwrap().unwrap();
        assert_eq!(second.minutes, 45);
        assert_eq!(second.instrument, None);

        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_find_jsonl_files_ignores_other_extensions() {
        let temp_dir = TempDir::new().unwrap();
        tokio::fs::write(temp_dir.path().join("a.jsonl"), b"")
            .await
            .unwrap();
        tokio::fs::write(temp_dir.path().join("b.json"), b"")
            .await
            .unwrap();
        tokio::fs::write(temp_dir.path().join("notes.txt"), b"")
            .await
            .unwrap();

        let loader = DataLoader {
            journal_paths: vec![temp_dir.path().to_path_buf()],
        };
        let files = loader.find_jsonl_files().await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "a.jsonl");
    }
}
