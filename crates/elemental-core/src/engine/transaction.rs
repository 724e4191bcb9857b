use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("Failed to read artifact '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to write temporary file '{path}': {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to replace '{path}' with the edited content: {source}")]
    Commit {
        path: String,
        source: std::io::Error,
    },
}

/// What happened to the artifact at the end of a successful transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionOutcome {
    /// The edited text was written over the original.
    Committed,
    /// The edit produced byte-identical text, so nothing was written.
    Unchanged,
    /// Dry run: the edit succeeded but the original was left in place.
    Discarded,
}

/// Read-modify-write of a text artifact that never leaves it half written.
///
/// The edit runs entirely in memory. Its result is written to a sibling temporary
/// file which is then renamed over the original. If the edit, the write, or the
/// rename fails, the original bytes stay in place and the temporary file is removed.
#[derive(Debug, Clone)]
pub struct ArtifactTransaction {
    path: PathBuf,
    dry_run: bool,
}

struct TempFileGuard {
    path: PathBuf,
    armed: bool,
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = fs::remove_file(&self.path) {
                trace!("Could not remove temporary file {:?}: {}", self.path, e);
            }
        }
    }
}

impl ArtifactTransaction {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Convenience for `ArtifactTransaction::new(path).execute(edit)`.
    pub fn run<F, E>(path: &Path, edit: F) -> Result<TransactionOutcome, E>
    where
        F: FnOnce(&str) -> Result<String, E>,
        E: From<TransactionError>,
    {
        Self::new(path).execute(edit)
    }

    pub fn execute<F, E>(&self, edit: F) -> Result<TransactionOutcome, E>
    where
        F: FnOnce(&str) -> Result<String, E>,
        E: From<TransactionError>,
    {
        let path_display = self.path.to_string_lossy().to_string();
        let original = fs::read_to_string(&self.path).map_err(|e| TransactionError::Read {
            path: path_display.clone(),
            source: e,
        })?;

        let edited = edit(&original)?;

        if edited == original {
            debug!("Edit of {} produced no changes.", path_display);
            return Ok(TransactionOutcome::Unchanged);
        }
        if self.dry_run {
            debug!("Dry run: discarding edited content for {}.", path_display);
            return Ok(TransactionOutcome::Discarded);
        }

        self.commit(&edited, &path_display)?;
        Ok(TransactionOutcome::Committed)
    }

    /// Replaces the artifact with `content` wholesale, creating it when absent.
    pub fn replace(&self, content: &str) -> Result<TransactionOutcome, TransactionError> {
        let path_display = self.path.to_string_lossy().to_string();
        if fs::read_to_string(&self.path).is_ok_and(|existing| existing == content) {
            debug!("{} already holds the rendered content.", path_display);
            return Ok(TransactionOutcome::Unchanged);
        }
        if self.dry_run {
            return Ok(TransactionOutcome::Discarded);
        }
        self.commit(content, &path_display)?;
        Ok(TransactionOutcome::Committed)
    }

    fn commit(&self, content: &str, path_display: &str) -> Result<(), TransactionError> {
        let mut guard = TempFileGuard {
            path: self.temp_path(),
            armed: true,
        };
        let temp_display = guard.path.to_string_lossy().to_string();
        let write_err = |e| TransactionError::Write {
            path: temp_display.clone(),
            source: e,
        };

        let mut file = File::create(&guard.path).map_err(write_err)?;
        file.write_all(content.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);

        if let Ok(metadata) = fs::metadata(&self.path) {
            fs::set_permissions(&guard.path, metadata.permissions()).map_err(write_err)?;
        }

        fs::rename(&guard.path, &self.path).map_err(|e| TransactionError::Commit {
            path: path_display.to_string(),
            source: e,
        })?;
        guard.armed = false;

        debug!("Committed {} bytes to {}.", content.len(), path_display);
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "artifact".to_string());
        let temp_name = format!(".{}.{}.tmp", file_name, std::process::id());
        match self.path.parent() {
            Some(parent) => parent.join(temp_name),
            None => PathBuf::from(temp_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn successful_edit_replaces_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("elements.ts");
        fs::write(&path, "old").unwrap();

        let outcome =
            ArtifactTransaction::run(&path, |text| Ok::<_, TransactionError>(text.replace("old", "new")))
                .unwrap();

        assert_eq!(outcome, TransactionOutcome::Committed);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(entries(dir.path()), vec!["elements.ts"]);
    }

    #[test]
    fn failing_edit_leaves_original_bytes_and_no_temp_file() {
        #[derive(Debug)]
        enum TestError {
            Edit,
            Tx,
        }
        impl From<TransactionError> for TestError {
            fn from(_: TransactionError) -> Self {
                TestError::Tx
            }
        }

        let dir = tempdir().unwrap();
        let path = dir.path().join("elements.ts");
        fs::write(&path, "original").unwrap();

        let result = ArtifactTransaction::run(&path, |_| Err::<String, _>(TestError::Edit));

        assert!(matches!(result, Err(TestError::Edit)));
        assert!(!matches!(result, Err(TestError::Tx)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
        assert_eq!(entries(dir.path()), vec!["elements.ts"]);
    }

    #[test]
    fn identical_output_is_not_rewritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("elements.json");
        fs::write(&path, "[]").unwrap();

        let outcome =
            ArtifactTransaction::run(&path, |text| Ok::<_, TransactionError>(text.to_string()))
                .unwrap();
        assert_eq!(outcome, TransactionOutcome::Unchanged);
    }

    #[test]
    fn dry_run_discards_the_edit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("elements.ts");
        fs::write(&path, "a").unwrap();

        let outcome = ArtifactTransaction::new(&path)
            .dry_run(true)
            .execute(|_| Ok::<_, TransactionError>("b".to_string()))
            .unwrap();

        assert_eq!(outcome, TransactionOutcome::Discarded);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a");
        assert_eq!(entries(dir.path()), vec!["elements.ts"]);
    }

    #[test]
    fn missing_artifact_is_a_read_error() {
        let dir = tempdir().unwrap();
        let err = ArtifactTransaction::run(&dir.path().join("absent.ts"), |t| {
            Ok::<_, TransactionError>(t.to_string())
        })
        .unwrap_err();
        assert!(matches!(err, TransactionError::Read { .. }));
    }

    #[test]
    fn replace_creates_missing_artifacts_and_skips_identical_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("elements.json");
        let tx = ArtifactTransaction::new(&path);

        assert_eq!(tx.replace("[]\n").unwrap(), TransactionOutcome::Committed);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]\n");
        assert_eq!(tx.replace("[]\n").unwrap(), TransactionOutcome::Unchanged);
        assert_eq!(entries(dir.path()), vec!["elements.json"]);
    }
}
