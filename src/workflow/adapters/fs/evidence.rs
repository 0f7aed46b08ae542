//! Filesystem evidence vault backed by a capability-scoped directory.
//!
//! Bytes land under `<task id>/<log id>/<evidence id>` relative to the
//! vault root; the engine can never write outside the directory it was
//! opened on.

use crate::workflow::domain::{
    EvidenceId, EvidenceUpload, FileError, StoredEvidence, TaskId, TaskLogId,
};
use crate::workflow::ports::EvidenceVault;
use cap_std::fs_utf8::Dir;
use sha2::{Digest, Sha256};

/// Evidence vault writing files beneath a single root directory.
#[derive(Debug)]
pub struct FsEvidenceVault {
    root: Dir,
}

impl FsEvidenceVault {
    /// Opens a vault rooted at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::Storage`] when the directory cannot be opened.
    pub fn open(path: &str) -> Result<Self, FileError> {
        let root =
            Dir::open_ambient_dir(path, cap_std::ambient_authority()).map_err(FileError::storage)?;
        Ok(Self { root })
    }

    /// Creates a vault from an already-open capability directory.
    #[must_use]
    pub const fn from_dir(root: Dir) -> Self {
        Self { root }
    }
}

impl EvidenceVault for FsEvidenceVault {
    fn store_file(
        &self,
        task_id: TaskId,
        log_id: TaskLogId,
        evidence_id: EvidenceId,
        upload: &EvidenceUpload,
    ) -> Result<StoredEvidence, FileError> {
        let dir_path = format!("{task_id}/{log_id}");
        self.root
            .create_dir_all(&dir_path)
            .map_err(FileError::storage)?;

        let locator = format!("{dir_path}/{evidence_id}");
        self.root
            .write(&locator, upload.bytes())
            .map_err(FileError::storage)?;

        let digest = Sha256::digest(upload.bytes());
        Ok(StoredEvidence {
            locator,
            sha256: format!("{digest:x}"),
            size_bytes: upload.bytes().len() as u64,
        })
    }
}
