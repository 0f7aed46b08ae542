//! In-memory evidence vault for tests.

use crate::workflow::domain::{
    EvidenceId, EvidenceUpload, FileError, StoredEvidence, TaskId, TaskLogId,
};
use crate::workflow::ports::EvidenceVault;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory evidence vault.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEvidenceVault {
    files: Arc<RwLock<HashMap<EvidenceId, Vec<u8>>>>,
}

impl InMemoryEvidenceVault {
    /// Creates an empty vault.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored bytes for an evidence file, if present.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::Storage`] when the state lock is poisoned.
    pub fn bytes(&self, id: EvidenceId) -> Result<Option<Vec<u8>>, FileError> {
        let files = self
            .files
            .read()
            .map_err(|err| FileError::storage(std::io::Error::other(err.to_string())))?;
        Ok(files.get(&id).cloned())
    }
}

impl EvidenceVault for InMemoryEvidenceVault {
    fn store_file(
        &self,
        task_id: TaskId,
        log_id: TaskLogId,
        evidence_id: EvidenceId,
        upload: &EvidenceUpload,
    ) -> Result<StoredEvidence, FileError> {
        let mut files = self
            .files
            .write()
            .map_err(|err| FileError::storage(std::io::Error::other(err.to_string())))?;
        files.insert(evidence_id, upload.bytes().to_vec());

        let digest = Sha256::digest(upload.bytes());
        Ok(StoredEvidence {
            locator: format!("mem://{task_id}/{log_id}/{evidence_id}"),
            sha256: format!("{digest:x}"),
            size_bytes: upload.bytes().len() as u64,
        })
    }
}
