//! Byte-storage port for evidence files.

use crate::workflow::domain::{EvidenceId, EvidenceUpload, FileError, StoredEvidence, TaskId,
    TaskLogId};

/// Stores evidence file bytes outside the transactional row store.
///
/// Implementations are synchronous because they are called from inside a
/// store transaction. Byte storage is not transactional: a rolled-back
/// action may leave orphaned bytes, but never a reachable reference,
/// because the reference rows roll back with the transaction.
pub trait EvidenceVault: Send + Sync {
    /// Writes the upload's bytes and returns the stored locator, checksum,
    /// and size.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::Storage`] when the bytes cannot be written.
    fn store_file(
        &self,
        task_id: TaskId,
        log_id: TaskLogId,
        evidence_id: EvidenceId,
        upload: &EvidenceUpload,
    ) -> Result<StoredEvidence, FileError>;
}
