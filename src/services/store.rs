use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Analysis, Upload};

/// In-memory keyed store of uploads and analyses.
///
/// Records are immutable once inserted; readers share them through `Arc`.
/// Every lookup is scoped to an owner, and another owner's record reads as
/// missing.
#[derive(Default)]
pub struct Store {
    uploads: RwLock<HashMap<Uuid, Arc<Upload>>>,
    analyses: RwLock<HashMap<Uuid, Arc<Analysis>>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_upload(&self, upload: Upload) -> Arc<Upload> {
        let upload = Arc::new(upload);
        self.uploads.write().insert(upload.id, Arc::clone(&upload));
        info!("Stored upload {} ({} rows)", upload.id, upload.row_count);
        upload
    }

    pub fn upload(&self, owner: &str, id: Uuid) -> Result<Arc<Upload>, AppError> {
        self.uploads
            .read()
            .get(&id)
            .filter(|upload| upload.owner == owner)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("upload {}", id)))
    }

    /// The owner's uploads, newest first.
    pub fn uploads(&self, owner: &str) -> Vec<Arc<Upload>> {
        let mut uploads: Vec<_> = self
            .uploads
            .read()
            .values()
            .filter(|upload| upload.owner == owner)
            .cloned()
            .collect();
        uploads.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        uploads
    }

    /// Removes an upload together with every analysis built from it.
    pub fn delete_upload(&self, owner: &str, id: Uuid) -> Result<(), AppError> {
        let mut uploads = self.uploads.write();
        if !uploads.get(&id).map_or(false, |upload| upload.owner == owner) {
            return Err(AppError::NotFound(format!("upload {}", id)));
        }
        uploads.remove(&id);

        let mut analyses = self.analyses.write();
        let before = analyses.len();
        analyses.retain(|_, analysis| analysis.upload_id != id);
        debug!("Deleted upload {} and {} analyses", id, before - analyses.len());
        Ok(())
    }

    /// Stores an analysis while its upload still exists. Locks are taken in
    /// the same order as `delete_upload`, so a concurrent delete either sees
    /// this analysis and removes it or makes this insert fail.
    pub fn insert_analysis(&self, analysis: Analysis) -> Result<Arc<Analysis>, AppError> {
        let uploads = self.uploads.read();
        if !uploads
            .get(&analysis.upload_id)
            .map_or(false, |upload| upload.owner == analysis.owner)
        {
            return Err(AppError::NotFound(format!("upload {}", analysis.upload_id)));
        }

        let analysis = Arc::new(analysis);
        self.analyses.write().insert(analysis.id, Arc::clone(&analysis));
        info!("Stored analysis {} for upload {}", analysis.id, analysis.upload_id);
        Ok(analysis)
    }

    pub fn analysis(&self, owner: &str, id: Uuid) -> Result<Arc<Analysis>, AppError> {
        self.analyses
            .read()
            .get(&id)
            .filter(|analysis| analysis.owner == owner)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("analysis {}", id)))
    }

    /// The owner's analyses, optionally limited to one upload, newest first.
    pub fn analyses(&self, owner: &str, upload_id: Option<Uuid>) -> Vec<Arc<Analysis>> {
        let mut analyses: Vec<_> = self
            .analyses
            .read()
            .values()
            .filter(|analysis| analysis.owner == owner)
            .filter(|analysis| upload_id.map_or(true, |id| analysis.upload_id == id))
            .cloned()
            .collect();
        analyses.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        analyses
    }

    pub fn delete_analysis(&self, owner: &str, id: Uuid) -> Result<(), AppError> {
        let mut analyses = self.analyses.write();
        if !analyses.get(&id).map_or(false, |analysis| analysis.owner == owner) {
            return Err(AppError::NotFound(format!("analysis {}", id)));
        }
        analyses.remove(&id);
        Ok(())
    }
}
