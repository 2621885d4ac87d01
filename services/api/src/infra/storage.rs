use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context as _;
use uuid::Uuid;

use crate::domain::repository::ResumeStore;
use crate::error::ApiError;

/// Resume store backed by a local directory. Files are named
/// `<user_id>.<ext>` — the key is server-controlled, so a client-supplied
/// filename can never escape the directory.
#[derive(Clone)]
pub struct LocalResumeStore {
    pub root: PathBuf,
}

impl LocalResumeStore {
    fn file_path(&self, user_id: Uuid, extension: &str) -> PathBuf {
        self.root.join(format!("{user_id}.{extension}"))
    }
}

impl ResumeStore for LocalResumeStore {
    async fn save(&self, user_id: Uuid, extension: &str, data: &[u8]) -> Result<(), ApiError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .context("create resume directory")?;
        tokio::fs::write(self.file_path(user_id, extension), data)
            .await
            .context("write resume file")?;
        Ok(())
    }

    async fn load(&self, user_id: Uuid, extension: &str) -> Result<Option<Vec<u8>>, ApiError> {
        match tokio::fs::read(self.file_path(user_id, extension)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("read resume file").into()),
        }
    }

    async fn remove(&self, user_id: Uuid, extension: &str) -> Result<bool, ApiError> {
        match tokio::fs::remove_file(self.file_path(user_id, extension)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(anyhow::Error::new(e).context("remove resume file").into()),
        }
    }
}
