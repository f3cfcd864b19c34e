use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use super::{ObjectPath, ObjectStore};
use crate::common::StorageError;

/// Writes objects under a local directory that the HTTP server exposes at
/// `public_base`.
pub struct LocalObjectStore {
    root: PathBuf,
    public_base: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base: &str) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &ObjectPath) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path.as_str());
        let only_normal = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));

        if !only_normal {
            return Err(StorageError::InvalidPath(path.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    fn backend_tag(&self) -> &'static str {
        "local"
    }

    async fn upload(
        &self,
        path: &ObjectPath,
        bytes: Vec<u8>,
        _content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        let target = self.resolve(path)?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(path.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        file.write_all(&bytes).await?;
        file.flush().await?;

        tracing::debug!(path = %path, size = bytes.len(), "stored object");

        Ok(format!("{}/{}", self.public_base, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ObjectPrefix;

    #[tokio::test]
    async fn upload_writes_once_and_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path(), "/uploads/");
        let path = ObjectPath::timestamped(ObjectPrefix::Banners, "hero.png");

        let url = store
            .upload(&path, b"png".to_vec(), Some("image/png"))
            .await
            .unwrap();

        assert_eq!(url, format!("/uploads/{}", path));
        assert_eq!(std::fs::read(dir.path().join(path.as_str())).unwrap(), b"png");

        let again = store.upload(&path, b"other".to_vec(), None).await;
        assert!(matches!(again, Err(StorageError::AlreadyExists(_))));
    }
}
