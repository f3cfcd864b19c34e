pub use local::*;
pub use memory::*;

mod local;
mod memory;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use std::fmt;

use crate::common::StorageError;

/// Blob store that hands back a stable URL for every uploaded object.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str {
        "unknown"
    }

    /// Writes `bytes` under `path` and returns the public URL. Objects are
    /// write-once; an existing path is an error.
    async fn upload(
        &self,
        path: &ObjectPath,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectPrefix {
    Banners,
    Activities,
    MemberPhotos,
}

impl ObjectPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Banners => "banners",
            Self::Activities => "activities",
            Self::MemberPhotos => "member-photos",
        }
    }
}

impl fmt::Display for ObjectPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relative object key, always `<prefix>/<name>` with a sanitized name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectPath(String);

impl ObjectPath {
    /// `<prefix>/<unix-millis>_<tag>_<sanitized file name>`. The random tag
    /// keeps same-named files uploaded within one millisecond apart.
    pub fn timestamped(prefix: ObjectPrefix, file_name: &str) -> Self {
        let tag = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}/{}_{}_{}",
            prefix,
            Utc::now().timestamp_millis(),
            &tag[..8],
            sanitize_file_name(file_name)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file received from a form, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"))
    }
}

/// Uploads `file` under a fresh timestamped path below `prefix`.
pub async fn store_upload(
    objects: &dyn ObjectStore,
    prefix: ObjectPrefix,
    file: &UploadedFile,
) -> Result<String, StorageError> {
    let path = ObjectPath::timestamped(prefix, &file.file_name);
    objects
        .upload(&path, file.bytes.clone(), file.content_type.as_deref())
        .await
}

/// Keeps ASCII alphanumerics plus `.`, `-` and `_`; everything else becomes `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    // A bare "." or ".." would escape the prefix directory.
    if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
        format!("file{}", sanitized.len())
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_everything_outside_the_safe_set() {
        assert_eq!(sanitize_file_name("my photo (1).JPG"), "my_photo__1_.JPG");
        assert_eq!(sanitize_file_name("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_file_name("ñandú.png"), "_and_.png");
    }

    #[test]
    fn sanitize_never_yields_a_dot_segment() {
        assert_eq!(sanitize_file_name(""), "file0");
        assert_eq!(sanitize_file_name(".."), "file2");
    }

    #[test]
    fn timestamped_paths_carry_the_prefix() {
        let path = ObjectPath::timestamped(ObjectPrefix::MemberPhotos, "me.png");
        let (prefix, name) = path.as_str().split_once('/').unwrap();

        assert_eq!(prefix, "member-photos");
        let mut parts = name.splitn(3, '_');
        assert!(parts.next().unwrap().parse::<i64>().is_ok());
        let tag = parts.next().unwrap();
        assert_eq!(tag.len(), 8);
        assert!(tag.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(parts.next().unwrap(), "me.png");
    }

    #[test]
    fn same_name_uploads_get_distinct_paths() {
        let first = ObjectPath::timestamped(ObjectPrefix::Activities, "image.jpg");
        let second = ObjectPath::timestamped(ObjectPrefix::Activities, "image.jpg");

        assert_ne!(first, second);
        assert!(first.as_str().ends_with("_image.jpg"));
    }
}
