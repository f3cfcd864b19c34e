use crate::common::StorageError;
use crate::storage::{store_upload, ObjectPrefix, ObjectStore, UploadedFile};

/// URLs of uploaded activity media, split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityMedia {
    pub photos: Vec<String>,
    pub videos: Vec<String>,
}

/// Uploads every file under `activities/`. `image/*` goes to photos and
/// anything else to videos. Stops at the first failed upload.
pub async fn upload_activity_media(
    objects: &dyn ObjectStore,
    files: &[UploadedFile],
) -> Result<ActivityMedia, StorageError> {
    let mut media = ActivityMedia::default();

    for file in files {
        let url = store_upload(objects, ObjectPrefix::Activities, file).await?;
        if file.is_image() {
            media.photos.push(url);
        } else {
            media.videos.push(url);
        }
    }

    Ok(media)
}

pub async fn upload_banner_image(
    objects: &dyn ObjectStore,
    file: &UploadedFile,
) -> Result<String, StorageError> {
    store_upload(objects, ObjectPrefix::Banners, file).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryObjectStore;

    fn file(name: &str, content_type: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: Some(content_type.to_string()),
            bytes: name.as_bytes().to_vec(),
        }
    }

    #[tokio::test]
    async fn images_become_photos_and_the_rest_videos() {
        let objects = MemoryObjectStore::new();
        let files = [
            file("a.jpg", "image/jpeg"),
            file("b.mp4", "video/mp4"),
            file("c.png", "image/png"),
        ];

        let media = upload_activity_media(&objects, &files).await.unwrap();

        assert_eq!(media.photos.len(), 2);
        assert_eq!(media.videos.len(), 1);
        assert!(media.videos[0].contains("activities/"));
        assert_eq!(objects.count(), 3);
    }

    #[tokio::test]
    async fn same_named_files_are_all_kept() {
        let objects = MemoryObjectStore::new();
        let files = [file("image.jpg", "image/jpeg"), file("image.jpg", "image/jpeg")];

        let media = upload_activity_media(&objects, &files).await.unwrap();

        assert_eq!(media.photos.len(), 2);
        assert_ne!(media.photos[0], media.photos[1]);
        assert_eq!(objects.count(), 2);
    }
}
