use actix_multipart::Multipart;
use futures_util::StreamExt;

use std::collections::HashMap;

use crate::common::UploadError;
use crate::storage::UploadedFile;

/// A fully buffered multipart body: text fields by name plus file parts.
#[derive(Debug, Default)]
pub struct MultipartData {
    texts: HashMap<String, String>,
    files: Vec<(String, UploadedFile)>,
}

impl MultipartData {
    /// Reads the whole body, failing once more than `limit` bytes arrive.
    /// File inputs submitted without a file are dropped.
    pub async fn read(mut payload: Multipart, limit: usize) -> Result<Self, UploadError> {
        let mut data = Self::default();
        let mut total = 0usize;

        while let Some(field) = payload.next().await {
            let mut field = field.map_err(|e| UploadError::Malformed(e.to_string()))?;

            let (name, file_name) = match field.content_disposition() {
                Some(cd) => (
                    cd.get_name().unwrap_or_default().to_string(),
                    cd.get_filename().map(str::to_string),
                ),
                None => continue,
            };
            let content_type = field.content_type().map(|mime| mime.to_string());

            let mut bytes = Vec::new();
            while let Some(chunk) = field.next().await {
                let chunk = chunk.map_err(|e| UploadError::Malformed(e.to_string()))?;
                total += chunk.len();
                if total > limit {
                    return Err(UploadError::TooLarge(limit));
                }
                bytes.extend_from_slice(&chunk);
            }

            match file_name {
                Some(file_name) => {
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    data.files.push((
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            bytes,
                        },
                    ));
                }
                None => {
                    let text = String::from_utf8(bytes).map_err(|_| {
                        UploadError::Malformed(format!("field '{}' is not valid UTF-8", name))
                    })?;
                    data.texts.insert(name, text);
                }
            }
        }

        Ok(data)
    }

    /// Trimmed text value; empty when the field is absent.
    pub fn text(&self, name: &str) -> &str {
        self.texts.get(name).map(|v| v.trim()).unwrap_or_default()
    }

    /// Text fields in no particular order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.texts.iter().map(|(k, v)| (k.as_str(), v.trim()))
    }

    /// HTML checkboxes are only submitted when ticked.
    pub fn checked(&self, name: &str) -> bool {
        self.texts.contains_key(name)
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, file)| file)
    }

    pub fn files(&self, name: &str) -> Vec<UploadedFile> {
        self.files
            .iter()
            .filter(|(field, _)| field == name)
            .map(|(_, file)| file.clone())
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn from_parts(texts: &[(&str, &str)], files: Vec<(String, UploadedFile)>) -> Self {
        Self {
            texts: texts
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files,
        }
    }
}
