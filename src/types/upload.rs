// src/types/upload.rs
//! What the user hands over: the resume file and the job description

use anyhow::{Context, Result};
use std::path::Path;

use crate::utils::declared_media_type;

/// A file as selected by the user. Re-selecting builds a new value, the
/// fields are never changed after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    name: String,
    mime_type: String,
    content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            content,
        }
    }

    /// Read a file from disk. Without an explicit `mime_type` the type is
    /// declared from the extension, the way a browser file picker does it.
    pub async fn from_path(path: &Path, mime_type: Option<&str>) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Invalid file name: {}", path.display()))?
            .to_string();

        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let mime_type = mime_type
            .map(str::to_string)
            .unwrap_or_else(|| declared_media_type(&name).to_string());

        Ok(Self::new(name, mime_type, content))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Proof that a file passed [`crate::core::validator::validate`].
#[derive(Debug, Clone)]
pub struct ValidFile(UploadedFile);

impl ValidFile {
    pub(crate) fn new(file: UploadedFile) -> Self {
        Self(file)
    }

    pub fn file(&self) -> &UploadedFile {
        &self.0
    }
}

/// Free text pasted by the user. Empty is allowed and sent as is; the
/// analysis service picks its own default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobDescription(String);

impl JobDescription {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for JobDescription {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for JobDescription {
    fn from(text: String) -> Self {
        Self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_from_path_declares_type_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"%PDF-1.4\n").unwrap();

        let upload = UploadedFile::from_path(&path, None).await.unwrap();
        assert_eq!(upload.name(), "resume.pdf");
        assert_eq!(upload.mime_type(), "application/pdf");
        assert_eq!(upload.content(), b"%PDF-1.4\n");
    }

    #[tokio::test]
    async fn test_from_path_explicit_type_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.bin");
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        let upload = UploadedFile::from_path(&path, Some("application/pdf"))
            .await
            .unwrap();
        assert_eq!(upload.mime_type(), "application/pdf");
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let err = UploadedFile::from_path(Path::new("/nonexistent/resume.pdf"), None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_job_description_kept_verbatim() {
        assert!(JobDescription::default().is_empty());
        assert_eq!(JobDescription::from("  Rust dev ").as_str(), "  Rust dev ");
    }
}
