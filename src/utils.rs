// src/utils.rs
use std::path::Path;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Media type a file picker would declare for this name
pub fn declared_media_type(filename: &str) -> &'static str {
    match get_file_extension(filename).as_deref() {
        Some("pdf") => PDF_MEDIA_TYPE,
        Some("docx") => DOCX_MEDIA_TYPE,
        Some("doc") => "application/msword",
        Some("txt") => "text/plain",
        _ => FALLBACK_MEDIA_TYPE,
    }
}

/// Render a score without a trailing `.0` for whole numbers
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("test.pdf"), Some("pdf".to_string()));
        assert_eq!(
            get_file_extension("document.DOCX"),
            Some("docx".to_string())
        );
        assert_eq!(get_file_extension("noext"), None);
    }

    #[test]
    fn test_declared_media_type() {
        assert_eq!(declared_media_type("resume.pdf"), PDF_MEDIA_TYPE);
        assert_eq!(declared_media_type("RESUME.PDF"), PDF_MEDIA_TYPE);
        assert_eq!(declared_media_type("resume.docx"), DOCX_MEDIA_TYPE);
        assert_eq!(declared_media_type("resume"), FALLBACK_MEDIA_TYPE);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(85.0), "85");
        assert_eq!(format_number(72.5), "72.5");
        assert_eq!(format_number(0.0), "0");
    }
}
