// src/core/validator.rs
//! Gate that decides whether a selected file may be submitted

use crate::error::ValidationError;
use crate::types::{UploadedFile, ValidFile};
use crate::utils::PDF_MEDIA_TYPE;

/// Accept only a file whose declared media type is exactly `application/pdf`.
///
/// The name and extension are not looked at: `cv.txt` declared as a pdf
/// passes, `resume.pdf` declared as anything else does not.
pub fn validate(file: Option<&UploadedFile>) -> Result<ValidFile, ValidationError> {
    let file = file.ok_or(ValidationError::MissingFile)?;

    if file.mime_type() != PDF_MEDIA_TYPE {
        return Err(ValidationError::NotPdf {
            media_type: file.mime_type().to_string(),
        });
    }

    Ok(ValidFile::new(file.clone()))
}
