// src/types/mod.rs
pub mod upload;

pub use upload::{JobDescription, UploadedFile, ValidFile};
