//! Client-side validation
//!
//! These checks run before a request is built. A value that fails here never
//! reaches the network.

use thiserror::Error;

use crate::model::UploadFile;

pub const MIN_PROPOSAL_NAME_LEN: usize = 3;
pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Proposal name must be at least {min} characters.")]
    NameTooShort { min: usize },

    #[error("Please upload PDF files only. \"{file_name}\" is not a PDF.")]
    NotPdf { file_name: String },

    #[error("File is required.")]
    EmptyFile,

    #[error("{0} is required.")]
    MissingId(&'static str),

    #[error("Message cannot be empty.")]
    EmptyMessage,
}

/// Validate a new proposal name, returning it trimmed
pub fn validate_proposal_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.chars().count() < MIN_PROPOSAL_NAME_LEN {
        return Err(ValidationError::NameTooShort {
            min: MIN_PROPOSAL_NAME_LEN,
        });
    }
    Ok(trimmed.to_string())
}

/// Accept only PDF uploads
///
/// A declared content type must be `application/pdf` (parameters and case
/// ignored). Without one, the bytes must start with the `%PDF-` header.
pub fn validate_pdf_upload(file: &UploadFile) -> Result<(), ValidationError> {
    if file.bytes.is_empty() {
        return Err(ValidationError::EmptyFile);
    }

    let is_pdf = match file.content_type.as_deref() {
        Some(declared) => {
            let essence = declared.split(';').next().unwrap_or_default().trim();
            essence.eq_ignore_ascii_case(PDF_MIME_TYPE)
        }
        None => file.bytes.starts_with(PDF_MAGIC),
    };

    if is_pdf {
        Ok(())
    } else {
        Err(ValidationError::NotPdf {
            file_name: file.file_name.clone(),
        })
    }
}

/// Backend ids are positive; zero means "missing"
pub fn require_id(what: &'static str, id: i64) -> Result<i64, ValidationError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(ValidationError::MissingId(what))
    }
}

pub fn validate_chat_message(content: &str) -> Result<&str, ValidationError> {
    if content.trim().is_empty() {
        Err(ValidationError::EmptyMessage)
    } else {
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_rejected() {
        assert_eq!(
            validate_proposal_name("ab"),
            Err(ValidationError::NameTooShort { min: 3 })
        );
        assert_eq!(
            validate_proposal_name("  ab   "),
            Err(ValidationError::NameTooShort { min: 3 })
        );
        assert_eq!(validate_proposal_name(" abc ").unwrap(), "abc");
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        assert!(validate_proposal_name("éé").is_err());
        assert!(validate_proposal_name("日本語").is_ok());
    }

    #[test]
    fn short_name_message() {
        let err = validate_proposal_name("x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Proposal name must be at least 3 characters."
        );
    }

    #[test]
    fn declared_pdf_is_accepted() {
        let file = UploadFile::new(
            "a.pdf",
            Some("Application/PDF; charset=binary".into()),
            b"%PDF-1.7".to_vec(),
        );
        assert!(validate_pdf_upload(&file).is_ok());
    }

    #[test]
    fn declared_non_pdf_is_rejected_even_with_pdf_bytes() {
        let file = UploadFile::new("a.png", Some("image/png".into()), b"%PDF-1.7".to_vec());
        assert_eq!(
            validate_pdf_upload(&file),
            Err(ValidationError::NotPdf {
                file_name: "a.png".into()
            })
        );
    }

    #[test]
    fn undeclared_upload_is_sniffed() {
        let pdf = UploadFile::new("scan", None, b"%PDF-1.4\n...".to_vec());
        assert!(validate_pdf_upload(&pdf).is_ok());

        let text = UploadFile::new("notes.pdf", None, b"hello".to_vec());
        assert!(validate_pdf_upload(&text).is_err());
    }

    #[test]
    fn empty_upload_is_rejected() {
        let file = UploadFile::pdf("a.pdf", Vec::new());
        assert_eq!(validate_pdf_upload(&file), Err(ValidationError::EmptyFile));
    }

    #[test]
    fn ids_must_be_positive() {
        assert_eq!(require_id("Proposal ID", 4), Ok(4));
        let err = require_id("Proposal ID", 0).unwrap_err();
        assert_eq!(err.to_string(), "Proposal ID is required.");
    }
}
