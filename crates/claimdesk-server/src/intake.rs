//! Request intake: the checks an upload passes before the pipeline runs

use thiserror::Error;

/// Reasons a submission is turned away with `400 Bad Request`
#[derive(Debug, Error)]
pub enum IntakeError {
    /// No file parts in the request
    #[error("At least one file is required")]
    NoFiles,

    /// More files than a claim may carry
    #[error("Max of {max} files allowed")]
    TooManyFiles {
        /// Number of files submitted
        submitted: usize,
        /// Configured maximum
        max: usize,
    },

    /// A part whose content type is not the accepted one
    #[error("{file_name} is not {expected} (got {actual})")]
    UnsupportedContentType {
        /// Uploaded file name
        file_name: String,
        /// Content type the server accepts
        expected: String,
        /// Content type the part carried
        actual: String,
    },

    /// The multipart body itself could not be read
    #[error("Malformed multipart body: {0}")]
    Malformed(String),

    /// Page text could not be extracted from a file
    #[error("{file_name} could not be read: {reason}")]
    Unreadable {
        /// Uploaded file name
        file_name: String,
        /// Underlying failure
        reason: String,
    },

    /// A file with no pages
    #[error("{0} contains no pages")]
    NoPages(String),
}

/// One uploaded file, buffered
#[derive(Debug, Clone)]
pub struct Upload {
    /// File name from the part headers
    pub file_name: String,

    /// Content type from the part headers, if any
    pub content_type: Option<String>,

    /// File contents
    pub bytes: Vec<u8>,
}

/// Limits applied to every submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakePolicy {
    /// Maximum files per request
    pub max_documents: usize,

    /// Content type every file must carry
    pub accepted_content_type: String,

    /// Request body limit in bytes
    pub max_upload_bytes: usize,
}

impl IntakePolicy {
    /// Check the file count, then each file's content type
    ///
    /// Runs before any file is parsed, so a rejected request costs no
    /// extraction or model work.
    pub fn check(&self, uploads: &[Upload]) -> Result<(), IntakeError> {
        if uploads.is_empty() {
            return Err(IntakeError::NoFiles);
        }
        if uploads.len() > self.max_documents {
            return Err(IntakeError::TooManyFiles {
                submitted: uploads.len(),
                max: self.max_documents,
            });
        }

        for upload in uploads {
            let actual = upload.content_type.as_deref().unwrap_or("");
            if !self.accepts(actual) {
                return Err(IntakeError::UnsupportedContentType {
                    file_name: upload.file_name.clone(),
                    expected: self.accepted_content_type.clone(),
                    actual: if actual.is_empty() {
                        "none".to_string()
                    } else {
                        actual.to_string()
                    },
                });
            }
        }
        Ok(())
    }

    /// Whether a content type header matches, ignoring case and parameters
    pub fn accepts(&self, content_type: &str) -> bool {
        let essence = content_type.split(';').next().unwrap_or("").trim();
        essence.eq_ignore_ascii_case(self.accepted_content_type.trim())
    }
}
