use thiserror::Error;

/// Largest image the analysis service accepts (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5_242_880;

/// Multipart field the analysis service reads the image from.
pub const UPLOAD_FIELD: &str = "file";

/// Anything that can be offered to the uploader: a browser `File`, or an
/// in-memory image in tests.
pub trait ImageSource {
    fn file_name(&self) -> String;
    fn mime_type(&self) -> String;
    fn size(&self) -> u64;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No image selected.")]
    NoFile,
    #[error("Only one image can be analyzed at a time ({0} were selected).")]
    TooManyFiles(usize),
    #[error("\"{name}\" is not a supported image. Supported formats: JPG, JPEG, PNG.")]
    UnsupportedType { name: String, mime_type: String },
    #[error("\"{name}\" is empty.")]
    Empty { name: String },
    #[error("\"{name}\" is too large ({size} bytes). The maximum size is 5MB.")]
    TooLarge { name: String, size: u64, limit: u64 },
}

/// Client-side admission rules for uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub allowed_subtypes: Vec<String>,
    pub max_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_subtypes: vec!["jpeg".to_string(), "png".to_string()],
            max_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl UploadPolicy {
    pub fn check<F: ImageSource>(&self, file: &F) -> Result<(), ValidationError> {
        let name = file.file_name();
        let mime_type = file.mime_type();

        if !self.accepts_mime(&mime_type) {
            return Err(ValidationError::UnsupportedType { name, mime_type });
        }

        let size = file.size();
        if size == 0 {
            return Err(ValidationError::Empty { name });
        }
        if size > self.max_bytes {
            return Err(ValidationError::TooLarge {
                name,
                size,
                limit: self.max_bytes,
            });
        }

        Ok(())
    }

    fn accepts_mime(&self, mime_type: &str) -> bool {
        let essence = mime_type.split(';').next().unwrap_or_default().trim();
        let Some((kind, subtype)) = essence.split_once('/') else {
            return false;
        };

        kind.eq_ignore_ascii_case("image")
            && self
                .allowed_subtypes
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(subtype))
    }
}

/// A file that passed [`UploadPolicy::check`]. Only constructible through
/// validation.
#[derive(Debug, Clone)]
pub struct UploadRequest<F> {
    file: F,
}

impl<F: ImageSource> UploadRequest<F> {
    pub fn new(file: F, policy: &UploadPolicy) -> Result<Self, ValidationError> {
        policy.check(&file)?;
        Ok(Self { file })
    }

    pub fn file(&self) -> &F {
        &self.file
    }

    pub fn into_file(self) -> F {
        self.file
    }
}

/// Narrows a drop or picker selection to the single file the uploader takes.
pub fn select_single<F>(files: Vec<F>) -> Result<F, ValidationError> {
    let count = files.len();
    let mut files = files.into_iter();
    match (files.next(), count) {
        (None, _) => Err(ValidationError::NoFile),
        (Some(file), 1) => Ok(file),
        (Some(_), n) => Err(ValidationError::TooManyFiles(n)),
    }
}
