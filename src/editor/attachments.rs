//! Pending Attachments
//!
//! Files picked in the editor but not yet uploaded. Acceptance needs two
//! independent checks to agree: the image/PDF detection (MIME type or
//! extension) and the enumerated extension allowlist.

pub const MAX_ATTACHMENTS: usize = 10;
pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Extensions that look like an image or a PDF
const IMAGE_OR_PDF_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "heic", "heif", "tif", "tiff", "svg", "pdf",
];

/// Extensions the backend stores
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "heic", "pdf"];

/// A file handle the editor can attach
pub trait Attachable: Clone {
    fn file_name(&self) -> String;
    fn mime_type(&self) -> String;
    fn byte_size(&self) -> u64;
}

impl Attachable for web_sys::File {
    fn file_name(&self) -> String {
        self.name()
    }

    fn mime_type(&self) -> String {
        self.type_()
    }

    fn byte_size(&self) -> u64 {
        self.size() as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AttachmentWarning {
    #[error("Es sind höchstens {max} Dateien erlaubt. Überzählige Dateien wurden ignoriert.", max = MAX_ATTACHMENTS)]
    TooMany,
    #[error("Einige Dateien wurden abgelehnt. Erlaubt sind Bilder und PDFs bis 10 MB.")]
    Rejected,
}

fn extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

fn looks_like_image_or_pdf(mime: &str, ext: Option<&str>) -> bool {
    let mime = mime.to_ascii_lowercase();
    mime.starts_with("image/")
        || mime == "application/pdf"
        || ext.is_some_and(|e| IMAGE_OR_PDF_EXTENSIONS.contains(&e))
}

fn has_allowed_extension(ext: Option<&str>) -> bool {
    ext.is_some_and(|e| ALLOWED_EXTENSIONS.contains(&e))
}

pub fn is_acceptable<F: Attachable>(file: &F) -> bool {
    let ext = extension(&file.file_name());
    looks_like_image_or_pdf(&file.mime_type(), ext.as_deref())
        && file.byte_size() <= MAX_ATTACHMENT_BYTES
        && has_allowed_extension(ext.as_deref())
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentList<F> {
    files: Vec<F>,
}

impl<F> Default for AttachmentList<F> {
    fn default() -> Self {
        Self { files: Vec::new() }
    }
}

impl<F: Attachable> AttachmentList<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge picked files. Returns the warning to show, if any.
    pub fn merge(&mut self, candidates: impl IntoIterator<Item = F>) -> Option<AttachmentWarning> {
        let mut rejected = false;
        for candidate in candidates {
            if !is_acceptable(&candidate) {
                rejected = true;
                continue;
            }
            let name = candidate.file_name();
            if self.contains(&name) {
                continue;
            }
            self.files.push(candidate);
        }

        if self.files.len() > MAX_ATTACHMENTS {
            self.files.truncate(MAX_ATTACHMENTS);
            Some(AttachmentWarning::TooMany)
        } else if rejected {
            Some(AttachmentWarning::Rejected)
        } else {
            None
        }
    }

    /// Remove by file name. Same-named files cannot be told apart.
    pub fn remove(&mut self, name: &str) {
        self.files.retain(|f| f.file_name() != name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.iter().any(|f| f.file_name() == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.files.iter().map(|f| f.file_name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
