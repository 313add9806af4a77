use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Accepted upload formats.
///
/// Uploads are gated on extension before any hashing or extraction happens;
/// anything outside {pdf, jpg, jpeg, png} is rejected up front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    Pdf,
    Jpeg,
    Png,
}

impl DocumentKind {
    /// Determine the kind from a filename's extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Result<Self, TypeError> {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "" => Err(TypeError::UnsupportedFormat("(no extension)".into())),
            other => Err(TypeError::UnsupportedFormat(format!(".{other}"))),
        }
    }

    /// The IANA media type sent to the vision model.
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Canonical file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_extensions() {
        assert_eq!(DocumentKind::from_filename("a.pdf").unwrap(), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_filename("a.jpg").unwrap(), DocumentKind::Jpeg);
        assert_eq!(DocumentKind::from_filename("a.jpeg").unwrap(), DocumentKind::Jpeg);
        assert_eq!(DocumentKind::from_filename("a.png").unwrap(), DocumentKind::Png);
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(DocumentKind::from_filename("SCAN.PDF").unwrap(), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_filename("photo.JPeG").unwrap(), DocumentKind::Jpeg);
    }

    #[test]
    fn rejects_docx() {
        assert!(matches!(
            DocumentKind::from_filename("contract.docx"),
            Err(TypeError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn rejects_missing_extension() {
        assert!(DocumentKind::from_filename("README").is_err());
    }

    #[test]
    fn uses_last_extension() {
        assert_eq!(
            DocumentKind::from_filename("archive.tar.pdf").unwrap(),
            DocumentKind::Pdf
        );
        assert!(DocumentKind::from_filename("doc.pdf.exe").is_err());
    }

    #[test]
    fn media_types() {
        assert_eq!(DocumentKind::Pdf.media_type(), "application/pdf");
        assert_eq!(DocumentKind::Jpeg.media_type(), "image/jpeg");
        assert_eq!(DocumentKind::Png.media_type(), "image/png");
    }
}
