//! Captured photograph handed over by the input collector.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{CatchguideError, Result};

/// MIME type assumed when the bytes carry no recognizable signature.
pub const DEFAULT_MIME: &str = "image/jpeg";

/// A photograph captured for one submission.
///
/// The buffer is never modified after construction and is dropped once the
/// workflow finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    bytes: Vec<u8>,
    mime: String,
}

impl CapturedImage {
    /// Wrap raw bytes, sniffing the MIME type from the content.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self::with_declared_mime(bytes, None)
    }

    /// Wrap raw bytes, using `declared` when the content has no known signature.
    ///
    /// Only `image/*` declarations are honoured.
    pub fn with_declared_mime(bytes: impl Into<Vec<u8>>, declared: Option<&str>) -> Self {
        let bytes = bytes.into();
        let declared = declared
            .map(|mime| mime.trim().to_ascii_lowercase())
            .filter(|mime| mime.len() > "image/".len() && mime.starts_with("image/"));
        let mime = match sniff_mime(&bytes) {
            Some(sniffed) => sniffed.to_string(),
            None => declared.unwrap_or_else(|| DEFAULT_MIME.to_string()),
        };
        Self { bytes, mime }
    }

    /// Read an image from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| CatchguideError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(bytes))
    }

    /// Decode a base64 payload (as posted by the web page).
    ///
    /// A `data:` URL prefix is accepted; its MIME type is used when the
    /// bytes themselves are not recognized.
    pub fn from_base64(encoded: &str) -> std::result::Result<Self, base64::DecodeError> {
        let (declared, payload) = match encoded.split_once(";base64,") {
            Some((prefix, rest)) if prefix.starts_with("data:") => {
                (Some(&prefix["data:".len()..]), rest)
            }
            _ => (None, encoded),
        };
        let bytes = STANDARD.decode(payload.trim())?;
        Ok(Self::with_declared_mime(bytes, declared))
    }

    /// The raw bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Inferred MIME type.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Encode as a `data:` URL for inline transmission.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

/// Detect common image formats from their magic bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_known_formats() {
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]), Some("image/jpeg"));
        assert_eq!(
            sniff_mime(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00]),
            Some("image/png")
        );
        assert_eq!(sniff_mime(b"GIF89a...."), Some("image/gif"));
        assert_eq!(sniff_mime(b"RIFF\x00\x00\x00\x00WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_mime(b"<jpeg-bytes>"), None);
    }

    #[test]
    fn test_unknown_defaults_to_jpeg() {
        let image = CapturedImage::new(b"<jpeg-bytes>".to_vec());
        assert_eq!(image.mime(), "image/jpeg");
        assert_eq!(image.len(), 12);
    }

    #[test]
    fn test_data_url() {
        let image = CapturedImage::new(vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        assert_eq!(image.data_url(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn test_from_base64_accepts_data_url() {
        let plain = CapturedImage::from_base64("iVBORw0KGgo=").unwrap();
        let prefixed = CapturedImage::from_base64("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(plain, prefixed);
        assert_eq!(plain.mime(), "image/png");
    }

    #[test]
    fn test_declared_mime_used_when_unrecognized() {
        // "ftypheic" box of a phone photo; no signature we sniff.
        let heic = CapturedImage::from_base64("data:image/heic;base64,AAAAGGZ0eXBoZWlj").unwrap();
        assert_eq!(heic.mime(), "image/heic");
        assert!(heic.data_url().starts_with("data:image/heic;base64,"));

        // Magic bytes win over a wrong declaration.
        let png = CapturedImage::from_base64("data:image/jpeg;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(png.mime(), "image/png");

        // Non-image declarations fall back to the default.
        let other = CapturedImage::from_base64("data:text/plain;base64,AAAAGGZ0eXBoZWlj").unwrap();
        assert_eq!(other.mime(), DEFAULT_MIME);
    }

    #[test]
    fn test_from_base64_rejects_garbage() {
        assert!(CapturedImage::from_base64("not base64 at all!").is_err());
    }
}
