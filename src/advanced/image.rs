//! Image payload handling for advanced-mode requests.
//!
//! The wire format wants a mime type plus raw base64; attachments arrive
//! either as data-URLs or as files on disk.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use lazy_static::lazy_static;
use regex::Regex;

use super::AdvancedError;

/// Mime type assumed when a data-URL prefix is malformed.
pub const FALLBACK_MIME: &str = "image/jpeg";

lazy_static! {
    static ref DATA_URL: Regex = Regex::new(r"^data:(.+);base64,(.+)$").unwrap();
}

/// Inline image payload as sent to the completion service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

/// Split a data-URL into mime type and base64 payload.
///
/// A malformed prefix falls back to [`FALLBACK_MIME`]; when a comma is
/// present the payload is whatever follows the first one, otherwise the
/// whole string is taken as raw base64.
pub fn parse_data_url(url: &str) -> ImagePayload {
    if let Some(caps) = DATA_URL.captures(url) {
        return ImagePayload {
            mime_type: caps[1].to_string(),
            data: caps[2].to_string(),
        };
    }

    let data = match url.split_once(',') {
        Some((_, rest)) => rest.to_string(),
        None => url.to_string(),
    };
    ImagePayload {
        mime_type: FALLBACK_MIME.to_string(),
        data,
    }
}

/// Read an image file and encode it as a data-URL, sniffing the mime type
/// from the file contents.
pub fn data_url_from_file(path: &Path) -> Result<String, AdvancedError> {
    let bytes = std::fs::read(path)?;
    let mime = match image::guess_format(&bytes) {
        Ok(format) => format.to_mime_type(),
        Err(_) => FALLBACK_MIME,
    };
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn well_formed_data_url() {
        let payload = parse_data_url("data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.data, "iVBORw0KGgo=");
    }

    #[test]
    fn malformed_prefix_falls_back_after_the_comma() {
        let payload = parse_data_url("data:image/png,notbase64marked");
        assert_eq!(payload.mime_type, FALLBACK_MIME);
        assert_eq!(payload.data, "notbase64marked");
    }

    #[test]
    fn raw_base64_is_taken_whole() {
        let payload = parse_data_url("iVBORw0KGgo=");
        assert_eq!(payload.mime_type, FALLBACK_MIME);
        assert_eq!(payload.data, "iVBORw0KGgo=");
    }

    #[test]
    fn file_round_trips_through_a_data_url() {
        let png_magic: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(png_magic).unwrap();

        let url = data_url_from_file(file.path()).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        let payload = parse_data_url(&url);
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.data, STANDARD.encode(png_magic));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = data_url_from_file(Path::new("/nonexistent/image.png"));
        assert!(err.is_err());
    }
}
