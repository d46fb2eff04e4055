//! Thumbnails arrive inline as base64 `data:` URIs.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use quill_core::ports::ImageUpload;

use crate::middleware::error::AppError;

/// Decode a `data:<mime>;base64,<payload>` URI into an upload.
///
/// Without an explicit name the file is called `thumbnail.<subtype>`.
pub fn decode(data_uri: &str, file_name: Option<String>) -> Result<ImageUpload, AppError> {
    let invalid = || AppError::BadRequest("Thumbnail must be a base64 data URI".to_string());

    let (header, payload) = data_uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .ok_or_else(invalid)?;
    let mime = header.strip_suffix(";base64").ok_or_else(invalid)?;

    let bytes = STANDARD.decode(payload.trim()).map_err(|_| invalid())?;
    if bytes.is_empty() {
        return Err(AppError::BadRequest("Thumbnail is empty".to_string()));
    }

    let file_name = file_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| {
            let extension = mime.split_once('/').map_or("bin", |(_, sub)| sub);
            format!("thumbnail.{extension}")
        });

    Ok(ImageUpload { bytes, file_name })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_names_file_after_mime() {
        let upload = decode("data:image/png;base64,iVBORw==", None).unwrap();
        assert_eq!(upload.file_name, "thumbnail.png");
        assert_eq!(upload.bytes, vec![0x89, 0x50, 0x4e, 0x47]);
    }

    #[test]
    fn test_decode_keeps_given_name() {
        let upload = decode("data:image/jpeg;base64,/9j/", Some("cover.jpg".into())).unwrap();
        assert_eq!(upload.file_name, "cover.jpg");
    }

    #[test]
    fn test_rejects_plain_text() {
        assert!(decode("not an image", None).is_err());
        assert!(decode("data:image/png,raw", None).is_err());
        assert!(decode("data:image/png;base64,***", None).is_err());
    }
}
