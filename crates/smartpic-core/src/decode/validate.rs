//! Upload checks performed before decoding.

use tracing::warn;

use super::InputFileError;

/// Check the MIME type and size reported for an uploaded file.
///
/// The MIME type must start with `image/` and the size must be strictly
/// below `max_bytes`.
pub fn validate_upload(mime: &str, size: usize, max_bytes: usize) -> Result<(), InputFileError> {
    if !mime.starts_with("image/") {
        warn!(mime, "rejected upload: not an image");
        return Err(InputFileError::NotAnImage(mime.to_string()));
    }

    if size >= max_bytes {
        warn!(size, limit = max_bytes, "rejected upload: too large");
        return Err(InputFileError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 10 * 1024 * 1024;

    #[test]
    fn test_accepts_images() {
        for mime in ["image/png", "image/jpeg", "image/webp", "image/gif"] {
            assert!(validate_upload(mime, 1024, LIMIT).is_ok(), "{mime}");
        }
    }

    #[test]
    fn test_rejects_non_images() {
        assert_eq!(
            validate_upload("application/pdf", 10, LIMIT),
            Err(InputFileError::NotAnImage("application/pdf".to_string()))
        );
        assert!(validate_upload("", 10, LIMIT).is_err());
        // Prefix match is case sensitive, as browsers report lowercase types
        assert!(validate_upload("IMAGE/PNG", 10, LIMIT).is_err());
    }

    #[test]
    fn test_size_limit_is_exclusive() {
        assert!(validate_upload("image/png", LIMIT - 1, LIMIT).is_ok());
        assert_eq!(
            validate_upload("image/png", LIMIT, LIMIT),
            Err(InputFileError::TooLarge {
                size: LIMIT,
                limit: LIMIT
            })
        );
    }
}
