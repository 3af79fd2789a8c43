//! Candidate file validation for gallery uploads.
//!
//! Checks run cheapest-first: MIME allow-list, size ceiling, then an
//! asynchronous decode to probe pixel dimensions. Each failure rejects only
//! the file at hand; the surrounding batch keeps going.

use std::sync::Arc;

use image::GenericImageView;

use crate::config::GalleryConfig;
use crate::error::{Error, Result};
use crate::models::SelectedFile;

/// Pixel dimensions probed from an encoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Reject files whose MIME type is not on the accepted list.
pub fn check_format(file: &SelectedFile, config: &GalleryConfig) -> Result<()> {
    if config.accepts_mime_type(&file.mime_type) {
        Ok(())
    } else {
        Err(Error::InvalidFormat {
            file_name: file.file_name.clone(),
            mime_type: file.mime_type.clone(),
        })
    }
}

/// Reject files over the upload size ceiling.
pub fn check_size(file: &SelectedFile, config: &GalleryConfig) -> Result<()> {
    let size_bytes = file.size_bytes();
    if size_bytes <= config.max_upload_bytes {
        Ok(())
    } else {
        Err(Error::FileTooLarge {
            file_name: file.file_name.clone(),
            size_bytes,
            limit_bytes: config.max_upload_bytes,
        })
    }
}

/// Decode the file off the caller's thread and report its dimensions.
pub async fn probe_dimensions(file: &SelectedFile) -> Result<ImageDimensions> {
    let file_name = file.file_name.clone();
    let bytes = Arc::clone(&file.bytes);

    let decoded = tokio::task::spawn_blocking(move || {
        image::load_from_memory(&bytes).map_err(|error| Error::DecodeFailure {
            file_name,
            reason: error.to_string(),
        })
    })
    .await
    .map_err(|error| Error::DecodeFailure {
        file_name: file.file_name.clone(),
        reason: format!("decode task failed: {error}"),
    })??;

    let (width, height) = decoded.dimensions();
    Ok(ImageDimensions { width, height })
}

/// Run the full validation pipeline for one candidate file.
pub async fn validate_candidate(file: &SelectedFile, config: &GalleryConfig) -> Result<()> {
    check_format(file, config)?;
    check_size(file, config)?;

    if config.validate_dimensions {
        let dimensions = probe_dimensions(file).await?;
        if dimensions.width < config.min_width || dimensions.height < config.min_height {
            return Err(Error::DimensionsTooSmall {
                file_name: file.file_name.clone(),
                width: dimensions.width,
                height: dimensions.height,
                min_width: config.min_width,
                min_height: config.min_height,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageBuffer, ImageFormat, Rgba};
    use pretty_assertions::assert_eq;

    use super::*;

    fn png_file(name: &str, width: u32, height: u32) -> SelectedFile {
        let pixels = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_fn(width, height, |_x, _y| {
            Rgba([180, 60, 30, 255])
        });

        let mut cursor = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(pixels)
            .write_to(&mut cursor, ImageFormat::Png)
            .unwrap();
        SelectedFile::new(name, "image/png", cursor.into_inner())
    }

    #[test]
    fn check_format_rejects_bmp() {
        let config = GalleryConfig::default();
        let file = SelectedFile::new("scan.bmp", "image/bmp", vec![0_u8; 8]);

        let err = check_format(&file, &config).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { .. }));
        assert!(err.to_string().contains("scan.bmp"));
    }

    #[test]
    fn check_size_enforces_ceiling() {
        let config = GalleryConfig {
            max_upload_bytes: 64,
            ..GalleryConfig::default()
        };

        let small = SelectedFile::new("ok.png", "image/png", vec![0_u8; 64]);
        assert!(check_size(&small, &config).is_ok());

        let big = SelectedFile::new("big.png", "image/png", vec![0_u8; 65]);
        let err = check_size(&big, &config).unwrap_err();
        assert!(matches!(
            err,
            Error::FileTooLarge {
                size_bytes: 65,
                limit_bytes: 64,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn probe_dimensions_reads_pixel_size() {
        let file = png_file("photo.png", 640, 480);
        let dimensions = probe_dimensions(&file).await.unwrap();
        assert_eq!(
            dimensions,
            ImageDimensions {
                width: 640,
                height: 480
            }
        );
    }

    #[tokio::test]
    async fn probe_dimensions_rejects_garbage() {
        let file = SelectedFile::new("broken.png", "image/png", b"not-an-image".to_vec());
        let err = probe_dimensions(&file).await.unwrap_err();
        assert!(matches!(err, Error::DecodeFailure { .. }));
    }

    #[tokio::test]
    async fn validate_candidate_rejects_small_images() {
        let config = GalleryConfig::default();
        let file = png_file("thumb.png", 200, 150);

        let err = validate_candidate(&file, &config).await.unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionsTooSmall {
                width: 200,
                height: 150,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn validate_candidate_accepts_a_valid_file() {
        let config = GalleryConfig::default();
        let file = png_file("photo.png", 800, 600);
        validate_candidate(&file, &config).await.unwrap();
    }

    #[tokio::test]
    async fn validate_candidate_skips_decode_when_disabled() {
        let config = GalleryConfig {
            validate_dimensions: false,
            ..GalleryConfig::default()
        };
        // Garbage bytes pass when the dimension probe is off.
        let file = SelectedFile::new("opaque.png", "image/png", b"not-an-image".to_vec());
        validate_candidate(&file, &config).await.unwrap();
    }
}
