use std::io::Cursor;
use std::path::PathBuf;

use base64::Engine;
use bytes::Bytes;
use image::ImageFormat;
use rvstruct::ValueStruct;
use tracing::debug;
use url::Url;

use crate::common_types::ImageBase64;
use crate::errors::AppError;
use crate::AppResult;

#[cfg(feature = "clipboard")]
mod clipboard;

/// Selected image: where it comes from and how to show it.
#[derive(Debug, Clone)]
pub enum ImageSource {
    File(PathBuf),
    Url(Url),
    /// Captured at selection time, e.g. pasted from the clipboard
    Memory { label: String, data: Bytes },
}

impl ImageSource {
    pub const CLIPBOARD_LOCATION: &'static str = "clipboard://";

    /// Recognizes `clipboard://`, `http(s)://` URLs, `file://` URLs and plain paths.
    /// The clipboard is read immediately, everything else is read on [`ImageSource::load`].
    pub fn open(location: &str) -> AppResult<Self> {
        let location = location.trim();
        if location.is_empty() {
            Err(AppError::UnsupportedImageSource {
                location: location.to_string(),
            })
        } else if location.starts_with(Self::CLIPBOARD_LOCATION) {
            Self::open_clipboard()
        } else if location.starts_with("http://") || location.starts_with("https://") {
            Ok(ImageSource::Url(Url::parse(location)?))
        } else if location.starts_with("file://") {
            let path = Url::parse(location)?.to_file_path().map_err(|_| {
                AppError::UnsupportedImageSource {
                    location: location.to_string(),
                }
            })?;
            Self::open_file(location, path)
        } else if !location.contains("://") {
            Self::open_file(location, PathBuf::from(location))
        } else {
            Err(AppError::UnsupportedImageSource {
                location: location.to_string(),
            })
        }
    }

    fn open_file(location: &str, path: PathBuf) -> AppResult<Self> {
        match mime_guess::from_path(&path).first() {
            Some(media_type) if media_type.type_() != mime::IMAGE => {
                Err(AppError::UnsupportedImageSource {
                    location: location.to_string(),
                })
            }
            _ => Ok(ImageSource::File(path)),
        }
    }

    #[cfg(feature = "clipboard")]
    fn open_clipboard() -> AppResult<Self> {
        clipboard::read_clipboard_image()
    }

    #[cfg(not(feature = "clipboard"))]
    fn open_clipboard() -> AppResult<Self> {
        Err(AppError::SystemError {
            message: "Clipboard support is not enabled in this build".to_string(),
        })
    }

    pub fn display_url(&self) -> String {
        match self {
            ImageSource::File(path) => path.display().to_string(),
            ImageSource::Url(url) => url.to_string(),
            ImageSource::Memory { label, .. } => label.clone(),
        }
    }

    pub async fn load(&self, client: &reqwest::Client) -> AppResult<Bytes> {
        match self {
            ImageSource::File(path) => Ok(Bytes::from(tokio::fs::read(path).await?)),
            ImageSource::Url(url) => {
                debug!("Downloading image from {}", url);
                let response = client.get(url.clone()).send().await?;
                if !response.status().is_success() {
                    return Err(AppError::SystemError {
                        message: format!(
                            "Failed to download image from {}. HTTP status: {}.",
                            url,
                            response.status()
                        ),
                    });
                }
                Ok(response.bytes().await?)
            }
            ImageSource::Memory { data, .. } => Ok(data.clone()),
        }
    }

    /// Best effort, only reads the image header.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match self {
            ImageSource::File(path) => image::image_dimensions(path).ok(),
            ImageSource::Url(_) => None,
            ImageSource::Memory { data, .. } => image::ImageReader::new(Cursor::new(data.as_ref()))
                .with_guessed_format()
                .ok()?
                .into_dimensions()
                .ok(),
        }
    }
}

/// Encodes image bytes as base64 PNG. Other raster formats are converted to PNG first.
pub fn encode_image_base64(data: &[u8]) -> AppResult<ImageBase64> {
    let image_format = image::guess_format(data)?;
    let png_image_bytes = if image_format == ImageFormat::Png {
        data.to_vec()
    } else {
        debug!("Converting {:?} image to PNG", image_format);
        let image = image::load_from_memory_with_format(data, image_format)?;
        let mut writer = Cursor::new(Vec::new());
        image.write_to(&mut writer, ImageFormat::Png)?;
        writer.into_inner()
    };
    Ok(ImageBase64::new(
        base64::engine::general_purpose::STANDARD.encode(png_image_bytes),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image_bytes(format: ImageFormat) -> Vec<u8> {
        let image = image::RgbImage::from_pixel(3, 2, image::Rgb([10, 20, 30]));
        let mut writer = Cursor::new(Vec::new());
        image
            .write_to(&mut writer, format)
            .expect("test image should be encoded");
        writer.into_inner()
    }

    #[test]
    fn open_locations_test() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        assert!(matches!(
            ImageSource::open("/tmp/page.png")?,
            ImageSource::File(path) if path == PathBuf::from("/tmp/page.png")
        ));
        assert!(matches!(
            ImageSource::open("file:///tmp/page.jpg")?,
            ImageSource::File(path) if path == PathBuf::from("/tmp/page.jpg")
        ));
        assert!(matches!(
            ImageSource::open("file:///tmp/my%20page.png")?,
            ImageSource::File(path) if path == PathBuf::from("/tmp/my page.png")
        ));
        assert!(matches!(
            ImageSource::open("file://localhost/tmp/page.png")?,
            ImageSource::File(path) if path == PathBuf::from("/tmp/page.png")
        ));
        assert!(matches!(
            ImageSource::open("file://example.com/tmp/page.png"),
            Err(AppError::UnsupportedImageSource { .. })
        ));
        assert!(matches!(
            ImageSource::open("file:///tmp/notes%20draft.txt"),
            Err(AppError::UnsupportedImageSource { .. })
        ));
        assert!(matches!(
            ImageSource::open("  https://example.com/page.png ")?,
            ImageSource::Url(url) if url.as_str() == "https://example.com/page.png"
        ));
        assert!(matches!(
            ImageSource::open("ftp://example.com/page.png"),
            Err(AppError::UnsupportedImageSource { .. })
        ));
        assert!(matches!(
            ImageSource::open("notes.txt"),
            Err(AppError::UnsupportedImageSource { .. })
        ));
        assert!(matches!(
            ImageSource::open(""),
            Err(AppError::UnsupportedImageSource { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn load_file_test() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let temp_dir = tempfile::TempDir::with_prefix("image_sources_tests_load")?;
        let temp_file = temp_dir.path().join("page.png");
        let png_bytes = test_image_bytes(ImageFormat::Png);
        tokio::fs::write(&temp_file, &png_bytes).await?;

        let source = ImageSource::open(&temp_file.to_string_lossy())?;
        assert_eq!(source.display_url(), temp_file.display().to_string());
        assert_eq!(source.dimensions(), Some((3, 2)));

        let loaded = source.load(&reqwest::Client::new()).await?;
        assert_eq!(loaded.as_ref(), png_bytes.as_slice());
        Ok(())
    }

    #[tokio::test]
    async fn load_missing_file_test() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let temp_dir = tempfile::TempDir::with_prefix("image_sources_tests_missing")?;
        let source = ImageSource::open(&temp_dir.path().join("missing.png").to_string_lossy())?;
        assert!(matches!(
            source.load(&reqwest::Client::new()).await,
            Err(AppError::InputOutputError(_))
        ));
        assert_eq!(source.dimensions(), None);
        Ok(())
    }

    #[test]
    fn memory_dimensions_test() {
        let source = ImageSource::Memory {
            label: "clipboard://1.png".to_string(),
            data: Bytes::from(test_image_bytes(ImageFormat::Png)),
        };
        assert_eq!(source.display_url(), "clipboard://1.png");
        assert_eq!(source.dimensions(), Some((3, 2)));
    }

    #[test]
    fn encode_png_test() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let png_bytes = test_image_bytes(ImageFormat::Png);
        let encoded = encode_image_base64(&png_bytes)?;
        let decoded = base64::engine::general_purpose::STANDARD.decode(encoded.value())?;
        assert_eq!(decoded, png_bytes);
        Ok(())
    }

    #[test]
    fn encode_converts_to_png_test() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bmp_bytes = test_image_bytes(ImageFormat::Bmp);
        let encoded = encode_image_base64(&bmp_bytes)?;
        let decoded = base64::engine::general_purpose::STANDARD.decode(encoded.value())?;
        assert_eq!(image::guess_format(&decoded)?, ImageFormat::Png);
        assert_eq!(
            image::load_from_memory(&decoded)?.to_rgb8().get_pixel(0, 0),
            &image::Rgb([10, 20, 30])
        );
        Ok(())
    }

    #[test]
    fn encode_invalid_image_test() {
        assert!(matches!(
            encode_image_base64(b"definitely not an image"),
            Err(AppError::ImageError(_))
        ));
    }
}
