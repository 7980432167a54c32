use arboard::Clipboard;
use bytes::Bytes;
use image::ImageFormat;
use tracing::debug;

use crate::errors::AppError;
use crate::image_sources::ImageSource;
use crate::AppResult;

pub fn read_clipboard_image() -> AppResult<ImageSource> {
    let mut clipboard = Clipboard::new()?;
    let image_data = clipboard.get().image()?;
    let maybe_image: Option<image::RgbaImage> = image::ImageBuffer::from_raw(
        image_data.width as u32,
        image_data.height as u32,
        image_data.bytes.into_owned(),
    );
    match maybe_image {
        Some(image) => {
            let mut writer = std::io::Cursor::new(Vec::new());
            image.write_to(&mut writer, ImageFormat::Png)?;
            let png_image_bytes = writer.into_inner();
            let timestamp = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|duration| duration.as_secs())
                .unwrap_or_default();
            debug!(
                "Pasted {}x{} image from clipboard",
                image.width(),
                image.height()
            );
            Ok(ImageSource::Memory {
                label: format!("{}{}.png", ImageSource::CLIPBOARD_LOCATION, timestamp),
                data: Bytes::from(png_image_bytes),
            })
        }
        None => Err(AppError::SystemError {
            message: "Clipboard doesn't contain any supported image".into(),
        }),
    }
}
