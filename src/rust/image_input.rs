//! Decoding user-submitted images and turning them into model input.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use ndarray::Array4;

use crate::detector::DetectorError;

/// A decoded image ready to be classified.
#[derive(Debug, Clone)]
pub struct ImageInput {
    name: String,
    format: ImageFormat,
    image: DynamicImage,
}

impl ImageInput {
    /// Decodes raw bytes, rejecting anything that is not a recognized image format.
    pub fn from_bytes(bytes: &[u8], name: impl Into<String>) -> Result<Self, DetectorError> {
        let name = name.into();
        if bytes.is_empty() {
            return Err(DetectorError::ImageError(format!("{} is empty", name)));
        }
        let format = image::guess_format(bytes).map_err(|_| {
            DetectorError::ImageError(format!("{} is not a supported image file", name))
        })?;
        let image = image::load_from_memory_with_format(bytes, format)?;

        let (width, height) = image.dimensions();
        log::debug!("Decoded {} as {:?} ({}x{})", name, format, width, height);
        Ok(Self { name, format, image })
    }

    /// Reads and decodes an image file.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DetectorError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DetectorError::ImageError(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_bytes(&bytes, path.display().to_string())
    }

    pub fn from_image(image: DynamicImage, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            format: ImageFormat::Png,
            image,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Center-crops to a square, resizes to `size` and scales RGB to `[-1, 1]`.
    ///
    /// The result is an NHWC tensor of shape `[1, size, size, 3]`, the layout
    /// Teachable Machine image models are trained on.
    pub fn to_tensor(&self, size: u32) -> Result<Array4<f32>, DetectorError> {
        if size == 0 {
            return Err(DetectorError::ValidationError("Input size must be positive".into()));
        }
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return Err(DetectorError::ImageError(format!("{} has no pixels", self.name)));
        }

        let side = width.min(height);
        let x = (width - side) / 2;
        let y = (height - side) / 2;
        let rgb = self
            .image
            .crop_imm(x, y, side, side)
            .resize_exact(size, size, FilterType::Triangle)
            .to_rgb8();

        let size = size as usize;
        let mut tensor = Array4::<f32>::zeros((1, size, size, 3));
        for (px, py, pixel) in rgb.enumerate_pixels() {
            for channel in 0..3 {
                tensor[[0, py as usize, px as usize, channel]] = pixel[channel] as f32 / 127.5 - 1.0;
            }
        }
        Ok(tensor)
    }
}
