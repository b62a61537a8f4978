// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageEncoder};

use crate::format::encode_data_url;
use crate::model::{CropSelection, PixelRect, Size};
use crate::workflow::WorkflowError;

pub const CROP_JPEG_QUALITY: u8 = 92;
pub const CROP_MIME: &str = "image/jpeg";

#[derive(Debug, thiserror::Error)]
pub enum CropError {
    #[error("no image is loaded")]
    NoImage,
    #[error("failed to fetch source image: {0}")]
    Fetch(#[source] WorkflowError),
    #[error("failed to decode source image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("crop selection maps to an empty pixel rectangle")]
    EmptySelection,
    #[error("failed to encode cropped image: {0}")]
    Encode(#[source] image::ImageError),
}

/// The image currently on screen: its decoded pixels plus the size it is displayed at.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DynamicImage,
    displayed: Size,
}

impl SourceImage {
    pub fn new(image: DynamicImage, displayed: Size) -> Self {
        Self { image, displayed }
    }

    pub fn decode(bytes: &[u8], displayed: Size) -> Result<Self, CropError> {
        let image = image::load_from_memory(bytes).map_err(CropError::Decode)?;
        Ok(Self::new(image, displayed))
    }

    pub fn natural_size(&self) -> Size {
        let (width, height) = self.image.dimensions();
        Size::new(f64::from(width), f64::from(height))
    }

    pub fn displayed_size(&self) -> Size {
        self.displayed
    }

    pub fn pixel_rect(&self, selection: &CropSelection) -> PixelRect {
        selection.to_source_pixels(self.natural_size(), self.displayed)
    }
}

/// Extracts `selection` from the source at full resolution and returns it as a JPEG data URL.
pub fn crop_to_data_url(
    source: &SourceImage,
    selection: &CropSelection,
) -> Result<String, CropError> {
    let rect = source.pixel_rect(selection);
    if rect.is_empty() {
        return Err(CropError::EmptySelection);
    }

    let cropped = source.image.crop_imm(rect.x, rect.y, rect.width, rect.height).to_rgb8();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, CROP_JPEG_QUALITY)
        .write_image(cropped.as_raw(), cropped.width(), cropped.height(), ExtendedColorType::Rgb8)
        .map_err(CropError::Encode)?;

    tracing::debug!(
        x = rect.x,
        y = rect.y,
        width = rect.width,
        height = rect.height,
        bytes = jpeg.len(),
        "cropped source image"
    );
    Ok(encode_data_url(CROP_MIME, &jpeg))
}

#[cfg(test)]
mod tests {
    use image::{ImageFormat, Rgb, RgbImage};

    use super::*;
    use crate::format::decode_data_url;

    fn source(width: u32, height: u32, displayed: Size) -> SourceImage {
        let image = RgbImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        });
        SourceImage::new(DynamicImage::ImageRgb8(image), displayed)
    }

    #[test]
    fn crop_scales_selection_to_natural_pixels() {
        let source = source(200, 100, Size::new(100.0, 50.0));
        let rect = source.pixel_rect(&CropSelection::new(10.0, 5.0, 20.0, 10.0));
        assert_eq!(rect, PixelRect { x: 20, y: 10, width: 40, height: 20 });
    }

    #[test]
    fn crop_produces_jpeg_data_url_of_selected_size() {
        let source = source(200, 100, Size::new(100.0, 50.0));
        let url = crop_to_data_url(&source, &CropSelection::new(0.0, 0.0, 25.0, 25.0))
            .expect("crop");
        assert!(url.starts_with("data:image/jpeg;base64,"));

        let decoded = decode_data_url(&url).expect("data url");
        let image = image::load_from_memory_with_format(&decoded.bytes, ImageFormat::Jpeg)
            .expect("jpeg");
        assert_eq!(image.dimensions(), (50, 50));
        let pixel = image.to_rgb8().get_pixel(25, 25).0;
        assert!(pixel[0] > 200 && pixel[2] < 60, "expected red, got {pixel:?}");
    }

    #[test]
    fn selection_outside_the_image_is_rejected() {
        let source = source(20, 20, Size::new(20.0, 20.0));
        let err = crop_to_data_url(&source, &CropSelection::new(30.0, 30.0, 5.0, 5.0)).unwrap_err();
        assert!(matches!(err, CropError::EmptySelection));
    }

    #[test]
    fn undecodable_bytes_fail_to_load() {
        let err = SourceImage::decode(b"not an image", Size::new(1.0, 1.0)).unwrap_err();
        assert!(matches!(err, CropError::Decode(_)));
    }
}
