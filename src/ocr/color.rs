//! Colour-mode normalisation ahead of recognition.

use image::DynamicImage;

/// How an image's pixel layout relates to what the recognizer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// 8-bit grey or 8-bit RGB, passed through untouched
    Compatible,
    /// A known layout (alpha, 16-bit, float) with a lossless-enough RGB conversion
    Convertible,
    /// Any other layout; converted to RGB as a best effort
    Unsupported,
}

/// Classify an image's pixel layout.
pub fn classify(image: &DynamicImage) -> ColorMode {
    match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => ColorMode::Compatible,
        DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageRgba8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_)
        | DynamicImage::ImageRgb32F(_)
        | DynamicImage::ImageRgba32F(_) => ColorMode::Convertible,
        _ => ColorMode::Unsupported,
    }
}

/// Bring an image into 8-bit grey or 8-bit RGB.
pub fn normalize(image: DynamicImage) -> DynamicImage {
    match classify(&image) {
        ColorMode::Compatible => image,
        ColorMode::Convertible | ColorMode::Unsupported => {
            DynamicImage::ImageRgb8(image.to_rgb8())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, RgbImage, RgbaImage};

    #[test]
    fn test_gray_is_compatible() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(2, 2));
        assert_eq!(classify(&img), ColorMode::Compatible);
        assert!(matches!(normalize(img), DynamicImage::ImageLuma8(_)));
    }

    #[test]
    fn test_rgb_is_compatible() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
        assert_eq!(classify(&img), ColorMode::Compatible);
    }

    #[test]
    fn test_rgba_converts_to_rgb() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(3, 1));
        assert_eq!(classify(&img), ColorMode::Convertible);

        let normalized = normalize(img);
        assert!(matches!(normalized, DynamicImage::ImageRgb8(_)));
        assert_eq!(normalized.width(), 3);
    }
}
