use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::sync::Arc;

pub const PLACEHOLDER_WIDTH: u32 = 500;
pub const PLACEHOLDER_HEIGHT: u32 = 750;
pub const PLACEHOLDER_COLOR: [u8; 3] = [26, 26, 26];

/// Solid dark gray image shown when a movie has no poster
pub fn placeholder_image() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(
        PLACEHOLDER_WIDTH,
        PLACEHOLDER_HEIGHT,
        Rgb(PLACEHOLDER_COLOR),
    ))
}

/// Outcome of poster resolution, as stored in the poster cache.
///
/// `Unavailable` records the decision that no poster exists (or none could be
/// fetched) so the id is never fetched again; the placeholder pixels are
/// generated when needed rather than cached.
#[derive(Debug, Clone)]
pub enum Poster {
    Fetched(Arc<DynamicImage>),
    Unavailable,
}

impl Poster {
    pub fn fetched(image: DynamicImage) -> Self {
        Poster::Fetched(Arc::new(image))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Poster::Unavailable)
    }

    /// Image to display: the fetched poster or a freshly generated placeholder
    pub fn image(&self) -> Arc<DynamicImage> {
        match self {
            Poster::Fetched(image) => Arc::clone(image),
            Poster::Unavailable => Arc::new(placeholder_image()),
        }
    }

    /// Encodes the display image as PNG
    pub fn to_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut buf = Cursor::new(Vec::new());
        self.image().write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }
}
