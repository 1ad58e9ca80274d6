use crate::error::ResourceError;
use std::path::{Path, PathBuf};

/// Where a cell's image comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// An image file on disk, loaded (and decoded) by the drawing surface
    Path(PathBuf),
    /// An image the caller has already measured; only its pixel dimensions are needed for
    /// layout
    Dimensions { width: u32, height: u32 },
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        ImageSource::Path(path.to_owned())
    }
}

impl From<&str> for ImageSource {
    fn from(path: &str) -> Self {
        ImageSource::Path(PathBuf::from(path))
    }
}

/// An image that a surface has loaded and can draw
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub source: ImageSource,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl Image {
    /// Read the pixel dimensions of an image source. Files are probed with [image], which
    /// only decodes as much of the file as it needs to find the dimensions.
    pub fn load(source: &ImageSource) -> Result<Image, ResourceError> {
        let (pixel_width, pixel_height) = match source {
            ImageSource::Path(path) => image::image_dimensions(path)?,
            ImageSource::Dimensions { width, height } => (*width, *height),
        };

        Ok(Image {
            source: source.clone(),
            pixel_width,
            pixel_height,
        })
    }
}
