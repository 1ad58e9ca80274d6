use thiserror::Error;

/// Failures of the collaborators the layout depends on (fonts, images, the file system).
/// These are propagated unchanged: layout cannot continue without real measurements.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to read the image
    Image(#[from] image::ImageError),

    #[error("font has no glyph (or replacement glyph) for {0:?}")]
    /// The font can't measure a character, not even with a replacement glyph
    MissingGlyph(char),
}

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum TableError {
    #[error("cell has neither text nor an image to lay out")]
    /// A cell was measured without any content
    EmptyCell,

    #[error("no font is set on the cell, its row, or the surface")]
    /// Text was measured without any font to measure it with
    MissingFont,

    #[error("image scale must lie in (0, 1], got {0}")]
    /// An image was given a scale factor outside of (0, 1]
    InvalidScale(f32),

    #[error("page is missing from the document")]
    /// A page id in the page order refers to a page that isn't in the document
    PageMissing,

    #[error(transparent)]
    /// A font, image or I/O collaborator failed
    Resource(#[from] ResourceError),
}

impl From<std::io::Error> for TableError {
    fn from(e: std::io::Error) -> Self {
        TableError::Resource(e.into())
    }
}

impl From<image::ImageError> for TableError {
    fn from(e: image::ImageError) -> Self {
        TableError::Resource(e.into())
    }
}

pub type Result<T, E = TableError> = std::result::Result<T, E>;
