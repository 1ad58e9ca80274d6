use crate::error::ResourceError;
use crate::units::Pt;
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The font metrics the layout needs. All values are in font units; callers scale them by
/// `size / units_per_em`.
pub trait FontMetrics: fmt::Debug + Send + Sync {
    /// Font units per em square
    fn units_per_em(&self) -> u16;

    /// Distance between consecutive baselines, including the line gap
    fn line_height(&self) -> i32;

    /// Extra spacing between lines (leading)
    fn line_gap(&self) -> i32;

    /// Horizontal advance of each character, in order
    fn glyph_widths(&self, chars: &[char]) -> Result<Vec<u16>, ResourceError>;
}

/// A shared, immutable handle to a font
pub type FontHandle = Arc<dyn FontMetrics>;

/// A font at a given size, the unit cells and rows are styled with
#[derive(Clone, Debug)]
pub struct FontSpec {
    pub font: FontHandle,
    pub size: Pt,
}

impl FontSpec {
    pub fn new<F: FontMetrics + 'static>(font: F, size: Pt) -> FontSpec {
        FontSpec {
            font: Arc::new(font),
            size,
        }
    }

    /// The same font at a different size
    pub fn with_size(&self, size: Pt) -> FontSpec {
        FontSpec {
            font: self.font.clone(),
            size,
        }
    }

    /// Scaling factor from font units to points
    pub fn scaling(&self) -> f32 {
        *self.size / self.font.units_per_em() as f32
    }

    /// The height of one line of text, without the line gap
    pub fn height(&self) -> Pt {
        Pt((self.font.line_height() - self.font.line_gap()) as f32 * self.scaling())
    }
}

/// A parsed TrueType / OpenType font. Only the metrics are used; drawing surfaces are
/// responsible for embedding.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, ResourceError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    /// Obtain the full name of the font, if it has one
    pub fn name(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Obtain the family name of the font, if it has one
    pub fn family(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    fn advance(&self, ch: char) -> Result<u16, ResourceError> {
        let face = self.face.as_face_ref();
        let gid = face
            .glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .or_else(|| face.glyph_index('?'))
            .ok_or(ResourceError::MissingGlyph(ch))?;
        Ok(face.glyph_hor_advance(gid).unwrap_or_default())
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name())
            .field("units_per_em", &self.units_per_em())
            .finish()
    }
}

impl FontMetrics for Font {
    fn units_per_em(&self) -> u16 {
        self.face.as_face_ref().units_per_em()
    }

    fn line_height(&self) -> i32 {
        let face = self.face.as_face_ref();
        face.ascender() as i32 - face.descender() as i32 + face.line_gap() as i32
    }

    fn line_gap(&self) -> i32 {
        self.face.as_face_ref().line_gap() as i32
    }

    fn glyph_widths(&self, chars: &[char]) -> Result<Vec<u16>, ResourceError> {
        chars.iter().map(|&ch| self.advance(ch)).collect()
    }
}

/// A synthetic font where every glyph has the same advance unless overridden. Useful for
/// monospaced approximations and for predictable layouts.
///
/// ```
/// use pdf_table::{FontSpec, UniformFont, Pt};
///
/// // 1024 units per em, 512 unit advances: 6pt per glyph at 12pt
/// let font = FontSpec::new(UniformFont::new(1024, 512), Pt(12.0));
/// assert_eq!(pdf_table::layout::width_of_text("abc", &font).unwrap(), Pt(18.0));
/// ```
#[derive(Debug, Clone)]
pub struct UniformFont {
    pub units_per_em: u16,
    pub advance: u16,
    pub line_height: i32,
    pub line_gap: i32,
    pub overrides: HashMap<char, u16>,
}

impl UniformFont {
    /// A font with the given em size and advance, a line height of 1.2em and a line gap
    /// of 0.2em
    pub fn new(units_per_em: u16, advance: u16) -> UniformFont {
        UniformFont {
            units_per_em,
            advance,
            line_height: units_per_em as i32 * 6 / 5,
            line_gap: units_per_em as i32 / 5,
            overrides: HashMap::new(),
        }
    }

    /// Give a single character a different advance
    pub fn with_advance(mut self, ch: char, advance: u16) -> UniformFont {
        self.overrides.insert(ch, advance);
        self
    }
}

impl FontMetrics for UniformFont {
    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn line_height(&self) -> i32 {
        self.line_height
    }

    fn line_gap(&self) -> i32 {
        self.line_gap
    }

    fn glyph_widths(&self, chars: &[char]) -> Result<Vec<u16>, ResourceError> {
        Ok(chars
            .iter()
            .map(|ch| self.overrides.get(ch).copied().unwrap_or(self.advance))
            .collect())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn font_height_excludes_line_gap() {
        // (1228 - 204) / 1024 * 10
        assert_eq!(wide_font().height(), Pt(10.0));
        assert_eq!(wide_font().with_size(Pt(20.0)).height(), Pt(20.0));
    }

    #[test]
    fn uniform_font_honours_overrides() {
        let font = UniformFont::new(1000, 2000).with_advance(' ', 500);
        assert_eq!(font.glyph_widths(&['a', ' ', 'b']).unwrap(), vec![2000, 500, 2000]);
    }

    #[test]
    fn rejects_garbage_font_data() {
        assert!(matches!(
            Font::load(vec![0, 1, 2, 3]),
            Err(ResourceError::FaceParsing(_))
        ));
    }
}
