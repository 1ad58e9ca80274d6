use crate::error::Result;
use crate::font::FontSpec;
use crate::units::Pt;

/// The outcome of measuring (and possibly wrapping) a string
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMetrics {
    /// The lines the text was broken into
    pub lines: Vec<String>,
    /// The width of the widest line
    pub text_width: Pt,
    /// The width the text was wrapped to, or the text width if it wasn't wrapped
    pub max_width: Pt,
    /// The height of all lines, excluding any extra line spacing
    pub height: Pt,
}

/// Calculate the width of a given string of text given the font and font size
pub fn width_of_text(text: &str, font: &FontSpec) -> Result<Pt> {
    let chars: Vec<char> = text.chars().collect();
    let units: u32 = font
        .font
        .glyph_widths(&chars)?
        .into_iter()
        .map(u32::from)
        .sum();
    Ok(Pt(units as f32 * font.scaling()))
}

/// The height of a single line of text (ascent to descent, without the line gap)
pub fn font_height(font: &FontSpec) -> Pt {
    font.height()
}

/// Splits the text into paragraphs on newlines, and greedily wraps every paragraph that is
/// wider than `max_width` at spaces. Words are never split, so a single word that is wider
/// than `max_width` ends up on a line of its own that still overflows.
///
/// Empty paragraphs are dropped. A `max_width` that isn't positive disables wrapping.
///
/// ```
/// use pdf_table::{FontSpec, UniformFont, Pt};
/// use pdf_table::layout::measure_text;
///
/// let font = FontSpec::new(UniformFont::new(1024, 512), Pt(10.0));
/// let metrics = measure_text("lorem ipsum dolor", &font, Some(Pt(60.0))).unwrap();
/// assert_eq!(metrics.lines, vec!["lorem ipsum", "dolor"]);
/// assert_eq!(metrics.text_width, Pt(55.0));
/// ```
pub fn measure_text(text: &str, font: &FontSpec, max_width: Option<Pt>) -> Result<TextMetrics> {
    let wrap_width = max_width.filter(|w| *w > Pt(0.0));

    let mut lines: Vec<String> = Vec::new();
    let mut text_width = Pt(0.0);

    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            continue;
        }

        let paragraph_width = width_of_text(paragraph, font)?;
        match wrap_width {
            Some(limit) if paragraph_width > limit => {
                for line in wrap_paragraph(paragraph, font, limit)? {
                    text_width = text_width.max(width_of_text(&line, font)?);
                    lines.push(line);
                }
            }
            _ => {
                text_width = text_width.max(paragraph_width);
                lines.push(paragraph.to_string());
            }
        }
    }

    let height = font.height() * lines.len() as f32;
    Ok(TextMetrics {
        lines,
        text_width,
        max_width: max_width.unwrap_or(text_width),
        height,
    })
}

/// Greedy word wrap of a single paragraph
fn wrap_paragraph(paragraph: &str, font: &FontSpec, max_width: Pt) -> Result<Vec<String>> {
    let space_width = width_of_text(" ", font)?;

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    // width of the current line including a trailing space
    let mut x = Pt(0.0);

    for word in paragraph.trim().split(' ') {
        let word_width = width_of_text(word, font)?;

        if x + word_width <= max_width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        } else {
            push_line(&mut lines, &current);
            current.clear();
            current.push_str(word);
            x = Pt(0.0);
        }
        x += word_width + space_width;
    }
    push_line(&mut lines, &current);

    Ok(lines)
}

fn push_line(lines: &mut Vec<String>, line: &str) {
    let line = line.trim();
    if !line.is_empty() {
        lines.push(line.to_string());
    }
}
