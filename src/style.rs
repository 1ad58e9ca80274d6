//! Small value types shared by every layout component: edges, alignments,
//! sizes and line styles.

use crate::colour::{colours, Colour};
use crate::layout::Edges;
use crate::units::Pt;
use serde::{Deserialize, Serialize};

/// One of the four sides of a box (page, cell, row)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    /// All edges, clockwise starting at the top (the same order as CSS)
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Horizontal placement of content within a cell
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical placement of content within a cell
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// A dimension that is either given by the caller or computed during layout
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    /// Compute the dimension from the content and the available space
    #[default]
    Auto,
    /// Use exactly this dimension
    Fixed(Pt),
}

impl Size {
    /// The fixed value, if there is one
    pub fn fixed(self) -> Option<Pt> {
        match self {
            Size::Fixed(v) => Some(v),
            Size::Auto => None,
        }
    }

    pub fn is_auto(self) -> bool {
        matches!(self, Size::Auto)
    }
}

impl From<Pt> for Size {
    fn from(value: Pt) -> Self {
        Size::Fixed(value)
    }
}

/// How strokes are dashed
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashPattern {
    #[default]
    Solid,
    Dashed { on: Pt, off: Pt },
}

/// The stroke style used for borders: colour, width and dash pattern
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub colour: Colour,
    pub width: Pt,
    pub dash: DashPattern,
}

impl Default for LineStyle {
    /// Black, half a point wide, solid. Surfaces are reset to this after every border
    /// or background is drawn.
    fn default() -> Self {
        LineStyle {
            colour: colours::BLACK,
            width: Pt(0.5),
            dash: DashPattern::Solid,
        }
    }
}

impl LineStyle {
    /// A solid line of the given colour and width
    pub fn solid<C: Into<Colour>>(colour: C, width: Pt) -> LineStyle {
        LineStyle {
            colour: colour.into(),
            width,
            dash: DashPattern::Solid,
        }
    }

    /// Change the dash pattern, returning the modified style
    pub fn dashed(mut self, on: Pt, off: Pt) -> LineStyle {
        self.dash = DashPattern::Dashed { on, off };
        self
    }
}

/// How a rectangle is painted
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FillMode {
    Fill,
    Stroke,
    FillAndStroke,
}

/// A bundle of optional style settings that can be applied to cells and rows in one go,
/// e.g. after deserializing it from a configuration file:
///
/// ```
/// use pdf_table::Styles;
///
/// let styles: Styles = serde_json::from_str(r#"{
///     "font_size": 8.0,
///     "borders": { "bottom": { "colour": { "g": 0.5 }, "width": 1.0 } },
///     "paddings": { "top": 2.0, "bottom": 2.0 },
///     "text_align": "right"
/// }"#).unwrap();
/// assert!(styles.borders.bottom.is_some());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Styles {
    pub font_size: Option<Pt>,
    pub text_colour: Option<Colour>,
    pub background: Option<Colour>,
    pub borders: Edges<Option<LineStyle>>,
    pub paddings: Edges<Option<Pt>>,
    pub text_align: Option<HAlign>,
}
