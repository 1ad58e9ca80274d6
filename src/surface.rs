//! The contracts between the table layout and whatever actually marks a page.
//!
//! The layout never draws pixels or bytes itself. It asks a [Surface] for its size,
//! margins and current font, and hands it text, lines, rectangles and images in page
//! coordinates (origin at the bottom-left, y growing upwards). [Page](crate::Page) is an
//! in-memory implementation that records everything it is asked to draw.

use crate::colour::Colour;
use crate::error::Result;
use crate::font::FontSpec;
use crate::image::{Image, ImageSource};
use crate::layout::Margins;
use crate::style::{Edge, FillMode, LineStyle};
use crate::units::Pt;

/// A drawable page
pub trait Surface {
    /// Width of the page
    fn width(&self) -> Pt;

    /// Height of the page
    fn height(&self) -> Pt;

    /// All four page margins
    fn margins(&self) -> &Margins;

    /// A single page margin
    fn margin(&self, edge: Edge) -> Pt {
        *self.margins().get(edge)
    }

    /// The font that text is currently drawn with, if one has been set
    fn font(&self) -> Option<&FontSpec>;

    /// Change the font subsequent text is drawn with
    fn set_font(&mut self, font: FontSpec);

    /// Change the colour subsequent text and filled shapes are painted with
    fn set_fill_colour(&mut self, colour: Colour);

    /// Change the stroke style subsequent lines are drawn with
    fn set_style(&mut self, style: LineStyle);

    /// Draw a single line of text with its baseline starting at `(x, y)`
    fn draw_text(&mut self, text: &str, x: Pt, y: Pt);

    fn draw_line(&mut self, x1: Pt, y1: Pt, x2: Pt, y2: Pt);

    fn draw_rectangle(&mut self, x1: Pt, y1: Pt, x2: Pt, y2: Pt, mode: FillMode);

    /// Draw an image into the box spanned by the two corners
    fn draw_image(&mut self, image: &Image, x1: Pt, y1: Pt, x2: Pt, y2: Pt);

    /// Load an image so that it can be measured and drawn
    fn load_image(&mut self, source: &ImageSource) -> Result<Image>;

    /// Convert a point from table space (relative to the content area's top-left corner,
    /// y growing downwards) into page space
    fn to_page(&self, x: Pt, y: Pt) -> (Pt, Pt) {
        (
            x + self.margin(Edge::Left),
            self.height() - y - self.margin(Edge::Top),
        )
    }
}

/// Creates the pages a table overflows onto
pub trait PageFactory: Surface + Sized {
    /// A new, empty page with the same size, margins and font as this one
    fn spawn_page(&self) -> Self;
}
