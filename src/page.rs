use crate::colour::{colours, Colour};
use crate::error::Result;
use crate::font::FontSpec;
use crate::image::{Image, ImageSource};
use crate::layout::Margins;
use crate::rect::Rect;
use crate::style::{FillMode, LineStyle};
use crate::surface::{PageFactory, Surface};
use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

/// ISO A4, portrait
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
/// US Letter, portrait
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));

#[derive(Clone, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: Option<FontSpec>,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

#[derive(Clone, PartialEq, Debug)]
pub struct LineLayout {
    pub from: (Pt, Pt),
    pub to: (Pt, Pt),
    pub style: LineStyle,
}

#[derive(Clone, PartialEq, Debug)]
pub struct RectLayout {
    pub position: Rect,
    pub colour: Colour,
    pub style: LineStyle,
    pub mode: FillMode,
}

#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image: Image,
    pub position: Rect,
}

/// Everything that has been drawn on a page, in drawing order
#[derive(Clone, Debug)]
pub enum PageContents {
    Text(SpanLayout),
    Line(LineLayout),
    Rectangle(RectLayout),
    Image(ImageLayout),
}

/// A page that records what is drawn on it. Writing the recorded contents out (to a PDF,
/// an image, a test assertion) is up to the caller.
#[derive(Clone, Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    pub margins: Margins,
    /// The laid out contents
    pub contents: Vec<PageContents>,
    font: Option<FontSpec>,
    fill_colour: Colour,
    style: LineStyle,
}

impl Page {
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let (width, height) = size;
        let margins = margins.unwrap_or_default();
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: width - margins.right,
                y2: height - margins.top,
            },
            margins,
            contents: Vec::default(),
            font: None,
            fill_colour: colours::BLACK,
            style: LineStyle::default(),
        }
    }

    /// Set the font text is drawn with, returning the page
    pub fn with_font(mut self, font: FontSpec) -> Page {
        self.font = Some(font);
        self
    }

    /// Replace the page margins, updating the content box to match
    pub fn set_margins(&mut self, margins: Margins) {
        self.content_box = Rect {
            x1: margins.left,
            y1: margins.bottom,
            x2: self.media_box.x2 - margins.right,
            y2: self.media_box.y2 - margins.top,
        };
        self.margins = margins;
    }

    /// All text spans drawn on the page
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Text(span) => Some(span),
            _ => None,
        })
    }

    /// All lines drawn on the page
    pub fn lines(&self) -> impl Iterator<Item = &LineLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Line(line) => Some(line),
            _ => None,
        })
    }

    /// Whether any text span contains `needle`
    pub fn contains_text(&self, needle: &str) -> bool {
        self.spans().any(|span| span.text.contains(needle))
    }
}

impl Surface for Page {
    fn width(&self) -> Pt {
        self.media_box.width()
    }

    fn height(&self) -> Pt {
        self.media_box.height()
    }

    fn margins(&self) -> &Margins {
        &self.margins
    }

    fn font(&self) -> Option<&FontSpec> {
        self.font.as_ref()
    }

    fn set_font(&mut self, font: FontSpec) {
        self.font = Some(font);
    }

    fn set_fill_colour(&mut self, colour: Colour) {
        self.fill_colour = colour;
    }

    fn set_style(&mut self, style: LineStyle) {
        self.style = style;
    }

    fn draw_text(&mut self, text: &str, x: Pt, y: Pt) {
        self.contents.push(PageContents::Text(SpanLayout {
            text: text.to_string(),
            font: self.font.clone(),
            colour: self.fill_colour,
            coords: (x, y),
        }));
    }

    fn draw_line(&mut self, x1: Pt, y1: Pt, x2: Pt, y2: Pt) {
        self.contents.push(PageContents::Line(LineLayout {
            from: (x1, y1),
            to: (x2, y2),
            style: self.style,
        }));
    }

    fn draw_rectangle(&mut self, x1: Pt, y1: Pt, x2: Pt, y2: Pt, mode: FillMode) {
        self.contents.push(PageContents::Rectangle(RectLayout {
            position: Rect::from_corners((x1, y1), (x2, y2)),
            colour: self.fill_colour,
            style: self.style,
            mode,
        }));
    }

    fn draw_image(&mut self, image: &Image, x1: Pt, y1: Pt, x2: Pt, y2: Pt) {
        self.contents.push(PageContents::Image(ImageLayout {
            image: image.clone(),
            position: Rect::from_corners((x1, y1), (x2, y2)),
        }));
    }

    fn load_image(&mut self, source: &ImageSource) -> Result<Image> {
        Ok(Image::load(source)?)
    }
}

impl PageFactory for Page {
    fn spawn_page(&self) -> Page {
        let mut page = Page::new((self.width(), self.height()), Some(self.margins.clone()));
        page.font = self.font.clone();
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::testing::narrow_font;
    use crate::style::Edge;

    #[test]
    fn content_box_follows_margins() {
        let mut page = Page::new(A4, Some(Margins::trbl(Pt(30.0), Pt(20.0), Pt(30.0), Pt(20.0))));
        assert_eq!(page.content_box.x1, Pt(20.0));
        assert_eq!(page.content_box.y2, A4.1 - Pt(30.0));

        page.set_margins(Margins::all(Pt(10.0)));
        assert_eq!(page.content_box.x2, A4.0 - Pt(10.0));
        assert_eq!(page.margin(Edge::Top), Pt(10.0));
    }

    #[test]
    fn converts_table_space_to_page_space() {
        let page = Page::new((Pt(200.0), Pt(300.0)), Some(Margins::trbl(Pt(30.0), Pt(0.0), Pt(0.0), Pt(20.0))));
        assert_eq!(page.to_page(Pt(5.0), Pt(10.0)), (Pt(25.0), Pt(260.0)));
    }

    #[test]
    fn spawned_pages_copy_size_margins_and_font() {
        let mut page = Page::new(LETTER, Some(Margins::all(In(0.5)))).with_font(narrow_font());
        page.draw_text("hello", Pt(0.0), Pt(0.0));

        let next = page.spawn_page();
        assert_eq!(next.media_box, page.media_box);
        assert_eq!(next.margins, page.margins);
        assert!(next.font().is_some());
        assert!(next.contents.is_empty());
    }

    #[test]
    fn records_drawing_state() {
        let mut page = Page::new(A4, None);
        page.set_fill_colour(colours::RED);
        page.draw_text("red", Pt(1.0), Pt(2.0));
        page.set_style(LineStyle::solid(colours::BLUE, Pt(2.0)));
        page.draw_line(Pt(0.0), Pt(0.0), Pt(10.0), Pt(0.0));

        let span = page.spans().next().unwrap();
        assert_eq!(span.colour, colours::RED);
        assert_eq!(span.coords, (Pt(1.0), Pt(2.0)));
        assert_eq!(page.lines().next().unwrap().style.width, Pt(2.0));
        assert!(page.contains_text("red"));
    }
}
