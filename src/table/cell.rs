use crate::colour::{colours, Colour};
use crate::error::{Result, TableError};
use crate::font::FontSpec;
use crate::image::{Image, ImageSource};
use crate::layout::{measure_text, Edges};
use crate::style::{Edge, FillMode, HAlign, LineStyle, Size, Styles, VAlign};
use crate::surface::Surface;
use crate::units::Pt;
use tracing::debug;

/// An image placed in a cell, drawn at `scale` times its pixel size
#[derive(Debug, Clone, PartialEq)]
pub struct CellImage {
    pub source: ImageSource,
    pub scale: f32,
    loaded: Option<Image>,
}

impl CellImage {
    /// The drawn size of the image, once the surface has loaded it
    pub fn scaled_size(&self) -> Option<(Pt, Pt)> {
        self.loaded.as_ref().map(|image| {
            (
                Pt(self.scale * image.pixel_width as f32),
                Pt(self.scale * image.pixel_height as f32),
            )
        })
    }
}

/// The cell's own font, else the surface's current one
fn resolve_font<S: Surface>(font: Option<&FontSpec>, size: Option<Pt>, surface: &S) -> Result<FontSpec> {
    let font = font.or(surface.font()).ok_or(TableError::MissingFont)?;
    Ok(match size {
        Some(size) => font.with_size(size),
        None => font.clone(),
    })
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellContent {
    #[default]
    Empty,
    Text(String),
    Image(CellImage),
}

/// State computed while measuring a cell
#[derive(Debug, Clone, Default)]
struct CellLayout {
    recommended_width: Pt,
    recommended_height: Pt,
    /// The height the owning row renders the cell at
    height: Option<Pt>,
    font: Option<FontSpec>,
    font_height: Pt,
    lines: Vec<String>,
    text_width: Pt,
}

/// A single column of a [Row](crate::Row), holding either text or an image
///
/// ```
/// use pdf_table::{Cell, Edge, HAlign, LineStyle, Pt, colours};
///
/// let cell = Cell::text("Total")
///     .with_align(HAlign::Right)
///     .with_width(Pt(80.0))
///     .with_padding(Edge::Left, Pt(2.0))
///     .with_border(Edge::Bottom, LineStyle::solid(colours::BLACK, Pt(1.0)));
/// assert!(cell.has_text());
/// assert_eq!(cell.border_line_width(Edge::Bottom), Pt(1.0));
/// ```
#[derive(Debug, Clone)]
pub struct Cell {
    pub width: Size,
    pub height: Size,
    pub content: CellContent,
    pub halign: Option<HAlign>,
    pub valign: Option<VAlign>,
    pub background: Option<Colour>,
    pub text_colour: Option<Colour>,
    pub borders: Edges<Option<LineStyle>>,
    pub paddings: Edges<Option<Pt>>,
    pub font: Option<FontSpec>,
    /// Overrides the size of whichever font the cell ends up using
    pub font_size: Option<Pt>,
    /// Extra space added below every line of text
    pub line_spacing: Pt,
    colspan: usize,
    layout: CellLayout,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            width: Size::Auto,
            height: Size::Auto,
            content: CellContent::Empty,
            halign: None,
            valign: None,
            background: None,
            text_colour: None,
            borders: Edges::default(),
            paddings: Edges::default(),
            font: None,
            font_size: None,
            line_spacing: Pt(0.0),
            colspan: 1,
            layout: CellLayout::default(),
        }
    }
}

impl Cell {
    /// A cell containing some text
    pub fn text<S: ToString>(text: S) -> Cell {
        Cell {
            content: CellContent::Text(text.to_string()),
            ..Default::default()
        }
    }

    /// A cell containing an image, drawn at `scale` times its pixel size
    pub fn image<I: Into<ImageSource>>(source: I, scale: f32) -> Result<Cell> {
        let mut cell = Cell::default();
        cell.set_image(source, None, None, scale)?;
        Ok(cell)
    }

    /// Replace the content with text. Alignments are only changed when given.
    pub fn set_text<S: ToString>(&mut self, text: S, halign: Option<HAlign>, valign: Option<VAlign>) {
        self.content = CellContent::Text(text.to_string());
        if halign.is_some() {
            self.halign = halign;
        }
        if valign.is_some() {
            self.valign = valign;
        }
    }

    /// Replace the content with an image. The scale must lie in (0, 1].
    pub fn set_image<I: Into<ImageSource>>(
        &mut self,
        source: I,
        halign: Option<HAlign>,
        valign: Option<VAlign>,
        scale: f32,
    ) -> Result<()> {
        if !(scale > 0.0 && scale <= 1.0) {
            return Err(TableError::InvalidScale(scale));
        }

        self.content = CellContent::Image(CellImage {
            source: source.into(),
            scale,
            loaded: None,
        });
        if halign.is_some() {
            self.halign = halign;
        }
        if valign.is_some() {
            self.valign = valign;
        }
        Ok(())
    }

    pub fn has_text(&self) -> bool {
        matches!(&self.content, CellContent::Text(text) if !text.is_empty())
    }

    pub fn has_image(&self) -> bool {
        matches!(self.content, CellContent::Image(_))
    }

    pub fn text_content(&self) -> Option<&str> {
        match &self.content {
            CellContent::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Replace every occurrence of `search` in the cell's text, returning how many were
    /// replaced
    pub fn replace_text(&mut self, search: &str, replace: &str) -> usize {
        match &mut self.content {
            CellContent::Text(text) if !search.is_empty() => {
                let count = text.matches(search).count();
                if count > 0 {
                    *text = text.replace(search, replace);
                }
                count
            }
            _ => 0,
        }
    }

    pub fn colspan(&self) -> usize {
        self.colspan
    }

    /// Span this many column slots. Values below 1 are treated as 1.
    pub fn set_colspan(&mut self, colspan: usize) {
        self.colspan = colspan.max(1);
    }

    pub fn set_border(&mut self, edge: Edge, style: LineStyle) {
        self.borders.set(edge, Some(style));
    }

    pub fn remove_border(&mut self, edge: Edge) {
        self.borders.set(edge, None);
    }

    /// The width of the border on an edge, or 0 if there is none
    pub fn border_line_width(&self, edge: Edge) -> Pt {
        self.borders
            .get(edge)
            .map(|style| style.width)
            .unwrap_or_default()
    }

    pub fn set_padding(&mut self, edge: Edge, padding: Pt) {
        self.paddings.set(edge, Some(padding));
    }

    /// The padding on an edge, or 0 if there is none
    pub fn padding(&self, edge: Edge) -> Pt {
        self.paddings.get(edge).unwrap_or_default()
    }

    /// Apply every style that is set in `styles`, overwriting the cell's own values
    pub fn set_styles(&mut self, styles: &Styles) {
        if styles.font_size.is_some() {
            self.font_size = styles.font_size;
        }
        if styles.text_colour.is_some() {
            self.text_colour = styles.text_colour;
        }
        if styles.background.is_some() {
            self.background = styles.background;
        }
        if styles.text_align.is_some() {
            self.halign = styles.text_align;
        }
        for edge in Edge::ALL {
            if let Some(border) = styles.borders.get(edge) {
                self.borders.set(edge, Some(*border));
            }
            if let Some(padding) = styles.paddings.get(edge) {
                self.paddings.set(edge, Some(*padding));
            }
        }
    }

    /// The cell's own styles
    pub fn styles(&self) -> Styles {
        Styles {
            font_size: self.font_size,
            text_colour: self.text_colour,
            background: self.background,
            borders: self.borders,
            paddings: self.paddings,
            text_align: self.halign,
        }
    }

    /// Fill every style the cell doesn't set itself from the row's defaults
    pub(crate) fn apply_defaults(&mut self, font: Option<&FontSpec>, styles: &Styles, valign: Option<VAlign>) {
        if self.font.is_none() {
            self.font = font.cloned();
        }
        self.font_size = self.font_size.or(styles.font_size);
        self.text_colour = self.text_colour.or(styles.text_colour);
        self.background = self.background.or(styles.background);
        self.halign = self.halign.or(styles.text_align);
        self.valign = self.valign.or(valign);
        self.borders.fill_from(&styles.borders);
        self.paddings.fill_from(&styles.paddings);
    }

    pub fn with_width<W: Into<Pt>>(mut self, width: W) -> Cell {
        self.width = Size::Fixed(width.into());
        self
    }

    pub fn with_height<H: Into<Pt>>(mut self, height: H) -> Cell {
        self.height = Size::Fixed(height.into());
        self
    }

    pub fn with_font(mut self, font: FontSpec) -> Cell {
        self.font = Some(font);
        self
    }

    pub fn with_align(mut self, halign: HAlign) -> Cell {
        self.halign = Some(halign);
        self
    }

    pub fn with_valign(mut self, valign: VAlign) -> Cell {
        self.valign = Some(valign);
        self
    }

    pub fn with_background(mut self, colour: Colour) -> Cell {
        self.background = Some(colour);
        self
    }

    pub fn with_text_colour(mut self, colour: Colour) -> Cell {
        self.text_colour = Some(colour);
        self
    }

    pub fn with_border(mut self, edge: Edge, style: LineStyle) -> Cell {
        self.set_border(edge, style);
        self
    }

    pub fn with_padding(mut self, edge: Edge, padding: Pt) -> Cell {
        self.set_padding(edge, padding);
        self
    }

    pub fn with_paddings(mut self, paddings: Edges<Option<Pt>>) -> Cell {
        self.paddings = paddings;
        self
    }

    pub fn with_line_spacing(mut self, spacing: Pt) -> Cell {
        self.line_spacing = spacing;
        self
    }

    pub fn with_colspan(mut self, colspan: usize) -> Cell {
        self.set_colspan(colspan);
        self
    }

    /// The width the cell would like, as of the last [Cell::pre_render]
    pub fn recommended_width(&self) -> Pt {
        self.layout.recommended_width
    }

    /// The height the cell would like, as of the last [Cell::pre_render]
    pub fn recommended_height(&self) -> Pt {
        self.layout.recommended_height
    }

    /// The lines the text was wrapped into, as of the last [Cell::pre_render]
    pub fn lines(&self) -> &[String] {
        &self.layout.lines
    }

    /// The width the cell is rendered at
    pub fn rendered_width(&self) -> Pt {
        self.width.fixed().unwrap_or(self.layout.recommended_width)
    }

    /// The height the cell is rendered at
    pub fn rendered_height(&self) -> Pt {
        self.layout
            .height
            .or(self.height.fixed())
            .unwrap_or(self.layout.recommended_height)
    }

    pub(crate) fn set_rendered_height(&mut self, height: Pt) {
        self.layout.height = Some(height);
    }

    /// The width the content needs, paddings and borders included, as of the last
    /// [Cell::pre_render]. Unlike the recommended width this never includes slack.
    pub(crate) fn content_width(&self) -> Pt {
        let content = match &self.content {
            CellContent::Text(_) => self.layout.text_width,
            CellContent::Image(image) => image.scaled_size().map(|(width, _)| width).unwrap_or_default(),
            CellContent::Empty => Pt(0.0),
        };
        content + self.horizontal_insets()
    }

    fn horizontal_insets(&self) -> Pt {
        self.padding(Edge::Left)
            + self.padding(Edge::Right)
            + self.border_line_width(Edge::Left)
            + self.border_line_width(Edge::Right)
    }

    /// Measure the cell at `(x, y)`, computing its recommended width and height. Text is
    /// wrapped to the cell's width (or to the space left on the page when the width is
    /// automatic), images are loaded through the surface.
    pub fn pre_render<S: Surface>(&mut self, surface: &mut S, x: Pt, _y: Pt, in_content_area: bool) -> Result<()> {
        let available = match self.width {
            Size::Fixed(width) => width,
            Size::Auto if in_content_area => surface.width() - x - surface.margins().horizontal(),
            Size::Auto => surface.width() - x,
        };
        let insets = self.horizontal_insets();
        let max_text_width = available - insets;
        let vertical_paddings = self.padding(Edge::Top) + self.padding(Edge::Bottom);

        match &mut self.content {
            CellContent::Text(text) => {
                let font = resolve_font(self.font.as_ref(), self.font_size, surface)?;
                surface.set_font(font.clone());
                let metrics = measure_text(text, &font, Some(max_text_width))?;

                let font_height = font.height();
                self.layout.recommended_width = match self.width {
                    Size::Auto => metrics.text_width + insets,
                    Size::Fixed(_) => metrics.max_width,
                };
                self.layout.recommended_height = match self.height {
                    Size::Fixed(height) => height,
                    Size::Auto => {
                        (font_height + self.line_spacing) * metrics.lines.len() as f32 + vertical_paddings
                    }
                };
                self.layout.font = Some(font);
                self.layout.font_height = font_height;
                self.layout.lines = metrics.lines;
                self.layout.text_width = metrics.text_width;
            }
            CellContent::Image(image) => {
                if image.loaded.is_none() {
                    image.loaded = Some(surface.load_image(&image.source)?);
                }
                let (image_width, image_height) = image.scaled_size().unwrap_or_default();

                self.layout.recommended_width = match self.width {
                    Size::Auto => image_width + insets,
                    Size::Fixed(width) => width,
                };
                self.layout.recommended_height = match self.height {
                    Size::Auto => image_height + vertical_paddings,
                    Size::Fixed(height) => height,
                };
            }
            CellContent::Empty => return Err(TableError::EmptyCell),
        }

        Ok(())
    }

    /// Draw the cell's background, content and borders with its top-left corner at
    /// `(x, y)` in table space
    pub fn render<S: Surface>(&self, surface: &mut S, x: Pt, y: Pt) {
        self.render_with_width(surface, x, y, self.rendered_width());
    }

    /// Draw the cell stretched to `width`, covering the columns it spans
    pub(crate) fn render_with_width<S: Surface>(&self, surface: &mut S, x: Pt, y: Pt, width: Pt) {
        let height = self.rendered_height();

        self.render_background(surface, x, y, width, height);
        match &self.content {
            CellContent::Text(_) => self.render_text(surface, x, y, width, height),
            CellContent::Image(image) => self.render_image(surface, image, x, y, width, height),
            CellContent::Empty => {}
        }
        self.render_borders(surface, x, y, width, height);
    }

    fn render_background<S: Surface>(&self, surface: &mut S, x: Pt, y: Pt, width: Pt, height: Pt) {
        let Some(background) = self.background else {
            return;
        };

        surface.set_fill_colour(background);
        let (x1, y1) = surface.to_page(x, y);
        let (x2, y2) = surface.to_page(x + width, y + height);
        surface.draw_rectangle(x1, y1, x2, y2, FillMode::Fill);
        surface.set_style(LineStyle::default());
    }

    fn text_x(&self, x: Pt, width: Pt) -> Pt {
        match self.halign.unwrap_or_default() {
            HAlign::Right => {
                x + width
                    - self.layout.text_width
                    - self.padding(Edge::Right)
                    - self.border_line_width(Edge::Right) / 2.0
            }
            HAlign::Center => x + width / 2.0 - self.layout.text_width / 2.0,
            HAlign::Left => x + self.padding(Edge::Left) + self.border_line_width(Edge::Left) / 2.0,
        }
    }

    fn text_y(&self, valign: VAlign, y: Pt, height: Pt) -> Pt {
        let line_height = self.layout.font_height + self.line_spacing;
        match valign {
            VAlign::Bottom => y + height - self.padding(Edge::Bottom),
            VAlign::Middle => y + height / 2.0 + line_height / 2.0,
            VAlign::Top => y + line_height + self.padding(Edge::Top),
        }
    }

    fn render_text<S: Surface>(&self, surface: &mut S, x: Pt, y: Pt, width: Pt, height: Pt) {
        if let Some(font) = &self.layout.font {
            surface.set_font(font.clone());
        }
        surface.set_fill_colour(self.text_colour.unwrap_or(colours::BLACK));

        let lines = &self.layout.lines;
        let text_x = self.text_x(x, width);
        if lines.len() > 1 {
            let valign = self.valign.unwrap_or_default();
            if valign != VAlign::Top {
                debug!(?valign, lines = lines.len(), "multi-line text is always top aligned");
            }

            let line_height = self.layout.font_height + self.line_spacing;
            let mut y_inc = y - self.line_spacing;
            for line in lines {
                let (px, py) = surface.to_page(text_x, self.text_y(VAlign::Top, y_inc, height));
                surface.draw_text(line, px, py);
                y_inc += line_height;
            }
        } else if let Some(line) = lines.first() {
            let baseline = self.text_y(self.valign.unwrap_or_default(), y, height);
            let (px, py) = surface.to_page(text_x, baseline);
            surface.draw_text(line, px, py);
        }

        surface.set_style(LineStyle::default());
    }

    fn render_image<S: Surface>(&self, surface: &mut S, image: &CellImage, x: Pt, y: Pt, width: Pt, height: Pt) {
        let (Some(loaded), Some((image_width, image_height))) = (&image.loaded, image.scaled_size()) else {
            return;
        };

        let image_x = match self.halign.unwrap_or_default() {
            HAlign::Right => x + width - image_width - self.padding(Edge::Right),
            HAlign::Center => x + width / 2.0 - image_width / 2.0,
            HAlign::Left => x + self.padding(Edge::Left),
        };
        let image_y = match self.valign.unwrap_or_default() {
            VAlign::Bottom => y + height - image_height - self.padding(Edge::Bottom),
            VAlign::Middle => y + (height - image_height) / 2.0,
            VAlign::Top => y + self.padding(Edge::Top),
        };

        // images are anchored at their bottom-left corner
        let (x1, y1) = surface.to_page(image_x, image_y + image_height);
        surface.draw_image(loaded, x1, y1, x1 + image_width, y1 + image_height);
    }

    fn render_borders<S: Surface>(&self, surface: &mut S, x: Pt, y: Pt, width: Pt, height: Pt) {
        for (edge, style) in self.borders.iter() {
            let Some(style) = style else {
                continue;
            };

            let half = style.width / 2.0;
            let ((x1, y1), (x2, y2)) = match edge {
                Edge::Top => ((x, y - half), (x + width, y - half)),
                Edge::Bottom => ((x, y + height + half), (x + width, y + height + half)),
                Edge::Left => ((x + half, y), (x + half, y + height)),
                Edge::Right => ((x + width - half, y), (x + width - half, y + height)),
            };

            surface.set_style(*style);
            let (x1, y1) = surface.to_page(x1, y1);
            let (x2, y2) = surface.to_page(x2, y2);
            surface.draw_line(x1, y1, x2, y2);
            surface.set_style(LineStyle::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::testing::narrow_font;
    use crate::layout::Margins;
    use crate::page::{Page, PageContents};

    fn page() -> Page {
        Page::new(
            (Pt(200.0), Pt(300.0)),
            Some(Margins::trbl(Pt(30.0), Pt(0.0), Pt(0.0), Pt(20.0))),
        )
        .with_font(narrow_font())
    }

    #[test]
    fn auto_width_text_includes_paddings_and_borders() {
        let mut cell = Cell::text("hello")
            .with_padding(Edge::Left, Pt(2.0))
            .with_padding(Edge::Right, Pt(2.0))
            .with_padding(Edge::Top, Pt(1.0))
            .with_border(Edge::Left, LineStyle::solid(colours::BLACK, Pt(1.0)));
        cell.pre_render(&mut page(), Pt(0.0), Pt(0.0), true).unwrap();

        assert_eq!(cell.recommended_width(), Pt(30.0));
        assert_eq!(cell.recommended_height(), Pt(11.0));
        assert_eq!(cell.lines(), ["hello"]);
    }

    #[test]
    fn fixed_width_wraps_text() {
        let mut cell = Cell::text("aa bb cc dd").with_width(Pt(40.0));
        cell.pre_render(&mut page(), Pt(0.0), Pt(0.0), true).unwrap();

        assert_eq!(cell.lines(), ["aa bb cc", "dd"]);
        assert_eq!(cell.recommended_width(), Pt(40.0));
        assert_eq!(cell.recommended_height(), Pt(20.0));
    }

    #[test]
    fn line_spacing_is_added_per_line() {
        let mut cell = Cell::text("aa\nbb").with_line_spacing(Pt(2.0));
        cell.pre_render(&mut page(), Pt(0.0), Pt(0.0), true).unwrap();
        assert_eq!(cell.recommended_height(), Pt(24.0));
    }

    #[test]
    fn fixed_height_wins() {
        let mut cell = Cell::text("aa\nbb").with_height(Pt(50.0));
        cell.pre_render(&mut page(), Pt(0.0), Pt(0.0), true).unwrap();
        assert_eq!(cell.recommended_height(), Pt(50.0));
    }

    #[test]
    fn cell_font_size_overrides_surface_font() {
        let mut cell = Cell::text("ab");
        cell.font_size = Some(Pt(20.0));
        cell.pre_render(&mut page(), Pt(0.0), Pt(0.0), true).unwrap();
        assert_eq!(cell.recommended_width(), Pt(20.0));
        assert_eq!(cell.recommended_height(), Pt(20.0));
    }

    #[test]
    fn content_errors() {
        let mut empty = Cell::default();
        assert!(matches!(
            empty.pre_render(&mut page(), Pt(0.0), Pt(0.0), true),
            Err(TableError::EmptyCell)
        ));

        let mut fontless = Page::new((Pt(200.0), Pt(300.0)), None);
        assert!(matches!(
            Cell::text("x").pre_render(&mut fontless, Pt(0.0), Pt(0.0), true),
            Err(TableError::MissingFont)
        ));
    }

    #[test]
    fn image_scale_must_be_in_range() {
        let source = ImageSource::Dimensions { width: 10, height: 10 };
        assert!(matches!(
            Cell::image(source.clone(), 0.0),
            Err(TableError::InvalidScale(_))
        ));
        assert!(matches!(
            Cell::image(source.clone(), 1.5),
            Err(TableError::InvalidScale(_))
        ));
        assert!(Cell::image(source, 1.0).is_ok());
    }

    #[test]
    fn images_are_measured_at_scale() {
        let source = ImageSource::Dimensions { width: 100, height: 50 };
        let mut cell = Cell::image(source, 0.5)
            .unwrap()
            .with_padding(Edge::Left, Pt(3.0))
            .with_padding(Edge::Bottom, Pt(2.0));
        cell.pre_render(&mut page(), Pt(0.0), Pt(0.0), true).unwrap();

        assert!(cell.has_image());
        assert_eq!(cell.recommended_width(), Pt(53.0));
        assert_eq!(cell.recommended_height(), Pt(27.0));
    }

    #[test]
    fn replaces_text_and_counts() {
        let mut cell = Cell::text("page @@CURRENT_PAGE of @@TOTAL_PAGES, @@CURRENT_PAGE");
        assert_eq!(cell.replace_text("@@CURRENT_PAGE", "2"), 2);
        assert_eq!(cell.text_content(), Some("page 2 of @@TOTAL_PAGES, 2"));
        assert_eq!(cell.replace_text("missing", "x"), 0);
        assert_eq!(cell.replace_text("", "x"), 0);
    }

    #[test]
    fn styles_round_trip_through_the_cell() {
        let mut styles = Styles {
            font_size: Some(Pt(8.0)),
            text_align: Some(HAlign::Center),
            ..Default::default()
        };
        styles.paddings.top = Some(Pt(4.0));

        let mut cell = Cell::text("x").with_padding(Edge::Left, Pt(1.0));
        cell.set_styles(&styles);
        let applied = cell.styles();
        assert_eq!(applied.font_size, Some(Pt(8.0)));
        assert_eq!(applied.text_align, Some(HAlign::Center));
        assert_eq!(applied.paddings.top, Some(Pt(4.0)));
        assert_eq!(applied.paddings.left, Some(Pt(1.0)));
    }

    #[test]
    fn defaults_do_not_override_own_values() {
        let mut defaults = Styles::default();
        defaults.paddings = Edges::all(Some(Pt(2.0)));
        defaults.text_align = Some(HAlign::Right);

        let mut cell = Cell::text("x").with_padding(Edge::Top, Pt(5.0)).with_align(HAlign::Left);
        cell.apply_defaults(None, &defaults, Some(VAlign::Bottom));
        assert_eq!(cell.padding(Edge::Top), Pt(5.0));
        assert_eq!(cell.padding(Edge::Bottom), Pt(2.0));
        assert_eq!(cell.halign, Some(HAlign::Left));
        assert_eq!(cell.valign, Some(VAlign::Bottom));
    }

    #[test]
    fn renders_background_text_then_borders() {
        let mut page = page();
        let mut cell = Cell::text("ab")
            .with_width(Pt(100.0))
            .with_align(HAlign::Right)
            .with_padding(Edge::Right, Pt(4.0))
            .with_background(colours::LIGHT_GREY)
            .with_text_colour(colours::RED)
            .with_border(Edge::Top, LineStyle::solid(colours::BLUE, Pt(2.0)))
            .with_border(Edge::Left, LineStyle::solid(colours::BLUE, Pt(2.0)));
        cell.pre_render(&mut page, Pt(0.0), Pt(0.0), true).unwrap();
        cell.set_rendered_height(Pt(20.0));
        cell.render(&mut page, Pt(0.0), Pt(0.0));

        assert!(matches!(page.contents[0], PageContents::Rectangle(_)));
        let span = page.spans().next().unwrap();
        // 100 - 10 - 4 from the left margin at 20, baseline 10 below the top margin
        assert_eq!(span.coords, (Pt(106.0), Pt(260.0)));
        assert_eq!(span.colour, colours::RED);

        let lines: Vec<_> = page.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].from, (Pt(20.0), Pt(271.0)));
        assert_eq!(lines[0].to, (Pt(120.0), Pt(271.0)));
        assert_eq!(lines[1].from, (Pt(21.0), Pt(270.0)));
        assert_eq!(lines[1].to, (Pt(21.0), Pt(250.0)));
    }

    #[test]
    fn aligns_single_lines_vertically() {
        let mut page = page();
        let mut cell = Cell::text("ab").with_valign(VAlign::Bottom).with_padding(Edge::Bottom, Pt(3.0));
        cell.pre_render(&mut page, Pt(0.0), Pt(0.0), true).unwrap();
        cell.set_rendered_height(Pt(40.0));
        cell.render(&mut page, Pt(0.0), Pt(0.0));
        // baseline at 40 - 3 in table space
        assert_eq!(page.spans().next().unwrap().coords.1, Pt(233.0));

        let mut page = self::page();
        cell.valign = Some(VAlign::Middle);
        cell.render(&mut page, Pt(0.0), Pt(0.0));
        assert_eq!(page.spans().next().unwrap().coords.1, Pt(245.0));
    }

    #[test]
    fn multi_line_text_is_top_aligned() {
        let mut page = page();
        let mut cell = Cell::text("aa\nbb").with_valign(VAlign::Bottom);
        cell.pre_render(&mut page, Pt(0.0), Pt(0.0), true).unwrap();
        cell.set_rendered_height(Pt(100.0));
        cell.render(&mut page, Pt(0.0), Pt(10.0));

        let baselines: Vec<Pt> = page.spans().map(|span| span.coords.1).collect();
        assert_eq!(baselines, vec![Pt(250.0), Pt(240.0)]);
        assert_eq!(cell.valign, Some(VAlign::Bottom));
    }

    #[test]
    fn places_images_from_their_bottom_left_corner() {
        let mut page = page();
        let source = ImageSource::Dimensions { width: 40, height: 20 };
        let mut cell = Cell::image(source, 1.0)
            .unwrap()
            .with_width(Pt(100.0))
            .with_align(HAlign::Center)
            .with_valign(VAlign::Middle);
        cell.pre_render(&mut page, Pt(0.0), Pt(0.0), true).unwrap();
        cell.set_rendered_height(Pt(40.0));
        cell.render(&mut page, Pt(0.0), Pt(0.0));

        let PageContents::Image(image) = &page.contents[0] else {
            panic!("expected an image, got {:?}", page.contents[0]);
        };
        // x: 50 - 20 + 20, y: 300 - 10 - 30 - 20
        assert_eq!(image.position.x1, Pt(50.0));
        assert_eq!(image.position.y1, Pt(240.0));
        assert_eq!(image.position.x2, Pt(90.0));
        assert_eq!(image.position.y2, Pt(260.0));
    }

    #[test]
    fn clones_are_independent() {
        let original = Cell::text("one");
        let mut copy = original.clone();
        copy.replace_text("one", "two");
        assert_eq!(original.text_content(), Some("one"));
        assert_eq!(copy.text_content(), Some("two"));
    }
}
