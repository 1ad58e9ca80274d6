use crate::colour::colours;
use crate::error::{Result, TableError};
use crate::font::FontSpec;
use crate::layout::Edges;
use crate::style::{Edge, HAlign, LineStyle, Size, Styles, VAlign};
use crate::surface::Surface;
use crate::table::Cell;
use crate::units::Pt;
use tracing::trace;

/// A horizontal sequence of cells. The row decides how wide every cell is and how tall
/// the row is, and supplies default styles to cells that don't set their own.
#[derive(Debug, Clone, Default)]
pub struct Row {
    cells: Vec<Cell>,
    /// The width to distribute between the cells. Defaults to the page's content width.
    pub width: Option<Pt>,
    height: Size,
    /// Default font for cells without one
    pub font: Option<FontSpec>,
    /// Default styles for cells. The borders double as the row's own borders.
    pub styles: Styles,
    /// Default vertical alignment for cells
    pub valign: Option<VAlign>,
    /// The surface's font when the row was first measured, the default for cells when the
    /// row has no font of its own
    surface_font: Option<Option<FontSpec>>,
    page_break: bool,
    uniform: bool,
    expanded: bool,
    in_content_area: bool,
    rendered_height: Pt,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Row {
        Row {
            cells,
            in_content_area: true,
            ..Default::default()
        }
    }

    /// A header row: one text cell per label, drawn in `font` with a 1pt bottom border,
    /// left aligned, and padded by 2pt vertically and 1pt horizontally
    pub fn header<I, S>(labels: I, font: FontSpec) -> Row
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let mut row = Row::new(labels.into_iter().map(Cell::text).collect());
        row.font = Some(font);
        row.styles.text_align = Some(HAlign::Left);
        row.styles.paddings = Edges::trbl(Some(Pt(2.0)), Some(Pt(1.0)), Some(Pt(2.0)), Some(Pt(1.0)));
        row.set_border(Edge::Bottom, LineStyle::solid(colours::BLACK, Pt(1.0)));
        row
    }

    pub fn columns(&self) -> &[Cell] {
        &self.cells
    }

    pub fn columns_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn set_columns(&mut self, cells: Vec<Cell>) {
        self.cells = cells;
        self.expanded = false;
    }

    /// Insert a cell before `index`, or at the end if `index` is past the last cell
    pub fn insert_column(&mut self, cell: Cell, index: usize) {
        let index = index.min(self.cells.len());
        self.cells.insert(index, cell);
    }

    /// Remove and return the cell at `index`, if there is one
    pub fn delete_column(&mut self, index: usize) -> Option<Cell> {
        (index < self.cells.len()).then(|| self.cells.remove(index))
    }

    /// Fix the row height instead of deriving it from the tallest cell
    pub fn set_height(&mut self, height: Pt) {
        self.height = Size::Fixed(height);
    }

    /// The row height, as of the last [Row::pre_render]
    pub fn height(&self) -> Pt {
        self.height.fixed().unwrap_or(self.rendered_height)
    }

    /// Force a page break before this row when a table is rendered
    pub fn set_page_break(&mut self, page_break: bool) {
        self.page_break = page_break;
    }

    pub fn has_page_break(&self) -> bool {
        self.page_break
    }

    /// Give every automatically sized cell the same width, regardless of its content
    pub fn force_uniform_column_width(&mut self, uniform: bool) {
        self.uniform = uniform;
    }

    pub(crate) fn is_uniform(&self) -> bool {
        self.uniform
    }

    /// Measure cells without a font with `font`, whatever font the surface has by then
    pub(crate) fn set_surface_font(&mut self, font: Option<FontSpec>) {
        self.surface_font = Some(font);
    }

    pub fn set_border(&mut self, edge: Edge, style: LineStyle) {
        self.styles.borders.set(edge, Some(style));
    }

    pub fn remove_border(&mut self, edge: Edge) {
        self.styles.borders.set(edge, None);
    }

    /// The width of the row's border on an edge, or 0 if there is none
    pub fn border_line_width(&self, edge: Edge) -> Pt {
        self.styles
            .borders
            .get(edge)
            .map(|style| style.width)
            .unwrap_or_default()
    }

    /// Default padding for cells
    pub fn set_cell_padding(&mut self, edge: Edge, padding: Pt) {
        self.styles.paddings.set(edge, Some(padding));
    }

    /// Apply every style that is set in `styles` to the row's defaults
    pub fn set_styles(&mut self, styles: &Styles) {
        let mut merged = styles.clone();
        merged.font_size = styles.font_size.or(self.styles.font_size);
        merged.text_colour = styles.text_colour.or(self.styles.text_colour);
        merged.background = styles.background.or(self.styles.background);
        merged.text_align = styles.text_align.or(self.styles.text_align);
        merged.borders.fill_from(&self.styles.borders);
        merged.paddings.fill_from(&self.styles.paddings);
        self.styles = merged;
    }

    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    /// Replace every occurrence of `search` in every cell, returning how many were replaced
    pub fn replace_text(&mut self, search: &str, replace: &str) -> usize {
        self.cells
            .iter_mut()
            .map(|cell| cell.replace_text(search, replace))
            .sum()
    }

    /// Resolve the width of every cell and the height of the row.
    ///
    /// Cells with a fixed width keep it. In uniform mode every other cell gets an equal
    /// share of the row. Otherwise the other cells are measured, and whatever space is
    /// left over is split evenly between them. When there is no space left, text cells
    /// that want more than an even share are clipped to it (and wrap), everything else
    /// gets what it asked for.
    ///
    /// Cells without a font take the row's, else the font the surface had when the row was
    /// first measured.
    pub fn pre_render<S: Surface>(&mut self, surface: &mut S, x: Pt, y: Pt, in_content_area: bool) -> Result<()> {
        self.in_content_area = in_content_area;
        let surface_font = self.surface_font.get_or_insert_with(|| surface.font().cloned());
        let font = self.font.as_ref().or(surface_font.as_ref());
        for cell in self.cells.iter_mut() {
            cell.apply_defaults(font, &self.styles, self.valign);
            if cell.font.is_none() && cell.has_text() {
                return Err(TableError::MissingFont);
            }
        }

        let available = self.available_width(surface, in_content_area);

        if self.uniform {
            let share = available / self.cells.len().max(1) as f32;
            for cell in self.cells.iter_mut().filter(|cell| cell.width.is_auto()) {
                cell.width = Size::Fixed(share);
            }
        } else {
            self.distribute_width(surface, x, y, available)?;
        }

        let mut height = Pt(0.0);
        for cell in self.cells.iter_mut() {
            cell.pre_render(surface, x, y, in_content_area)?;
            height = height.max(cell.recommended_height());
        }
        self.rendered_height = height;

        trace!(
            columns = self.cells.len(),
            available = *available,
            height = *self.height(),
            "measured row"
        );
        Ok(())
    }

    /// The width the row spreads over its cells
    pub(crate) fn available_width<S: Surface>(&self, surface: &S, in_content_area: bool) -> Pt {
        match self.width {
            Some(width) => width,
            None if in_content_area => surface.width() - surface.margins().horizontal(),
            None => surface.width(),
        }
    }

    fn distribute_width<S: Surface>(&mut self, surface: &mut S, x: Pt, y: Pt, available: Pt) -> Result<()> {
        let mut fixed = Pt(0.0);
        let mut recommended = Pt(0.0);
        let mut dynamic = 0;
        for cell in self.cells.iter_mut() {
            match cell.width {
                Size::Fixed(width) => fixed += width,
                Size::Auto => {
                    cell.pre_render(surface, x, y, self.in_content_area)?;
                    recommended += cell.recommended_width();
                    dynamic += 1;
                }
            }
        }

        if dynamic == 0 {
            return Ok(());
        }

        let share = (available - fixed) / dynamic as f32;
        let slack = (available - fixed - recommended) / dynamic as f32;
        let force_line_breaking = slack < Pt(0.0);
        let slack = slack.max(Pt(0.0));

        for cell in self.cells.iter_mut().filter(|cell| cell.width.is_auto()) {
            let wanted = cell.recommended_width();
            let width = if !cell.has_image() && force_line_breaking && wanted > share {
                share
            } else {
                wanted + slack
            };
            cell.width = Size::Fixed(width);
        }
        Ok(())
    }

    /// Insert an empty filler cell after every spanning cell for each extra column slot it
    /// covers, so that the row has one cell per slot. `slot_widths` holds the fixed width
    /// last seen for every slot; fillers take the width of the slot they occupy and this
    /// row's own cells update it.
    pub(crate) fn expand_spans(&mut self, slot_widths: &mut Vec<Option<Pt>>) {
        if self.expanded {
            return;
        }
        self.expanded = true;

        let mut spans = Vec::new();
        let mut slot = 0;
        for (index, cell) in self.cells.iter().enumerate() {
            if slot_widths.len() < slot + cell.colspan() {
                slot_widths.resize(slot + cell.colspan(), None);
            }
            if let Some(width) = cell.width.fixed() {
                slot_widths[slot] = Some(width);
            }
            if cell.colspan() > 1 {
                spans.push((index, slot, cell.colspan()));
            }
            slot += cell.colspan();
        }

        // back to front, so that earlier indices stay valid
        for &(index, slot, span) in spans.iter().rev() {
            for offset in (1..span).rev() {
                let mut filler = Cell::text("");
                if let Some(width) = slot_widths[slot + offset] {
                    filler.width = Size::Fixed(width);
                }
                self.cells.insert(index + 1, filler);
            }
        }
    }

    /// Draw the row with its top-left corner at `(x, y)` in table space. A spanning cell
    /// is drawn across the cells it covers, which are skipped.
    pub fn render<S: Surface>(&mut self, surface: &mut S, x: Pt, y: Pt) -> Result<()> {
        if self.height.is_auto() {
            self.pre_render(surface, x, y, self.in_content_area)?;
        }

        let height = self.height();
        let font = self.font.as_ref().or(self.surface_font.as_ref().and_then(Option::as_ref));
        let mut x = x;
        let mut index = 0;
        while index < self.cells.len() {
            let span = self.cells[index].colspan().min(self.cells.len() - index);
            let width: Pt = self.cells[index..index + span].iter().map(Cell::rendered_width).sum();

            let cell = &mut self.cells[index];
            cell.apply_defaults(font, &self.styles, self.valign);
            cell.set_rendered_height(height);
            cell.render_with_width(surface, x, y, width);

            x += width;
            index += span;
        }
        Ok(())
    }
}

impl From<Vec<Cell>> for Row {
    fn from(cells: Vec<Cell>) -> Self {
        Row::new(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::testing::{narrow_font, wide_font};
    use crate::image::ImageSource;
    use crate::layout::Margins;
    use crate::page::Page;

    fn page() -> Page {
        Page::new((Pt(300.0), Pt(400.0)), Some(Margins::trbl(Pt(30.0), Pt(20.0), Pt(30.0), Pt(20.0))))
            .with_font(narrow_font())
    }

    fn widths(row: &Row) -> Vec<Pt> {
        row.columns().iter().map(Cell::rendered_width).collect()
    }

    #[test]
    fn distributes_slack_to_dynamic_columns() {
        // "abcdef" is 30 wide, leaving 200 - 50 - 30 = 120 for the single dynamic column
        let mut row = Row::new(vec![Cell::text("x").with_width(Pt(50.0)), Cell::text("abcdef")]);
        row.width = Some(Pt(200.0));
        row.pre_render(&mut page(), Pt(0.0), Pt(0.0), true).unwrap();

        assert_eq!(widths(&row), vec![Pt(50.0), Pt(150.0)]);
    }

    #[test]
    fn widths_fill_the_content_area() {
        // 260 - 5 - 15 = 240 slack, 120 each
        let mut row = Row::new(vec![Cell::text("a"), Cell::text("bbb")]);
        row.pre_render(&mut page(), Pt(0.0), Pt(0.0), true).unwrap();

        assert_eq!(widths(&row), vec![Pt(125.0), Pt(135.0)]);
        let total: Pt = widths(&row).into_iter().sum();
        assert_eq!(total, Pt(260.0));
    }

    #[test]
    fn uniform_columns_split_evenly() {
        let mut row = Row::new(vec![Cell::text("a"), Cell::text("a much longer text"), Cell::text("b"), Cell::text("c")]);
        row.force_uniform_column_width(true);
        row.width = Some(Pt(200.0));
        row.pre_render(&mut page(), Pt(0.0), Pt(0.0), true).unwrap();

        assert_eq!(widths(&row), vec![Pt(50.0); 4]);
    }

    #[test]
    fn overfull_rows_clip_wide_text_and_wrap_it() {
        // wide glyphs: 20pt letters, 5pt spaces. Both cells want 95, 100 is available.
        let mut row = Row::new(vec![Cell::text("a b c d"), Cell::text("e f g h")]);
        row.font = Some(wide_font());
        row.width = Some(Pt(100.0));
        row.pre_render(&mut page(), Pt(0.0), Pt(0.0), false).unwrap();

        assert_eq!(widths(&row), vec![Pt(50.0), Pt(50.0)]);
        assert_eq!(row.columns()[0].lines(), ["a b", "c d"]);
        assert_eq!(row.height(), Pt(20.0));
    }

    #[test]
    fn narrow_cells_keep_their_width_when_others_are_clipped() {
        let mut row = Row::new(vec![Cell::text("a"), Cell::text("b c d e f g h")]);
        row.font = Some(wide_font());
        row.width = Some(Pt(100.0));
        row.pre_render(&mut page(), Pt(0.0), Pt(0.0), true).unwrap();

        assert_eq!(widths(&row), vec![Pt(20.0), Pt(50.0)]);
    }

    #[test]
    fn images_get_their_size_plus_slack() {
        let image = Cell::image(ImageSource::Dimensions { width: 40, height: 30 }, 1.0).unwrap();
        let mut row = Row::new(vec![image, Cell::text("abcd")]);
        row.width = Some(Pt(100.0));
        row.pre_render(&mut page(), Pt(0.0), Pt(0.0), true).unwrap();

        // 100 - 40 - 20 = 40 slack, 20 each
        assert_eq!(widths(&row), vec![Pt(60.0), Pt(40.0)]);
        assert_eq!(row.height(), Pt(30.0));
    }

    #[test]
    fn height_is_the_tallest_cell_unless_fixed() {
        let mut row = Row::new(vec![Cell::text("a"), Cell::text("a\nb\nc")]);
        row.pre_render(&mut page(), Pt(0.0), Pt(0.0), true).unwrap();
        assert_eq!(row.height(), Pt(30.0));

        row.set_height(Pt(12.0));
        row.pre_render(&mut page(), Pt(0.0), Pt(0.0), true).unwrap();
        assert_eq!(row.height(), Pt(12.0));
    }

    #[test]
    fn header_defaults_apply_to_cells() {
        let mut header = Row::header(["Name", "Qty"], wide_font());
        header.columns_mut()[1].halign = Some(HAlign::Right);
        header.pre_render(&mut page(), Pt(0.0), Pt(0.0), true).unwrap();

        let name = &header.columns()[0];
        assert_eq!(name.padding(Edge::Top), Pt(2.0));
        assert_eq!(name.padding(Edge::Left), Pt(1.0));
        assert_eq!(name.halign, Some(HAlign::Left));
        assert_eq!(name.border_line_width(Edge::Bottom), Pt(1.0));
        assert_eq!(header.columns()[1].halign, Some(HAlign::Right));
        assert_eq!(header.border_line_width(Edge::Bottom), Pt(1.0));
        // 10pt line plus 2pt padding on either side
        assert_eq!(header.height(), Pt(14.0));
    }

    #[test]
    fn spanning_cells_cover_the_following_columns() {
        let mut page = page();
        let mut row = Row::new(vec![
            Cell::text("wide")
                .with_colspan(2)
                .with_width(Pt(40.0))
                .with_border(Edge::Bottom, LineStyle::default()),
            Cell::text("").with_width(Pt(60.0)),
            Cell::text("c").with_width(Pt(30.0)),
        ]);
        row.pre_render(&mut page, Pt(0.0), Pt(0.0), true).unwrap();
        row.render(&mut page, Pt(0.0), Pt(0.0)).unwrap();
        row.render(&mut page, Pt(0.0), Pt(50.0)).unwrap();

        // the covered cell stays, so drawing again lines up the same way
        assert_eq!(widths(&row), vec![Pt(40.0), Pt(60.0), Pt(30.0)]);
        let lines: Vec<Pt> = page.lines().map(|line| line.to.0 - line.from.0).collect();
        assert_eq!(lines, vec![Pt(100.0), Pt(100.0)]);
        let c: Vec<Pt> = page.spans().filter(|span| span.text == "c").map(|span| span.coords.0).collect();
        assert_eq!(c, vec![Pt(120.0), Pt(120.0)]);
    }

    #[test]
    fn cells_without_a_font_use_the_font_the_surface_had_first() {
        let mut page = page();
        let mut row = Row::new(vec![Cell::text("abc"), Cell::text("def").with_font(wide_font())]);
        row.pre_render(&mut page, Pt(0.0), Pt(0.0), true).unwrap();
        // the wide cell left its font on the surface
        row.render(&mut page, Pt(0.0), Pt(0.0)).unwrap();
        row.render(&mut page, Pt(0.0), Pt(20.0)).unwrap();

        assert_eq!(row.columns()[0].content_width(), Pt(15.0));
        assert_eq!(row.height(), Pt(10.0));
    }

    #[test]
    fn rows_without_any_font_are_rejected() {
        let mut page = Page::new((Pt(300.0), Pt(400.0)), None);
        let mut row = Row::new(vec![Cell::text("abc")]);
        assert!(matches!(
            row.pre_render(&mut page, Pt(0.0), Pt(0.0), true),
            Err(TableError::MissingFont)
        ));
    }

    #[test]
    fn manages_columns() {
        let mut row = Row::new(vec![Cell::text("a"), Cell::text("c")]);
        row.insert_column(Cell::text("b"), 1);
        row.insert_column(Cell::text("d"), 99);
        let texts: Vec<_> = row.columns().iter().filter_map(Cell::text_content).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);

        assert!(row.delete_column(0).is_some());
        assert!(row.delete_column(10).is_none());
        assert_eq!(row.columns().len(), 3);

        row.set_border(Edge::Top, LineStyle::default());
        row.remove_border(Edge::Top);
        assert_eq!(row.border_line_width(Edge::Top), Pt(0.0));
    }

    #[test]
    fn row_styles_merge() {
        let mut row = Row::new(vec![Cell::text("a")]);
        row.set_cell_padding(Edge::Left, Pt(3.0));
        let mut styles = Styles {
            text_align: Some(HAlign::Center),
            ..Default::default()
        };
        styles.paddings.right = Some(Pt(4.0));
        row.set_styles(&styles);

        assert_eq!(row.styles().paddings.left, Some(Pt(3.0)));
        assert_eq!(row.styles().paddings.right, Some(Pt(4.0)));
        assert_eq!(row.styles().text_align, Some(HAlign::Center));
    }

    #[test]
    fn fillers_take_the_width_last_seen_for_their_slot() {
        let mut slot_widths = Vec::new();
        let mut above = Row::new(vec![
            Cell::text("a").with_width(Pt(10.0)),
            Cell::text("b").with_width(Pt(20.0)),
            Cell::text("c").with_width(Pt(30.0)),
            Cell::text("d").with_width(Pt(40.0)),
        ]);
        above.expand_spans(&mut slot_widths);

        let mut row = Row::new(vec![Cell::text("a"), Cell::text("bcd").with_colspan(3)]);
        row.expand_spans(&mut slot_widths);
        row.expand_spans(&mut slot_widths);

        let widths: Vec<Size> = row.columns().iter().map(|cell| cell.width).collect();
        assert_eq!(
            widths,
            vec![Size::Auto, Size::Auto, Size::Fixed(Pt(30.0)), Size::Fixed(Pt(40.0))]
        );
        assert!(!row.columns()[2].has_text());
    }
}
