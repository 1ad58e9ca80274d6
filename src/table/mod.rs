//! Tables, rows and cells, and the layout that sizes them and spreads them over pages.
//!
//! A [Table] is measured in two passes. First every row distributes its width between its
//! cells, then every column slot is sized to the widest content any row puts in it and the
//! space left over is shared out, so that columns line up across the whole table. Rows are then placed top to bottom, breaking
//! onto new pages (repeating the header, if there is one) whenever a row doesn't fit.
//!
//! ```
//! use pdf_table::{Cell, FontSpec, Page, Pt, Row, Table, UniformFont};
//! use pdf_table::layout::Margins;
//!
//! let font = FontSpec::new(UniformFont::new(1024, 512), Pt(10.0));
//! let mut page = Page::new(pdf_table::A4, Some(Margins::all(Pt(36.0)))).with_font(font.clone());
//!
//! let mut table = Table::default();
//! table.set_header(Row::header(["Item", "Price"], font));
//! for i in 0..100 {
//!     table.add_row(Row::new(vec![Cell::text(format!("item {i}")), Cell::text("1.00")]));
//! }
//!
//! let overflow = table.render(&mut page, Pt(0.0), Pt(0.0), true).unwrap();
//! assert!(!overflow.is_empty());
//! assert!(overflow.iter().all(|page| page.contains_text("Price")));
//! ```

mod cell;
mod row;

pub use cell::*;
pub use row::*;

use crate::error::Result;
use crate::style::{Edge, Size};
use crate::surface::{PageFactory, Surface};
use crate::units::Pt;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct Table {
    rows: Vec<Row>,
    header: Option<Row>,
    width: Option<Pt>,
    repeat_header: bool,
}

impl Default for Table {
    fn default() -> Self {
        Table {
            rows: Vec::new(),
            header: None,
            width: None,
            repeat_header: true,
        }
    }
}

impl Table {
    /// Append a row. If the table has a width, the row takes it.
    pub fn add_row(&mut self, mut row: Row) {
        if self.width.is_some() {
            row.width = self.width;
        }
        self.rows.push(row);
    }

    /// Replace the row at `index`, returning the old one. An index past the last row
    /// appends the row instead.
    pub fn replace_row(&mut self, mut row: Row, index: usize) -> Option<Row> {
        if self.width.is_some() {
            row.width = self.width;
        }
        match self.rows.get_mut(index) {
            Some(slot) => Some(std::mem::replace(slot, row)),
            None => {
                self.rows.push(row);
                None
            }
        }
    }

    /// Use `row` as the header. It is always rendered first, and again at the top of
    /// every page the table overflows onto unless [Table::set_repeat_header] turned that off.
    pub fn set_header(&mut self, mut row: Row) {
        if self.width.is_some() {
            row.width = self.width;
        }
        self.header = Some(row);
    }

    pub fn header(&self) -> Option<&Row> {
        self.header.as_ref()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn width(&self) -> Option<Pt> {
        self.width
    }

    /// Fix the width of the table, including rows that were added before
    pub fn set_width(&mut self, width: Pt) {
        self.width = Some(width);
        for row in self.header.iter_mut().chain(self.rows.iter_mut()) {
            row.width = Some(width);
        }
    }

    pub fn set_repeat_header(&mut self, repeat: bool) {
        self.repeat_header = repeat;
    }

    /// Replace every occurrence of `search` in every cell, returning how many were replaced
    pub fn replace_text(&mut self, search: &str, replace: &str) -> usize {
        self.header
            .iter_mut()
            .chain(self.rows.iter_mut())
            .map(|row| row.replace_text(search, replace))
            .sum()
    }

    /// Lay the table out and draw it with its top-left corner at `(x, y)`.
    ///
    /// In the content area, `y` is relative to the top margin and rows stop at the bottom
    /// margin. Outside of it the whole page is used and `x` is relative to the page edge.
    /// `page` receives the first rows; pages the table overflows onto are spawned from it
    /// and returned in order.
    #[instrument(skip_all, fields(rows = self.rows.len(), header = self.header.is_some()))]
    pub fn render<S: PageFactory>(&mut self, page: &mut S, x: Pt, y: Pt, in_content_area: bool) -> Result<Vec<S>> {
        let repeat_header = self.header.is_some() && self.repeat_header;
        let mut rows: Vec<&mut Row> = self.header.iter_mut().chain(self.rows.iter_mut()).collect();

        let (x, start_y, max_y) = if in_content_area {
            (
                x,
                y + page.margin(Edge::Top),
                page.height() - page.margin(Edge::Bottom) - page.margin(Edge::Top),
            )
        } else {
            (x - page.margin(Edge::Left), y, page.height())
        };

        // cells set their own fonts on the surface as they go
        let base_font = page.font().cloned();
        for row in rows.iter_mut() {
            row.set_surface_font(base_font.clone());
        }
        layout_rows(&mut rows, page, x, y, in_content_area)?;

        let mut overflow: Vec<S> = Vec::new();
        let mut y = start_y;
        for index in 0..rows.len() {
            if y + rows[index].height() > max_y || rows[index].has_page_break() {
                let next = current_page(page, &mut overflow).spawn_page();
                overflow.push(next);
                debug!(row = index, page = overflow.len(), "page break");
                let surface = current_page(page, &mut overflow);
                y = surface.margin(Edge::Top);

                if repeat_header && index != 0 {
                    let header = &mut rows[0];
                    header.render(surface, x, y)?;
                    y += header.height() + header.border_line_width(Edge::Bottom);
                }
            }

            let row = &mut rows[index];
            row.render(current_page(page, &mut overflow), x, y)?;
            y += row.height() + row.border_line_width(Edge::Bottom);
        }

        if let Some(font) = base_font {
            page.set_font(font.clone());
            for page in overflow.iter_mut() {
                page.set_font(font.clone());
            }
        }
        debug!(overflow = overflow.len(), "rendered table");
        Ok(overflow)
    }
}

/// The page rows are currently being placed on
fn current_page<'a, S>(first: &'a mut S, overflow: &'a mut [S]) -> &'a mut S {
    match overflow.last_mut() {
        Some(page) => page,
        None => first,
    }
}

/// A column slot shared by every row of a table
#[derive(Debug, Clone, Copy, Default)]
struct Column {
    width: Pt,
    /// Some row gave a cell in this slot a width of its own
    fixed: bool,
}

/// Measure every row, then size every column slot to the widest content any row puts in
/// it and measure again with the aligned widths.
///
/// Fixed slots keep the widest fixed width. Whatever the table width leaves over is split
/// evenly between the other slots; when the content is wider than the table, the other
/// slots shrink proportionally instead. Widths are left alone when every slot is fixed, or
/// when the fixed slots alone are wider than the table.
fn layout_rows<S: Surface>(rows: &mut [&mut Row], surface: &mut S, x: Pt, y: Pt, in_content_area: bool) -> Result<()> {
    let mut slot_widths: Vec<Option<Pt>> = Vec::new();
    let mut auto: Vec<Vec<bool>> = Vec::with_capacity(rows.len());
    let mut row_y = y;
    for row in rows.iter_mut() {
        row.expand_spans(&mut slot_widths);
        let uniform = row.is_uniform();
        auto.push(row.columns().iter().map(|cell| cell.width.is_auto() && !uniform).collect());
        row.pre_render(surface, x, row_y, in_content_area)?;
        row_y += row.height() + row.border_line_width(Edge::Bottom);
    }

    let mut columns: Vec<Column> = Vec::new();
    for (row, auto_cells) in rows.iter().zip(&auto) {
        let cells = row.columns();
        if columns.len() < cells.len() {
            columns.resize(cells.len(), Column::default());
        }

        let mut slot = 0;
        while slot < cells.len() {
            let span = cells[slot].colspan().min(cells.len() - slot);
            if auto_cells[slot] {
                let share = cells[slot].content_width() / span as f32;
                for column in &mut columns[slot..slot + span] {
                    column.width = column.width.max(share);
                }
            }
            for covered in slot..slot + span {
                if !auto_cells[covered] {
                    let column = &mut columns[covered];
                    column.width = column.width.max(cells[covered].rendered_width());
                    column.fixed = true;
                }
            }
            slot += span;
        }
    }

    let available = rows
        .iter()
        .map(|row| row.available_width(&*surface, in_content_area))
        .reduce(Pt::min)
        .unwrap_or_default();
    let total: Pt = columns.iter().map(|column| column.width).sum();
    let fixed: Pt = columns.iter().filter(|column| column.fixed).map(|column| column.width).sum();
    let dynamic = columns.iter().filter(|column| !column.fixed).count();
    if dynamic > 0 {
        if total < available {
            let slack = (available - total) / dynamic as f32;
            for column in columns.iter_mut().filter(|column| !column.fixed) {
                column.width += slack;
            }
        } else if total > available && available > fixed {
            let scale = *(available - fixed) / *(total - fixed);
            for column in columns.iter_mut().filter(|column| !column.fixed) {
                column.width = column.width * scale;
            }
        }
    }

    let mut row_y = y;
    for row in rows.iter_mut() {
        for (cell, column) in row.columns_mut().iter_mut().zip(&columns) {
            cell.width = Size::Fixed(column.width);
        }
        row.pre_render(surface, x, row_y, in_content_area)?;
        row_y += row.height() + row.border_line_width(Edge::Bottom);
    }

    debug!(columns = columns.len(), rows = rows.len(), available = *available, "aligned columns");
    Ok(())
}
