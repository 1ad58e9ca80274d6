use crate::{
    error::{Result, TableError},
    font::FontSpec,
    layout::Margins,
    page::{Page, PageSize},
    style::Edge,
    surface::Surface,
    table::Table,
    units::Pt,
};
use id_arena::{Arena, Id};
use tracing::{debug, warn};

/// Replaced with the 1-based number of the page a header or footer is drawn on
pub const CURRENT_PAGE: &str = "@@CURRENT_PAGE";
/// Replaced with the number of pages in the document
pub const TOTAL_PAGES: &str = "@@TOTAL_PAGES";

/// A document collects the pages tables are rendered onto, and stamps a header and footer
/// onto every page once all content is in place with a call to [Document::finish]
pub struct Document {
    /// Margins every page of the document uses
    pub margins: Margins,
    /// Font new pages start out with
    pub font: Option<FontSpec>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    header: Option<Table>,
    footer: Option<Table>,
    /// Distance of the header from the top of the page
    pub header_offset: Pt,
    /// Distance of the footer from the bottom margin, towards the bottom of the page
    pub footer_offset: Pt,
}

impl Default for Document {
    fn default() -> Self {
        Document {
            margins: Margins::trbl(Pt(30.0), Pt(20.0), Pt(30.0), Pt(20.0)),
            font: None,
            pages: Arena::new(),
            page_order: Vec::new(),
            header: None,
            footer: None,
            header_offset: Pt(10.0),
            footer_offset: Pt(10.0),
        }
    }
}

impl Document {
    /// Give new pages a font, returning the document
    pub fn with_font(mut self, font: FontSpec) -> Document {
        self.font = Some(font);
        self
    }

    pub fn set_margin(&mut self, edge: Edge, margin: Pt) {
        self.margins.set(edge, margin);
    }

    /// A new page with the document's margins and font. The page isn't part of the
    /// document until it is added with [Document::add_page] or [Document::render_table].
    pub fn create_page(&self, size: PageSize) -> Page {
        let page = Page::new(size, Some(self.margins.clone()));
        match &self.font {
            Some(font) => page.with_font(font.clone()),
            None => page,
        }
    }

    /// Add a page to the end of the document, returning its ID. The page takes on the
    /// document's margins.
    pub fn add_page(&mut self, mut page: Page) -> Id<Page> {
        page.set_margins(self.margins.clone());
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Render `table` onto `page` in its content area, then add the page and every page
    /// the table overflowed onto, in order. Returns the IDs of the added pages.
    pub fn render_table(&mut self, mut page: Page, table: &mut Table, x: Pt, y: Pt) -> Result<Vec<Id<Page>>> {
        let overflow = table.render(&mut page, x, y, true)?;

        let mut ids = Vec::with_capacity(overflow.len() + 1);
        ids.push(self.add_page(page));
        for page in overflow {
            ids.push(self.add_page(page));
        }
        Ok(ids)
    }

    /// Get the 0-based index of a page given its ID. Note that changing the page order
    /// after this call _will_ invalidate the returned page index
    pub fn index_of_page(&self, page: Id<Page>) -> Option<usize> {
        self.page_order.iter().position(|p| *p == page)
    }

    /// Get the page Id of a page at the given index. Returns [None] if
    /// `page_index >= self.page_order.len()`.
    pub fn id_of_page_index(&self, page_index: usize) -> Option<Id<Page>> {
        self.page_order.get(page_index).copied()
    }

    /// The pages of the document, in order
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.page_order.iter().filter_map(|id| self.pages.get(*id))
    }

    /// Use `table` as a template for the header on every page. Text cells may contain
    /// [CURRENT_PAGE] and [TOTAL_PAGES] placeholders.
    pub fn set_header(&mut self, table: Table) {
        self.header = Some(table);
    }

    /// Use `table` as a template for the footer on every page. Text cells may contain
    /// [CURRENT_PAGE] and [TOTAL_PAGES] placeholders.
    pub fn set_footer(&mut self, table: Table) {
        self.footer = Some(table);
    }

    /// Stamp the header and footer onto every page and return the pages in order.
    ///
    /// Headers and footers are drawn outside of the content area, spanning the content
    /// width. Anything that doesn't fit on the page is dropped.
    pub fn finish(mut self) -> Result<Vec<Page>> {
        let total = self.page_order.len();
        let margins = self.margins.clone();

        for (index, id) in self.page_order.iter().enumerate() {
            let page = self.pages.get_mut(*id).ok_or(TableError::PageMissing)?;
            let width = page.width() - margins.horizontal();

            if let Some(template) = &self.footer {
                let y = page.height() - margins.bottom - margins.top + self.footer_offset;
                stamp(template, page, width, index + 1, total, margins.left, y)?;
            }
            if let Some(template) = &self.header {
                let y = self.header_offset - margins.top;
                stamp(template, page, width, index + 1, total, margins.left, y)?;
            }
        }
        debug!(pages = total, "finished document");

        self.page_order
            .iter()
            .map(|id| self.pages.get(*id).cloned().ok_or(TableError::PageMissing))
            .collect()
    }
}

/// Render a copy of a header or footer template onto a page
fn stamp(template: &Table, page: &mut Page, width: Pt, current: usize, total: usize, x: Pt, y: Pt) -> Result<()> {
    let mut table = template.clone();
    table.set_width(width);
    table.replace_text(CURRENT_PAGE, &current.to_string());
    table.replace_text(TOTAL_PAGES, &total.to_string());

    let overflow = table.render(page, x, y, false)?;
    if !overflow.is_empty() {
        warn!(page = current, dropped = overflow.len(), "header or footer does not fit on the page");
    }
    Ok(())
}
