//! Table layout and pagination for page-based documents.
//!
//! A [Table] is made of [Row]s, which are made of [Cell]s holding text or an image. Rendering
//! a table onto a page measures every cell with the page's fonts, sizes the columns so that
//! they line up across rows, and places the rows top to bottom, spawning new pages as the
//! table overflows. Drawing is delegated to a [Surface]; [Page] is a surface that records
//! what is drawn so it can be written out (or inspected) afterwards.
//!
//! ```
//! use pdf_table::{Cell, Document, FontSpec, HAlign, Pt, Row, Table, UniformFont, A4};
//!
//! let font = FontSpec::new(UniformFont::new(1024, 512), Pt(10.0));
//! let mut doc = Document::default().with_font(font.clone());
//!
//! let mut table = Table::default();
//! table.set_header(Row::header(["Description", "Amount"], font));
//! table.add_row(Row::new(vec![
//!     Cell::text("Coffee"),
//!     Cell::text("3.50").with_align(HAlign::Right),
//! ]));
//!
//! let page = doc.create_page(A4);
//! doc.render_table(page, &mut table, Pt(0.0), Pt(0.0)).unwrap();
//!
//! let mut footer = Table::default();
//! footer.add_row(Row::new(vec![Cell::text("Page @@CURRENT_PAGE of @@TOTAL_PAGES")]));
//! doc.set_footer(footer);
//!
//! let pages = doc.finish().unwrap();
//! assert!(pages[0].contains_text("Page 1 of 1"));
//! ```

mod colour;
pub use colour::*;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

/// Utility functions and structures to measure text and describe boxes
pub mod layout;

mod page;
pub use page::*;

mod rect;
pub use rect::*;

mod style;
pub use style::*;

mod surface;
pub use surface::*;

mod table;
pub use table::*;

mod units;
pub use units::*;

mod error;
pub use error::*;
