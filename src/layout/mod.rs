//! Layout utilities shared by cells, rows and tables.
//!
//! [Edges] holds one value per side of a box and is used for page margins, cell paddings
//! and border styles alike. The text functions measure strings against a [FontSpec]
//! and greedily wrap them into lines that fit a given width.
//!
//! # Example
//!
//! ```
//! use pdf_table::{FontSpec, UniformFont, Pt};
//! use pdf_table::layout::{measure_text, Margins};
//!
//! let font = FontSpec::new(UniformFont::new(1024, 512), Pt(10.0));
//! let margins = Margins::trbl(Pt(30.0), Pt(20.0), Pt(30.0), Pt(20.0));
//!
//! let metrics = measure_text("one two three four", &font, Some(Pt(100.0) - margins.horizontal())).unwrap();
//! assert_eq!(metrics.lines, vec!["one two", "three four"]);
//! ```
//!
//! [FontSpec]: crate::FontSpec

mod edges;
mod text;

pub use edges::*;
pub use text::*;
