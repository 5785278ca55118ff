//! This crate turns the `.bib` file behind an academic CV into the Markdown
//! fragments of the matching personal website.
//!
//! The same bibliography feeds the LaTeχ CV, where `\printbibliography[keyword=…]`
//! filters entries by keyword. The website does the same: an entry like
//!
//! ```tex
//! @article{kapu2023forecasting,
//!     author   = {Shrikrishna Bhat Kapu and A. Smith},
//!     title    = {Forecasting {COVID}-19 Cases},
//!     journal  = {Journal of Applied Statistics},
//!     year     = {2023},
//!     doi      = {10.1000/jas.2023},
//!     keywords = {pub}
//! }
//! ```
//!
//! shows up on the publications page (keyword `pub`) and gets its own detail page
//! `publications/kapu2023forecasting/index.qmd`. The other keywords are `software`,
//! `present`, `poster` and `part`.
//!
//! Parsing is tolerant: the file is hand-maintained, so text which cannot be read
//! as a field is skipped instead of aborting the build.
//!
//! ```rust
//! use bibsite::Parser;
//! use std::str::FromStr;
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let p = Parser::from_str(r#"@book{tolkien1937, author = {J. R. R. Tolkien}}"#)?;
//!     for entry in p.iter() {
//!         println!("type = {}", entry.kind);
//!         println!("id = {}", entry.id);
//!         for (name, data) in entry.fields.iter() {
//!             println!("\t{}\t= {}", name, data);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! [`generate`] runs the whole build: parse, render every page fragment and
//! write it below the project directory.

mod errors;
mod lexer;
mod parser;
mod types;

pub mod assets;
pub mod dates;
pub mod filter;
pub mod latex;
pub mod render;
pub mod site;

pub use crate::errors::{Error, Result};
pub use crate::filter::Category;
pub use crate::parser::{parse_bib, BibEntries, Parser};
pub use crate::site::{generate, SiteConfig};
pub use crate::types::BibEntry;
