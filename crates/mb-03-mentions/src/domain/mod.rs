//! # Domain Module
//!
//! Mention candidates, scanning rules and outbound content types.

pub mod content;
pub mod entities;
pub mod errors;
pub mod markup;
pub mod scanner;
pub mod value_objects;

pub use content::*;
pub use entities::*;
pub use errors::*;
pub use markup::{escape_html, Markup};
pub use scanner::{is_special_mention, scan, SPECIAL_MENTIONS};
pub use value_objects::*;
