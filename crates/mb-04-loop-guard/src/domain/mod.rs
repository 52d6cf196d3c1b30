//! # Domain Module

pub mod entities;
pub mod origin;
pub mod value_objects;

pub use entities::*;
pub use origin::*;
pub use value_objects::*;
