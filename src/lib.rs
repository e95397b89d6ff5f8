//! Lookup between file format extensions and media types.
//!
//! A [`MimeTypeLookup`] pairs an ordered [`MimeTypeTable`] with a
//! [`ContentTypeResolver`] that is consulted for formats missing from the
//! table.

mod lookup;
mod resolver;
mod table;

pub use crate::lookup::{DEFAULT_MIME_TYPE, MimeTypeLookup, shared};
pub use crate::resolver::{
    ContentTypeResolver, MimeGuessResolver, MimeTypesFile, NoFallback, SYSTEM_MIME_TYPES_PATHS,
};
pub use crate::table::MimeTypeTable;
