use crate::resolver::{ContentTypeResolver, MimeGuessResolver};
use crate::table::MimeTypeTable;
use std::sync::OnceLock;
use tracing::debug;

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Two way lookup between format extensions and media types.
///
/// The table is consulted first; only when it has no entry for a format is
/// the fallback resolver asked, with the file name `test.<format>`.
pub struct MimeTypeLookup {
    table: MimeTypeTable,
    fallback: Box<dyn ContentTypeResolver>,
}

impl MimeTypeLookup {
    pub fn new(table: MimeTypeTable, fallback: impl ContentTypeResolver + 'static) -> Self {
        Self::with_boxed_fallback(table, Box::new(fallback))
    }

    pub fn with_boxed_fallback(
        table: MimeTypeTable,
        fallback: Box<dyn ContentTypeResolver>,
    ) -> Self {
        Self { table, fallback }
    }

    pub fn table(&self) -> &MimeTypeTable {
        &self.table
    }

    /// Media type for `format`, or `default` when there is neither a table
    /// entry nor a fallback match.
    pub fn mime_type_or(&self, format: Option<&str>, default: Option<&str>) -> Option<String> {
        let Some(format) = format else {
            return default.map(String::from);
        };
        if let Some(media_type) = self.table.get(&format.to_lowercase()) {
            return Some(media_type.to_string());
        }
        debug!("No table entry for {format:?}, asking fallback resolver");
        self.fallback
            .resolve(&format!("test.{format}"))
            .or_else(|| default.map(String::from))
    }

    pub fn mime_type(&self, format: Option<&str>) -> Option<String> {
        self.mime_type_or(format, None)
    }

    /// Like [`Self::mime_type`], defaulting to `application/octet-stream`.
    pub fn non_null_mime_type(&self, format: Option<&str>) -> String {
        self.mime_type_or(format, Some(DEFAULT_MIME_TYPE))
            .unwrap_or_else(|| String::from(DEFAULT_MIME_TYPE))
    }

    /// Every extension mapped to exactly `mime_type`, in table order.
    pub fn formats(&self, mime_type: Option<&str>) -> Vec<&str> {
        let Some(mime_type) = mime_type else {
            return Vec::new();
        };
        self.table
            .entries()
            .filter(|&(_, value)| value == mime_type)
            .map(|(extension, _)| extension)
            .collect()
    }

    pub fn first_format_or<'a>(
        &'a self,
        mime_type: Option<&str>,
        default: Option<&'a str>,
    ) -> Option<&'a str> {
        self.formats(mime_type).first().copied().or(default)
    }

    pub fn first_format(&self, mime_type: Option<&str>) -> Option<&str> {
        self.first_format_or(mime_type, None)
    }
}

impl Default for MimeTypeLookup {
    /// Built-in table with the `mime_guess` database as fallback.
    fn default() -> Self {
        Self::new(MimeTypeTable::builtin(), MimeGuessResolver)
    }
}

/// Shared instance built on first use with [`MimeTypeLookup::default`].
pub fn shared() -> &'static MimeTypeLookup {
    static SHARED: OnceLock<MimeTypeLookup> = OnceLock::new();
    SHARED.get_or_init(MimeTypeLookup::default)
}
