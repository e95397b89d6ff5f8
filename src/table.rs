use anyhow::{Result, bail};
use std::collections::HashMap;

/// Built-in extension table. Order matters: the first extension listed for
/// a media type is the one reported by reverse lookups.
const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    // Web Stuff
    ("html", "text/html"),
    ("htm", "text/html"),
    ("shtml", "text/html"),
    ("css", "text/css"),
    ("js", "text/javascript"),
    ("mjs", "text/javascript"),
    ("json", "application/json"),
    ("jsonld", "application/ld+json"),
    ("map", "application/json"),
    ("xhtml", "application/xhtml+xml"),
    ("xml", "application/xml"),
    ("xsl", "application/xml"),
    ("rss", "application/rss+xml"),
    ("atom", "application/atom+xml"),
    ("webmanifest", "application/manifest+json"),
    ("wasm", "application/wasm"),
    // Documents
    ("txt", "text/plain"),
    ("text", "text/plain"),
    ("log", "text/plain"),
    ("md", "text/markdown"),
    ("markdown", "text/markdown"),
    ("csv", "text/csv"),
    ("tsv", "text/tab-separated-values"),
    ("ics", "text/calendar"),
    ("rtf", "application/rtf"),
    ("pdf", "application/pdf"),
    ("epub", "application/epub+zip"),
    ("doc", "application/msword"),
    ("dot", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("xls", "application/vnd.ms-excel"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("ppt", "application/vnd.ms-powerpoint"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    ("odt", "application/vnd.oasis.opendocument.text"),
    ("ods", "application/vnd.oasis.opendocument.spreadsheet"),
    ("odp", "application/vnd.oasis.opendocument.presentation"),
    // Data & Config
    ("yaml", "application/yaml"),
    ("yml", "application/yaml"),
    ("toml", "application/toml"),
    ("sql", "application/sql"),
    // Images
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("jpe", "image/jpeg"),
    ("png", "image/png"),
    ("apng", "image/apng"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("avif", "image/avif"),
    ("svg", "image/svg+xml"),
    ("svgz", "image/svg+xml"),
    ("ico", "image/vnd.microsoft.icon"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("heif", "image/heif"),
    ("heic", "image/heic"),
    ("jxl", "image/jxl"),
    ("psd", "image/vnd.adobe.photoshop"),
    // Audio
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("weba", "audio/webm"),
    ("oga", "audio/ogg"),
    ("ogg", "audio/ogg"),
    ("opus", "audio/ogg"),
    ("flac", "audio/flac"),
    ("aac", "audio/aac"),
    ("m4a", "audio/mp4"),
    ("mid", "audio/midi"),
    ("midi", "audio/midi"),
    // Video & Media Container
    ("mp4", "video/mp4"),
    ("m4v", "video/mp4"),
    ("mpeg", "video/mpeg"),
    ("mpg", "video/mpeg"),
    ("ogv", "video/ogg"),
    ("webm", "video/webm"),
    ("mkv", "video/x-matroska"),
    ("mov", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    ("wmv", "video/x-ms-wmv"),
    ("flv", "video/x-flv"),
    ("3gp", "video/3gpp"),
    ("ogx", "application/ogg"),
    // Fonts
    ("ttf", "font/ttf"),
    ("otf", "font/otf"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("eot", "application/vnd.ms-fontobject"),
    // Archives
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
    ("tgz", "application/gzip"),
    ("bz2", "application/x-bzip2"),
    ("xz", "application/x-xz"),
    ("zst", "application/zstd"),
    ("tar", "application/x-tar"),
    ("7z", "application/x-7z-compressed"),
    ("rar", "application/vnd.rar"),
    ("jar", "application/java-archive"),
    // Binaries
    ("bin", "application/octet-stream"),
    ("exe", "application/octet-stream"),
    ("dll", "application/octet-stream"),
    ("iso", "application/octet-stream"),
    ("apk", "application/vnd.android.package-archive"),
    ("dmg", "application/x-apple-diskimage"),
    ("deb", "application/vnd.debian.binary-package"),
    ("rpm", "application/x-rpm"),
    // Scripts
    ("sh", "application/x-sh"),
    ("csh", "application/x-csh"),
    ("php", "application/x-httpd-php"),
];

/// Insertion-ordered mapping from lowercase extension to media type.
///
/// Immutable once built. Keys are unique and always lowercase, values may
/// repeat.
#[derive(Debug, Clone, Default)]
pub struct MimeTypeTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl MimeTypeTable {
    /// Table with the built-in entries.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_ENTRIES.iter().copied())
    }

    /// Builds a table from pairs in order.
    ///
    /// Keys are lowercased. A repeated key keeps the position of its first
    /// occurrence and takes the value of the last one.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut table = Self::default();
        for (extension, media_type) in entries {
            table.insert(extension.as_ref().to_lowercase(), media_type.into());
        }
        table
    }

    /// Parses `extension=media/type` lines.
    ///
    /// Blank lines and lines starting with `#` or `!` are skipped. The key
    /// ends at the first `=`, `:` or whitespace, as in a `.properties` file.
    pub fn from_properties(text: &str) -> Result<Self> {
        let mut table = Self::default();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let Some(end) = line.find(|c: char| c == '=' || c == ':' || c.is_whitespace()) else {
                bail!("Line {} has no separator: {line}", number + 1);
            };
            let (key, rest) = line.split_at(end);
            let rest = rest.trim_start();
            let value = rest
                .strip_prefix(['=', ':'])
                .unwrap_or(rest)
                .trim();
            if key.is_empty() || value.is_empty() {
                bail!("Line {} has an empty extension or type", number + 1);
            }
            table.insert(key.to_lowercase(), value.to_string());
        }
        Ok(table)
    }

    fn insert(&mut self, extension: String, media_type: String) {
        if let Some(&position) = self.index.get(&extension) {
            self.entries[position].1 = media_type;
        } else {
            self.index.insert(extension.clone(), self.entries.len());
            self.entries.push((extension, media_type));
        }
    }

    /// Exact lookup. The caller lowercases the key.
    pub fn get(&self, extension: &str) -> Option<&str> {
        self.index
            .get(extension)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.index.contains_key(extension)
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(e, m)| (e.as_str(), m.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
