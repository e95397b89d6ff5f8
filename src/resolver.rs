use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

/// Locations searched by [`MimeTypesFile::from_system`], in order.
pub const SYSTEM_MIME_TYPES_PATHS: &[&str] = &[
    "/etc/mime.types",
    "/etc/apache2/mime.types",
    "/etc/apache/mime.types",
    "/etc/httpd/conf/mime.types",
];

/// Host provided file name to media type guesser, consulted when the table
/// has no entry.
///
/// Implementations must not fail: anything that goes wrong is `None`.
pub trait ContentTypeResolver: Send + Sync {
    fn resolve(&self, file_name: &str) -> Option<String>;
}

impl<F> ContentTypeResolver for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn resolve(&self, file_name: &str) -> Option<String> {
        self(file_name)
    }
}

/// Never resolves anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl ContentTypeResolver for NoFallback {
    fn resolve(&self, _file_name: &str) -> Option<String> {
        None
    }
}

/// Guess database compiled into the `mime_guess` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MimeGuessResolver;

impl ContentTypeResolver for MimeGuessResolver {
    fn resolve(&self, file_name: &str) -> Option<String> {
        mime_guess::from_path(file_name)
            .first_raw()
            .map(String::from)
    }
}

/// Extension table read from Apache style `mime.types` files.
///
/// Each line is a media type followed by its extensions, `#` starts a
/// comment. The first definition of an extension wins.
#[derive(Debug, Clone, Default)]
pub struct MimeTypesFile {
    types: HashMap<String, String>,
}

impl MimeTypesFile {
    pub fn parse(text: &str) -> Self {
        let mut file = Self::default();
        file.extend_from(text);
        file
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file = Self::parse(&text);
        info!(
            "Loaded {} extensions from {}",
            file.types.len(),
            path.display()
        );
        Ok(file)
    }

    /// Merges all readable well-known system files.
    pub fn from_system() -> Self {
        let paths: Vec<&Path> = SYSTEM_MIME_TYPES_PATHS.iter().map(Path::new).collect();
        Self::from_paths(&paths)
    }

    /// Merges the given files in order, so an earlier file's definition of
    /// an extension wins. Missing files are skipped, unreadable ones are
    /// logged and skipped.
    pub fn from_paths(paths: &[&Path]) -> Self {
        let mut file = Self::default();
        for path in paths {
            match std::fs::read_to_string(path) {
                Ok(text) => {
                    let before = file.types.len();
                    file.extend_from(&text);
                    info!(
                        "Loaded {} extensions from {}",
                        file.types.len() - before,
                        path.display()
                    );
                }
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    debug!("No mime types file at {}", path.display());
                }
                Err(err) => warn!("Failed to read {}: {err}", path.display()),
            }
        }
        file
    }

    fn extend_from(&mut self, text: &str) {
        for line in text.lines() {
            let line = line.split_once('#').map_or(line, |(content, _)| content);
            let mut fields = line.split_whitespace();
            let Some(media_type) = fields.next() else {
                continue;
            };
            if !media_type.contains('/') {
                continue;
            }
            for extension in fields {
                let extension = extension.trim_start_matches('.').to_lowercase();
                if extension.is_empty() {
                    continue;
                }
                self.types
                    .entry(extension)
                    .or_insert_with(|| media_type.to_string());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl ContentTypeResolver for MimeTypesFile {
    fn resolve(&self, file_name: &str) -> Option<String> {
        let (_, extension) = file_name.rsplit_once('.')?;
        self.types.get(&extension.to_lowercase()).cloned()
    }
}
