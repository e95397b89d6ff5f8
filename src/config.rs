use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use mimetable::{
    ContentTypeResolver, MimeGuessResolver, MimeTypeLookup, MimeTypeTable, MimeTypesFile,
    NoFallback,
};
use std::path::PathBuf;
use tracing::{Level, info};

#[derive(Parser, Clone)]
#[command(version, about, long_about = None)]
pub struct Configuration {
    /// Logging level
    #[arg(long, env, default_value = "WARN", global = true)]
    pub log_level: Level,

    /// Where to look for formats missing from the table
    #[arg(long, env, value_enum, default_value_t = Fallback::Guess, global = true)]
    pub fallback: Fallback,

    /// mime.types file used by the system fallback instead of the well-known locations
    #[arg(long, env, global = true)]
    pub mime_types_file: Option<PathBuf>,

    /// Properties file with extension=type lines replacing the built-in table
    #[arg(long, env, global = true)]
    pub table_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fallback {
    /// Built-in guess database
    Guess,
    /// Host mime.types files
    System,
    /// Table only
    None,
}

#[derive(Subcommand, Clone)]
pub enum Command {
    /// Print the media type of a format
    Mime {
        format: String,
        /// Printed when nothing matches
        #[arg(long)]
        default: Option<String>,
    },
    /// Print the media type of a format, application/octet-stream if unknown
    NonNull { format: String },
    /// Print all formats of a media type in table order
    Formats { mime_type: String },
    /// Print the first format of a media type
    First {
        mime_type: String,
        /// Printed when nothing matches
        #[arg(long)]
        default: Option<String>,
    },
    /// Print the whole table
    List,
}

impl Configuration {
    pub fn log(&self) {
        info!("Log Level: {}", self.log_level);
        info!("Fallback: {:?}", self.fallback);
        if let Some(path) = &self.mime_types_file {
            info!("Mime Types File: {}", path.display());
        }
        if let Some(path) = &self.table_file {
            info!("Table File: {}", path.display());
        }
    }

    pub fn build_lookup(&self) -> Result<MimeTypeLookup> {
        let table = if let Some(path) = &self.table_file {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read table file {}", path.display()))?;
            let table = MimeTypeTable::from_properties(&text)
                .with_context(|| format!("Failed to parse table file {}", path.display()))?;
            info!("Loaded {} table entries from {}", table.len(), path.display());
            table
        } else {
            MimeTypeTable::builtin()
        };
        Ok(MimeTypeLookup::with_boxed_fallback(
            table,
            self.build_fallback()?,
        ))
    }

    fn build_fallback(&self) -> Result<Box<dyn ContentTypeResolver>> {
        let fallback: Box<dyn ContentTypeResolver> = match (self.fallback, &self.mime_types_file) {
            (Fallback::Guess, _) => Box::new(MimeGuessResolver),
            (Fallback::System, Some(path)) => Box::new(MimeTypesFile::load(path)?),
            (Fallback::System, None) => Box::new(MimeTypesFile::from_system()),
            (Fallback::None, _) => Box::new(NoFallback),
        };
        Ok(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Configuration::try_parse_from(["mimetable", "mime", "jpg"]).unwrap();
        assert_eq!(config.log_level, Level::WARN);
        assert_eq!(config.fallback, Fallback::Guess);
        assert!(config.table_file.is_none());
        let lookup = config.build_lookup().unwrap();
        assert_eq!(lookup.mime_type(Some("jpg")).as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn global_options_after_subcommand() {
        let config =
            Configuration::try_parse_from(["mimetable", "first", "image/png", "--fallback", "none"])
                .unwrap();
        assert_eq!(config.fallback, Fallback::None);
        let lookup = config.build_lookup().unwrap();
        assert_eq!(lookup.mime_type(Some("ps")), None);
    }

    #[test]
    fn missing_files_fail_setup() {
        let config = Configuration::try_parse_from([
            "mimetable",
            "list",
            "--table-file",
            "/nonexistent/table.properties",
        ])
        .unwrap();
        assert!(config.build_lookup().is_err());

        let config = Configuration::try_parse_from([
            "mimetable",
            "list",
            "--fallback",
            "system",
            "--mime-types-file",
            "/nonexistent/mime.types",
        ])
        .unwrap();
        assert!(config.build_lookup().is_err());
    }
}
