use mimetable::{
    DEFAULT_MIME_TYPE, MimeTypeLookup, MimeTypeTable, MimeTypesFile, NoFallback, shared,
};
use std::sync::Arc;
use std::thread;

#[test]
fn documented_scenarios() {
    let lookup = MimeTypeLookup::new(MimeTypeTable::builtin(), NoFallback);
    assert_eq!(lookup.mime_type(Some("jpg")).as_deref(), Some("image/jpeg"));
    assert_eq!(lookup.mime_type_or(None, Some("x/y")).as_deref(), Some("x/y"));
    assert_eq!(lookup.mime_type(Some("unknownxyz")), None);
    assert_eq!(lookup.non_null_mime_type(Some("unknownxyz")), DEFAULT_MIME_TYPE);
    let formats = lookup.formats(Some("image/jpeg"));
    assert!(formats.contains(&"jpg"));
    assert!(formats.contains(&"jpeg"));
    assert_eq!(lookup.first_format(Some("image/jpeg")), Some(formats[0]));
}

#[test]
fn default_lookup_falls_back_to_guess_database() {
    // Not in the built-in table, known to mime_guess
    let lookup = MimeTypeLookup::default();
    assert!(!lookup.table().contains("ps"));
    assert_eq!(
        lookup.mime_type(Some("ps")).as_deref(),
        Some("application/postscript")
    );
    assert_eq!(lookup.mime_type(Some("unknownxyz")), None);
    assert_eq!(shared().mime_type(Some("json")).as_deref(), Some("application/json"));
}

#[test]
fn custom_table_with_mime_types_fallback() {
    let table = MimeTypeTable::from_properties("dat=application/x-first\nraw=application/x-first\n")
        .unwrap();
    let fallback = MimeTypesFile::parse("application/x-second dat foo\n");
    let lookup = MimeTypeLookup::new(table, fallback);
    assert_eq!(lookup.mime_type(Some("DAT")).as_deref(), Some("application/x-first"));
    assert_eq!(lookup.mime_type(Some("Foo")).as_deref(), Some("application/x-second"));
    assert_eq!(lookup.formats(Some("application/x-first")), vec!["dat", "raw"]);
    // Fallback matches are never part of reverse lookups
    assert!(lookup.formats(Some("application/x-second")).is_empty());
    assert_eq!(
        lookup.first_format_or(Some("application/x-second"), Some("bin")),
        Some("bin")
    );
}

#[test]
fn concurrent_reads_share_one_instance() {
    let lookup = Arc::new(MimeTypeLookup::new(MimeTypeTable::builtin(), NoFallback));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let lookup = lookup.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    assert_eq!(lookup.mime_type(Some("PNG")).as_deref(), Some("image/png"));
                    assert_eq!(lookup.first_format(Some("image/png")), Some("png"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
