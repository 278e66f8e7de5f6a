/// End-to-end tests over archive directories on disk
mod common;

use chat_archive_viewer::config::{LoadOptions, RenderOptions, TimeZoneMode};
use chat_archive_viewer::render::RowKind;
use chat_archive_viewer::{DirSource, LoadError, load_archive, open_view};
use common::{ArchiveDirBuilder, flat, threaded};
use serde_json::{Value, json};

fn entries() -> Vec<Value> {
    vec![
        threaded("8:alice", "Alice Smith", "8:alice", &["one", "two", "three"]),
        flat("8:bob", Some("Bob"), "8:bob", "hey"),
        flat("8:bob", Some("Robert"), "8:me", "hi bob"),
    ]
}

fn utc() -> RenderOptions {
    RenderOptions { time_zone: TimeZoneMode::Utc, ..RenderOptions::default() }
}

#[test]
fn test_root_shapes_are_equivalent() {
    let wrapped = ArchiveDirBuilder::new()
        .with_messages(json!({ "userId": "8:me", "conversations": entries() }))
        .build();
    let bare = ArchiveDirBuilder::new().with_messages(Value::Array(entries())).build();
    let mut keyed_map = serde_json::Map::new();
    for (i, entry) in entries().into_iter().enumerate() {
        keyed_map.insert(format!("entry{i}"), entry);
    }
    let keyed = ArchiveDirBuilder::new().with_messages(Value::Object(keyed_map)).build();

    let load = |dir: &tempfile::TempDir| {
        load_archive(&DirSource::new(dir.path()), &LoadOptions::default()).unwrap()
    };
    let (wrapped, bare, keyed) = (load(&wrapped), load(&bare), load(&keyed));

    assert_eq!(wrapped.conversations(), bare.conversations());
    assert_eq!(wrapped.conversations(), keyed.conversations());
    assert_eq!(wrapped.user_id(), Some("8:me"));
}

#[test]
fn test_end_to_end_threaded_and_flat_log() {
    let dir = ArchiveDirBuilder::new()
        .with_messages(json!({ "userId": "8:me", "conversations": entries() }))
        .build();
    let index = load_archive(&DirSource::new(dir.path()), &LoadOptions::default()).unwrap();

    assert_eq!(index.len(), 2);
    assert_eq!(index.messages("8:alice").len(), 3);
    assert_eq!(index.messages("8:bob").len(), 2);
    assert_eq!(index.get("8:bob").unwrap().label(), "Bob");

    let alice_before = index.messages("8:alice").to_vec();
    let mut view = open_view(&index, utc());
    assert_eq!(view.messages().len(), 3);
    assert_eq!(view.chat_list()[0].preview, "three");

    assert!(view.select(1));
    assert_eq!(view.messages().len(), 2);
    assert_eq!(view.messages()[0].kind, RowKind::Other);
    assert_eq!(view.messages()[0].author.as_deref(), Some("Bob"));
    assert_eq!(view.messages()[1].kind, RowKind::Own);
    assert_eq!(view.messages()[1].time, "1/15/2024, 10:30:00 AM");
    assert!(view.chat_list()[1].active && !view.chat_list()[0].active);

    assert_eq!(index.messages("8:alice"), alice_before.as_slice());
}

#[test]
fn test_schema_b_order_and_first_label() {
    let dir = ArchiveDirBuilder::new()
        .with_messages(json!([
            flat("c", None, "8:x", "first"),
            flat("other", Some("Other"), "8:y", "elsewhere"),
            flat("c", Some("Late Label"), "8:x", "second"),
            flat("c", None, "8:x", "third"),
        ]))
        .build();
    let index = load_archive(&DirSource::new(dir.path()), &LoadOptions::default()).unwrap();

    let contents: Vec<&str> = index.messages("c").iter().map(|m| m.content()).collect();
    assert_eq!(contents, vec!["first", "second", "third"]);
    assert_eq!(index.get("c").unwrap().label(), "c");
    assert_eq!(index.position("other"), Some(1));
}

#[test]
fn test_media_reference_rendered_from_manifest() {
    let dir = ArchiveDirBuilder::new()
        .with_messages(json!([threaded(
            "c",
            "Photos",
            "8:x",
            &[r#"<URIObject type="Picture.1"><OriginalName v="photo.heic"/></URIObject>"#],
        )]))
        .with_manifest(&["abc.json"])
        .with_media_metadata("abc.json", "photo.heic")
        .build();
    let index = load_archive(&DirSource::new(dir.path()), &LoadOptions::default()).unwrap();

    assert_eq!(index.media().resolve("photo.heic"), Some("media/abc.heic"));
    let view = open_view(&index, utc());
    assert!(view.messages()[0].content.ends_with(r#"<br><img src="media/abc.heic" alt="media" />"#));
    assert_eq!(view.chat_list()[0].preview, "[Attachment]");
}

#[test]
fn test_scan_media_without_manifest() {
    let dir = ArchiveDirBuilder::new()
        .with_messages(json!([]))
        .with_media_metadata("abc.json", "clip.mp4")
        .with_file("media/abc.mp4", "binary")
        .build();
    let source = DirSource::new(dir.path());

    let without_scan = load_archive(&source, &LoadOptions::default()).unwrap();
    assert!(without_scan.media().is_empty());

    let options = LoadOptions { scan_media: true, ..LoadOptions::default() };
    let with_scan = load_archive(&source, &options).unwrap();
    assert_eq!(with_scan.media().resolve("clip.mp4"), Some("media/abc.mp4"));
}

#[test]
fn test_root_failures_are_fatal() {
    let missing = ArchiveDirBuilder::new().build();
    let err = load_archive(&DirSource::new(missing.path()), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));

    let invalid = ArchiveDirBuilder::new().with_file("messages.json", "{\"conversations\": [").build();
    let err = load_archive(&DirSource::new(invalid.path()), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
}
