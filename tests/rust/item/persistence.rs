//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zitem.
//! The Zitem project belongs to the Dunimd project team.

mod support;

use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::rc::Rc;

use support::{call_log, CallLog, TestLoader};
use zitem::item::{MIME_ITEMS, MIME_ITEM_NOTES, MIME_TEXT};
use zitem::{
    ZiItemData, ZiItemFactory, ZiItemList, ZiItemModel, ZiLoaderHandle, ZiLogLevel,
    ZiMemoryLogSink,
};

fn factory(loaders: Vec<ZiLoaderHandle>) -> ZiItemFactory {
    ZiItemFactory::with_loaders(loaders, Rc::new(ZiMemoryLogSink::default()))
}

fn calls_starting_with(calls: &CallLog, prefix: &str) -> Vec<String> {
    calls
        .borrow()
        .iter()
        .filter(|c| c.starts_with(prefix))
        .cloned()
        .collect()
}

#[test]
fn test_formats_without_loaders() {
    let factory = factory(Vec::new());

    assert_eq!(
        factory.formats_to_save(),
        vec![MIME_TEXT, MIME_ITEM_NOTES, MIME_ITEMS]
    );
}

#[test]
fn test_formats_union_in_first_seen_order() {
    let calls = call_log();
    let a = TestLoader::new("a", 2, &calls)
        .with_formats(&["image/png", MIME_TEXT, "text/html"])
        .handle();
    let b = TestLoader::new("b", 1, &calls)
        .with_formats(&["text/html", "application/x-tags"])
        .handle();
    let factory = factory(vec![a, b]);

    assert_eq!(
        factory.formats_to_save(),
        vec![
            MIME_TEXT,
            "image/png",
            "text/html",
            "application/x-tags",
            MIME_ITEM_NOTES,
            MIME_ITEMS,
        ]
    );
}

#[test]
fn test_formats_skip_disabled_loaders() {
    let calls = call_log();
    let a = TestLoader::new("a", 0, &calls).with_formats(&["image/png"]).handle();
    let mut factory = factory(vec![a.clone()]);
    factory.set_loader_enabled(&a, false);

    let formats = factory.formats_to_save();

    assert!(!formats.iter().any(|f| f == "image/png"));
    assert_eq!(formats[0], MIME_TEXT);
}

#[test]
fn test_formats_do_not_duplicate_markers() {
    let calls = call_log();
    let a = TestLoader::new("a", 0, &calls)
        .with_formats(&[MIME_ITEMS, MIME_TEXT])
        .handle();
    let factory = factory(vec![a]);

    let formats = factory.formats_to_save();

    assert_eq!(formats, vec![MIME_TEXT, MIME_ITEMS, MIME_ITEM_NOTES]);
}

#[test]
fn test_load_uses_first_loader_that_recognizes_stream() {
    let calls = call_log();
    let a = TestLoader::new("a", 3, &calls).handle();
    let b = TestLoader::new("b", 2, &calls).loading().handle();
    let c = TestLoader::new("c", 1, &calls).loading().handle();
    let factory = factory(vec![a, b, c]);

    let mut model = ZiItemList::new();
    let mut stream = Cursor::new(b"one\ntwo".to_vec());

    assert!(factory.load_items("clipboard", &mut model, &mut stream));
    assert_eq!(model.row_count(), 2);
    assert_eq!(
        calls_starting_with(&calls, "load:"),
        vec!["load:a:clipboard", "load:b:clipboard"]
    );
}

#[test]
fn test_load_fails_when_no_loader_recognizes_stream() {
    let calls = call_log();
    let factory = factory(vec![TestLoader::new("a", 0, &calls).handle()]);

    let mut model = ZiItemList::new();
    let mut stream = Cursor::new(Vec::new());

    assert!(!factory.load_items("tab", &mut model, &mut stream));
    assert!(!factory_without_loaders_loads());
}

fn factory_without_loaders_loads() -> bool {
    let mut model = ZiItemList::new();
    factory(Vec::new()).load_items("tab", &mut model, &mut Cursor::new(Vec::new()))
}

#[test]
fn test_save_rewinds_stream_before_each_attempt() {
    let calls = call_log();
    let a = TestLoader::new("a", 2, &calls)
        .saving(false, b"partial-garbage")
        .handle();
    let b = TestLoader::new("b", 1, &calls).saving(true, b"").handle();
    let factory = factory(vec![a, b]);

    let model: ZiItemList = vec![ZiItemData::from_text("ok")].into_iter().collect();
    let mut stream = Cursor::new(Vec::new());
    stream.write_all(b"old").unwrap();

    assert!(factory.save_items("tab", &model, &mut stream));
    assert_eq!(
        calls_starting_with(&calls, "save:"),
        vec!["save:a:tab@0", "save:b:tab@0"]
    );

    // Not truncated: bytes of the failed attempt past the saved data remain.
    let mut saved = String::new();
    stream.seek(SeekFrom::Start(0)).unwrap();
    stream.read_to_string(&mut saved).unwrap();
    assert_eq!(saved, "okrtial-garbage");
}

#[test]
fn test_save_fails_when_all_loaders_fail() {
    let calls = call_log();
    let factory = factory(vec![
        TestLoader::new("a", 1, &calls).handle(),
        TestLoader::new("b", 0, &calls).handle(),
    ]);

    let model = ZiItemList::new();
    assert!(!factory.save_items("tab", &model, &mut Cursor::new(Vec::new())));
    assert_eq!(calls_starting_with(&calls, "save:").len(), 2);
}

#[test]
fn test_save_skips_disabled_loaders() {
    let calls = call_log();
    let a = TestLoader::new("a", 1, &calls).saving(true, b"").handle();
    let b = TestLoader::new("b", 0, &calls).saving(true, b"").handle();
    let mut factory = factory(vec![a.clone(), b]);
    factory.set_loader_enabled(&a, false);

    let model = ZiItemList::new();
    assert!(factory.save_items("tab", &model, &mut Cursor::new(Vec::new())));
    assert_eq!(calls_starting_with(&calls, "save:"), vec!["save:b:tab@0"]);
}

/// Stream that refuses to seek.
struct Unseekable(Vec<u8>);

impl Read for Unseekable {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Ok(0)
    }
}

impl Write for Unseekable {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for Unseekable {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "no seeking"))
    }
}

#[test]
fn test_save_reports_unrewindable_stream() {
    let calls = call_log();
    let sink = Rc::new(ZiMemoryLogSink::default());
    let factory = ZiItemFactory::with_loaders(
        vec![TestLoader::new("a", 0, &calls).saving(true, b"").handle()],
        sink.clone(),
    );

    let model = ZiItemList::new();
    let mut stream = Unseekable(Vec::new());

    assert!(!factory.save_items("tab", &model, &mut stream));
    assert!(calls_starting_with(&calls, "save:").is_empty());
    assert_eq!(sink.messages(ZiLogLevel::Error).len(), 1);
}

#[test]
fn test_items_loaded_notifies_every_enabled_loader() {
    let calls = call_log();
    let a = TestLoader::new("a", 2, &calls).handle();
    let b = TestLoader::new("b", 1, &calls).handle();
    let c = TestLoader::new("c", 0, &calls).handle();
    let mut factory = factory(vec![a, b.clone(), c]);
    factory.set_loader_enabled(&b, false);

    let mut model: ZiItemList = vec![ZiItemData::from_text("x")].into_iter().collect();
    factory.items_loaded("tab", &mut model, &mut Cursor::new(Vec::new()));

    assert_eq!(
        calls_starting_with(&calls, "loaded:"),
        vec!["loaded:a:tab:1", "loaded:c:tab:1"]
    );
}
