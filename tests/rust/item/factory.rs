//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zitem.
//! The Zitem project belongs to the Dunimd project team.

mod support;

use std::rc::Rc;

use support::{call_log, CallLog, TestLoader, TestWidget};
use zitem::item::{ZiFallbackItem, FALLBACK_MAX_CHARS};
use zitem::{
    ZiError, ZiItemData, ZiItemFactory, ZiItemOwner, ZiLoaderHandle, ZiMemoryLogSink,
    ZiParentContext, ZiWidgetId,
};

fn factory(loaders: Vec<ZiLoaderHandle>) -> ZiItemFactory {
    ZiItemFactory::with_loaders(loaders, Rc::new(ZiMemoryLogSink::default()))
}

fn abc(calls: &CallLog) -> (ZiItemFactory, Vec<ZiLoaderHandle>) {
    let a = TestLoader::new("a", 3, calls).handle();
    let b = TestLoader::new("b", 2, calls).declining().handle();
    let c = TestLoader::new("c", 1, calls).handle();
    let handles = vec![a.clone(), b.clone(), c.clone()];
    (factory(vec![a, b, c]), handles)
}

#[test]
fn test_create_item_uses_first_enabled_loader_that_accepts() {
    let calls = call_log();
    let (mut factory, handles) = abc(&calls);
    factory.set_loader_enabled(&handles[0], false);

    let row = ZiItemData::from_text("hello");
    let item = factory.create_item(&row, ZiParentContext::root());

    let widget = item.downcast_ref::<TestWidget>().unwrap();
    assert_eq!(widget.label, "c:hello");
    assert_eq!(factory.owner_of(item.id()), Some(ZiItemOwner::Loader(handles[2].clone())));

    let creates: Vec<_> = calls
        .borrow()
        .iter()
        .filter(|c| c.starts_with("create:"))
        .cloned()
        .collect();
    assert_eq!(creates, vec!["create:b", "create:c"]);
}

#[test]
fn test_create_item_falls_back_to_plain_text() {
    let calls = call_log();
    let factory = factory(vec![TestLoader::new("a", 0, &calls).declining().handle()]);

    let row = ZiItemData::from_text("plain");
    let parent = ZiParentContext::of(ZiWidgetId::next());
    let item = factory.create_item(&row, parent);

    let fallback = item.downcast_ref::<ZiFallbackItem>().unwrap();
    assert_eq!(fallback.text(), "plain");
    assert_eq!(item.widget().parent(), parent);
    assert_eq!(factory.owner_of(item.id()), Some(ZiItemOwner::Fallback));
}

#[test]
fn test_fallback_truncates_long_text() {
    let factory = factory(Vec::new());
    let row = ZiItemData::from_text("x".repeat(FALLBACK_MAX_CHARS + 10));

    let item = factory.create_item(&row, ZiParentContext::root());

    let fallback = item.downcast_ref::<ZiFallbackItem>().unwrap();
    assert_eq!(fallback.text().chars().count(), FALLBACK_MAX_CHARS);
}

#[test]
fn test_fallback_without_text_is_empty() {
    let factory = factory(Vec::new());

    let item = factory.create_item(&ZiItemData::new(), ZiParentContext::root());

    assert_eq!(item.downcast_ref::<ZiFallbackItem>().unwrap().text(), "");
}

#[test]
fn test_notes_become_tooltip() {
    let calls = call_log();
    let factory = factory(vec![TestLoader::new("a", 0, &calls).handle()]);

    let with_notes = ZiItemData::from_text("row").with_notes("remember this");
    let item = factory.create_item(&with_notes, ZiParentContext::root());
    assert_eq!(item.widget().tooltip(), Some("remember this"));

    let empty_notes = ZiItemData::from_text("row").with_notes("");
    let item = factory.create_item(&empty_notes, ZiParentContext::root());
    assert_eq!(item.widget().tooltip(), None);
}

#[test]
fn test_fallback_item_gets_notes_tooltip() {
    let factory = factory(Vec::new());

    let row = ZiItemData::from_text("row").with_notes("note");
    let item = factory.create_item(&row, ZiParentContext::root());

    assert_eq!(item.widget().tooltip(), Some("note"));
}

#[test]
fn test_transform_chain_runs_in_order_over_enabled_loaders() {
    let calls = call_log();
    let a = TestLoader::new("a", 3, &calls).handle();
    let b = TestLoader::new("b", 2, &calls).decorating().handle();
    let c = TestLoader::new("c", 1, &calls).decorating().handle();
    let mut factory = factory(vec![a.clone(), b.clone(), c.clone()]);
    factory.set_loader_enabled(&c, false);

    let row = ZiItemData::from_text("t");
    let item = factory.create_item(&row, ZiParentContext::root());

    let outer = item.downcast_ref::<TestWidget>().unwrap();
    assert_eq!(outer.label, "decorated-by:b");
    let inner = outer.inner.as_ref().unwrap();
    let inner = inner.as_any().downcast_ref::<TestWidget>().unwrap();
    assert_eq!(inner.label, "a:t");

    let transforms: Vec<_> = calls
        .borrow()
        .iter()
        .filter(|c| c.starts_with("transform:"))
        .cloned()
        .collect();
    assert_eq!(transforms, vec!["transform:a", "transform:b"]);

    // Ownership stays with the creating loader and follows the final widget.
    assert_eq!(factory.owner_of(item.id()), Some(ZiItemOwner::Loader(a)));
    assert_eq!(item.id(), outer.id);
}

#[test]
fn test_fallback_item_is_offered_to_transforms() {
    let calls = call_log();
    let factory = factory(vec![TestLoader::new("deco", 0, &calls)
        .declining()
        .decorating()
        .handle()]);

    let item = factory.create_item(&ZiItemData::from_text("x"), ZiParentContext::root());

    assert_eq!(item.downcast_ref::<TestWidget>().unwrap().label, "decorated-by:deco");
    assert_eq!(factory.owner_of(item.id()), Some(ZiItemOwner::Fallback));
}

#[test]
fn test_create_item_with_reports_refusals() {
    let calls = call_log();
    let (mut factory, handles) = abc(&calls);
    factory.set_loader_enabled(&handles[0], false);
    let row = ZiItemData::from_text("r");
    let root = ZiParentContext::root();

    assert!(matches!(
        factory.try_create_item_with(Some(&handles[0]), &row, root),
        Err(ZiError::LoaderDisabled { .. })
    ));
    assert!(matches!(
        factory.try_create_item_with(Some(&handles[1]), &row, root),
        Err(ZiError::LoaderProducedNoItem { .. })
    ));
    assert!(factory.create_item_with(Some(&handles[2]), &row, root).is_some());

    let fallback = factory.create_item_with(None, &row, root).unwrap();
    assert!(fallback.downcast_ref::<ZiFallbackItem>().is_some());
}

#[test]
fn test_disabled_loader_never_invoked() {
    let calls = call_log();
    let a = TestLoader::new("a", 0, &calls).decorating().handle();
    let mut factory = factory(vec![a.clone()]);
    factory.set_loader_enabled(&a, false);

    let _item = factory.create_item(&ZiItemData::from_text("x"), ZiParentContext::root());

    assert!(calls.borrow().is_empty());
    assert!(!factory.is_loader_enabled(&a));
    assert_eq!(factory.enabled_loaders().count(), 0);
    assert_eq!(factory.loaders().len(), 1);
}

#[test]
fn test_dropping_item_removes_ownership() {
    let calls = call_log();
    let factory = factory(vec![TestLoader::new("a", 0, &calls).handle()]);

    let item = factory.create_item(&ZiItemData::from_text("x"), ZiParentContext::root());
    let id = item.id();
    assert_eq!(factory.live_items(), vec![id]);

    drop(item);

    assert!(factory.owner_of(id).is_none());
    assert!(factory.live_items().is_empty());
}

#[test]
fn test_item_destroyed_hook_removes_ownership() {
    let calls = call_log();
    let factory = factory(vec![TestLoader::new("a", 0, &calls).handle()]);

    let first = factory.create_item(&ZiItemData::from_text("1"), ZiParentContext::root());
    let second = factory.create_item(&ZiItemData::from_text("2"), ZiParentContext::root());

    factory.item_destroyed(first.id());

    assert!(factory.owner_of(first.id()).is_none());
    assert!(factory.owner_of(second.id()).is_some());

    // Dropping an already forgotten item is harmless.
    drop(first);
    assert_eq!(factory.live_items(), vec![second.id()]);
}

#[test]
fn test_set_plugin_priority_reorders_dispatch() {
    let calls = call_log();
    let (mut factory, _) = abc(&calls);

    factory.set_plugin_priority(&["c"]);

    let item = factory.create_item(&ZiItemData::from_text("x"), ZiParentContext::root());
    assert_eq!(item.downcast_ref::<TestWidget>().unwrap().label, "c:x");
}
