//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zitem.
//! The Zitem project belongs to the Dunimd project team.

mod support;

use std::rc::Rc;

use support::{call_log, TestLoader, TestWidget};
use zitem::{
    ZiCycleDirection, ZiError, ZiItem, ZiItemData, ZiItemFactory, ZiItemOwner, ZiLoaderHandle,
    ZiLogLevel, ZiMemoryLogSink, ZiParentContext,
};

fn label(item: &ZiItem) -> String {
    item.downcast_ref::<TestWidget>().unwrap().label.clone()
}

fn four_loaders() -> (ZiItemFactory, Vec<ZiLoaderHandle>) {
    let calls = call_log();
    let handles: Vec<_> = [("a", 4), ("b", 3), ("c", 2), ("d", 1)]
        .iter()
        .map(|(name, priority)| TestLoader::new(name, *priority, &calls).handle())
        .collect();
    let factory =
        ZiItemFactory::with_loaders(handles.clone(), Rc::new(ZiMemoryLogSink::default()));
    (factory, handles)
}

#[test]
fn test_next_loader_walks_forward_and_wraps() {
    let (factory, handles) = four_loaders();
    let row = ZiItemData::from_text("x");
    let root = ZiParentContext::root();

    let mut item = factory.create_item_with(Some(&handles[2]), &row, root).unwrap();
    let mut seen = Vec::new();
    for _ in 0..4 {
        item = factory.next_item_loader(&row, &item).unwrap();
        seen.push(label(&item));
    }

    assert_eq!(seen, vec!["d:x", "a:x", "b:x", "c:x"]);
}

#[test]
fn test_previous_loader_walks_backward_and_wraps() {
    let (factory, handles) = four_loaders();
    let row = ZiItemData::from_text("x");

    let item = factory
        .create_item_with(Some(&handles[0]), &row, ZiParentContext::root())
        .unwrap();
    let previous = factory.previous_item_loader(&row, &item).unwrap();

    assert_eq!(label(&previous), "d:x");
    assert_eq!(
        factory.owner_of(previous.id()),
        Some(ZiItemOwner::Loader(handles[3].clone()))
    );
}

#[test]
fn test_cycling_skips_disabled_and_declining_loaders() {
    let calls = call_log();
    let a = TestLoader::new("a", 4, &calls).handle();
    let b = TestLoader::new("b", 3, &calls).handle();
    let c = TestLoader::new("c", 2, &calls).declining().handle();
    let d = TestLoader::new("d", 1, &calls).handle();
    let mut factory = ZiItemFactory::with_loaders(
        vec![a.clone(), b.clone(), c, d],
        Rc::new(ZiMemoryLogSink::default()),
    );
    factory.set_loader_enabled(&b, false);

    let row = ZiItemData::from_text("x");
    let item = factory.create_item(&row, ZiParentContext::root());
    assert_eq!(label(&item), "a:x");

    let next = factory.next_item_loader(&row, &item).unwrap();
    assert_eq!(label(&next), "d:x");
}

#[test]
fn test_cycling_keeps_parent_context() {
    let (factory, handles) = four_loaders();
    let row = ZiItemData::from_text("x");
    let parent = ZiParentContext::of(zitem::ZiWidgetId::next());

    let item = factory.create_item_with(Some(&handles[1]), &row, parent).unwrap();
    let next = factory.next_item_loader(&row, &item).unwrap();

    assert_eq!(next.widget().parent(), parent);
}

#[test]
fn test_cycling_fallback_item_fails() {
    let (factory, _) = four_loaders();
    let row = ZiItemData::from_text("x");

    let item = factory.create_item_with(None, &row, ZiParentContext::root()).unwrap();

    assert!(matches!(
        factory.try_cycle_item(&row, &item, ZiCycleDirection::Next),
        Err(ZiError::OwnershipLookupMiss { .. })
    ));
    assert!(factory.previous_item_loader(&row, &item).is_none());
}

#[test]
fn test_cycling_destroyed_item_fails() {
    let (factory, handles) = four_loaders();
    let row = ZiItemData::from_text("x");

    let item = factory
        .create_item_with(Some(&handles[0]), &row, ZiParentContext::root())
        .unwrap();
    factory.item_destroyed(item.id());

    assert!(factory.next_item_loader(&row, &item).is_none());
}

#[test]
fn test_cycling_with_single_loader_yields_nothing() {
    let calls = call_log();
    let only = TestLoader::new("only", 0, &calls).handle();
    let factory =
        ZiItemFactory::with_loaders(vec![only.clone()], Rc::new(ZiMemoryLogSink::default()));
    let row = ZiItemData::from_text("x");

    let item = factory.create_item(&row, ZiParentContext::root());

    assert!(matches!(
        factory.try_cycle_item(&row, &item, ZiCycleDirection::Next),
        Err(ZiError::NoLoaderAvailable(_))
    ));
}

#[test]
fn test_cycling_when_all_others_decline() {
    let calls = call_log();
    let a = TestLoader::new("a", 2, &calls).handle();
    let b = TestLoader::new("b", 1, &calls).declining().handle();
    let factory = ZiItemFactory::with_loaders(vec![a, b], Rc::new(ZiMemoryLogSink::default()));
    let row = ZiItemData::from_text("x");

    let item = factory.create_item(&row, ZiParentContext::root());
    calls.borrow_mut().clear();

    assert!(factory.next_item_loader(&row, &item).is_none());
    assert_eq!(*calls.borrow(), vec!["create:b".to_string()]);
}

#[test]
fn test_cycling_owner_missing_from_collection_logs_error() {
    let calls = call_log();
    let stray = TestLoader::new("stray", 0, &calls).handle();
    let sink = Rc::new(ZiMemoryLogSink::default());
    let factory = ZiItemFactory::with_loaders(
        vec![TestLoader::new("a", 0, &calls).handle()],
        sink.clone(),
    );
    let row = ZiItemData::from_text("x");

    // Loaders outside the collection can still be driven directly.
    let item = factory
        .create_item_with(Some(&stray), &row, ZiParentContext::root())
        .unwrap();

    assert!(factory.next_item_loader(&row, &item).is_none());
    assert_eq!(sink.messages(ZiLogLevel::Error).len(), 1);
}
