// tests/editor_tests.rs
mod common;

use catalog::editor::SAVE_FAILED;
use catalog::{
  CatalogBrowser, CatalogError, EditorMode, MemoryStore, ProductEditor, StoreOp, SubmitOutcome, DEFAULT_CATEGORY,
};
use chrono::{Duration, TimeZone, Utc};
use common::*;
use rust_decimal::Decimal;
use std::sync::Arc;

#[tokio::test]
async fn test_create_submit_sends_null_sale_price() {
  setup_tracing();
  let store = Arc::new(MemoryStore::new());
  let editor = ProductEditor::create(store.clone(), RecordingPrompt::answering(true));
  assert_eq!(editor.mode(), EditorMode::Create);
  assert_eq!(editor.form().category, DEFAULT_CATEGORY);

  editor.set_name("Widget");
  editor.set_description("A general purpose widget");
  editor.set_price("9.99");
  editor.set_sale_price("0");
  editor.set_stock("5");
  editor.set_category("general");

  assert_eq!(editor.submit().await.unwrap(), SubmitOutcome::Created);

  let calls = store.calls();
  assert_eq!(calls.len(), 1);
  assert_eq!(calls[0].op, StoreOp::Insert);
  let sent = calls[0].fields.clone().unwrap();
  assert_eq!(sent.sale_price, None);
  assert_eq!(sent.price, Decimal::new(999, 2));
  assert_eq!(sent.stock, 5);

  let body = serde_json::to_value(&sent).unwrap();
  assert!(body["sale_price"].is_null());

  let rows = store.rows();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].name, "Widget");
}

#[tokio::test]
async fn test_edit_submit_updates_by_id_with_later_timestamp() {
  setup_tracing();
  let (store, rows) = seeded_store();
  let original = rows[0].clone();
  // A clock stuck before the record's last write still yields a later stamp.
  let stalled = Arc::new(FixedClock(original.updated_at - Duration::days(30)));
  let editor = ProductEditor::edit(&original, store.clone(), RecordingPrompt::answering(true)).with_clock(stalled);
  assert_eq!(editor.mode(), EditorMode::Edit { id: original.id });
  assert_eq!(editor.form().name, original.name);

  editor.set_stock("11");
  let outcome = editor.submit().await.unwrap();
  assert_eq!(outcome, SubmitOutcome::Updated { id: original.id });

  let updated = store.get(original.id).unwrap();
  assert_eq!(updated.stock, 11);
  assert_eq!(updated.name, original.name);
  assert_eq!(updated.created_at, original.created_at);
  assert!(updated.updated_at > original.updated_at);

  // Saving again from the same editor keeps moving forward.
  editor.set_stock("12");
  editor.submit().await.unwrap();
  assert!(store.get(original.id).unwrap().updated_at > updated.updated_at);
}

#[tokio::test]
async fn test_edit_uses_clock_when_it_is_ahead() {
  setup_tracing();
  let (store, rows) = seeded_store();
  let now = Utc.with_ymd_and_hms(2030, 2, 3, 4, 5, 6).unwrap();
  let editor = ProductEditor::edit(&rows[1], store.clone(), RecordingPrompt::answering(true))
    .with_clock(Arc::new(FixedClock(now)));

  editor.submit().await.unwrap();
  assert_eq!(store.get(rows[1].id).unwrap().updated_at, now);
}

#[tokio::test]
async fn test_failed_submit_keeps_form_and_notifies() {
  setup_tracing();
  let store = Arc::new(MemoryStore::new());
  let prompt = RecordingPrompt::answering(true);
  let editor = ProductEditor::create(store.clone(), prompt.clone());
  editor.set_name("Lamp");
  editor.set_description("Desk lamp");
  editor.set_price("20");
  editor.add_image("https://cdn.example.com/lamp.jpg");

  store.fail_next(StoreOp::Insert, "insert violates row-level security policy");
  let err = editor.submit().await.unwrap_err();
  assert!(err.is_store_failure());
  assert_eq!(prompt.failures(), vec![SAVE_FAILED.to_string()]);
  assert!(!editor.is_submitting());

  let form = editor.form();
  assert_eq!(form.name, "Lamp");
  assert_eq!(form.images, vec!["https://cdn.example.com/lamp.jpg".to_string()]);
  assert!(store.rows().is_empty());

  // Retrying by hand goes through once the store recovers.
  assert_eq!(editor.submit().await.unwrap(), SubmitOutcome::Created);
  assert_eq!(store.call_count(StoreOp::Insert), 2);
}

#[tokio::test]
async fn test_invalid_form_never_reaches_store() {
  setup_tracing();
  let store = Arc::new(MemoryStore::new());
  let prompt = RecordingPrompt::answering(true);
  let editor = ProductEditor::create(store.clone(), prompt.clone());
  editor.set_description("missing a name");

  let err = editor.submit().await.unwrap_err();
  assert!(matches!(err, CatalogError::Validation { field: "name", .. }));
  assert_eq!(prompt.failures().len(), 1);
  assert!(store.calls().is_empty());
  assert!(!editor.is_submitting());
}

#[tokio::test]
async fn test_image_list_editing() {
  setup_tracing();
  let editor = ProductEditor::create(Arc::new(MemoryStore::new()), RecordingPrompt::answering(true));

  assert!(!editor.add_image(""));
  assert!(!editor.add_image("   "));
  assert!(editor.form().images.is_empty());

  assert!(editor.add_image("  https://cdn.example.com/a.jpg "));
  assert!(editor.add_image("https://cdn.example.com/b.jpg"));
  assert!(editor.add_image("https://cdn.example.com/a.jpg"));
  assert!(editor.add_image("not even a url"));
  assert_eq!(
    editor.form().images,
    vec![
      "https://cdn.example.com/a.jpg",
      "https://cdn.example.com/b.jpg",
      "https://cdn.example.com/a.jpg",
      "not even a url",
    ]
  );

  assert_eq!(editor.remove_image(1), Some("https://cdn.example.com/b.jpg".to_string()));
  assert_eq!(editor.remove_image(9), None);
  assert_eq!(
    editor.form().images,
    vec!["https://cdn.example.com/a.jpg", "https://cdn.example.com/a.jpg", "not even a url"]
  );
}

#[tokio::test]
async fn test_specification_editing() {
  setup_tracing();
  let editor = ProductEditor::create(Arc::new(MemoryStore::new()), RecordingPrompt::answering(true));

  assert!(!editor.add_specification("", "8W"));
  assert!(!editor.add_specification("wattage", "  "));
  assert!(!editor.add_specification("   ", "   "));
  assert!(editor.form().specifications.is_empty());

  assert!(editor.add_specification(" wattage ", " 8W "));
  assert_eq!(editor.form().specifications.len(), 1);
  assert_eq!(editor.form().specifications.get("wattage").map(String::as_str), Some("8W"));

  assert!(editor.add_specification("wattage", "10W"));
  assert_eq!(editor.form().specifications.len(), 1);
  assert_eq!(editor.form().specifications.get("wattage").map(String::as_str), Some("10W"));

  assert_eq!(editor.remove_specification("color"), None);
  assert_eq!(editor.remove_specification("wattage"), Some("10W".to_string()));
  assert!(editor.form().specifications.is_empty());
}

#[tokio::test]
async fn test_second_submit_while_in_flight_is_rejected() {
  setup_tracing();
  let store = GatedStore::new(MemoryStore::new());
  let editor = Arc::new(ProductEditor::create(store.clone(), RecordingPrompt::answering(true)));
  editor.set_name("Widget");
  editor.set_description("Gated widget");
  editor.set_price("1");

  let first = {
    let editor = editor.clone();
    tokio::spawn(async move { editor.submit().await })
  };
  store.entered.notified().await;
  assert!(editor.is_submitting());

  let second = editor.submit().await;
  assert!(matches!(second, Err(CatalogError::Busy { operation: "submit" })));

  store.release.notify_one();
  assert_eq!(first.await.unwrap().unwrap(), SubmitOutcome::Created);
  assert!(!editor.is_submitting());
  assert_eq!(store.inner.call_count(StoreOp::Insert), 1);
}

#[tokio::test]
async fn test_browser_reload_after_save_shows_new_product_first() {
  setup_tracing();
  let (store, _) = seeded_store();
  let prompt = RecordingPrompt::answering(true);
  let browser = CatalogBrowser::new(store.clone(), prompt.clone());
  browser.load_all().await.unwrap();

  let editor = ProductEditor::open(None, store.clone(), prompt.clone());
  editor.set_name("Sun Hat");
  editor.set_description("Wide brim");
  editor.set_category("Accessories");
  editor.set_price("15");
  editor.submit().await.unwrap();

  // Not visible until the browser reloads.
  assert_eq!(browser.products().len(), 3);
  browser.load_all().await.unwrap();
  assert_eq!(browser.products()[0].name, "Sun Hat");
  assert_eq!(browser.filter("access").len(), 1);
}
