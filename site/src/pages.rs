//! Page controllers: fetch, normalize, clear the target region, rebuild.
//!
//! Each `*_document()` declares the regions and inputs of that page's
//! template; the matching controller mutates it. Fetch failures leave the
//! page as it was (the clients already logged them).

use std::fmt::Display;

use api::models::Target;
use api::RecordClient;

use crate::render;
use crate::role;
use crate::state::State;
use crate::storage::{self, Storage, COMMENTS_KEY, COMPLAINTS_KEY};
use crate::utils::display_value;
use crate::view::Document;

pub const PRODUCT_DETAIL_FIELDS: &[&str] = &["name", "description", "price", "quantity"];

pub fn machines_document() -> Document {
    let mut doc = Document::new();
    doc.add_region("vm-table-body", &[]);
    doc.add_hidden_region("comment", &[]);
    doc.add_hidden_region("complaint", &[]);
    doc.add_region("comment-title", &[]);
    doc.add_region("complaint-title", &[]);
    doc.add_region("comments-list", &[]);
    doc.add_region("complaints-list", &[]);
    doc.add_input("comment-text");
    doc.add_input("complaint-text");
    doc
}

/// Machine listing plus the role-gated feedback forms.
pub async fn machines_page(state: &State, doc: &mut Document) {
    if let Some(machines) = state.api.vm_info().await {
        doc.set_html("vm-table-body", render::machine_rows(&machines));
    }

    if let Some(role) = state.api.role().await {
        role::reveal_feedback_forms(doc, role);
    }
}

/// Row click: point both forms at the machine and load its feedback.
pub async fn select_machine(state: &State, doc: &mut Document, vm_id: i64) {
    doc.set_text_by_id(
        "comment-title",
        &format!("Tells us what you think 'bout machine {vm_id}"),
    );
    doc.set_text_by_id("complaint-title", &format!("Complain about machine {vm_id}"));

    refresh_comments(state, doc, vm_id).await;
    refresh_complaints(state, doc, vm_id).await;
}

pub async fn refresh_comments(state: &State, doc: &mut Document, vm_id: i64) {
    if let Some(rows) = state.api.comments_for(vm_id, Target::VendingMachine).await {
        doc.set_html("comments-list", render::feedback_items(&rows, render::NO_COMMENTS));
    }
}

pub async fn refresh_complaints(state: &State, doc: &mut Document, vm_id: i64) {
    if let Some(rows) = state.api.complaints_for(vm_id, Target::VendingMachine).await {
        doc.set_html(
            "complaints-list",
            render::feedback_items(&rows, render::NO_COMPLAINTS),
        );
    }
}

/// Posts the comment form to the backend, then re-fetches the list.
/// `vm_id` is `None` until a machine row has been clicked.
pub async fn submit_machine_comment(state: &State, doc: &mut Document, vm_id: Option<i64>) {
    let text = doc.input("comment-text");

    let Some(vm_id) = vm_id else {
        doc.alert("Please fill in all fields.");
        return;
    };
    if text.is_empty() {
        doc.alert("Please fill in all fields.");
        return;
    }

    match state.api.add_comment(vm_id, &text, Target::VendingMachine).await {
        Some(outcome) if outcome.success => {
            doc.alert("Comment added successfully!");
            refresh_comments(state, doc, vm_id).await;
        }
        Some(outcome) => {
            doc.alert(format!(
                "Failed to add comment: {}",
                outcome.error.unwrap_or_default()
            ));
        }
        None => {}
    }
}

pub async fn submit_machine_complaint(state: &State, doc: &mut Document, vm_id: Option<i64>) {
    let text = doc.input("complaint-text");

    let Some(vm_id) = vm_id else {
        doc.alert("Please fill in all fields.");
        return;
    };
    if text.is_empty() {
        doc.alert("Please fill in all fields.");
        return;
    }

    match state
        .api
        .add_complaint(vm_id, &text, Target::VendingMachine)
        .await
    {
        Some(outcome) if outcome.success => {
            doc.alert("Complaint added successfully!");
            refresh_complaints(state, doc, vm_id).await;
        }
        Some(outcome) => {
            doc.alert(format!(
                "Failed to add complaint: {}",
                outcome.error.unwrap_or_default()
            ));
        }
        None => {}
    }
}

pub fn stock_document() -> Document {
    let mut doc = Document::new();
    doc.add_region("stock-table-body", &[]);
    doc
}

pub async fn stock_page(state: &State, doc: &mut Document) {
    if let Some(entries) = state.api.stock_info().await {
        doc.set_html("stock-table-body", render::stock_rows(&entries));
    }
}

pub fn report_document() -> Document {
    let mut doc = Document::new();
    doc.add_region("report-table-body", &[]);
    doc
}

pub async fn report_page(state: &State, doc: &mut Document) {
    if let Some(entries) = state.api.stock_report().await {
        doc.set_html("report-table-body", render::report_rows(&entries));
    }
}

pub fn profile_document() -> Document {
    let mut doc = Document::new();
    doc.add_region("product-widgets", &[]);
    doc.add_region("product-widgets-container", &[]);
    doc
}

pub async fn machine_profile_page(state: &State, doc: &mut Document, vm_id: i64) {
    match state.api.machine_products(vm_id).await {
        Some(products) => {
            doc.set_html("product-widgets", render::product_widgets(&products));
        }
        None => {
            doc.set_html("product-widgets-container", "Error fetching products");
        }
    }
}

/// Customer storefront: nearby stock with buy widgets.
pub async fn shop_page(state: &State, doc: &mut Document) {
    match state.api.nearby_products().await {
        Some(products) => {
            doc.set_html("product-widgets", render::buy_widgets(&products));
        }
        None => {
            doc.set_html("product-widgets-container", "Error fetching products");
        }
    }
}

pub async fn buy_from_machine(state: &State, doc: &mut Document, vm_id: i64, amount: i64) {
    match state.api.withdraw(vm_id, amount).await {
        Some(_) => doc.alert("Product purchased successfully!"),
        None => doc.alert("Error buying product"),
    }
}

pub fn user_document() -> Document {
    let mut doc = Document::new();
    doc.add_region("bio", &[]);
    doc
}

pub async fn user_page(state: &State, doc: &mut Document) {
    match state.api.user_info().await {
        Some(user) => {
            doc.set_html("bio", render::bio_widget(&user));
        }
        // the shared error container only exists on the product pages
        None => {
            doc.set_html("product-widgets-container", "Error fetching products");
        }
    }
}

pub fn menu_document() -> Document {
    let mut doc = Document::new();
    doc.add_region("machines-link", &[]);
    doc.add_hidden_region("stock-link", &["owner"]);
    doc.add_hidden_region("report-link", &["owner"]);
    doc
}

pub async fn menu_page(state: &State, doc: &mut Document) {
    role::arrange_menu_from(&state.api, doc).await;
}

pub fn product_document() -> Document {
    let mut doc = Document::new();
    doc.add_region("product-name", &["name"]);
    doc.add_region("product-description", &["description"]);
    doc.add_region("product-price", &["price"]);
    doc.add_region("product-quantity", &["quantity"]);
    doc
}

/// Fetches one record and writes each named field into the region with
/// the matching class. Missing regions warn; a missing record alerts.
pub async fn load_item_details(
    records: &RecordClient,
    doc: &mut Document,
    record_type: &str,
    record_id: impl Display,
    fields: &[&str],
) {
    let record_id = record_id.to_string();

    match records.get_record_by_id(record_type, &record_id).await {
        Some(record) => {
            for field in fields {
                let text = record.get(*field).map(display_value).unwrap_or_default();
                doc.set_text(field, &text);
            }
        }
        None => doc.alert(format!("{record_type} with ID {record_id} not found")),
    }
}

pub async fn product_page(state: &State, doc: &mut Document, product_id: &str) {
    load_item_details(
        &state.records,
        doc,
        "product",
        product_id,
        PRODUCT_DETAIL_FIELDS,
    )
    .await;
}

pub fn comments_document() -> Document {
    let mut doc = Document::new();
    doc.add_region("comments", &[]);
    doc.add_hidden_region("message", &[]);
    doc.add_input("user");
    doc.add_input("comment_text");
    doc
}

/// Local comments page load: rebuild the list from storage.
pub fn comments_page(doc: &mut Document, store: &dyn Storage) {
    doc.set_html("comments", "");
    for comment in storage::read_array(store, COMMENTS_KEY) {
        render::append_comment(doc, &comment);
    }
}

pub fn complaints_document() -> Document {
    let mut doc = Document::new();
    doc.add_hidden_region("message", &[]);
    doc.add_input("user_id");
    doc.add_input("complaint_text");
    doc
}

pub fn complaints_manager_document() -> Document {
    let mut doc = Document::new();
    doc.add_region("complaintsTableBody", &[]);
    doc
}

pub fn complaints_manager_page(doc: &mut Document, store: &dyn Storage) {
    let complaints = storage::read_array(store, COMPLAINTS_KEY);
    doc.set_html("complaintsTableBody", render::complaint_rows(&complaints));
}

pub fn clear_complaints(doc: &mut Document, store: &dyn Storage) {
    store.clear(COMPLAINTS_KEY);
    complaints_manager_page(doc, store);
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::storage::MemoryStore;

    use super::*;

    #[test]
    fn comments_page_rebuilds_from_storage() {
        let store = MemoryStore::new();
        storage::append(&store, COMMENTS_KEY, json!({"user": "Ann", "text": "great"}));
        storage::append(&store, COMMENTS_KEY, json!({"user": "Bo", "text": "fine"}));

        let mut doc = comments_document();
        comments_page(&mut doc, &store);
        comments_page(&mut doc, &store);

        let html = &doc.region("comments").unwrap().html;
        // rebuilt, not appended across loads
        assert_eq!(html.matches("class=\"comment\"").count(), 2);
        assert!(html.contains("great"));
    }

    #[test]
    fn clearing_complaints_empties_store_and_table() {
        let store = MemoryStore::new();
        storage::append(&store, COMPLAINTS_KEY, json!({"user_id": "7", "text": "stale"}));

        let mut doc = complaints_manager_document();
        complaints_manager_page(&mut doc, &store);
        assert!(doc.region("complaintsTableBody").unwrap().html.contains("stale"));

        clear_complaints(&mut doc, &store);
        assert!(store.get(COMPLAINTS_KEY).is_none());
        assert_eq!(doc.region("complaintsTableBody").unwrap().html, "");
    }
}
