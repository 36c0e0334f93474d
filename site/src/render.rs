//! Pure fragment builders for the page regions.
//!
//! Every list render clears its region and rebuilds from the current data;
//! nothing diffs. User-entered content goes through [`escape`] so it lands
//! as text, not markup.

use api::models::{CommentRow, Machine, Product, ReportEntry, StockEntry, UserInfo};
use serde_json::Value;

use crate::utils::display_value;
use crate::view::Document;

pub const NO_COMMENTS: &str = "No comments yet!";
pub const NO_COMPLAINTS: &str = "No complaints yet!";

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn machine_row(machine: &Machine) -> String {
    format!(
        "<tr style=\"cursor: pointer;\">\
         <td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
         <td><button class=\"btn btn-primary\" \
         onclick=\"window.location.href='/vm_profile/{}'\">View</button></td>\
         </tr>",
        machine.name, machine.location, machine.status, machine.owner, machine.id
    )
}

pub fn machine_rows(machines: &[Machine]) -> String {
    machines.iter().map(machine_row).collect()
}

pub fn stock_row(entry: &StockEntry) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        entry.vm_id, entry.vm_name, entry.product_id, entry.product_name, entry.quantity
    )
}

pub fn stock_rows(entries: &[StockEntry]) -> String {
    entries.iter().map(stock_row).collect()
}

pub fn report_row(entry: &ReportEntry) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
        entry.product_name, entry.vending_machine_name, entry.product_quantity
    )
}

pub fn report_rows(entries: &[ReportEntry]) -> String {
    entries.iter().map(report_row).collect()
}

pub fn product_widget(product: &Product) -> String {
    format!(
        "<div class=\"product-widget\">\
         <h3>{}</h3><p>{}</p><p>Price: {}</p><p>Quantity: {}</p>\
         <button class=\"btn btn-primary\">Add to Cart</button>\
         </div>",
        product.name, product.description, product.price, product.quantity
    )
}

pub fn product_widgets(products: &[Product]) -> String {
    products.iter().map(product_widget).collect()
}

/// Customer-facing widget with a quantity selector and buy button.
pub fn buy_widget(product: &Product) -> String {
    format!(
        "<div class=\"product-widget\">\
         <h3>{}</h3><p>{}</p><p>Price: {}</p><p>Available: {}</p>\
         <input type=\"number\" id=\"quantity-selector-{}\" class=\"quantity-selector\" \
         min=\"0\" max=\"{}\" value=\"1\">\
         <button class=\"btn btn-primary\">Buy right now!</button>\
         </div>",
        product.name, product.description, product.price, product.quantity, product.id,
        product.quantity
    )
}

pub fn buy_widgets(products: &[Product]) -> String {
    products.iter().map(buy_widget).collect()
}

pub fn bio_widget(user: &UserInfo) -> String {
    format!(
        "<div class=\"bio-widget\">\
         <h3 style=\"padding-left: 50px;\">{}</h3>\
         <p style=\"padding-left: 50px;\">{}</p>\
         <p style=\"padding-left: 50px;\">Name: {} {}</p>\
         <p style=\"padding-left: 50px;\">Birthday: {}</p>\
         <p style=\"padding-left: 50px;\">Phone: {}</p>\
         <p style=\"padding-left: 50px;\">Address: {}</p>\
         <p style=\"padding-left: 50px;\">Budget: {}</p>\
         <p style=\"padding-left: 50px;\">Role: {}</p>\
         </div>",
        escape(&user.username),
        escape(&user.email),
        escape(&user.first_name),
        escape(&user.last_name),
        escape(&user.birthdate),
        escape(&user.phone_number),
        escape(&user.address),
        user.budget,
        escape(&user.user_type)
    )
}

/// `<li>` items for a comment or complaint feed; an empty feed renders
/// exactly the fixed placeholder.
pub fn feedback_items(rows: &[CommentRow], placeholder: &str) -> String {
    if rows.is_empty() {
        return format!("<li>{placeholder}</li>");
    }
    rows.iter()
        .map(|row| format!("<li>{}</li>", escape(&row.text)))
        .collect()
}

/// One locally stored comment, `user:` then text then timestamp.
pub fn comment_entry(comment: &Value) -> String {
    let user = display_value(comment.get("user").unwrap_or(&Value::Null));
    let text = display_value(comment.get("text").unwrap_or(&Value::Null));
    let timestamp = display_value(comment.get("timestamp").unwrap_or(&Value::Null));

    format!(
        "<div class=\"comment\"><p>{}:</p><p>{}</p>\
         <p class=\"timestamp\">Posted on: {}</p></div>",
        escape(&user),
        escape(&text),
        escape(&timestamp)
    )
}

pub fn append_comment(doc: &mut Document, comment: &Value) {
    doc.append_html("comments", &comment_entry(comment));
}

/// One locally stored complaint as a manager-table row.
pub fn complaint_row(complaint: &Value) -> String {
    let user_id = display_value(complaint.get("user_id").unwrap_or(&Value::Null));
    let text = display_value(complaint.get("text").unwrap_or(&Value::Null));
    let timestamp = display_value(complaint.get("timestamp").unwrap_or(&Value::Null));

    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
        escape(&user_id),
        escape(&text),
        escape(&timestamp)
    )
}

pub fn complaint_rows(complaints: &[Value]) -> String {
    complaints.iter().map(complaint_row).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_feed_renders_exactly_the_placeholder() {
        assert_eq!(feedback_items(&[], NO_COMMENTS), "<li>No comments yet!</li>");
    }

    #[test]
    fn feed_rows_are_escaped_list_items() {
        let rows = vec![
            CommentRow { text: "too sweet".into() },
            CommentRow { text: "<b>bold</b>".into() },
        ];
        let html = feedback_items(&rows, NO_COMMENTS);

        assert_eq!(html.matches("<li>").count(), 2);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("No comments yet!"));
    }

    #[test]
    fn comment_entry_carries_user_text_and_timestamp() {
        let entry = comment_entry(&json!({
            "user": "Ann",
            "text": "great",
            "timestamp": "11/9/2024, 10:30:00 AM",
        }));

        assert!(entry.contains("Ann:"));
        assert!(entry.contains("great"));
        assert!(entry.contains("Posted on: 11/9/2024, 10:30:00 AM"));
    }

    #[test]
    fn machine_row_links_to_the_profile() {
        let machine = Machine {
            id: 4,
            name: "Hall A".into(),
            location: "Building 2".into(),
            owner: "7".into(),
            status: "active".into(),
        };
        let row = machine_row(&machine);

        assert!(row.contains("<td>Hall A</td>"));
        assert!(row.contains("/vm_profile/4"));
    }

    #[test]
    fn empty_tables_render_no_rows() {
        assert_eq!(machine_rows(&[]), "");
        assert_eq!(stock_rows(&[]), "");
    }
}
