//! Comment and complaint submission against the local store.
//!
//! Validation is ordered and short-circuits: empty text, then banned
//! words, then (comments only) the user name. A failed check shows an
//! inline error and changes nothing.

use serde_json::json;

use crate::render;
use crate::storage::{self, Storage, COMMENTS_KEY, COMPLAINTS_KEY};
use crate::utils::locale_timestamp;
use crate::view::{Document, Severity};

pub const BANNED_WORDS: &[&str] = &["curseword1", "curseword2", "curseword3"];

pub fn contains_banned_words(text: &str) -> bool {
    has_banned_word(text, BANNED_WORDS)
}

/// Case-insensitive substring match against a banned list.
pub fn has_banned_word(text: &str, banned: &[&str]) -> bool {
    let lowered = text.to_lowercase();
    banned.iter().any(|word| lowered.contains(word))
}

/// Validates and stores a comment, then shows it without a re-fetch.
pub fn submit_comment(doc: &mut Document, store: &dyn Storage) {
    let user = doc.input("user").trim().to_string();
    let text = doc.input("comment_text").trim().to_string();

    doc.clear_message();

    if text.is_empty() {
        doc.show_message("Comment has no text", Severity::Error);
        return;
    }
    if contains_banned_words(&text) {
        doc.show_message("Comment contains inappropriate language", Severity::Error);
        return;
    }
    if user.is_empty() {
        doc.show_message("User name is required", Severity::Error);
        return;
    }

    let timestamp = locale_timestamp();
    let message = format!("Comment successfully submitted by {user} on {timestamp}.");
    let comment = json!({ "user": user, "text": text, "timestamp": timestamp });
    storage::append(store, COMMENTS_KEY, comment.clone());

    doc.show_message(&message, Severity::Success);
    doc.set_input("user", "");
    doc.set_input("comment_text", "");

    render::append_comment(doc, &comment);
}

/// Validates and stores a complaint. The user id field is taken as-is and
/// not required.
pub fn submit_complaint(doc: &mut Document, store: &dyn Storage) {
    let user_id = doc.input("user_id");
    let text = doc.input("complaint_text").trim().to_string();

    doc.clear_message();

    if text.is_empty() {
        doc.show_message("Complaint has no text", Severity::Error);
        return;
    }
    if contains_banned_words(&text) {
        doc.show_message("Complaint contains inappropriate language", Severity::Error);
        return;
    }

    let timestamp = locale_timestamp();
    let message = format!("Complaint successfully submitted by {user_id} on {timestamp}.");
    let complaint = json!({ "user_id": user_id, "text": text, "timestamp": timestamp });
    storage::append(store, COMPLAINTS_KEY, complaint);

    doc.show_message(&message, Severity::Success);
    doc.set_input("user_id", "");
    doc.set_input("complaint_text", "");
}

#[cfg(test)]
mod tests {
    use crate::storage::{read_array, MemoryStore};
    use crate::view::Document;

    use super::*;

    fn comment_doc() -> Document {
        let mut doc = Document::new();
        doc.add_hidden_region("message", &[]);
        doc.add_region("comments", &[]);
        doc.add_input("user");
        doc.add_input("comment_text");
        doc
    }

    fn complaint_doc() -> Document {
        let mut doc = Document::new();
        doc.add_hidden_region("message", &[]);
        doc.add_input("user_id");
        doc.add_input("complaint_text");
        doc
    }

    #[test]
    fn empty_text_is_rejected_without_storing() {
        let store = MemoryStore::new();
        let mut doc = comment_doc();
        doc.set_input("user", "Ann");
        doc.set_input("comment_text", "   ");

        submit_comment(&mut doc, &store);

        let (message, severity) = doc.message().unwrap();
        assert_eq!(message, "Comment has no text");
        assert_eq!(severity, Severity::Error);
        assert!(read_array(&store, COMMENTS_KEY).is_empty());
    }

    #[test]
    fn banned_words_match_case_insensitively() {
        let store = MemoryStore::new();
        let mut doc = comment_doc();
        doc.set_input("user", "Ann");
        doc.set_input("comment_text", "what a CurseWord1 machine");

        submit_comment(&mut doc, &store);

        let (message, _) = doc.message().unwrap();
        assert_eq!(message, "Comment contains inappropriate language");
        assert!(read_array(&store, COMMENTS_KEY).is_empty());
        // the untouched form keeps its values
        assert_eq!(doc.input("user"), "Ann");
    }

    #[test]
    fn missing_user_name_is_rejected_after_text_checks() {
        let store = MemoryStore::new();
        let mut doc = comment_doc();
        doc.set_input("comment_text", "great");

        submit_comment(&mut doc, &store);

        let (message, _) = doc.message().unwrap();
        assert_eq!(message, "User name is required");
        assert!(read_array(&store, COMMENTS_KEY).is_empty());
    }

    #[test]
    fn successful_comment_stores_clears_and_displays() {
        let store = MemoryStore::new();
        let mut doc = comment_doc();
        doc.set_input("user", "Ann");
        doc.set_input("comment_text", "great");

        submit_comment(&mut doc, &store);

        let stored = read_array(&store, COMMENTS_KEY);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0]["user"], "Ann");
        assert_eq!(stored[0]["text"], "great");

        let (message, severity) = doc.message().unwrap();
        assert!(message.starts_with("Comment successfully submitted by Ann on "));
        assert_eq!(severity, Severity::Success);

        assert_eq!(doc.input("user"), "");
        assert_eq!(doc.input("comment_text"), "");

        // shown immediately, no re-fetch
        assert!(doc.region("comments").unwrap().html.contains("great"));
    }

    #[test]
    fn complaints_do_not_require_a_user_id() {
        let store = MemoryStore::new();
        let mut doc = complaint_doc();
        doc.set_input("complaint_text", "machine ate my coins");

        submit_complaint(&mut doc, &store);

        let stored = read_array(&store, COMPLAINTS_KEY);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0]["user_id"], "");
        assert_eq!(stored[0]["text"], "machine ate my coins");
        assert_eq!(doc.input("complaint_text"), "");
    }

    #[test]
    fn complaint_text_is_still_filtered() {
        let store = MemoryStore::new();
        let mut doc = complaint_doc();
        doc.set_input("user_id", "77");
        doc.set_input("complaint_text", "CURSEWORD2");

        submit_complaint(&mut doc, &store);

        let (message, _) = doc.message().unwrap();
        assert_eq!(message, "Complaint contains inappropriate language");
        assert!(read_array(&store, COMPLAINTS_KEY).is_empty());
    }
}
