//! Cosmetic role gating. The role string is fetched once per page flow
//! and only toggles visibility; authorization stays server-side.

use api::models::Role;
use api::ApiClient;

use crate::view::Document;

/// Menu arrangement: owners and admins see the `owner`-classed regions.
pub fn arrange_menu(doc: &mut Document, role: Role) {
    if matches!(role, Role::Owner | Role::Admin) {
        doc.show_class("owner");
    }
}

/// Machines page: plain users get the comment and complaint forms.
pub fn reveal_feedback_forms(doc: &mut Document, role: Role) {
    if role == Role::User {
        doc.show("comment");
        doc.show("complaint");
    }
}

/// Fetches the role and arranges the menu; a failed fetch leaves every
/// gate closed.
pub async fn arrange_menu_from(api: &ApiClient, doc: &mut Document) {
    if let Some(role) = api.role().await {
        arrange_menu(doc, role);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_doc() -> Document {
        let mut doc = Document::new();
        doc.add_hidden_region("reports-link", &["owner"]);
        doc.add_hidden_region("stock-link", &["owner"]);
        doc
    }

    #[test]
    fn owner_and_admin_see_the_owner_regions() {
        for role in [Role::Owner, Role::Admin] {
            let mut doc = menu_doc();
            arrange_menu(&mut doc, role);
            assert!(doc.is_visible("reports-link"), "role {role:?}");
            assert!(doc.is_visible("stock-link"), "role {role:?}");
        }
    }

    #[test]
    fn plain_users_see_no_owner_regions() {
        let mut doc = menu_doc();
        arrange_menu(&mut doc, Role::User);
        assert!(!doc.is_visible("reports-link"));
    }

    #[test]
    fn feedback_forms_open_for_users_only() {
        let mut doc = Document::new();
        doc.add_hidden_region("comment", &[]);
        doc.add_hidden_region("complaint", &[]);

        reveal_feedback_forms(&mut doc, Role::Owner);
        assert!(!doc.is_visible("comment"));

        reveal_feedback_forms(&mut doc, Role::User);
        assert!(doc.is_visible("comment"));
        assert!(doc.is_visible("complaint"));
    }
}
