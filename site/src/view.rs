//! Inspectable stand-in for the page DOM.
//!
//! Pages declare the regions and inputs their template carries, then every
//! render mutates the document in place. Tests and the CLI read the result
//! back instead of scraping markup.

use std::collections::BTreeMap;
use std::fmt;

use tracing::warn;

pub const MESSAGE_REGION: &str = "message";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    fn class(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Region {
    pub text: String,
    pub html: String,
    pub visible: bool,
    classes: Vec<String>,
}

impl Region {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Default)]
pub struct Document {
    regions: BTreeMap<String, Region>,
    order: Vec<String>,
    inputs: BTreeMap<String, String>,
    alerts: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a region, initially visible, as the page template would.
    pub fn add_region(&mut self, id: &str, classes: &[&str]) -> &mut Self {
        self.order.push(id.to_string());
        self.regions.insert(
            id.to_string(),
            Region {
                visible: true,
                classes: classes.iter().map(|c| c.to_string()).collect(),
                ..Region::default()
            },
        );
        self
    }

    /// Declares a region that starts hidden (`display: none`).
    pub fn add_hidden_region(&mut self, id: &str, classes: &[&str]) -> &mut Self {
        self.add_region(id, classes);
        if let Some(region) = self.regions.get_mut(id) {
            region.visible = false;
        }
        self
    }

    pub fn add_input(&mut self, name: &str) -> &mut Self {
        self.inputs.insert(name.to_string(), String::new());
        self
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.get(id)
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.regions.get(id).is_some_and(|r| r.visible)
    }

    /// Replaces a region's rendered children. Missing targets are logged
    /// and skipped so the rest of the page still renders.
    pub fn set_html(&mut self, id: &str, html: impl Into<String>) -> bool {
        match self.regions.get_mut(id) {
            Some(region) => {
                region.html = html.into();
                true
            }
            None => {
                warn!("render target '{id}' not found on this page");
                false
            }
        }
    }

    pub fn append_html(&mut self, id: &str, fragment: &str) -> bool {
        match self.regions.get_mut(id) {
            Some(region) => {
                region.html.push_str(fragment);
                true
            }
            None => {
                warn!("render target '{id}' not found on this page");
                false
            }
        }
    }

    /// Writes text into the first region carrying `class`, as the detail
    /// loader does with its field names.
    pub fn set_text(&mut self, class: &str, text: &str) -> bool {
        let id = self
            .order
            .iter()
            .find(|id| self.regions[*id].has_class(class))
            .cloned();

        match id {
            Some(id) => {
                if let Some(region) = self.regions.get_mut(&id) {
                    region.text = text.to_string();
                }
                true
            }
            None => {
                warn!("no element with class '{class}' on this page");
                false
            }
        }
    }

    pub fn set_text_by_id(&mut self, id: &str, text: &str) -> bool {
        match self.regions.get_mut(id) {
            Some(region) => {
                region.text = text.to_string();
                true
            }
            None => {
                warn!("region '{id}' not found on this page");
                false
            }
        }
    }

    pub fn text_of(&self, class: &str) -> Option<&str> {
        self.order
            .iter()
            .find(|id| self.regions[*id].has_class(class))
            .map(|id| self.regions[id].text.as_str())
    }

    pub fn show(&mut self, id: &str) {
        if let Some(region) = self.regions.get_mut(id) {
            region.visible = true;
        }
    }

    pub fn hide(&mut self, id: &str) {
        if let Some(region) = self.regions.get_mut(id) {
            region.visible = false;
        }
    }

    /// Reveals every region carrying `class` (the role gate's group toggle).
    pub fn show_class(&mut self, class: &str) {
        for region in self.regions.values_mut() {
            if region.has_class(class) {
                region.visible = true;
            }
        }
    }

    pub fn input(&self, name: &str) -> String {
        self.inputs.get(name).cloned().unwrap_or_default()
    }

    pub fn set_input(&mut self, name: &str, value: &str) {
        self.inputs.insert(name.to_string(), value.to_string());
    }

    pub fn show_message(&mut self, text: &str, severity: Severity) {
        let region = self.regions.entry(MESSAGE_REGION.to_string()).or_default();
        region.text = text.to_string();
        region.classes = vec![severity.class().to_string()];
        region.visible = true;
    }

    /// Hides and empties the message slot, as each submit does first.
    pub fn clear_message(&mut self) {
        if let Some(region) = self.regions.get_mut(MESSAGE_REGION) {
            region.text.clear();
            region.visible = false;
        }
    }

    pub fn message(&self) -> Option<(&str, Severity)> {
        let region = self.regions.get(MESSAGE_REGION)?;
        if !region.visible {
            return None;
        }
        let severity = if region.has_class("error") {
            Severity::Error
        } else {
            Severity::Success
        };
        Some((region.text.as_str(), severity))
    }

    /// Queues a user-visible alert, the model's `window.alert`.
    pub fn alert(&mut self, text: impl Into<String>) {
        self.alerts.push(text.into());
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in &self.order {
            if id == MESSAGE_REGION {
                continue;
            }
            let region = &self.regions[id];
            if !region.visible {
                continue;
            }
            if !region.text.is_empty() {
                writeln!(f, "[{id}] {}", region.text)?;
            }
            if !region.html.is_empty() {
                writeln!(f, "[{id}]\n{}", region.html)?;
            }
        }
        if let Some(region) = self.regions.get(MESSAGE_REGION) {
            if region.visible && !region.text.is_empty() {
                writeln!(f, "[message] {}", region.text)?;
            }
        }
        for alert in &self.alerts {
            writeln!(f, "[alert] {alert}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_text_targets_first_matching_class() {
        let mut doc = Document::new();
        doc.add_region("price-tag", &["price"]);
        doc.add_region("price-footnote", &["price"]);

        assert!(doc.set_text("price", "2.50"));
        assert_eq!(doc.region("price-tag").unwrap().text, "2.50");
        assert_eq!(doc.region("price-footnote").unwrap().text, "");
    }

    #[test]
    fn missing_targets_are_not_fatal() {
        let mut doc = Document::new();
        assert!(!doc.set_text("price", "2.50"));
        assert!(!doc.set_html("stock-table-body", "<tr></tr>"));
    }

    #[test]
    fn messages_replace_and_clear() {
        let mut doc = Document::new();
        doc.add_hidden_region(MESSAGE_REGION, &[]);

        doc.show_message("Comment has no text", Severity::Error);
        assert_eq!(doc.message(), Some(("Comment has no text", Severity::Error)));

        doc.clear_message();
        assert_eq!(doc.message(), None);
    }

    #[test]
    fn show_class_reveals_every_match() {
        let mut doc = Document::new();
        doc.add_hidden_region("reports-link", &["owner"]);
        doc.add_hidden_region("stock-link", &["owner"]);
        doc.add_hidden_region("profile-link", &[]);

        doc.show_class("owner");

        assert!(doc.is_visible("reports-link"));
        assert!(doc.is_visible("stock-link"));
        assert!(!doc.is_visible("profile-link"));
    }
}
