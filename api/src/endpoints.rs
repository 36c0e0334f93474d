use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::error::ClientError;
use crate::models::{
    CommentFeed, CommentRow, Envelope, Machine, MachineTable, MutationOutcome, Product,
    ReportEntry, Role, StockEntry, Target, UserInfo,
};

/// Client for the page-specific endpoints.
///
/// One method per endpoint; each normalizes that endpoint's wire shape and
/// drops rows that do not fit instead of failing the response.
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn vm_info(&self) -> Option<Vec<Machine>> {
        let table: MachineTable = match self.get_json("/get_vm_info").await {
            Ok(table) => table,
            Err(e) => {
                error!("failed to fetch machine info: {e}");
                return None;
            }
        };

        Some(normalize_rows(table.data, Machine::from_row, "machine"))
    }

    pub async fn machine_products(&self, vm_id: i64) -> Option<Vec<Product>> {
        let envelope: Envelope<Vec<Value>> =
            match self.get_json(&format!("/get_vm_products/{vm_id}")).await {
                Ok(envelope) => envelope,
                Err(e) => {
                    error!("failed to fetch products for machine {vm_id}: {e}");
                    return None;
                }
            };

        Some(normalize_rows(envelope.data, Product::from_row, "product"))
    }

    /// Machines stocked near the current customer (`/get_vm_particular`).
    pub async fn nearby_products(&self) -> Option<Vec<Product>> {
        let envelope: Envelope<Vec<Value>> = match self.get_json("/get_vm_particular").await {
            Ok(envelope) => envelope,
            Err(e) => {
                error!("failed to fetch nearby products: {e}");
                return None;
            }
        };

        Some(normalize_rows(envelope.data, Product::from_row, "product"))
    }

    pub async fn stock_info(&self) -> Option<Vec<StockEntry>> {
        let envelope: Envelope<StockEntry> = match self.get_json("/get_stock_info").await {
            Ok(envelope) => envelope,
            Err(e) => {
                error!("failed to fetch stock info: {e}");
                return None;
            }
        };

        Some(envelope.data)
    }

    /// The report endpoint replies with a bare array, unlike its siblings.
    pub async fn stock_report(&self) -> Option<Vec<ReportEntry>> {
        match self.get_json("/get_stock_report").await {
            Ok(entries) => Some(entries),
            Err(e) => {
                error!("failed to fetch stock report: {e}");
                None
            }
        }
    }

    pub async fn comments_for(&self, id: i64, target: Target) -> Option<Vec<CommentRow>> {
        let feed: CommentFeed = match self
            .get_json(&format!("/get_comments/{id}/{}", target.as_str()))
            .await
        {
            Ok(feed) => feed,
            Err(e) => {
                error!("failed to fetch comments: {e}");
                return None;
            }
        };

        Some(normalize_rows(feed.into_rows(), CommentRow::from_row, "comment"))
    }

    pub async fn complaints_for(&self, id: i64, target: Target) -> Option<Vec<CommentRow>> {
        let feed: CommentFeed = match self
            .get_json(&format!("/get_complaints/{id}/{}", target.as_str()))
            .await
        {
            Ok(feed) => feed,
            Err(e) => {
                error!("failed to fetch complaints: {e}");
                return None;
            }
        };

        Some(normalize_rows(feed.into_rows(), CommentRow::from_row, "complaint"))
    }

    pub async fn add_comment(&self, id: i64, text: &str, target: Target) -> Option<MutationOutcome> {
        let payload = json!({ "id": id, "text": text, "type": target.as_str() });

        match self.post_json("/add_comment", &payload).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!("failed to post comment: {e}");
                None
            }
        }
    }

    pub async fn add_complaint(
        &self,
        id: i64,
        text: &str,
        target: Target,
    ) -> Option<MutationOutcome> {
        let payload = json!({ "id": id, "text": text, "type": target.as_str() });

        match self.post_json("/add_complaint", &payload).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!("failed to post complaint: {e}");
                None
            }
        }
    }

    pub async fn role(&self) -> Option<Role> {
        let raw: String = match self.get_json("/get_role").await {
            Ok(raw) => raw,
            Err(e) => {
                error!("failed to fetch role: {e}");
                return None;
            }
        };

        match raw.parse() {
            Ok(role) => Some(role),
            Err(e) => {
                warn!("{e}");
                None
            }
        }
    }

    pub async fn user_info(&self) -> Option<UserInfo> {
        match self.get_json("/get_user_info").await {
            Ok(info) => Some(info),
            Err(e) => {
                error!("failed to fetch user info: {e}");
                None
            }
        }
    }

    pub async fn buy_product(
        &self,
        vm_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> Option<MutationOutcome> {
        let payload = json!({
            "vending_machine_id": vm_id,
            "product_id": product_id,
            "quantity": quantity,
        });

        match self.post_json("/buy_product", &payload).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!("failed to buy product: {e}");
                None
            }
        }
    }

    pub async fn withdraw(&self, vm_id: i64, amount: i64) -> Option<Value> {
        let payload = json!({ "amount": amount, "vending_machine_id": vm_id });

        match self.post_json("/withdraw_vm", &payload).await {
            Ok(reply) => Some(reply),
            Err(e) => {
                error!("failed to withdraw from machine {vm_id}: {e}");
                None
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &Value,
    ) -> Result<T, ClientError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.http.post(&url).json(payload).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn normalize_rows<T>(
    rows: Vec<Vec<Value>>,
    normalize: fn(&[Value]) -> Option<T>,
    what: &str,
) -> Vec<T> {
    rows.iter()
        .filter_map(|row| {
            let item = normalize(row);
            if item.is_none() {
                warn!("dropping malformed {what} row");
            }
            item
        })
        .collect()
}
