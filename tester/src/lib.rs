//! In-memory stub of the vending backend.
//!
//! Serves the generic `/api/{type}/{id}` record surface over a hash map
//! plus canned fixtures for every page endpoint, so the clients can be
//! driven without the real platform. Fixtures are plain `Mutex<Value>`
//! fields a test can overwrite before issuing requests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{header::CONTENT_TYPE, Method, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

pub mod error;

use error::StubError;

pub struct StubState {
    next_id: Mutex<i64>,
    records: Mutex<HashMap<(String, String), Value>>,
    pub comments: Mutex<Vec<Value>>,
    pub complaints: Mutex<Vec<Value>>,
    pub role: Mutex<String>,
    pub machines: Mutex<Value>,
    pub stock: Mutex<Value>,
    pub report: Mutex<Value>,
    pub products: Mutex<Value>,
    pub user: Mutex<Value>,
}

impl Default for StubState {
    fn default() -> Self {
        Self {
            next_id: Mutex::new(1),
            records: Mutex::new(HashMap::new()),
            comments: Mutex::new(Vec::new()),
            complaints: Mutex::new(Vec::new()),
            role: Mutex::new("user".to_string()),
            machines: Mutex::new(json!({
                "header": ["VMID", "Name", "Location", "OwnerID", "Status"],
                "data": [
                    [1, "Hall A", "Building 2", 7, "active"],
                    [2, "Library", "Building 5", 7, "maintenance"],
                ],
            })),
            stock: Mutex::new(json!({
                "data": [
                    {
                        "vm_id": 1,
                        "vm_name": "Hall A",
                        "product_id": 11,
                        "product_name": "Cola",
                        "quantity": 6,
                    },
                ],
            })),
            report: Mutex::new(json!([
                {
                    "product_name": "Cola",
                    "vending_machine_name": "Hall A",
                    "product_quantity": 6,
                },
            ])),
            products: Mutex::new(json!({
                "data": [
                    [11, "Cola", "Cold and fizzy", 2.5, 6],
                    [12, "Chips", "Salted", 1.75, 3],
                ],
            })),
            user: Mutex::new(json!({
                "username": "ann",
                "email": "ann@example.com",
                "first_name": "Ann",
                "last_name": "Lee",
                "birthdate": "2001-04-12",
                "phone_number": "555-0101",
                "address": "12 Campus Way",
                "budget": 25.0,
                "user_type": "user",
            })),
        }
    }
}

impl StubState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

pub fn router(state: Arc<StubState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/{rtype}", post(create_record))
        .route(
            "/api/{rtype}/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .route("/get_vm_info", get(vm_info))
        .route("/get_vm_products/{id}", get(machine_products))
        .route("/get_vm_particular", get(nearby_products))
        .route("/get_stock_info", get(stock_info))
        .route("/get_stock_report", get(stock_report))
        .route("/get_comments/{id}/{target}", get(get_comments))
        .route("/get_complaints/{id}/{target}", get(get_complaints))
        .route("/add_comment", post(add_comment))
        .route("/add_complaint", post(add_complaint))
        .route("/get_role", get(get_role))
        .route("/get_user_info", get(user_info))
        .route("/buy_product", post(buy_product))
        .route("/withdraw_vm", post(withdraw))
        .layer(cors)
        .with_state(state)
}

async fn create_record(
    State(state): State<Arc<StubState>>,
    Path(rtype): Path<String>,
    Json(data): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StubError> {
    let mut record = data;
    let fields = record.as_object_mut().ok_or(StubError::MalformedPayload)?;

    let id = {
        let mut next = state.next_id.lock().unwrap();
        let id = *next;
        *next += 1;
        id
    };
    fields.insert("id".to_string(), json!(id));

    state
        .records
        .lock()
        .unwrap()
        .insert((rtype, id.to_string()), record.clone());

    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_record(
    State(state): State<Arc<StubState>>,
    Path((rtype, id)): Path<(String, String)>,
) -> Result<Json<Value>, StubError> {
    state
        .records
        .lock()
        .unwrap()
        .get(&(rtype, id))
        .cloned()
        .map(Json)
        .ok_or(StubError::MissingRecord)
}

async fn update_record(
    State(state): State<Arc<StubState>>,
    Path((rtype, id)): Path<(String, String)>,
    Json(patch): Json<Value>,
) -> Result<Json<Value>, StubError> {
    let patch = patch.as_object().ok_or(StubError::MalformedPayload)?.clone();

    let mut records = state.records.lock().unwrap();
    let record = records.get_mut(&(rtype, id)).ok_or(StubError::MissingRecord)?;
    let fields = record.as_object_mut().ok_or(StubError::MissingRecord)?;

    for (key, value) in patch {
        fields.insert(key, value);
    }

    Ok(Json(record.clone()))
}

async fn delete_record(
    State(state): State<Arc<StubState>>,
    Path((rtype, id)): Path<(String, String)>,
) -> Result<Json<Value>, StubError> {
    state
        .records
        .lock()
        .unwrap()
        .remove(&(rtype, id))
        .ok_or(StubError::MissingRecord)?;

    Ok(Json(json!({ "message": "Record deleted" })))
}

async fn vm_info(State(state): State<Arc<StubState>>) -> Json<Value> {
    Json(state.machines.lock().unwrap().clone())
}

async fn machine_products(
    State(state): State<Arc<StubState>>,
    Path(_id): Path<String>,
) -> Json<Value> {
    Json(state.products.lock().unwrap().clone())
}

async fn nearby_products(State(state): State<Arc<StubState>>) -> Json<Value> {
    Json(state.products.lock().unwrap().clone())
}

async fn stock_info(State(state): State<Arc<StubState>>) -> Json<Value> {
    Json(state.stock.lock().unwrap().clone())
}

async fn stock_report(State(state): State<Arc<StubState>>) -> Json<Value> {
    Json(state.report.lock().unwrap().clone())
}

/// The real backend sends a bare `[]` when the list is empty and
/// `{data: rows}` otherwise; the stub keeps both shapes live.
async fn get_comments(
    State(state): State<Arc<StubState>>,
    Path((_id, _target)): Path<(String, String)>,
) -> Json<Value> {
    Json(feed_payload(&state.comments.lock().unwrap()))
}

async fn get_complaints(
    State(state): State<Arc<StubState>>,
    Path((_id, _target)): Path<(String, String)>,
) -> Json<Value> {
    Json(feed_payload(&state.complaints.lock().unwrap()))
}

fn feed_payload(rows: &[Value]) -> Value {
    if rows.is_empty() {
        json!([])
    } else {
        json!({ "data": rows })
    }
}

async fn add_comment(
    State(state): State<Arc<StubState>>,
    Json(payload): Json<Value>,
) -> Json<Value> {
    Json(push_feedback(&state, &state.comments, &payload, "Comment"))
}

async fn add_complaint(
    State(state): State<Arc<StubState>>,
    Json(payload): Json<Value>,
) -> Json<Value> {
    Json(push_feedback(&state, &state.complaints, &payload, "Complaint"))
}

fn push_feedback(
    state: &StubState,
    list: &Mutex<Vec<Value>>,
    payload: &Value,
    what: &str,
) -> Value {
    let text = payload.get("text").and_then(Value::as_str).unwrap_or("");
    if text.is_empty() {
        return json!({ "success": false, "error": format!("{what} has no text") });
    }

    let id = {
        let mut next = state.next_id.lock().unwrap();
        let id = *next;
        *next += 1;
        id
    };
    list.lock().unwrap().push(json!([id, text]));

    json!({ "success": true })
}

async fn get_role(State(state): State<Arc<StubState>>) -> Json<Value> {
    Json(Value::String(state.role.lock().unwrap().clone()))
}

async fn user_info(State(state): State<Arc<StubState>>) -> Json<Value> {
    Json(state.user.lock().unwrap().clone())
}

async fn buy_product(Json(_payload): Json<Value>) -> Json<Value> {
    Json(json!({ "success": true }))
}

async fn withdraw(Json(_payload): Json<Value>) -> Json<Value> {
    Json(json!({ "message": "ok" }))
}
