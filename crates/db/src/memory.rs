//! In-process [`RemoteStore`] for tests.
//!
//! Interprets the subset of the REST dialect the repositories emit
//! (`column=eq.value` and `or=(a.eq.v,b.eq.v)` filters), assigns `id` and
//! `created_at` on insert, and echoes representations with the same status
//! codes as the hosted store. Every call is recorded so tests can assert on
//! what reached the store.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Map, Value};
use url::form_urlencoded;

use crate::error::StoreError;
use crate::gateway::{RemoteStore, StoreResponse};

type Row = Map<String, Value>;

/// A call observed by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub resource: String,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Row>>>,
    calls: Mutex<Vec<RecordedCall>>,
    scripted: Mutex<VecDeque<StoreResponse>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row directly, bypassing the call log.
    pub fn seed(&self, table: &str, row: Value) {
        if let Value::Object(row) = row {
            lock(&self.tables)
                .entry(table.to_string())
                .or_default()
                .push(row);
        }
    }

    /// Snapshot of the raw rows stored in `table`.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        lock(&self.tables)
            .get(table)
            .map(|rows| rows.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Answer the next call with `response` instead of interpreting it.
    pub fn respond_next(&self, response: StoreResponse) {
        lock(&self.scripted).push_back(response);
    }

    fn handle(&self, method: &Method, resource: &str, body: Option<&Value>) -> StoreResponse {
        let (table, conditions) = match parse_resource(resource) {
            Ok(parsed) => parsed,
            Err(message) => return error_response(400, &message),
        };

        let mut tables = lock(&self.tables);
        let rows = tables.entry(table).or_default();

        match *method {
            Method::GET => {
                let matched: Vec<Value> = rows
                    .iter()
                    .filter(|row| matches_all(row, &conditions))
                    .cloned()
                    .map(Value::Object)
                    .collect();
                json_response(200, &Value::Array(matched))
            }
            Method::POST => {
                let incoming = match body {
                    Some(Value::Object(row)) => vec![row.clone()],
                    Some(Value::Array(items)) => {
                        let objects: Option<Vec<Row>> =
                            items.iter().map(|v| v.as_object().cloned()).collect();
                        match objects {
                            Some(objects) => objects,
                            None => return error_response(400, "insert body must contain objects"),
                        }
                    }
                    _ => return error_response(400, "insert body must be an object or array"),
                };

                let mut echoed = Vec::with_capacity(incoming.len());
                for mut row in incoming {
                    row.entry("id")
                        .or_insert_with(|| Value::String(uuid::Uuid::new_v4().to_string()));
                    row.entry("created_at")
                        .or_insert_with(|| Value::String(chrono::Utc::now().to_rfc3339()));
                    if rows.iter().any(|existing| existing.get("id") == row.get("id")) {
                        return error_response(409, "duplicate key value violates unique constraint");
                    }
                    rows.push(row.clone());
                    echoed.push(Value::Object(row));
                }
                json_response(201, &Value::Array(echoed))
            }
            Method::PATCH => {
                let Some(Value::Object(changes)) = body else {
                    return error_response(400, "update body must be an object");
                };
                let mut echoed = Vec::new();
                for row in rows.iter_mut().filter(|row| matches_all(row, &conditions)) {
                    for (key, value) in changes {
                        row.insert(key.clone(), value.clone());
                    }
                    echoed.push(Value::Object(row.clone()));
                }
                json_response(200, &Value::Array(echoed))
            }
            Method::DELETE => {
                let (removed, kept): (Vec<Row>, Vec<Row>) = rows
                    .drain(..)
                    .partition(|row| matches_all(row, &conditions));
                *rows = kept;
                if removed.is_empty() {
                    StoreResponse::new(204, Vec::new())
                } else {
                    let echoed = removed.into_iter().map(Value::Object).collect();
                    json_response(200, &Value::Array(echoed))
                }
            }
            _ => error_response(405, "method not allowed"),
        }
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn execute(
        &self,
        method: Method,
        resource: &str,
        body: Option<&Value>,
    ) -> Result<StoreResponse, StoreError> {
        lock(&self.calls).push(RecordedCall {
            method: method.clone(),
            resource: resource.to_string(),
            body: body.cloned(),
        });

        if let Some(scripted) = lock(&self.scripted).pop_front() {
            return Ok(scripted);
        }
        Ok(self.handle(&method, resource, body))
    }
}

/// One filter condition; `Any` holds the alternatives of an `or` group.
#[derive(Debug)]
enum Condition {
    Eq(String, String),
    Any(Vec<(String, String)>),
}

fn parse_resource(resource: &str) -> Result<(String, Vec<Condition>), String> {
    let (table, query) = resource.split_once('?').unwrap_or((resource, ""));
    let mut conditions = Vec::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if key == "or" {
            let inner = value
                .strip_prefix('(')
                .and_then(|v| v.strip_suffix(')'))
                .ok_or_else(|| format!("malformed or group '{value}'"))?;
            let alternatives = split_group(inner)
                .into_iter()
                .map(|alt| {
                    let (column, raw) = alt
                        .split_once(".eq.")
                        .ok_or_else(|| format!("unsupported operator in '{alt}'"))?;
                    Ok((column.to_string(), unquote(raw)))
                })
                .collect::<Result<Vec<_>, String>>()?;
            conditions.push(Condition::Any(alternatives));
        } else {
            let raw = value
                .strip_prefix("eq.")
                .ok_or_else(|| format!("unsupported operator in '{key}={value}'"))?;
            conditions.push(Condition::Eq(key.into_owned(), raw.to_string()));
        }
    }

    Ok((table.to_string(), conditions))
}

/// Split an `or` group on commas that sit outside double quotes.
fn split_group(inner: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;
    for (i, c) in inner.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ',' if !quoted => {
                parts.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&inner[start..]);
    parts
}

fn unquote(value: &str) -> String {
    match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(inner) => inner.replace("\\\"", "\"").replace("\\\\", "\\"),
        None => value.to_string(),
    }
}

fn column_equals(row: &Row, column: &str, expected: &str) -> bool {
    match row.get(column) {
        Some(Value::String(s)) => s == expected,
        Some(Value::Null) | None => false,
        Some(other) => other.to_string() == expected,
    }
}

fn matches_all(row: &Row, conditions: &[Condition]) -> bool {
    conditions.iter().all(|condition| match condition {
        Condition::Eq(column, value) => column_equals(row, column, value),
        Condition::Any(alternatives) => alternatives
            .iter()
            .any(|(column, value)| column_equals(row, column, value)),
    })
}

fn json_response(status: u16, body: &Value) -> StoreResponse {
    StoreResponse::new(status, body.to_string())
}

fn error_response(status: u16, message: &str) -> StoreResponse {
    json_response(status, &json!({ "message": message }))
}
