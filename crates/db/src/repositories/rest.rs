//! Request/response plumbing shared by every repository: pick the method,
//! check the status against what the operation accepts, decode the rows.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::filter::Resource;
use crate::gateway::{RemoteStore, StoreResponse};

pub(crate) const OK: u16 = 200;
pub(crate) const CREATED: u16 = 201;
pub(crate) const NO_CONTENT: u16 = 204;

/// Pass the response through if its status is one of `accepted`.
pub(crate) fn expect_status(
    response: StoreResponse,
    accepted: &[u16],
    operation: &'static str,
) -> Result<StoreResponse, StoreError> {
    if accepted.contains(&response.status) {
        return Ok(response);
    }
    let body = response.body_text();
    tracing::warn!(
        operation,
        status = response.status,
        body = %body,
        "Remote store returned unexpected status"
    );
    Err(StoreError::Upstream {
        operation,
        status: response.status,
        body,
    })
}

/// Decode a JSON array of rows. An empty body (204) decodes as no rows.
pub(crate) fn decode_rows<T: DeserializeOwned>(
    response: &StoreResponse,
) -> Result<Vec<T>, StoreError> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(&response.body)?)
}

/// POST one row and return the echoed representation.
pub(crate) async fn insert_one<T, P>(
    store: &dyn RemoteStore,
    table: &'static str,
    entity: &'static str,
    operation: &'static str,
    payload: &P,
) -> Result<T, StoreError>
where
    T: DeserializeOwned,
    P: Serialize + ?Sized,
{
    let body = serde_json::to_value(payload)?;
    let response = store.execute(Method::POST, table, Some(&body)).await?;
    let response = expect_status(response, &[CREATED], operation)?;

    let mut rows: Vec<T> = decode_rows(&response)?;
    if rows.is_empty() {
        tracing::warn!(operation, "Insert acknowledged but no row was echoed");
        return Err(StoreError::NothingInserted { entity });
    }
    Ok(rows.swap_remove(0))
}

pub(crate) async fn select<T: DeserializeOwned>(
    store: &dyn RemoteStore,
    resource: &Resource,
    operation: &'static str,
) -> Result<Vec<T>, StoreError> {
    let response = store.execute(Method::GET, &resource.path(), None).await?;
    let response = expect_status(response, &[OK], operation)?;
    decode_rows(&response)
}

/// PATCH the rows matched by `resource` and return what the store echoed.
pub(crate) async fn patch<T, P>(
    store: &dyn RemoteStore,
    resource: &Resource,
    operation: &'static str,
    payload: &P,
) -> Result<Vec<T>, StoreError>
where
    T: DeserializeOwned,
    P: Serialize + ?Sized,
{
    let body = serde_json::to_value(payload)?;
    let response = store
        .execute(Method::PATCH, &resource.path(), Some(&body))
        .await?;
    let response = expect_status(response, &[OK], operation)?;
    decode_rows(&response)
}

pub(crate) async fn delete(
    store: &dyn RemoteStore,
    resource: &Resource,
    operation: &'static str,
) -> Result<(), StoreError> {
    let response = store.execute(Method::DELETE, &resource.path(), None).await?;
    expect_status(response, &[OK, NO_CONTENT], operation)?;
    Ok(())
}
