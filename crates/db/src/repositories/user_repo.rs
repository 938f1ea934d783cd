//! Repository for the `users` resource.

use crate::error::StoreError;
use crate::filter::Resource;
use crate::gateway::RemoteStore;
use crate::models::user::{CreateUser, UpdateUser, User};

use super::rest;

const TABLE: &str = "users";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the stored row.
    pub async fn create(store: &dyn RemoteStore, input: &CreateUser) -> Result<User, StoreError> {
        rest::insert_one(store, TABLE, "user", "insert user", input).await
    }

    /// List every user.
    pub async fn list(store: &dyn RemoteStore) -> Result<Vec<User>, StoreError> {
        rest::select(store, &Resource::table(TABLE), "list users").await
    }

    pub async fn find_by_id(store: &dyn RemoteStore, id: &str) -> Result<Option<User>, StoreError> {
        let resource = Resource::table(TABLE).eq("id", id);
        let rows: Vec<User> = rest::select(store, &resource, "find user by id").await?;
        Ok(rows.into_iter().next())
    }

    /// Find a user by exact username.
    pub async fn find_by_username(
        store: &dyn RemoteStore,
        username: &str,
    ) -> Result<Option<User>, StoreError> {
        let resource = Resource::table(TABLE).eq("username", username);
        let rows: Vec<User> = rest::select(store, &resource, "find user by username").await?;
        Ok(rows.into_iter().next())
    }

    /// Find users whose username or email equals `identifier`.
    pub async fn find_by_username_or_email(
        store: &dyn RemoteStore,
        identifier: &str,
    ) -> Result<Vec<User>, StoreError> {
        let resource = Resource::table(TABLE).any_eq(&["username", "email"], identifier);
        rest::select(store, &resource, "find user by username or email").await
    }

    /// Patch the given fields. Returns `None` if no row with `id` exists.
    pub async fn update(
        store: &dyn RemoteStore,
        id: &str,
        input: &UpdateUser,
    ) -> Result<Option<User>, StoreError> {
        let resource = Resource::table(TABLE).eq("id", id);
        let rows: Vec<User> = rest::patch(store, &resource, "update user", input).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn delete(store: &dyn RemoteStore, id: &str) -> Result<(), StoreError> {
        let resource = Resource::table(TABLE).eq("id", id);
        rest::delete(store, &resource, "delete user").await
    }
}
