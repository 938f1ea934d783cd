//! Remote store access: the REST gateway, entity repositories, and the
//! workspace composition service built on top of them.

pub mod error;
pub mod filter;
pub mod gateway;
pub mod models;
pub mod repositories;
pub mod services;

#[cfg(any(test, feature = "test-support"))]
pub mod memory;

pub use error::StoreError;
pub use gateway::{RemoteStore, RestGateway, StoreResponse};
