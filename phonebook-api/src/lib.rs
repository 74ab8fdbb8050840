pub mod config;
pub mod handlers;
pub mod helpers;
pub mod storage;
pub mod store;

pub use store::{ContactStore, ContactStoreError};
