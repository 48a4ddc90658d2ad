use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod models;
pub mod mongo;

use self::models::auth_user::AuthUser;
use self::models::blog::{BlogPost, CreateBlogRequest};
use self::models::record::{CreateRecordRequest, Record, UpdateRecordRequest};

/// Failures raised by a [`Store`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique field already holds the given value. The payload names the
    /// field ("name" or "email").
    #[error("Duplicate value for unique field '{0}'")]
    Duplicate(String),

    /// The id path segment does not parse as a document id.
    #[error("Malformed document id '{0}'")]
    MalformedId(String),

    /// Driver or connection failure.
    #[error("{0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage backend for the three document collections.
///
/// Handlers receive an implementation as `Arc<dyn Store>`, so tests can swap
/// the MongoDB backend for an in-memory one. Each method is atomic on its
/// own; nothing coordinates across calls, and the unique fields rest on the
/// backend's own constraint rather than on caller-side checks.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_record(&self, input: CreateRecordRequest) -> StoreResult<Record>;
    async fn find_record_by_name(&self, name: &str) -> StoreResult<Option<Record>>;
    async fn list_records(&self) -> StoreResult<Vec<Record>>;
    /// Overwrites `name` and `age` on the identified record. Updating an id
    /// that matches nothing is not an error.
    async fn update_record(&self, id: &str, input: UpdateRecordRequest) -> StoreResult<()>;
    /// Deleting an id that matches nothing is not an error.
    async fn delete_record(&self, id: &str) -> StoreResult<()>;
    /// Case-insensitive substring match on `name`.
    async fn search_records_by_name(&self, fragment: &str) -> StoreResult<Vec<Record>>;

    async fn insert_auth_user(&self, email: &str, password_hash: &str) -> StoreResult<AuthUser>;
    async fn find_auth_user_by_email(&self, email: &str) -> StoreResult<Option<AuthUser>>;

    async fn insert_blog(&self, input: CreateBlogRequest) -> StoreResult<BlogPost>;
    async fn list_blogs(&self) -> StoreResult<Vec<BlogPost>>;
    async fn delete_blog(&self, id: &str) -> StoreResult<()>;
}
