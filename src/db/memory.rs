use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::models::auth_user::AuthUser;
use super::models::blog::{BlogPost, CreateBlogRequest};
use super::models::record::{CreateRecordRequest, Record, UpdateRecordRequest};
use super::{Store, StoreError, StoreResult};

/// In-memory [`Store`] for tests and database-less local runs.
///
/// One mutex guards all three collections, so a check-then-insert on a
/// unique field is atomic here for the same reason it is under a unique
/// index in MongoDB: two racing inserts cannot both win.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<Collections>,
}

#[derive(Default)]
struct Collections {
    records: Vec<Record>,
    users: Vec<AuthUser>,
    blogs: Vec<BlogPost>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Ids handed out by this backend are UUID strings. Anything that does not
/// parse raises the same malformed-id error the ObjectId backend raises.
fn check_id(id: &str) -> StoreResult<()> {
    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| StoreError::MalformedId(id.to_string()))
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_record(&self, input: CreateRecordRequest) -> StoreResult<Record> {
        let mut state = self.state.lock().await;
        if state.records.iter().any(|r| r.name == input.name) {
            return Err(StoreError::Duplicate("name".to_string()));
        }
        let record = Record {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            age: input.age,
        };
        state.records.push(record.clone());
        Ok(record)
    }

    async fn find_record_by_name(&self, name: &str) -> StoreResult<Option<Record>> {
        let state = self.state.lock().await;
        Ok(state.records.iter().find(|r| r.name == name).cloned())
    }

    async fn list_records(&self) -> StoreResult<Vec<Record>> {
        Ok(self.state.lock().await.records.clone())
    }

    async fn update_record(&self, id: &str, input: UpdateRecordRequest) -> StoreResult<()> {
        check_id(id)?;
        let mut state = self.state.lock().await;
        if !state.records.iter().any(|r| r.id == id) {
            // An update that matches nothing touches nothing.
            return Ok(());
        }
        if state.records.iter().any(|r| r.name == input.name && r.id != id) {
            return Err(StoreError::Duplicate("name".to_string()));
        }
        if let Some(record) = state.records.iter_mut().find(|r| r.id == id) {
            record.name = input.name;
            record.age = input.age;
        }
        Ok(())
    }

    async fn delete_record(&self, id: &str) -> StoreResult<()> {
        check_id(id)?;
        self.state.lock().await.records.retain(|r| r.id != id);
        Ok(())
    }

    async fn search_records_by_name(&self, fragment: &str) -> StoreResult<Vec<Record>> {
        let needle = fragment.to_lowercase();
        let state = self.state.lock().await;
        Ok(state
            .records
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn insert_auth_user(&self, email: &str, password_hash: &str) -> StoreResult<AuthUser> {
        let mut state = self.state.lock().await;
        if state.users.iter().any(|u| u.email == email) {
            return Err(StoreError::Duplicate("email".to_string()));
        }
        let user = AuthUser {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_auth_user_by_email(&self, email: &str) -> StoreResult<Option<AuthUser>> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_blog(&self, input: CreateBlogRequest) -> StoreResult<BlogPost> {
        let post = BlogPost {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            content: input.content,
            created_at: Utc::now(),
        };
        self.state.lock().await.blogs.push(post.clone());
        Ok(post)
    }

    async fn list_blogs(&self) -> StoreResult<Vec<BlogPost>> {
        Ok(self.state.lock().await.blogs.clone())
    }

    async fn delete_blog(&self, id: &str) -> StoreResult<()> {
        check_id(id)?;
        self.state.lock().await.blogs.retain(|b| b.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, age: Option<f64>) -> CreateRecordRequest {
        CreateRecordRequest {
            name: name.to_string(),
            age,
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_name() {
        let store = MemoryStore::new();
        store.insert_record(record("Alice", Some(30.0))).await.unwrap();

        let err = store.insert_record(record("Alice", None)).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(field) if field == "name"));
    }

    #[tokio::test]
    async fn test_name_uniqueness_is_case_sensitive() {
        let store = MemoryStore::new();
        store.insert_record(record("Alice", None)).await.unwrap();
        store.insert_record(record("alice", None)).await.unwrap();

        assert_eq!(store.list_records().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_a_no_op() {
        let store = MemoryStore::new();
        let absent = Uuid::new_v4().to_string();

        store
            .update_record(&absent, UpdateRecordRequest {
                name: "Bob".to_string(),
                age: None,
            })
            .await
            .unwrap();
        assert!(store.list_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_cannot_take_anothers_name() {
        let store = MemoryStore::new();
        store.insert_record(record("Alice", None)).await.unwrap();
        let bob = store.insert_record(record("Bob", None)).await.unwrap();

        let err = store
            .update_record(&bob.id, UpdateRecordRequest {
                name: "Alice".to_string(),
                age: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_update_keeping_own_name_is_allowed() {
        let store = MemoryStore::new();
        let alice = store.insert_record(record("Alice", Some(30.0))).await.unwrap();

        store
            .update_record(&alice.id, UpdateRecordRequest {
                name: "Alice".to_string(),
                age: Some(31.0),
            })
            .await
            .unwrap();

        let records = store.list_records().await.unwrap();
        assert_eq!(records[0].age, Some(31.0));
    }

    #[tokio::test]
    async fn test_malformed_id_is_an_error() {
        let store = MemoryStore::new();
        let err = store.delete_record("not-a-uuid").await.unwrap_err();
        assert!(matches!(err, StoreError::MalformedId(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_a_no_op() {
        let store = MemoryStore::new();
        let absent = Uuid::new_v4().to_string();
        store.delete_record(&absent).await.unwrap();
    }

    #[tokio::test]
    async fn test_search_matches_substring_case_insensitively() {
        let store = MemoryStore::new();
        store.insert_record(record("Alice", None)).await.unwrap();
        store.insert_record(record("Oliver", None)).await.unwrap();
        store.insert_record(record("Bob", None)).await.unwrap();

        let hits = store.search_records_by_name("LI").await.unwrap();
        assert_eq!(hits.len(), 2);

        let none = store.search_records_by_name("xyz").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        store.insert_auth_user("a@b.com", "hash").await.unwrap();

        let err = store.insert_auth_user("a@b.com", "other").await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(field) if field == "email"));
    }

    #[tokio::test]
    async fn test_blogs_accept_fully_empty_posts() {
        let store = MemoryStore::new();
        let post = store
            .insert_blog(CreateBlogRequest {
                title: None,
                content: None,
            })
            .await
            .unwrap();

        assert!(post.title.is_none());
        assert!(!post.id.is_empty());
        assert_eq!(store.list_blogs().await.unwrap().len(), 1);
    }
}
