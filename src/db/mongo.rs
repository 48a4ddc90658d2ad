use async_trait::async_trait;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions, ResolverConfig};
use mongodb::{Client, Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use super::models::auth_user::AuthUser;
use super::models::blog::{BlogPost, CreateBlogRequest};
use super::models::record::{CreateRecordRequest, Record, UpdateRecordRequest};
use super::{Store, StoreError, StoreResult};

/// Database used when the connection string does not name one.
const DEFAULT_DATABASE: &str = "test";

const RECORDS: &str = "tests";
const AUTH_USERS: &str = "authusers";
const BLOGS: &str = "blogs";

/// MongoDB-backed [`Store`].
///
/// The client is created lazily on first use, so the HTTP listener can come
/// up while the database is still unreachable; every request retries until a
/// connection sticks. Unique indexes are ensured as part of that first
/// connection, before any document is written through it.
pub struct MongoStore {
    uri: String,
    client: OnceCell<Client>,
}

impl MongoStore {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            client: OnceCell::new(),
        }
    }

    /// Connect and verify the deployment with a ping. Called from a startup
    /// task; a failure here is logged by the caller, never fatal.
    pub async fn init(&self) -> StoreResult<()> {
        let db = self.database().await?;
        db.run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn client(&self) -> StoreResult<&Client> {
        self.client
            .get_or_try_init(|| async {
                // Fixed public resolvers: `mongodb+srv` SRV lookups must work
                // even where the host's own resolver cannot serve them.
                let options =
                    ClientOptions::parse_with_resolver_config(&self.uri, ResolverConfig::google())
                        .await?;
                let client = Client::with_options(options)?;
                ensure_unique_indexes(&database_of(&client)).await?;
                Ok(client)
            })
            .await
            .map_err(backend)
    }

    async fn database(&self) -> StoreResult<Database> {
        Ok(database_of(self.client().await?))
    }

    async fn records(&self) -> StoreResult<Collection<RecordDoc>> {
        Ok(self.database().await?.collection(RECORDS))
    }

    async fn auth_users(&self) -> StoreResult<Collection<AuthUserDoc>> {
        Ok(self.database().await?.collection(AUTH_USERS))
    }

    async fn blogs(&self) -> StoreResult<Collection<BlogDoc>> {
        Ok(self.database().await?.collection(BLOGS))
    }
}

fn database_of(client: &Client) -> Database {
    client
        .default_database()
        .unwrap_or_else(|| client.database(DEFAULT_DATABASE))
}

/// The indexes backing the duplicate pre-checks in the handlers. Racing
/// writers both pass the pre-check; the loser lands here with an E11000.
async fn ensure_unique_indexes(db: &Database) -> mongodb::error::Result<()> {
    let unique = || IndexOptions::builder().unique(true).build();

    db.collection::<RecordDoc>(RECORDS)
        .create_index(
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(unique())
                .build(),
            None,
        )
        .await?;
    db.collection::<AuthUserDoc>(AUTH_USERS)
        .create_index(
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique())
                .build(),
            None,
        )
        .await?;
    Ok(())
}

fn backend(err: mongodb::error::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

/// Maps an E11000 duplicate-key failure on `unique_field` to
/// [`StoreError::Duplicate`]; anything else stays a backend error.
fn write_error(err: mongodb::error::Error, unique_field: &str) -> StoreError {
    if is_duplicate_key(&err) {
        StoreError::Duplicate(unique_field.to_string())
    } else {
        backend(err)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(failure)) => failure.code == 11000,
        ErrorKind::Command(failure) => failure.code == 11000,
        _ => false,
    }
}

fn parse_object_id(id: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| StoreError::MalformedId(id.to_string()))
}

/// BSON shape of a [`Record`]. `_id` is absent on insert and filled in by
/// the server.
#[derive(Debug, Serialize, Deserialize)]
struct RecordDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<f64>,
}

impl RecordDoc {
    fn into_record(self) -> Record {
        Record {
            id: self.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: self.name,
            age: self.age,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct AuthUserDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    email: String,
    password_hash: String,
}

impl AuthUserDoc {
    fn into_auth_user(self) -> AuthUser {
        AuthUser {
            id: self.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct BlogDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(rename = "createdAt")]
    created_at: bson::DateTime,
}

impl BlogDoc {
    fn into_blog_post(self) -> BlogPost {
        BlogPost {
            id: self.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: self.title,
            content: self.content,
            created_at: self.created_at.to_chrono(),
        }
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn insert_record(&self, input: CreateRecordRequest) -> StoreResult<Record> {
        let mut record = RecordDoc {
            id: None,
            name: input.name,
            age: input.age,
        };
        let inserted = self
            .records()
            .await?
            .insert_one(&record, None)
            .await
            .map_err(|err| write_error(err, "name"))?;
        record.id = inserted.inserted_id.as_object_id();
        Ok(record.into_record())
    }

    async fn find_record_by_name(&self, name: &str) -> StoreResult<Option<Record>> {
        let found = self
            .records()
            .await?
            .find_one(doc! { "name": name }, None)
            .await
            .map_err(backend)?;
        Ok(found.map(RecordDoc::into_record))
    }

    async fn list_records(&self) -> StoreResult<Vec<Record>> {
        let docs: Vec<RecordDoc> = self
            .records()
            .await?
            .find(None, None)
            .await
            .map_err(backend)?
            .try_collect()
            .await
            .map_err(backend)?;
        Ok(docs.into_iter().map(RecordDoc::into_record).collect())
    }

    async fn update_record(&self, id: &str, input: UpdateRecordRequest) -> StoreResult<()> {
        let oid = parse_object_id(id)?;
        self.records()
            .await?
            .update_one(
                doc! { "_id": oid },
                doc! { "$set": { "name": input.name.as_str(), "age": input.age } },
                None,
            )
            .await
            .map_err(|err| write_error(err, "name"))?;
        Ok(())
    }

    async fn delete_record(&self, id: &str) -> StoreResult<()> {
        let oid = parse_object_id(id)?;
        self.records()
            .await?
            .delete_one(doc! { "_id": oid }, None)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn search_records_by_name(&self, fragment: &str) -> StoreResult<Vec<Record>> {
        // Escaped so the fragment is a literal substring, not a pattern.
        let filter = doc! {
            "name": { "$regex": regex::escape(fragment), "$options": "i" }
        };
        let docs: Vec<RecordDoc> = self
            .records()
            .await?
            .find(filter, None)
            .await
            .map_err(backend)?
            .try_collect()
            .await
            .map_err(backend)?;
        Ok(docs.into_iter().map(RecordDoc::into_record).collect())
    }

    async fn insert_auth_user(&self, email: &str, password_hash: &str) -> StoreResult<AuthUser> {
        let mut user = AuthUserDoc {
            id: None,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        let inserted = self
            .auth_users()
            .await?
            .insert_one(&user, None)
            .await
            .map_err(|err| write_error(err, "email"))?;
        user.id = inserted.inserted_id.as_object_id();
        Ok(user.into_auth_user())
    }

    async fn find_auth_user_by_email(&self, email: &str) -> StoreResult<Option<AuthUser>> {
        let found = self
            .auth_users()
            .await?
            .find_one(doc! { "email": email }, None)
            .await
            .map_err(backend)?;
        Ok(found.map(AuthUserDoc::into_auth_user))
    }

    async fn insert_blog(&self, input: CreateBlogRequest) -> StoreResult<BlogPost> {
        let mut post = BlogDoc {
            id: None,
            title: input.title,
            content: input.content,
            created_at: bson::DateTime::from_chrono(Utc::now()),
        };
        let inserted = self
            .blogs()
            .await?
            .insert_one(&post, None)
            .await
            .map_err(backend)?;
        post.id = inserted.inserted_id.as_object_id();
        Ok(post.into_blog_post())
    }

    async fn list_blogs(&self) -> StoreResult<Vec<BlogPost>> {
        let docs: Vec<BlogDoc> = self
            .blogs()
            .await?
            .find(None, None)
            .await
            .map_err(backend)?
            .try_collect()
            .await
            .map_err(backend)?;
        Ok(docs.into_iter().map(BlogDoc::into_blog_post).collect())
    }

    async fn delete_blog(&self, id: &str) -> StoreResult<()> {
        let oid = parse_object_id(id)?;
        self.blogs()
            .await?
            .delete_one(doc! { "_id": oid }, None)
            .await
            .map_err(backend)?;
        Ok(())
    }
}
