use serde::{Deserialize, Serialize};

/// A document in the records collection. `name` is unique (case-sensitive)
/// across the collection; `age` is optional and stored as a double.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
}

/// Body of `POST /add`.
#[derive(Debug, Deserialize)]
pub struct CreateRecordRequest {
    pub name: String,
    #[serde(default)]
    pub age: Option<f64>,
}

/// Body of `PUT /users/{id}`. Both fields overwrite whatever the record
/// currently holds.
#[derive(Debug, Deserialize)]
pub struct UpdateRecordRequest {
    pub name: String,
    #[serde(default)]
    pub age: Option<f64>,
}
