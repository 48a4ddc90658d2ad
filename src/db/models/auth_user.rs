/// A credential document. `email` is unique across the collection.
///
/// Not `Serialize`: the stored hash must never appear in a response body,
/// and no endpoint returns users.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub password_hash: String,
}
