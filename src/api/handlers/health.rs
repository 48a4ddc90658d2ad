/// Liveness text for `GET /`. Answers as soon as the listener is up, whether
/// or not the database connection has been established yet.
pub async fn root() -> &'static str {
    "Backend + MongoDB working"
}
