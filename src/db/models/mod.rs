pub mod auth_user;
pub mod blog;
pub mod record;
