pub mod search_db;
pub mod user_db;
