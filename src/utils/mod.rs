pub mod db_utils;
pub mod notify;
pub mod user_cache;
