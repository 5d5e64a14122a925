use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,

    // Rate limiting
    pub rate_protected_per_min: u32,
    pub rate_admin_per_min: u32,

    pub api_prefix: String,

    // Directory cache warmup
    pub user_cache_warmup_days: u32,
    pub user_cache_warmup_batch: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),

            rate_protected_per_min: env::var("RATE_PROTECTED_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),
            rate_admin_per_min: env::var("RATE_ADMIN_PER_MIN")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            user_cache_warmup_days: env::var("USER_CACHE_WARMUP_DAYS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            user_cache_warmup_batch: env::var("USER_CACHE_WARMUP_BATCH")
                .unwrap_or_else(|_| "250".to_string())
                .parse()
                .unwrap(),
        }
    }
}
