use anyhow::{Ok, Result};

use super::config_model::{Database, DotEnvyConfig, RateLimit, Server, TokenLifetimes, UserSecret};
use super::stage::Stage;

const DEFAULT_ACCESS_TTL_SECONDS: i64 = 900; // 15 minutes
const DEFAULT_REFRESH_TTL_SECONDS: i64 = 604_800; // 7 days
const DEFAULT_REQUESTS_PER_MINUTE: u32 = 100;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let token = TokenLifetimes {
        access_ttl_seconds: std::env::var("JWT_ACCESS_TTL_SECONDS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_TTL_SECONDS.to_string())
            .parse()?,
        refresh_ttl_seconds: std::env::var("JWT_REFRESH_TTL_SECONDS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_TTL_SECONDS.to_string())
            .parse()?,
    };

    let rate_limit = RateLimit {
        requests_per_minute: std::env::var("RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|_| DEFAULT_REQUESTS_PER_MINUTE.to_string())
            .parse()?,
    };

    Ok(DotEnvyConfig {
        server,
        database,
        token,
        rate_limit,
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or("".to_string());
    Stage::try_from(&stage_str).unwrap_or_default()
}

pub fn get_user_secret() -> Result<UserSecret> {
    dotenvy::dotenv().ok();

    Ok(UserSecret {
        secret: std::env::var("JWT_USER_SECRET").expect("JWT_USER_SECRET is invalid"),
        refresh_secret: std::env::var("JWT_USER_REFRESH_SECRET")
            .expect("JWT_USER_REFRESH_SECRET is invalid"),
    })
}
