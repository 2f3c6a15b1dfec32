use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub users_collection: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub mongo: MongoConfig,
    pub host: String,
    pub port: u16,
    pub default_page_size: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mongo = MongoConfig {
            uri: std::env::var("MONGODB_URI")?,
            database: std::env::var("MONGODB_DATABASE").unwrap_or_else(|_| "usermgmt".into()),
            users_collection: std::env::var("USERS_COLLECTION").unwrap_or_else(|_| "users".into()),
        };
        Ok(Self {
            mongo,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(8080),
            default_page_size: std::env::var("DEFAULT_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(10),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
impl AppConfig {
    pub fn for_tests() -> Self {
        Self {
            mongo: MongoConfig {
                uri: "mongodb://localhost:27017".into(),
                database: "usermgmt_test".into(),
                users_collection: "users".into(),
            },
            host: "127.0.0.1".into(),
            port: 0,
            default_page_size: 10,
        }
    }
}
