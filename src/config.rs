use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub mongo_uri: String,
    pub server_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        Self {
            mongo_uri: env::var("MONGO_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017/teamsdb".to_string()),
            server_addr: format!("0.0.0.0:{port}"),
        }
    }
}
