use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::OnceLock;

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub mongo_uri: String,
    pub mongo_db: String,
    pub jwt_access_secret: String,
    pub revalidate_url: Option<String>,
    pub revalidate_secret: Option<String>,
}

static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn load() -> &'static Config {
    CONFIG.get_or_init(|| Config {
        port: var_or("PORT", "8080"),
        mongo_uri: var_or("MONGO_URI", "mongodb://localhost:27017"),
        mongo_db: var_or("MONGO_DB", "comentarios"),
        jwt_access_secret: required("JWT_ACCESS_SECRET"),
        revalidate_url: env::var("REVALIDATE_URL").ok(),
        revalidate_secret: env::var("REVALIDATE_SECRET").ok(),
    })
}

fn required(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} must be set"))
}

fn var_or<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|error| panic!("invalid {key} value: {error}")),
        Err(_) => {
            log::info!("{key} not set, using default: {default}");
            default
                .parse()
                .unwrap_or_else(|error| panic!("invalid default for {key}: {error}"))
        }
    }
}
