use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,
    pub run_migrations: bool,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    /// Mount the `/.../fill` demo data routes
    pub enable_seed_routes: bool,

    // Application metadata
    pub deployment: Deployment,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `DB_CONNECTION_STRING` and `PORT` are accepted as fallbacks for
    /// `DATABASE_URL` and `API_PORT`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if no database connection string is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let deployment = Deployment::from_str(
            &env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
        );

        Ok(Self {
            // Database
            database_url: env::var("DATABASE_URL")
                .or_else(|_| env::var("DB_CONNECTION_STRING"))
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            run_migrations: env::var("RUN_MIGRATIONS")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),

            // API settings
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .or_else(|_| env::var("PORT"))
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),

            // Demo data routes default to on only for local runs
            enable_seed_routes: env::var("ENABLE_SEED_ROUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(deployment == Deployment::Local),

            // Application metadata
            deployment,
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
