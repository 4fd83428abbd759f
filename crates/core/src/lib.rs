pub mod catalog;
pub mod domain;
pub mod engine;
pub mod error;

pub mod config {
    /// Default location of the catalog produced by the offline labeling job.
    pub const DEFAULT_CATALOG_PATH: &str = "schemes_master_list_v2.json";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub catalog_path: Option<String>,
        pub sentry_dsn: Option<String>,
        pub port: Option<u16>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let port = match std::env::var("PORT") {
                Ok(v) => Some(
                    v.trim()
                        .parse::<u16>()
                        .map_err(|e| anyhow::anyhow!("PORT must be a valid port number ({v:?}): {e}"))?,
                ),
                Err(_) => None,
            };

            Ok(Self {
                catalog_path: std::env::var("CATALOG_PATH")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                port,
            })
        }

        pub fn catalog_path(&self) -> &str {
            self.catalog_path
                .as_deref()
                .unwrap_or(DEFAULT_CATALOG_PATH)
        }
    }

}
