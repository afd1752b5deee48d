use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::auth::jwt::JwtKeys;
use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    /// Pluggable text generator. Default: the Gemini `LlmClient`.
    pub llm: Arc<dyn TextGenerator>,
    pub jwt: JwtKeys,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    /// State whose pool never connects unless a query actually runs.
    pub fn for_tests(llm: Arc<dyn TextGenerator>) -> Self {
        use aws_sdk_s3::config::{BehaviorVersion, Region};
        use sqlx::postgres::PgPoolOptions;

        let config = Config::for_tests();
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .expect("lazy pool");
        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();

        AppState {
            db,
            s3: S3Client::from_conf(s3_config),
            llm,
            jwt: JwtKeys::from_config(&config),
            config,
        }
    }
}
