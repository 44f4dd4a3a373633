use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;

use realty_config::{
    CorsConfig, EmailConfig, ImageKitConfig, JwtConfig, ListingConfig, UploadConfig,
};
use realty_core::ImageStorage;
use realty_db::init_db_pool;

use crate::utils::imagekit::ImageKitStorage;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub email_config: EmailConfig,
    pub cors_config: CorsConfig,
    pub upload_config: UploadConfig,
    pub listing_config: ListingConfig,
    pub image_storage: Arc<dyn ImageStorage>,
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db = init_db_pool()
        .await
        .context("Failed to connect to database")?;

    let imagekit_config = ImageKitConfig::from_env();
    if !imagekit_config.is_configured() {
        tracing::warn!("IMAGEKIT_PRIVATE_KEY is not set; image uploads will fail");
    }
    let image_storage = ImageKitStorage::new(imagekit_config)
        .context("Failed to build ImageKit client")?;

    Ok(AppState {
        db,
        jwt_config: JwtConfig::from_env(),
        email_config: EmailConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        upload_config: UploadConfig::from_env(),
        listing_config: ListingConfig::from_env(),
        image_storage: Arc::new(image_storage),
    })
}
