use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use realty_config::EmailConfig;
use realty_core::AppError;
use realty_models::ContactRequest;

use crate::modules::properties::service::PropertyService;
use crate::utils::email::EmailService;

pub struct ContactService;

impl ContactService {
    /// Forwards the message to the team inbox, then acknowledges it to the
    /// sender. Only the team notification has to go through.
    #[instrument(skip(db, dto, email_config), fields(property_id = ?dto.property_id))]
    pub async fn send_message(
        db: &PgPool,
        dto: ContactRequest,
        email_config: &EmailConfig,
    ) -> Result<(), AppError> {
        if let Some(property_id) = dto.property_id
            && !PropertyService::property_exists(db, property_id).await?
        {
            return Err(AppError::not_found(anyhow!("Property not found")));
        }

        let email_service = EmailService::new(email_config.clone());
        email_service.send_contact_notification(&dto).await?;
        info!("Contact message forwarded");

        if let Err(e) = email_service.send_contact_acknowledgement(&dto).await {
            warn!(error = %e.error, "Failed to send contact acknowledgement");
        }

        Ok(())
    }
}
