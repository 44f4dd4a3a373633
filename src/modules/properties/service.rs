use anyhow::{Context, anyhow};
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;
use uuid::Uuid;

use realty_core::AppError;
use realty_models::{ListingFilter, NewProperty, PriceField, Property, PropertyRow};

use crate::utils::listing_filter::ListingWhere;

const PROPERTY_COLUMNS: &str = "id, property_type, listing_type, basic_details, location, \
     description, images, whats_nearby, contact_info, listed_by, created_at, updated_at";

pub struct PropertyService;

impl PropertyService {
    #[instrument(skip(db, dto), fields(property_type = %dto.property_type))]
    pub async fn create_property(
        db: &PgPool,
        dto: NewProperty,
        listed_by: Option<Uuid>,
    ) -> Result<Property, AppError> {
        let sql = format!(
            "INSERT INTO properties
                (property_type, listing_type, basic_details, location, description,
                 images, whats_nearby, contact_info, listed_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {}",
            PROPERTY_COLUMNS
        );

        let row = sqlx::query_as::<_, PropertyRow>(&sql)
            .bind(dto.property_type.as_str())
            .bind(dto.listing_type.as_str())
            .bind(Json(&dto.basic_details))
            .bind(Json(&dto.location))
            .bind(&dto.description)
            .bind(Json(&dto.images))
            .bind(Json(&dto.whats_nearby))
            .bind(Json(&dto.contact_info))
            .bind(listed_by)
            .fetch_one(db)
            .await
            .context("Failed to insert property")?;

        Property::try_from(row)
    }

    /// Rental listings matching `filter`, newest first.
    #[instrument(skip(db))]
    pub async fn get_properties(
        db: &PgPool,
        filter: &ListingFilter,
    ) -> Result<Vec<Property>, AppError> {
        let clause = ListingWhere::build(filter, PriceField::MonthlyRent);
        let sql = format!(
            "SELECT {} FROM properties{} ORDER BY created_at DESC",
            PROPERTY_COLUMNS,
            clause.sql()
        );

        let rows = clause
            .bind(sqlx::query_as::<_, PropertyRow>(&sql))
            .fetch_all(db)
            .await
            .context("Failed to fetch properties")?;

        rows.into_iter().map(Property::try_from).collect()
    }

    #[instrument(skip(db))]
    pub async fn get_property(db: &PgPool, id: Uuid) -> Result<Property, AppError> {
        let sql = format!("SELECT {} FROM properties WHERE id = $1", PROPERTY_COLUMNS);

        let row = sqlx::query_as::<_, PropertyRow>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch property")?
            .ok_or_else(|| AppError::not_found(anyhow!("Property not found")))?;

        Property::try_from(row)
    }

    #[instrument(skip(db))]
    pub async fn property_exists(db: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM properties WHERE id = $1)")
                .bind(id)
                .fetch_one(db)
                .await?;

        Ok(exists)
    }

    #[instrument(skip(db))]
    pub async fn get_properties_by_owner(
        db: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<Property>, AppError> {
        let sql = format!(
            "SELECT {} FROM properties WHERE listed_by = $1 ORDER BY created_at DESC",
            PROPERTY_COLUMNS
        );

        let rows = sqlx::query_as::<_, PropertyRow>(&sql)
            .bind(user_id)
            .fetch_all(db)
            .await
            .context("Failed to fetch user properties")?;

        rows.into_iter().map(Property::try_from).collect()
    }
}
