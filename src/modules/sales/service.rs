use std::collections::HashMap;

use anyhow::{Context, anyhow};
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;
use uuid::Uuid;

use realty_core::AppError;
use realty_models::{ListingFilter, NewSaleProperty, PriceField, SaleProperty, SalePropertyRow};

use crate::utils::listing_filter::ListingWhere;

const SALE_COLUMNS: &str = "id, property_type, listing_type, basic_details, location, \
     description, images, floor_plan, video, virtual_tour, whats_nearby, contact_info, \
     listed_by, created_at, updated_at";

pub struct SaleService;

impl SaleService {
    #[instrument(skip(db, dto), fields(property_type = %dto.property_type))]
    pub async fn create_sale_property(
        db: &PgPool,
        dto: NewSaleProperty,
        listed_by: Uuid,
    ) -> Result<SaleProperty, AppError> {
        let sql = format!(
            "INSERT INTO sale_properties
                (property_type, listing_type, basic_details, location, description, images,
                 floor_plan, video, virtual_tour, whats_nearby, contact_info, listed_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {}",
            SALE_COLUMNS
        );

        // An all-empty floor plan is stored as NULL.
        let floor_plan = dto.floor_plan.as_ref().filter(|plan| !plan.is_empty()).map(Json);

        let row = sqlx::query_as::<_, SalePropertyRow>(&sql)
            .bind(dto.property_type.as_str())
            .bind(dto.listing_type.as_str())
            .bind(Json(&dto.basic_details))
            .bind(Json(&dto.location))
            .bind(&dto.description)
            .bind(Json(&dto.images))
            .bind(floor_plan)
            .bind(&dto.video)
            .bind(&dto.virtual_tour)
            .bind(Json(&dto.whats_nearby))
            .bind(Json(&dto.contact_info))
            .bind(listed_by)
            .fetch_one(db)
            .await
            .context("Failed to insert sale property")?;

        SaleProperty::try_from(row)
    }

    /// Sale listings matching `filter`, newest first. Price bounds apply to
    /// `basicDetails.price`.
    #[instrument(skip(db))]
    pub async fn get_sale_properties(
        db: &PgPool,
        filter: &ListingFilter,
    ) -> Result<Vec<SaleProperty>, AppError> {
        let clause = ListingWhere::build(filter, PriceField::Price);
        let sql = format!(
            "SELECT {} FROM sale_properties{} ORDER BY created_at DESC",
            SALE_COLUMNS,
            clause.sql()
        );

        let rows = clause
            .bind(sqlx::query_as::<_, SalePropertyRow>(&sql))
            .fetch_all(db)
            .await
            .context("Failed to fetch sale properties")?;

        rows.into_iter().map(SaleProperty::try_from).collect()
    }

    #[instrument(skip(db))]
    pub async fn get_sale_property(db: &PgPool, id: Uuid) -> Result<SaleProperty, AppError> {
        let sql = format!("SELECT {} FROM sale_properties WHERE id = $1", SALE_COLUMNS);

        let row = sqlx::query_as::<_, SalePropertyRow>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch sale property")?
            .ok_or_else(|| AppError::not_found(anyhow!("Sale Property not found")))?;

        SaleProperty::try_from(row)
    }

    /// Listings for `ids` in the order given. Unknown ids are skipped and
    /// repeated ids are returned once.
    #[instrument(skip(db, ids), fields(count = ids.len()))]
    pub async fn get_sale_properties_by_ids(
        db: &PgPool,
        ids: &[Uuid],
    ) -> Result<Vec<SaleProperty>, AppError> {
        let sql = format!(
            "SELECT {} FROM sale_properties WHERE id = ANY($1)",
            SALE_COLUMNS
        );

        let rows = sqlx::query_as::<_, SalePropertyRow>(&sql)
            .bind(ids)
            .fetch_all(db)
            .await
            .context("Failed to fetch sale properties by id")?;

        let mut by_id: HashMap<Uuid, SalePropertyRow> =
            rows.into_iter().map(|row| (row.id, row)).collect();

        ids.iter()
            .filter_map(|id| by_id.remove(id))
            .map(SaleProperty::try_from)
            .collect()
    }

    #[instrument(skip(db))]
    pub async fn get_sale_properties_by_owner(
        db: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<SaleProperty>, AppError> {
        let sql = format!(
            "SELECT {} FROM sale_properties WHERE listed_by = $1 ORDER BY created_at DESC",
            SALE_COLUMNS
        );

        let rows = sqlx::query_as::<_, SalePropertyRow>(&sql)
            .bind(user_id)
            .fetch_all(db)
            .await
            .context("Failed to fetch user sale properties")?;

        rows.into_iter().map(SaleProperty::try_from).collect()
    }
}
