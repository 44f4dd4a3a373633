use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use realty_core::AppError;
use realty_models::{Booking, BookingHistoryItem, CreateBookingRequest};

use crate::metrics::track_booking_created;

pub struct BookingService;

impl BookingService {
    #[instrument(skip(db, dto), fields(visit_date = %dto.visit_date))]
    pub async fn create_booking(
        db: &PgPool,
        user_id: Uuid,
        property_id: Uuid,
        dto: CreateBookingRequest,
    ) -> Result<Booking, AppError> {
        let message = dto
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (user_id, property_id, visit_date, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, property_id, visit_date, message, created_at
            "#,
        )
        .bind(user_id)
        .bind(property_id)
        .bind(dto.visit_date)
        .bind(message)
        .fetch_one(db)
        .await
        .context("Failed to insert booking")?;

        track_booking_created();
        Ok(booking)
    }

    /// The user's bookings, newest first, with the booked listing's title
    /// and location.
    #[instrument(skip(db))]
    pub async fn get_booking_history(
        db: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<BookingHistoryItem>, AppError> {
        let history = sqlx::query_as::<_, BookingHistoryItem>(
            r#"
            SELECT b.id, b.property_id,
                   p.basic_details->>'title' AS property_title,
                   p.location->>'city' AS city,
                   p.location->>'locality' AS locality,
                   b.visit_date, b.message, b.created_at
            FROM bookings b
            JOIN properties p ON p.id = b.property_id
            WHERE b.user_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch booking history")?;

        Ok(history)
    }
}
