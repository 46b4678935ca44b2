use crate::models::{DbBooking, DbBookingRow};
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_booking(
    pool: &Pool<Postgres>,
    client_id: Uuid,
    service_id: Uuid,
    professional_id: Uuid,
    booking_date: NaiveDate,
    start_time: NaiveTime,
    status: &str,
) -> Result<DbBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, professional_id={}, date={}, start_time={}",
        id, professional_id, booking_date, start_time
    );

    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (id, client_id, service_id, professional_id, booking_date, start_time, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, client_id, service_id, professional_id, booking_date, start_time, status, created_at
        "#,
    )
    .bind(id)
    .bind(client_id)
    .bind(service_id)
    .bind(professional_id)
    .bind(booking_date)
    .bind(start_time)
    .bind(status)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(booking)
}

pub async fn get_bookings_for_day(
    pool: &Pool<Postgres>,
    professional_id: Uuid,
    booking_date: NaiveDate,
) -> Result<Vec<DbBookingRow>> {
    tracing::debug!(
        "Getting bookings: professional_id={}, date={}",
        professional_id, booking_date
    );

    let rows = sqlx::query_as::<_, DbBookingRow>(
        r#"
        SELECT b.id, b.client_id, b.service_id, b.professional_id, b.booking_date,
               b.start_time::TEXT AS start_time, b.status,
               c.name AS client_name, s.name AS service_name, s.duration_minutes AS service_duration
        FROM bookings b
        LEFT JOIN clients c ON c.id = b.client_id
        LEFT JOIN services s ON s.id = b.service_id
        WHERE b.professional_id = $1 AND b.booking_date = $2
        ORDER BY b.created_at ASC
        "#,
    )
    .bind(professional_id)
    .bind(booking_date)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_all_bookings(pool: &Pool<Postgres>) -> Result<Vec<DbBookingRow>> {
    let rows = sqlx::query_as::<_, DbBookingRow>(
        r#"
        SELECT b.id, b.client_id, b.service_id, b.professional_id, b.booking_date,
               b.start_time::TEXT AS start_time, b.status,
               c.name AS client_name, s.name AS service_name, s.duration_minutes AS service_duration
        FROM bookings b
        LEFT JOIN clients c ON c.id = b.client_id
        LEFT JOIN services s ON s.id = b.service_id
        ORDER BY b.booking_date DESC, b.created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
