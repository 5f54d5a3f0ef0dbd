use chrono::Utc;
use sqlx::SqlitePool;

use crate::appresult::AppResult;
use crate::models::{Booking, BookingStatus};

#[derive(Clone)]
pub struct BookingStore {
    pool: SqlitePool,
}

impl BookingStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts the booking only if no pending or confirmed booking on the
    /// same property overlaps its [check_in, check_out) interval. Check and
    /// insert are one statement, so concurrent overlapping requests cannot
    /// both get in. Returns whether the row was inserted.
    pub async fn create_if_available(&self, b: &Booking) -> AppResult<bool> {
        let res = sqlx::query(
            "INSERT INTO bookings (id, property_id, guest_id, check_in, check_out, guests, total_price, status, created_at, updated_at) \
             SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ? \
             WHERE NOT EXISTS (\
                SELECT 1 FROM bookings \
                WHERE property_id = ? \
                  AND status IN ('pending', 'confirmed') \
                  AND check_out > ? AND check_in < ?\
             )",
        )
        .bind(&b.id)
        .bind(&b.property_id)
        .bind(&b.guest_id)
        .bind(b.check_in)
        .bind(b.check_out)
        .bind(b.guests)
        .bind(b.total_price)
        .bind(b.status)
        .bind(b.created_at)
        .bind(b.updated_at)
        .bind(&b.property_id)
        .bind(b.check_in)
        .bind(b.check_out)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Booking>> {
        Ok(sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn active_for_property(&self, property_id: &str) -> AppResult<Vec<Booking>> {
        Ok(sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE property_id = ? AND status IN ('pending', 'confirmed')",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?)
    }

    pub async fn list_for_guest(&self, guest_id: &str) -> AppResult<Vec<Booking>> {
        Ok(sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE guest_id = ? ORDER BY created_at DESC",
        )
        .bind(guest_id)
        .fetch_all(&self.pool)
        .await?)
    }

    pub async fn list_for_host(&self, host_id: &str) -> AppResult<Vec<Booking>> {
        Ok(sqlx::query_as::<_, Booking>(
            "SELECT b.* FROM bookings b \
             JOIN properties p ON b.property_id = p.id \
             WHERE p.host_id = ? \
             ORDER BY b.created_at DESC",
        )
        .bind(host_id)
        .fetch_all(&self.pool)
        .await?)
    }

    pub async fn set_status(&self, id: &str, status: BookingStatus) -> AppResult<()> {
        sqlx::query("UPDATE bookings SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
