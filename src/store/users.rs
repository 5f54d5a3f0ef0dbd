use chrono::Utc;
use sqlx::SqlitePool;

use crate::appresult::{AppError, AppResult};
use crate::models::{User, UserUpdate};

#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, user: &User) -> AppResult<()> {
        let res = sqlx::query(
            "INSERT INTO users (id, email, password_hash, first_name, last_name, phone, user_type, profile_image, is_verified, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .bind(user.user_type)
        .bind(&user.profile_image)
        .bind(user.is_verified)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match res {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AppError::Conflict("User with this email already exists".to_owned()))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    // the email column is COLLATE NOCASE, so this compare is case-insensitive
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// Applies only the supplied fields; absent fields keep their value.
    pub async fn update_profile(&self, id: &str, u: &UserUpdate) -> AppResult<Option<User>> {
        sqlx::query(
            "UPDATE users SET \
                first_name = COALESCE(?, first_name), \
                last_name = COALESCE(?, last_name), \
                phone = COALESCE(?, phone), \
                profile_image = COALESCE(?, profile_image), \
                updated_at = ? \
             WHERE id = ?",
        )
        .bind(&u.first_name)
        .bind(&u.last_name)
        .bind(&u.phone)
        .bind(&u.profile_image)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await
    }
}
