use sqlx::{types::Json, QueryBuilder, Sqlite, SqlitePool};

use crate::appresult::AppResult;
use crate::models::Property;

#[derive(Debug, Default)]
pub struct PropertyFilter {
    pub skip: i64,
    pub limit: i64,
    pub city: Option<String>,
    pub property_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

#[derive(Clone)]
pub struct PropertyStore {
    pool: SqlitePool,
}

impl PropertyStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, p: &Property) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO properties (id, host_id, title, description, property_type, price_per_night, location, amenities, images, max_guests, bedrooms, bathrooms, is_active, rating, review_count, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&p.id)
        .bind(&p.host_id)
        .bind(&p.title)
        .bind(&p.description)
        .bind(p.property_type)
        .bind(p.price_per_night)
        .bind(Json(&p.location))
        .bind(Json(&p.amenities))
        .bind(Json(&p.images))
        .bind(p.max_guests)
        .bind(p.bedrooms)
        .bind(p.bathrooms)
        .bind(p.is_active)
        .bind(p.rating)
        .bind(p.review_count)
        .bind(p.created_at)
        .bind(p.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Property>> {
        Ok(sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// Active listings matching the filter, plus the total match count
    /// (before skip/limit) for the pagination envelope.
    pub async fn search(&self, f: &PropertyFilter) -> AppResult<(Vec<Property>, i64)> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM properties");
        push_filters(&mut count, f);
        let (total,): (i64,) = count.build_query_as().fetch_one(&self.pool).await?;

        let mut query = QueryBuilder::new("SELECT * FROM properties");
        push_filters(&mut query, f);
        query.push(" ORDER BY created_at DESC LIMIT ");
        query.push_bind(f.limit);
        query.push(" OFFSET ");
        query.push_bind(f.skip);
        let properties = query
            .build_query_as::<Property>()
            .fetch_all(&self.pool)
            .await?;

        Ok((properties, total))
    }

    pub async fn list_for_host(&self, host_id: &str) -> AppResult<Vec<Property>> {
        Ok(sqlx::query_as::<_, Property>(
            "SELECT * FROM properties WHERE host_id = ? ORDER BY created_at DESC",
        )
        .bind(host_id)
        .fetch_all(&self.pool)
        .await?)
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, f: &PropertyFilter) {
    qb.push(" WHERE is_active = 1");
    if let Some(city) = &f.city {
        qb.push(" AND json_extract(location, '$.city') LIKE ");
        qb.push_bind(format!("%{city}%"));
    }
    if let Some(property_type) = &f.property_type {
        qb.push(" AND property_type = ");
        qb.push_bind(property_type.clone());
    }
    if let Some(min_price) = f.min_price {
        qb.push(" AND price_per_night >= ");
        qb.push_bind(min_price);
    }
    if let Some(max_price) = f.max_price {
        qb.push(" AND price_per_night <= ");
        qb.push_bind(max_price);
    }
}
