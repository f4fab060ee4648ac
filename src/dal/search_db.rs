use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{prospect::Prospect, search::SearchRequest};

/// Writes the search row and all of its prospect rows in one transaction so
/// a search never becomes visible without its results, or vice versa.
pub async fn insert_search_with_results(
    user_id: Uuid,
    request: &SearchRequest,
    prospects: &[Prospect],
    pool: &PgPool,
) -> Result<Uuid, sqlx::Error> {
    let search_id = Uuid::new_v4();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        insert into searches
            (id, user_id, profile_type, city, department, sector)
        values
            ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(search_id)
    .bind(user_id)
    .bind(request.profile_type.as_str())
    .bind(request.city.as_deref())
    .bind(request.department.as_deref())
    .bind(request.sector.as_deref())
    .execute(&mut *tx)
    .await?;

    for prospect in prospects {
        sqlx::query(
            r#"
            insert into search_results
                (id, search_id, company_name, city, sector, phone, email,
                 website_url, opportunity_type, social_media)
            values
                ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(search_id)
        .bind(&prospect.company_name)
        .bind(&prospect.city)
        .bind(&prospect.sector)
        .bind(prospect.phone.as_deref())
        .bind(prospect.email.as_deref())
        .bind(prospect.website_url.as_deref())
        .bind(&prospect.opportunity_type)
        .bind(serde_json::to_string(&prospect.social_media).ok())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(search_id)
}

#[derive(Debug, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSummary {
    pub id: Uuid,
    pub profile_type: String,
    pub city: Option<String>,
    pub department: Option<String>,
    pub sector: Option<String>,
    pub created_at: DateTime<Utc>,
    pub result_count: i64,
}

pub async fn get_search_history(
    user_id: Uuid,
    pool: &PgPool,
) -> Result<Vec<SearchSummary>, sqlx::Error> {
    sqlx::query_as::<_, SearchSummary>(
        r#"
        select
            s.id,
            s.profile_type,
            s.city,
            s.department,
            s.sector,
            s.created_at,
            count(r.id) as result_count
        from
            searches s
            left join search_results r on r.search_id = s.id
        where
            s.user_id = $1
        group by
            s.id
        order by
            s.created_at desc
        limit 50
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct ProspectRow {
    pub company_name: String,
    pub city: Option<String>,
    pub sector: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website_url: Option<String>,
    pub opportunity_type: String,
    pub social_media: Option<String>,
}

/// Results of a previous search, scoped to its owner.
pub async fn get_search_results(
    search_id: Uuid,
    user_id: Uuid,
    pool: &PgPool,
) -> Result<Vec<ProspectRow>, sqlx::Error> {
    sqlx::query_as::<_, ProspectRow>(
        r#"
        select
            r.company_name,
            r.city,
            r.sector,
            r.phone,
            r.email,
            r.website_url,
            r.opportunity_type,
            r.social_media
        from
            search_results r
            join searches s on s.id = r.search_id
        where
            s.id = $1 and
            s.user_id = $2
        "#,
    )
    .bind(search_id)
    .bind(user_id)
    .fetch_all(pool)
    .await
}
