use sqlx::PgPool;
use uuid::Uuid;

pub async fn insert_user(
    email: &str,
    plan_type: &str,
    request_limit: i32,
    pool: &PgPool,
) -> Result<Uuid, sqlx::Error> {
    let user_id = Uuid::new_v4();
    sqlx::query(
        r#"
        insert into users
            (id, email, plan_type, request_count, request_limit)
        values
            ($1, $2, $3, 0, $4)
        "#,
    )
    .bind(user_id)
    .bind(email)
    .bind(plan_type)
    .bind(request_limit)
    .execute(pool)
    .await?;

    Ok(user_id)
}

#[derive(Debug, sqlx::FromRow)]
pub struct UserQuotaRow {
    pub plan_type: String,
    pub request_count: i32,
    pub request_limit: i32,
}

pub async fn get_user_quota(
    user_id: Uuid,
    pool: &PgPool,
) -> Result<Option<UserQuotaRow>, sqlx::Error> {
    sqlx::query_as::<_, UserQuotaRow>(
        r#"
        select
            plan_type,
            request_count,
            request_limit
        from
            users
        where
            id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn increment_request_count(user_id: Uuid, pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        update users set request_count = request_count + 1 where id = $1
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}
