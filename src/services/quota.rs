use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dal::user_db::{self, UserQuotaRow};

/// Snapshot of a user's per-plan request allowance.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaStatus {
    pub has_quota: bool,
    pub request_count: i32,
    pub request_limit: i32,
    pub plan_type: String,
    pub remaining: i32,
}

/// Monthly request allowance per plan; unknown plans get the free allowance.
pub fn request_limit_for_plan(plan_type: &str) -> i32 {
    match plan_type {
        "pro" => 100,
        _ => 5,
    }
}

pub async fn check_quota(user_id: Uuid, pool: &PgPool) -> Result<Option<QuotaStatus>, sqlx::Error> {
    let row = user_db::get_user_quota(user_id, pool).await?;
    Ok(row.map(status_from))
}

pub async fn consume_request(user_id: Uuid, pool: &PgPool) -> Result<(), sqlx::Error> {
    user_db::increment_request_count(user_id, pool).await
}

fn status_from(row: UserQuotaRow) -> QuotaStatus {
    QuotaStatus {
        has_quota: row.request_count < row.request_limit,
        request_count: row.request_count,
        request_limit: row.request_limit,
        remaining: (row.request_limit - row.request_count).max(0),
        plan_type: row.plan_type,
    }
}

#[cfg(test)]
mod tests {
    use super::{request_limit_for_plan, status_from};
    use crate::dal::user_db::UserQuotaRow;

    fn row(request_count: i32, request_limit: i32) -> UserQuotaRow {
        UserQuotaRow {
            plan_type: "free".to_string(),
            request_count,
            request_limit,
        }
    }

    #[test]
    fn unknown_plans_get_the_free_allowance() {
        assert_eq!(request_limit_for_plan("free"), 5);
        assert_eq!(request_limit_for_plan("pro"), 100);
        assert_eq!(request_limit_for_plan("platinum"), 5);
    }

    #[test]
    fn quota_is_available_below_the_limit() {
        let status = status_from(row(2, 5));
        assert!(status.has_quota);
        assert_eq!(status.remaining, 3);
    }

    #[test]
    fn quota_is_exhausted_at_the_limit() {
        let status = status_from(row(5, 5));
        assert!(!status.has_quota);
        assert_eq!(status.remaining, 0);
    }

    #[test]
    fn remaining_never_goes_negative() {
        let status = status_from(row(9, 5));
        assert!(!status.has_quota);
        assert_eq!(status.remaining, 0);
    }
}
