use sqlx::PgPool;
use uuid::Uuid;

use crate::jobs::models::{JobPosting, NewJobPosting};

/// Inserts a validated posting and returns the stored row with its
/// generated identifier.
pub async fn insert(pool: &PgPool, posting: &NewJobPosting) -> Result<JobPosting, sqlx::Error> {
    sqlx::query_as::<_, JobPosting>(
        r#"
        INSERT INTO jobs
            (id, title, description, company, location, salary_range, posted_by, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&posting.title)
    .bind(&posting.description)
    .bind(&posting.company)
    .bind(&posting.location)
    .bind(&posting.salary_range)
    .bind(&posting.posted_by)
    .bind(posting.created_at)
    .fetch_one(pool)
    .await
}

/// Returns every stored posting, newest first. Postings without a
/// caller-supplied timestamp sort last — the ordering is pinned here,
/// not left to the database default.
pub async fn list_all(pool: &PgPool) -> Result<Vec<JobPosting>, sqlx::Error> {
    sqlx::query_as::<_, JobPosting>("SELECT * FROM jobs ORDER BY created_at DESC NULLS LAST")
        .fetch_all(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn posting(title: &str, created_at: Option<chrono::DateTime<Utc>>) -> NewJobPosting {
        NewJobPosting {
            title: title.to_string(),
            description: "desc".to_string(),
            company: "Acme".to_string(),
            location: Some("Remote".to_string()),
            salary_range: None,
            posted_by: None,
            created_at,
        }
    }

    /// Fixture pinning insert-then-list durability and the NULLS LAST
    /// ordering for postings without a timestamp.
    #[tokio::test]
    #[ignore = "requires a Postgres instance reachable via DATABASE_URL"]
    async fn test_insert_then_list_orders_desc_with_nulls_last() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for this test");
        let pool = crate::db::create_pool(&url).await.unwrap();
        crate::db::init_schema(&pool).await.unwrap();
        sqlx::query("TRUNCATE jobs").execute(&pool).await.unwrap();

        let now = Utc::now();
        let older = insert(&pool, &posting("older", Some(now - Duration::days(2))))
            .await
            .unwrap();
        let newest = insert(&pool, &posting("newest", Some(now))).await.unwrap();
        let undated = insert(&pool, &posting("undated", None)).await.unwrap();

        // The stored row equals the submitted document plus its generated id.
        assert_eq!(newest.title, "newest");
        assert_eq!(newest.company, "Acme");
        assert_eq!(newest.location.as_deref(), Some("Remote"));

        let all = list_all(&pool).await.unwrap();
        let titles: Vec<&str> = all.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["newest", "older", "undated"]);
        assert_eq!(all[0].id, newest.id);
        assert_eq!(all[1].id, older.id);
        assert_eq!(all[2].id, undated.id);
    }
}
