use anyhow::Context as _;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::Config;
use crate::db::{MemberStore, StoreError};
use crate::models::member::{Member, MemberId};
use crate::models::status::MembershipStatus;

const MEMBER_COLUMNS: &str =
    "id, membership_id, full_name, province, district, status, updated_at";

/// Member records in the `members` table.
///
/// `status` is a TEXT column. Older rows were written with lower-case
/// statuses, so rows are parsed case-insensitively and filtered with
/// `lower(status)`; new writes always use the canonical spelling. A NULL
/// status is an application nobody has reviewed yet.
#[derive(Debug, Clone)]
pub struct PgMemberStore {
    pool: PgPool,
}

#[derive(FromRow)]
struct MemberRow {
    id: Uuid,
    membership_id: String,
    full_name: String,
    province: String,
    district: String,
    status: Option<String>,
    updated_at: Option<OffsetDateTime>,
}

impl TryFrom<MemberRow> for Member {
    type Error = StoreError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let id = MemberId(row.id);
        // the column defaults to the first tier of review
        let status = match row.status.as_deref() {
            Some(status) => status
                .parse()
                .map_err(|source| StoreError::Corrupt { member: id, source })?,
            None => MembershipStatus::PendingSectionReview,
        };

        Ok(Member {
            id,
            membership_id: row.membership_id,
            full_name: row.full_name,
            province: row.province,
            district: row.district,
            status,
            updated_at: row.updated_at,
        })
    }
}

impl PgMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("Failed to connect to the database")?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl MemberStore for PgMemberStore {
    async fn find(&self, id: &MemberId) -> Result<Option<Member>, StoreError> {
        let query = format!("SELECT {} FROM members WHERE id = $1", MEMBER_COLUMNS);
        let row = sqlx::query_as::<_, MemberRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Member::try_from).transpose()
    }

    async fn list(&self, status: Option<MembershipStatus>) -> Result<Vec<Member>, StoreError> {
        let rows = match status {
            Some(status) => {
                let query = format!(
                    "SELECT {} FROM members \
                     WHERE lower(status) = lower($1) OR ($2 AND status IS NULL) \
                     ORDER BY full_name",
                    MEMBER_COLUMNS
                );
                sqlx::query_as::<_, MemberRow>(&query)
                    .bind(status.as_str())
                    .bind(status == MembershipStatus::PendingSectionReview)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let query = format!("SELECT {} FROM members ORDER BY full_name", MEMBER_COLUMNS);
                sqlx::query_as::<_, MemberRow>(&query)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        rows.into_iter().map(Member::try_from).collect()
    }

    async fn list_pending(&self) -> Result<Vec<Member>, StoreError> {
        let query = format!(
            "SELECT {} FROM members \
             WHERE lower(status) LIKE 'pending%' OR status IS NULL \
             ORDER BY full_name",
            MEMBER_COLUMNS
        );
        let rows = sqlx::query_as::<_, MemberRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Member::try_from).collect()
    }

    async fn update_status(
        &self,
        id: &MemberId,
        status: MembershipStatus,
    ) -> Result<Option<Member>, StoreError> {
        let query = format!(
            "UPDATE members SET status = $1, updated_at = now() WHERE id = $2 RETURNING {}",
            MEMBER_COLUMNS
        );
        let row = sqlx::query_as::<_, MemberRow>(&query)
            .bind(status.as_str())
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Member::try_from).transpose()
    }

    async fn update_status_many(
        &self,
        ids: &[MemberId],
        status: MembershipStatus,
    ) -> Result<u64, StoreError> {
        let ids: Vec<Uuid> = ids.iter().map(|id| id.0).collect();
        let result =
            sqlx::query("UPDATE members SET status = $1, updated_at = now() WHERE id = ANY($2)")
                .bind(status.as_str())
                .bind(&ids)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }
}
