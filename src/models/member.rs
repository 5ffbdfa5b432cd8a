use std::str::FromStr;

use async_graphql::{ComplexObject, Context, Result, SimpleObject, ID};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::db::{MemberStore, StoreError};
use crate::error::{ApprovalError, ApprovalResult};
use crate::graphql::Actor;
use crate::models::approval::{button_visibility, can_advance, next_status, ButtonVisibility};
use crate::models::role::UserRole;
use crate::models::status::MembershipStatus;

/// The primary key of a member record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(pub Uuid);

impl MemberId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for MemberId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A membership application, as far as the approval workflow is concerned.
///
/// The record itself is owned by the members table; the workflow only ever
/// proposes a new `status` for it.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(complex)]
pub struct Member {
    /// The public membership number
    pub membership_id: String,
    /// The member's full name
    pub full_name: String,
    /// The province the member registered in
    pub province: String,
    /// The district the member registered in
    pub district: String,
    /// Where the application stands
    pub status: MembershipStatus,

    #[graphql(skip)]
    pub id: MemberId,
    #[graphql(skip)]
    pub updated_at: Option<OffsetDateTime>,
}

#[ComplexObject]
impl Member {
    /// The member's record ID
    pub async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    /// When the record was last changed
    pub async fn updated_at(&self) -> Result<Option<String>> {
        self.updated_at
            .map(|time| time.format(&Rfc3339))
            .transpose()
            .map_err(Into::into)
    }

    /// The stage of review the application is at
    pub async fn approval_level(&self) -> &'static str {
        self.status.approval_level()
    }

    /// The review actions the current user may take on this application
    pub async fn visibility(&self, ctx: &Context<'_>) -> ButtonVisibility {
        ctx.data_opt::<Actor>()
            .map(|actor| button_visibility(actor.role, self.status))
            .unwrap_or(ButtonVisibility::NONE)
    }
}

/// The outcome of a bulk status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SimpleObject)]
pub struct BulkUpdate {
    /// How many of the requested members existed and were updated
    pub updated_count: u64,
}

impl Member {
    pub async fn with_id(id: &MemberId, store: &dyn MemberStore) -> ApprovalResult<Member> {
        Self::with_id_opt(id, store)
            .await?
            .ok_or(ApprovalError::NotFound(*id))
    }

    pub async fn with_id_opt(
        id: &MemberId,
        store: &dyn MemberStore,
    ) -> ApprovalResult<Option<Member>> {
        store.find(id).await.map_err(ApprovalError::Storage)
    }

    /// The applications currently waiting on the given role.
    ///
    /// Admins see every pending application; members see none.
    pub async fn review_queue(
        role: UserRole,
        store: &dyn MemberStore,
    ) -> ApprovalResult<Vec<Member>> {
        let members = match (role, role.review_status()) {
            (UserRole::Admin, _) => store.list_pending().await,
            (_, Some(status)) => store.list(Some(status)).await,
            (_, None) => Ok(vec![]),
        };

        members.map_err(|err| {
            tracing::error!(%role, error = %err, "failed to load review queue");
            ApprovalError::Storage(err)
        })
    }

    /// Approve the application on behalf of `role`.
    ///
    /// Moves the member to [next_status] with a single status write. The
    /// caller is responsible for checking [button_visibility] first; this
    /// does not re-check that the role matches the current tier.
    pub async fn apply_approval(
        id: &MemberId,
        role: UserRole,
        store: &dyn MemberStore,
    ) -> ApprovalResult<Member> {
        let member = Self::with_id(id, store)
            .await
            .map_err(|err| log_failure(id, err))?;
        if !can_advance(role) {
            tracing::debug!(member = %id, %role, "role cannot advance applications");
            return Ok(member);
        }

        let next = next_status(role, member.status);
        let updated = Self::write_status(id, next, store).await?;
        tracing::info!(
            member = %id,
            %role,
            from = %member.status,
            to = %updated.status,
            "approved membership application"
        );

        Ok(updated)
    }

    /// Reject the application outright on behalf of `role`.
    pub async fn apply_rejection(
        id: &MemberId,
        role: UserRole,
        store: &dyn MemberStore,
    ) -> ApprovalResult<Member> {
        Self::overwrite_status(id, MembershipStatus::Rejected, role, store).await
    }

    /// Set a member's status directly, bypassing the approval chain.
    pub async fn apply_status(
        id: &MemberId,
        status: MembershipStatus,
        role: UserRole,
        store: &dyn MemberStore,
    ) -> ApprovalResult<Member> {
        Self::overwrite_status(id, status, role, store).await
    }

    /// Set every listed member to the same status in one statement.
    ///
    /// IDs that don't exist are skipped and simply not counted, so the only
    /// failure is the storage error itself.
    pub async fn apply_bulk_status(
        ids: &[MemberId],
        status: MembershipStatus,
        store: &dyn MemberStore,
    ) -> std::result::Result<BulkUpdate, StoreError> {
        let updated_count = store
            .update_status_many(ids, status)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, requested = ids.len(), "bulk status update failed");
                err
            })?;
        tracing::info!(
            requested = ids.len(),
            updated = updated_count,
            to = %status,
            "bulk updated membership status"
        );

        Ok(BulkUpdate { updated_count })
    }

    async fn overwrite_status(
        id: &MemberId,
        status: MembershipStatus,
        role: UserRole,
        store: &dyn MemberStore,
    ) -> ApprovalResult<Member> {
        let member = Self::with_id(id, store)
            .await
            .map_err(|err| log_failure(id, err))?;
        let updated = Self::write_status(id, status, store).await?;
        tracing::info!(
            member = %id,
            %role,
            from = %member.status,
            to = %updated.status,
            "set membership status"
        );

        Ok(updated)
    }

    async fn write_status(
        id: &MemberId,
        status: MembershipStatus,
        store: &dyn MemberStore,
    ) -> ApprovalResult<Member> {
        let updated = match store.update_status(id, status).await {
            Ok(Some(member)) => Ok(member),
            Ok(None) => Err(ApprovalError::NotFound(*id)),
            Err(err) => Err(ApprovalError::Storage(err)),
        };

        updated.map_err(|err| log_failure(id, err))
    }
}

fn log_failure(id: &MemberId, err: ApprovalError) -> ApprovalError {
    match &err {
        ApprovalError::NotFound(_) => tracing::warn!(member = %id, "member not found"),
        ApprovalError::Storage(source) => {
            tracing::error!(member = %id, error = %source, "failed to update member status")
        }
    }

    err
}
