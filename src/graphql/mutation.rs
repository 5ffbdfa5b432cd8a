use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::error::{bad_request, forbidden, ApprovalError};
use crate::graphql::guards::LoggedIn;
use crate::graphql::query::parse_member_id;
use crate::graphql::{Actor, Services};
use crate::models::approval::button_visibility;
use crate::models::member::{BulkUpdate, Member};
use crate::models::permissions::Permission;
use crate::models::status::MembershipStatus;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Approves a membership application at the signed-in user's tier
    #[graphql(guard = "LoggedIn")]
    pub async fn approve_member(&self, ctx: &Context<'_>, id: ID) -> Result<Member> {
        let services = Services::from_ctx(ctx);
        let actor = ctx.data_unchecked::<Actor>();
        let id = parse_member_id(&id)?;
        let store = services.store.as_ref();

        let member = Member::with_id(&id, store).await.map_err(|err| err.extend())?;
        if !button_visibility(actor.role, member.status).can_approve {
            return Err(forbidden("approve"));
        }

        Member::apply_approval(&id, actor.role, store)
            .await
            .map_err(|err| err.extend())
    }

    /// Rejects a membership application
    #[graphql(guard = "LoggedIn")]
    pub async fn reject_member(&self, ctx: &Context<'_>, id: ID) -> Result<Member> {
        let services = Services::from_ctx(ctx);
        let actor = ctx.data_unchecked::<Actor>();
        let id = parse_member_id(&id)?;
        let store = services.store.as_ref();

        let member = Member::with_id(&id, store).await.map_err(|err| err.extend())?;
        if !button_visibility(actor.role, member.status).can_reject {
            return Err(forbidden("reject"));
        }

        Member::apply_rejection(&id, actor.role, store)
            .await
            .map_err(|err| err.extend())
    }

    /// Sets a member's status directly
    #[graphql(guard = "LoggedIn")]
    pub async fn update_member_status(
        &self,
        ctx: &Context<'_>,
        id: ID,
        status: MembershipStatus,
    ) -> Result<Member> {
        let services = Services::from_ctx(ctx);
        let actor = ctx.data_unchecked::<Actor>();
        let id = parse_member_id(&id)?;
        let store = services.store.as_ref();

        let member = Member::with_id(&id, store).await.map_err(|err| err.extend())?;
        if !button_visibility(actor.role, member.status).can_update_status {
            return Err(forbidden("update the status of"));
        }

        Member::apply_status(&id, status, actor.role, store)
            .await
            .map_err(|err| err.extend())
    }

    /// Sets many members to the same status at once
    #[graphql(guard = "LoggedIn.and(Permission::APPROVE_ALL)")]
    pub async fn bulk_update_status(
        &self,
        ctx: &Context<'_>,
        ids: Vec<ID>,
        status: MembershipStatus,
    ) -> Result<BulkUpdate> {
        if ids.is_empty() {
            return Err(bad_request("At least one member ID is required"));
        }

        let services = Services::from_ctx(ctx);
        let ids = ids
            .iter()
            .map(parse_member_id)
            .collect::<Result<Vec<_>>>()?;

        Member::apply_bulk_status(&ids, status, services.store.as_ref())
            .await
            .map_err(|err| ApprovalError::Storage(err).extend())
    }
}
