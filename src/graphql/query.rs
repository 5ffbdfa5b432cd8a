use async_graphql::{Context, ErrorExtensions, Object, Result, SimpleObject, ID};

use crate::error::bad_request;
use crate::graphql::guards::LoggedIn;
use crate::graphql::{Actor, Services};
use crate::models::approval::{button_visibility, ButtonVisibility};
use crate::models::member::{Member, MemberId};
use crate::models::role::{OrganizationalLevel, UserRole};
use crate::models::status::MembershipStatus;

pub struct QueryRoot;

/// A canonical role and what it may do
#[derive(SimpleObject)]
pub struct RoleInfo {
    /// The role
    pub role: UserRole,
    /// The role's canonical name
    pub name: &'static str,
    /// The tier the role belongs to
    pub level: OrganizationalLevel,
    /// The names of the permissions the role holds
    pub permissions: Vec<&'static str>,
    /// The pending status this role reviews, if any
    pub reviews: Option<MembershipStatus>,
}

/// A membership status and how the dashboards label it
#[derive(SimpleObject)]
pub struct StatusInfo {
    /// The status
    pub status: MembershipStatus,
    /// The display name of the status
    pub name: &'static str,
    /// The stage of review the status represents
    pub approval_level: &'static str,
    /// Whether the application is still awaiting review
    pub pending: bool,
}

impl RoleInfo {
    fn for_role(role: UserRole, services: &Services) -> Self {
        Self {
            role,
            name: role.as_str(),
            level: role.level(),
            permissions: services.permissions.sorted_names(role),
            reviews: role.review_status(),
        }
    }
}

pub(crate) fn parse_member_id(id: &ID) -> Result<MemberId> {
    id.parse::<MemberId>()
        .map_err(|_| bad_request(format!("Invalid member ID {}", id.as_str())))
}

#[Object]
impl QueryRoot {
    /// The signed-in user's role and permissions
    pub async fn viewer(&self, ctx: &Context<'_>) -> Option<RoleInfo> {
        let services = Services::from_ctx(ctx);
        ctx.data_opt::<Actor>()
            .map(|actor| RoleInfo::for_role(actor.role, services))
    }

    #[graphql(guard = "LoggedIn")]
    pub async fn member(&self, ctx: &Context<'_>, id: ID) -> Result<Member> {
        let services = Services::from_ctx(ctx);
        let id = parse_member_id(&id)?;

        Member::with_id(&id, services.store.as_ref())
            .await
            .map_err(|err| err.extend())
    }

    /// The review actions the signed-in user may take on a member
    #[graphql(guard = "LoggedIn")]
    pub async fn visibility(&self, ctx: &Context<'_>, member_id: ID) -> Result<ButtonVisibility> {
        let services = Services::from_ctx(ctx);
        let actor = ctx.data_unchecked::<Actor>();
        let id = parse_member_id(&member_id)?;

        let member = Member::with_id(&id, services.store.as_ref())
            .await
            .map_err(|err| err.extend())?;

        Ok(button_visibility(actor.role, member.status))
    }

    /// The applications waiting on the signed-in user's tier
    #[graphql(guard = "LoggedIn")]
    pub async fn review_queue(&self, ctx: &Context<'_>) -> Result<Vec<Member>> {
        let services = Services::from_ctx(ctx);
        let actor = ctx.data_unchecked::<Actor>();

        Member::review_queue(actor.role, services.store.as_ref())
            .await
            .map_err(|err| err.extend())
    }

    /// The permissions of a role, given in any common spelling
    #[graphql(guard = "LoggedIn")]
    pub async fn permissions(&self, ctx: &Context<'_>, role: String) -> RoleInfo {
        let services = Services::from_ctx(ctx);
        RoleInfo::for_role(UserRole::normalize(Some(&role)), services)
    }

    pub async fn roles(&self, ctx: &Context<'_>) -> Vec<RoleInfo> {
        let services = Services::from_ctx(ctx);
        UserRole::ALL
            .into_iter()
            .map(|role| RoleInfo::for_role(role, services))
            .collect()
    }

    pub async fn statuses(&self) -> Vec<StatusInfo> {
        MembershipStatus::ALL
            .into_iter()
            .map(|status| StatusInfo {
                status,
                name: status.as_str(),
                approval_level: status.approval_level(),
                pending: status.is_pending(),
            })
            .collect()
    }
}
