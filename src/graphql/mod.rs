use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, Schema};

use crate::db::MemberStore;
use crate::graphql::mutation::MutationRoot;
use crate::graphql::query::QueryRoot;
use crate::models::permissions::PermissionTable;
use crate::models::role::UserRole;

pub mod guards;
pub mod mutation;
pub mod query;

/// The header the authentication layer sets to the signed-in user's role.
pub const ROLE_HEADER: &str = "x-roster-role";

pub type RosterSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// The user making a request, as far as approvals care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub role: UserRole,
}

impl Actor {
    /// An actor from the raw role string on their account.
    pub fn from_raw_role(raw: Option<&str>) -> Self {
        Self {
            role: UserRole::normalize(raw),
        }
    }
}

/// Everything a resolver needs from the server, shared across requests.
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn MemberStore>,
    pub permissions: Arc<PermissionTable>,
}

impl Services {
    pub fn from_ctx<'c>(ctx: &Context<'c>) -> &'c Self {
        ctx.data_unchecked::<Services>()
    }
}

pub fn build_schema(services: Services) -> RosterSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(services)
        .finish()
}
