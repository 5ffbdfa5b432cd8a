use async_graphql::{Context, ErrorExtensions, FieldError, Guard, Result};

use crate::graphql::{Actor, Services};
use crate::models::permissions::Permission;

pub struct LoggedIn;

#[async_trait::async_trait]
impl Guard for LoggedIn {
    async fn check(&self, ctx: &Context<'_>) -> Result<()> {
        if ctx.data_opt::<Actor>().is_some() {
            Ok(())
        } else {
            Err(FieldError::new("User must be logged in")
                .extend_with(|_err, ext| ext.set("code", "UNAUTHORIZED")))
        }
    }
}

impl Permission {
    pub fn granted_to(&self, actor: &Actor, ctx: &Context<'_>) -> bool {
        Services::from_ctx(ctx)
            .permissions
            .grants(actor.role, *self)
    }
}

#[async_trait::async_trait]
impl Guard for Permission {
    async fn check(&self, ctx: &Context<'_>) -> Result<()> {
        if let Some(actor) = ctx.data_opt::<Actor>() {
            if self.granted_to(actor, ctx) {
                return Ok(());
            }
        }

        Err(FieldError::new(format!("Permission {} required", self))
            .extend_with(|_err, ext| ext.set("code", "FORBIDDEN")))
    }
}
