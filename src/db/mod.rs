//! Access to member records.
//!
//! The approval workflow needs a few things from storage: look members up,
//! overwrite one member's status, and overwrite the status of a set of
//! members. [MemberStore] is that contract; [PgMemberStore] backs it
//! with Postgres and [MemoryStore] with a map for tests.

use async_trait::async_trait;

use crate::models::member::{Member, MemberId};
use crate::models::status::{MembershipStatus, ParseStatusError};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgMemberStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error")]
    Database(#[from] sqlx::Error),
    #[error("member {member} has an unreadable status")]
    Corrupt {
        member: MemberId,
        #[source]
        source: ParseStatusError,
    },
}

#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn find(&self, id: &MemberId) -> Result<Option<Member>, StoreError>;

    /// All members, or only those with the given status.
    async fn list(&self, status: Option<MembershipStatus>) -> Result<Vec<Member>, StoreError>;

    /// Every member still awaiting review at some tier.
    async fn list_pending(&self) -> Result<Vec<Member>, StoreError>;

    /// Overwrite one member's status and bump its update time.
    ///
    /// Returns `None` if no member has the ID. The write is unconditional:
    /// concurrent writers race and the last one wins.
    async fn update_status(
        &self,
        id: &MemberId,
        status: MembershipStatus,
    ) -> Result<Option<Member>, StoreError>;

    /// Overwrite the status of every listed member in one operation,
    /// returning how many existed.
    async fn update_status_many(
        &self,
        ids: &[MemberId],
        status: MembershipStatus,
    ) -> Result<u64, StoreError>;
}
