#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use roster::db::{MemberStore, MemoryStore, StoreError};
use roster::graphql::{build_schema, RosterSchema, Services};
use roster::models::member::{Member, MemberId};
use roster::models::permissions::PermissionTable;
use roster::models::status::MembershipStatus;

pub fn mock_member(name: &str, status: MembershipStatus) -> Member {
    Member {
        id: MemberId::new_v4(),
        membership_id: format!("UPND-{}", name.to_uppercase()),
        full_name: name.to_owned(),
        province: String::from("Lusaka"),
        district: String::from("Chongwe"),
        status,
        updated_at: None,
    }
}

pub fn store_with(members: &[Member]) -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_members(members.iter().cloned()))
}

pub fn schema_over(store: Arc<dyn MemberStore>) -> RosterSchema {
    build_schema(Services {
        store,
        permissions: Arc::new(PermissionTable::new()),
    })
}

/// A store whose every call fails as if the database were unreachable.
pub struct BrokenStore;

#[async_trait]
impl MemberStore for BrokenStore {
    async fn find(&self, _id: &MemberId) -> Result<Option<Member>, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn list(&self, _status: Option<MembershipStatus>) -> Result<Vec<Member>, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn list_pending(&self) -> Result<Vec<Member>, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn update_status(
        &self,
        _id: &MemberId,
        _status: MembershipStatus,
    ) -> Result<Option<Member>, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn update_status_many(
        &self,
        _ids: &[MemberId],
        _status: MembershipStatus,
    ) -> Result<u64, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}
