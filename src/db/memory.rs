use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::db::{MemberStore, StoreError};
use crate::models::member::{Member, MemberId};
use crate::models::status::MembershipStatus;
use crate::util::now;

/// An in-process member store.
///
/// Every operation runs under a single lock, so a bulk update is applied to
/// all matching members or none.
#[derive(Debug, Default)]
pub struct MemoryStore {
    members: Mutex<HashMap<MemberId, Member>>,
}

impl MemoryStore {
    pub fn with_members(members: impl IntoIterator<Item = Member>) -> Self {
        let members = members
            .into_iter()
            .map(|member| (member.id, member))
            .collect();

        Self {
            members: Mutex::new(members),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<MemberId, Member>> {
        // a panic while holding the lock can't leave a half-written member
        self.members
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl MemberStore for MemoryStore {
    async fn find(&self, id: &MemberId) -> Result<Option<Member>, StoreError> {
        Ok(self.lock().get(id).cloned())
    }

    async fn list(&self, status: Option<MembershipStatus>) -> Result<Vec<Member>, StoreError> {
        let mut members: Vec<Member> = self
            .lock()
            .values()
            .filter(|member| status.map_or(true, |status| member.status == status))
            .cloned()
            .collect();
        members.sort_by(|a, b| a.full_name.cmp(&b.full_name));

        Ok(members)
    }

    async fn list_pending(&self) -> Result<Vec<Member>, StoreError> {
        let mut members: Vec<Member> = self
            .lock()
            .values()
            .filter(|member| member.status.is_pending())
            .cloned()
            .collect();
        members.sort_by(|a, b| a.full_name.cmp(&b.full_name));

        Ok(members)
    }

    async fn update_status(
        &self,
        id: &MemberId,
        status: MembershipStatus,
    ) -> Result<Option<Member>, StoreError> {
        Ok(self.lock().get_mut(id).map(|member| {
            member.status = status;
            member.updated_at = Some(now());
            member.clone()
        }))
    }

    async fn update_status_many(
        &self,
        ids: &[MemberId],
        status: MembershipStatus,
    ) -> Result<u64, StoreError> {
        let mut members = self.lock();
        let updated_at = now();
        let mut updated = 0;

        // duplicate IDs name the same row, which is only counted once
        let ids: HashSet<&MemberId> = ids.iter().collect();
        for id in ids {
            if let Some(member) = members.get_mut(id) {
                member.status = status;
                member.updated_at = Some(updated_at);
                updated += 1;
            }
        }

        Ok(updated)
    }
}
