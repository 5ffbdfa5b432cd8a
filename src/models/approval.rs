//! The hierarchical approval workflow.
//!
//! Two independent pure functions drive it: [button_visibility] decides
//! whether an actor may act on an application right now, and [next_status]
//! computes where the application goes if they approve it. `next_status`
//! trusts its caller: it does not re-check eligibility, so anything that
//! persists its result must consult `button_visibility` first.

use async_graphql::SimpleObject;
use serde::Serialize;

use crate::models::role::UserRole;
use crate::models::status::MembershipStatus;

/// Which review actions an actor may take on an application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, SimpleObject, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonVisibility {
    /// Whether the application can be approved
    pub can_approve: bool,
    /// Whether the application can be rejected
    pub can_reject: bool,
    /// Whether the status can be set directly
    pub can_update_status: bool,
}

impl ButtonVisibility {
    pub const NONE: Self = Self {
        can_approve: false,
        can_reject: false,
        can_update_status: false,
    };

    pub const ALL: Self = Self {
        can_approve: true,
        can_reject: true,
        can_update_status: true,
    };

    pub const UPDATE_ONLY: Self = Self {
        can_approve: false,
        can_reject: false,
        can_update_status: true,
    };
}

/// Decide which actions `role` may take on an application at `status`.
///
/// Members never act. Admins act on everything, but an approved record can
/// only have its status overridden. Tier admins act only on applications
/// awaiting exactly their tier.
pub fn button_visibility(role: UserRole, status: MembershipStatus) -> ButtonVisibility {
    match role {
        UserRole::Member => ButtonVisibility::NONE,
        UserRole::Admin if status == MembershipStatus::Approved => ButtonVisibility::UPDATE_ONLY,
        UserRole::Admin => ButtonVisibility::ALL,
        tier if tier.review_status() == Some(status) => ButtonVisibility::ALL,
        _ => ButtonVisibility::NONE,
    }
}

/// The status an application moves to when `role` approves it.
///
/// Admin approval is final. Each tier admin moves the application one tier
/// up regardless of `current`; a member leaves it where it is.
pub fn next_status(role: UserRole, current: MembershipStatus) -> MembershipStatus {
    match role {
        UserRole::Admin => MembershipStatus::Approved,
        UserRole::SectionAdmin => MembershipStatus::PendingBranchReview,
        UserRole::BranchAdmin => MembershipStatus::PendingWardReview,
        UserRole::WardAdmin => MembershipStatus::PendingDistrictReview,
        UserRole::DistrictAdmin => MembershipStatus::PendingProvincialReview,
        UserRole::ProvinceAdmin => MembershipStatus::Approved,
        UserRole::Member => current,
    }
}

/// Whether approving as `role` can ever change an application's status.
pub fn can_advance(role: UserRole) -> bool {
    role != UserRole::Member
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIERS: [(UserRole, MembershipStatus); 5] = [
        (UserRole::SectionAdmin, MembershipStatus::PendingSectionReview),
        (UserRole::BranchAdmin, MembershipStatus::PendingBranchReview),
        (UserRole::WardAdmin, MembershipStatus::PendingWardReview),
        (UserRole::DistrictAdmin, MembershipStatus::PendingDistrictReview),
        (UserRole::ProvinceAdmin, MembershipStatus::PendingProvincialReview),
    ];

    #[test]
    fn members_see_nothing() {
        for status in MembershipStatus::ALL {
            assert_eq!(
                button_visibility(UserRole::Member, status),
                ButtonVisibility::NONE
            );
        }
        assert_eq!(
            button_visibility(UserRole::normalize(Some("janitor")), MembershipStatus::Approved),
            ButtonVisibility::NONE
        );
    }

    #[test]
    fn admins_see_everything_until_approved() {
        for status in MembershipStatus::ALL {
            let expected = if status == MembershipStatus::Approved {
                ButtonVisibility::UPDATE_ONLY
            } else {
                ButtonVisibility::ALL
            };
            assert_eq!(button_visibility(UserRole::Admin, status), expected, "{}", status);
        }
    }

    #[test]
    fn tier_admins_only_see_their_own_tier() {
        for (role, own_status) in TIERS {
            for status in MembershipStatus::ALL {
                let expected = if status == own_status {
                    ButtonVisibility::ALL
                } else {
                    ButtonVisibility::NONE
                };
                assert_eq!(button_visibility(role, status), expected, "{} at {}", role, status);
            }
        }
    }

    #[test]
    fn visibility_is_a_function_of_its_inputs() {
        for role in UserRole::ALL {
            for status in MembershipStatus::ALL {
                assert_eq!(button_visibility(role, status), button_visibility(role, status));
            }
        }
    }

    #[test]
    fn chain_reaches_approval_in_five_steps() {
        let mut status = MembershipStatus::PendingSectionReview;
        let mut steps = 0;

        while status != MembershipStatus::Approved {
            let (role, _) = TIERS
                .into_iter()
                .find(|(_, tier_status)| *tier_status == status)
                .expect("every pending status has a reviewing tier");
            status = next_status(role, status);
            steps += 1;
        }

        assert_eq!(steps, 5);
    }

    #[test]
    fn admin_approval_is_final_from_anywhere() {
        for status in MembershipStatus::ALL {
            assert_eq!(next_status(UserRole::Admin, status), MembershipStatus::Approved);
        }
    }

    #[test]
    fn members_never_move_an_application() {
        for status in MembershipStatus::ALL {
            assert_eq!(next_status(UserRole::Member, status), status);
        }
        assert!(!can_advance(UserRole::Member));
    }

    #[test]
    fn visibility_serializes_for_the_dashboard() {
        assert_eq!(
            serde_json::to_value(ButtonVisibility::UPDATE_ONLY).unwrap(),
            serde_json::json!({ "canApprove": false, "canReject": false, "canUpdateStatus": true })
        );
    }

    #[test]
    fn next_status_does_not_recheck_the_tier() {
        // a branch admin acting out of turn is hidden by `button_visibility`,
        // but `next_status` still answers
        assert_eq!(
            button_visibility(UserRole::BranchAdmin, MembershipStatus::PendingSectionReview),
            ButtonVisibility::NONE
        );
        assert_eq!(
            next_status(UserRole::BranchAdmin, MembershipStatus::PendingSectionReview),
            MembershipStatus::PendingWardReview
        );
    }
}
