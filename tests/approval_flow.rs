mod common;

use common::{mock_member, store_with, BrokenStore};
use roster::db::{MemberStore, StoreError};
use roster::error::ApprovalError;
use roster::models::approval::{button_visibility, next_status, ButtonVisibility};
use roster::models::member::{Member, MemberId};
use roster::models::role::UserRole;
use roster::models::status::MembershipStatus;

#[tokio::test]
async fn section_admin_moves_application_to_branch_review() {
    let applicant = mock_member("Mwila", MembershipStatus::PendingSectionReview);
    let store = store_with(&[applicant.clone()]);
    let role = UserRole::normalize(Some("Section Chairperson"));

    assert_eq!(
        button_visibility(role, applicant.status),
        ButtonVisibility::ALL
    );

    let updated = Member::apply_approval(&applicant.id, role, store.as_ref())
        .await
        .unwrap();

    assert_eq!(updated.status, MembershipStatus::PendingBranchReview);
    assert!(updated.updated_at.is_some());
    assert_eq!(
        button_visibility(role, updated.status),
        ButtonVisibility::NONE
    );

    let stored = store.find(&applicant.id).await.unwrap().unwrap();
    assert_eq!(stored.status, MembershipStatus::PendingBranchReview);
}

#[tokio::test]
async fn each_tier_passes_the_application_up_the_chain() {
    let applicant = mock_member("Chanda", MembershipStatus::PendingSectionReview);
    let store = store_with(&[applicant.clone()]);

    let tiers = [
        UserRole::SectionAdmin,
        UserRole::BranchAdmin,
        UserRole::WardAdmin,
        UserRole::DistrictAdmin,
        UserRole::ProvinceAdmin,
    ];
    let mut status = applicant.status;
    for role in tiers {
        assert!(button_visibility(role, status).can_approve, "{} at {}", role, status);
        status = Member::apply_approval(&applicant.id, role, store.as_ref())
            .await
            .unwrap()
            .status;
    }

    assert_eq!(status, MembershipStatus::Approved);
}

#[tokio::test]
async fn admin_approval_skips_the_remaining_tiers() {
    let applicant = mock_member("Bwalya", MembershipStatus::PendingWardReview);
    let store = store_with(&[applicant.clone()]);

    let updated = Member::apply_approval(&applicant.id, UserRole::Admin, store.as_ref())
        .await
        .unwrap();

    assert_eq!(updated.status, MembershipStatus::Approved);
}

#[tokio::test]
async fn members_cannot_move_an_application() {
    let applicant = mock_member("Mutale", MembershipStatus::PendingSectionReview);
    let store = store_with(&[applicant.clone()]);

    let unchanged = Member::apply_approval(&applicant.id, UserRole::Member, store.as_ref())
        .await
        .unwrap();

    assert_eq!(unchanged, applicant);
}

#[tokio::test]
async fn out_of_turn_approval_is_not_revalidated() {
    // nothing should offer this action, but the orchestration trusts its caller
    let applicant = mock_member("Phiri", MembershipStatus::PendingSectionReview);
    let store = store_with(&[applicant.clone()]);

    assert_eq!(
        button_visibility(UserRole::BranchAdmin, applicant.status),
        ButtonVisibility::NONE
    );
    assert_eq!(
        next_status(UserRole::BranchAdmin, applicant.status),
        MembershipStatus::PendingWardReview
    );

    let updated = Member::apply_approval(&applicant.id, UserRole::BranchAdmin, store.as_ref())
        .await
        .unwrap();
    assert_eq!(updated.status, MembershipStatus::PendingWardReview);
}

#[tokio::test]
async fn approving_a_missing_member_reports_not_found() {
    let store = store_with(&[]);
    let missing = MemberId::new_v4();

    let err = Member::apply_approval(&missing, UserRole::Admin, store.as_ref())
        .await
        .unwrap_err();

    assert!(matches!(err, ApprovalError::NotFound(id) if id == missing));
}

#[tokio::test]
async fn storage_failures_are_reported_separately() {
    let id = MemberId::new_v4();

    let err = Member::apply_approval(&id, UserRole::Admin, &BrokenStore)
        .await
        .unwrap_err();
    assert!(matches!(err, ApprovalError::Storage(_)));
    assert_eq!(err.to_string(), "failed to update status, try again");

    let err = Member::apply_bulk_status(&[id], MembershipStatus::Approved, &BrokenStore)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Database(_)));

    for role in [UserRole::Admin, UserRole::WardAdmin] {
        let err = Member::review_queue(role, &BrokenStore).await.unwrap_err();
        assert!(matches!(err, ApprovalError::Storage(_)), "{}", role);
    }
}

#[tokio::test]
async fn bulk_update_counts_only_existing_members() {
    let first = mock_member("Banda", MembershipStatus::PendingSectionReview);
    let second = mock_member("Zulu", MembershipStatus::PendingDistrictReview);
    let store = store_with(&[first.clone(), second.clone()]);

    let result = Member::apply_bulk_status(
        &[first.id, second.id, MemberId::new_v4()],
        MembershipStatus::Approved,
        store.as_ref(),
    )
    .await
    .unwrap();

    assert_eq!(result.updated_count, 2);
    for id in [first.id, second.id] {
        let member = store.find(&id).await.unwrap().unwrap();
        assert_eq!(member.status, MembershipStatus::Approved);
    }
}

#[tokio::test]
async fn rejection_and_direct_updates() {
    let applicant = mock_member("Tembo", MembershipStatus::PendingProvincialReview);
    let store = store_with(&[applicant.clone()]);

    let rejected =
        Member::apply_rejection(&applicant.id, UserRole::ProvinceAdmin, store.as_ref())
            .await
            .unwrap();
    assert_eq!(rejected.status, MembershipStatus::Rejected);

    let suspended = Member::apply_status(
        &applicant.id,
        MembershipStatus::Suspended,
        UserRole::Admin,
        store.as_ref(),
    )
    .await
    .unwrap();
    assert_eq!(suspended.status, MembershipStatus::Suspended);

    let missing = MemberId::new_v4();
    let err = Member::apply_rejection(&missing, UserRole::Admin, store.as_ref())
        .await
        .unwrap_err();
    assert!(matches!(err, ApprovalError::NotFound(id) if id == missing));

    let err = Member::apply_status(
        &missing,
        MembershipStatus::Expelled,
        UserRole::Admin,
        &BrokenStore,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApprovalError::Storage(_)));
}

#[tokio::test]
async fn review_queues_follow_the_tier() {
    let at_section = mock_member("Ngoma", MembershipStatus::PendingSectionReview);
    let at_ward = mock_member("Lungu", MembershipStatus::PendingWardReview);
    let approved = mock_member("Daka", MembershipStatus::Approved);
    let store = store_with(&[at_section.clone(), at_ward.clone(), approved]);

    let ward_queue = Member::review_queue(UserRole::WardAdmin, store.as_ref())
        .await
        .unwrap();
    assert_eq!(ward_queue, vec![at_ward.clone()]);

    let admin_queue = Member::review_queue(UserRole::Admin, store.as_ref())
        .await
        .unwrap();
    assert_eq!(admin_queue, vec![at_ward, at_section]);

    let member_queue = Member::review_queue(UserRole::Member, store.as_ref())
        .await
        .unwrap();
    assert!(member_queue.is_empty());
}
