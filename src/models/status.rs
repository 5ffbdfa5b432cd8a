use std::str::FromStr;

use async_graphql::Enum;
use serde::{Deserialize, Serialize};

use crate::models::role::OrganizationalLevel;

/// Where a membership application currently stands.
///
/// The five pending statuses form a strict chain from section review up to
/// provincial review; the rest are terminal for the approval chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum MembershipStatus {
    /// Awaiting review by the section administrator
    PendingSectionReview,
    /// Awaiting review by the branch administrator
    PendingBranchReview,
    /// Awaiting review by the ward administrator
    PendingWardReview,
    /// Awaiting review by the district administrator
    PendingDistrictReview,
    /// Awaiting review by the provincial administrator
    PendingProvincialReview,
    /// A full member of the party
    Approved,
    /// The application was turned down
    Rejected,
    /// Membership is on hold
    Suspended,
    /// Membership was revoked
    Expelled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown membership status {0:?}")]
pub struct ParseStatusError(pub String);

impl MembershipStatus {
    pub const ALL: [MembershipStatus; 9] = [
        MembershipStatus::PendingSectionReview,
        MembershipStatus::PendingBranchReview,
        MembershipStatus::PendingWardReview,
        MembershipStatus::PendingDistrictReview,
        MembershipStatus::PendingProvincialReview,
        MembershipStatus::Approved,
        MembershipStatus::Rejected,
        MembershipStatus::Suspended,
        MembershipStatus::Expelled,
    ];

    /// The canonical (stored) spelling of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            MembershipStatus::PendingSectionReview => "Pending Section Review",
            MembershipStatus::PendingBranchReview => "Pending Branch Review",
            MembershipStatus::PendingWardReview => "Pending Ward Review",
            MembershipStatus::PendingDistrictReview => "Pending District Review",
            MembershipStatus::PendingProvincialReview => "Pending Provincial Review",
            MembershipStatus::Approved => "Approved",
            MembershipStatus::Rejected => "Rejected",
            MembershipStatus::Suspended => "Suspended",
            MembershipStatus::Expelled => "Expelled",
        }
    }

    pub fn is_pending(self) -> bool {
        self.reviewing_level().is_some()
    }

    pub fn is_terminal(self) -> bool {
        !self.is_pending()
    }

    /// The tier whose administrators are currently reviewing the application.
    pub fn reviewing_level(self) -> Option<OrganizationalLevel> {
        match self {
            MembershipStatus::PendingSectionReview => Some(OrganizationalLevel::Section),
            MembershipStatus::PendingBranchReview => Some(OrganizationalLevel::Branch),
            MembershipStatus::PendingWardReview => Some(OrganizationalLevel::Ward),
            MembershipStatus::PendingDistrictReview => Some(OrganizationalLevel::District),
            MembershipStatus::PendingProvincialReview => Some(OrganizationalLevel::Provincial),
            _ => None,
        }
    }

    /// A short label for the dashboards describing the stage of review.
    pub fn approval_level(self) -> &'static str {
        match self {
            MembershipStatus::PendingSectionReview => "Section Level",
            MembershipStatus::PendingBranchReview => "Branch Level",
            MembershipStatus::PendingWardReview => "Ward Level",
            MembershipStatus::PendingDistrictReview => "District Level",
            MembershipStatus::PendingProvincialReview => "Provincial Level",
            MembershipStatus::Approved => "Approved",
            MembershipStatus::Rejected => "Rejected",
            MembershipStatus::Suspended | MembershipStatus::Expelled => "Final Review",
        }
    }
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reduces a status to lowercase words separated by single spaces, so that
/// "Pending Section Review", "pending  section review" and
/// "PENDING_SECTION_REVIEW" all compare equal.
fn fold_status(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

impl FromStr for MembershipStatus {
    type Err = ParseStatusError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let folded = fold_status(raw);

        MembershipStatus::ALL
            .into_iter()
            .find(|status| status.as_str().to_lowercase() == folded)
            .ok_or_else(|| ParseStatusError(raw.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_casing_in_use() {
        let expected = MembershipStatus::PendingSectionReview;
        for raw in [
            "Pending Section Review",
            "pending section review",
            "PENDING_SECTION_REVIEW",
            "  pending   Section review ",
        ] {
            assert_eq!(raw.parse::<MembershipStatus>(), Ok(expected), "{:?}", raw);
        }
    }

    #[test]
    fn canonical_names_round_trip() {
        for status in MembershipStatus::ALL {
            assert_eq!(status.to_string().parse(), Ok(status));
        }
    }

    #[test]
    fn rejects_unknown_statuses() {
        assert_eq!(
            "Pending Galactic Review".parse::<MembershipStatus>(),
            Err(ParseStatusError("Pending Galactic Review".to_owned()))
        );
        assert!("".parse::<MembershipStatus>().is_err());
    }

    #[test]
    fn only_the_chain_is_pending() {
        let pending: Vec<_> = MembershipStatus::ALL
            .into_iter()
            .filter(|status| status.is_pending())
            .collect();

        assert_eq!(pending, &MembershipStatus::ALL[..5]);
        assert!(MembershipStatus::Approved.is_terminal());
        assert!(MembershipStatus::Expelled.is_terminal());
    }

    #[test]
    fn approval_level_labels() {
        assert_eq!(
            MembershipStatus::PendingProvincialReview.approval_level(),
            "Provincial Level"
        );
        assert_eq!(MembershipStatus::Rejected.approval_level(), "Rejected");
        assert_eq!(MembershipStatus::Suspended.approval_level(), "Final Review");
    }
}
