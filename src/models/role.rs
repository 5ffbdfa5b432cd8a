use async_graphql::Enum;
use serde::{Deserialize, Serialize};

use crate::models::status::MembershipStatus;

/// The canonical identity of an actor in the party hierarchy.
///
/// Free-form role strings (as typed by users or stored on member records)
/// are only ever parsed by [UserRole::normalize]; everything downstream
/// works on this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// National administrator, also known as `nationaladmin`
    Admin,
    /// Provincial administrator
    ProvinceAdmin,
    /// District administrator
    DistrictAdmin,
    /// Ward administrator
    WardAdmin,
    /// Branch administrator
    BranchAdmin,
    /// Section administrator
    SectionAdmin,
    /// An ordinary party member with no review duties
    Member,
}

/// The tiers of the party an application climbs on its way to approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum OrganizationalLevel {
    National,
    Provincial,
    District,
    Ward,
    Branch,
    Section,
}

/// Every spelling we accept for a role, after [clean_role] has been applied.
const ROLE_ALIASES: &[(&str, UserRole)] = &[
    ("admin", UserRole::Admin),
    ("administrator", UserRole::Admin),
    ("nationaladmin", UserRole::Admin),
    ("nationaladministrator", UserRole::Admin),
    ("nationalchairperson", UserRole::Admin),
    ("nationalchairman", UserRole::Admin),
    ("provinceadmin", UserRole::ProvinceAdmin),
    ("provincialadmin", UserRole::ProvinceAdmin),
    ("provinceadministrator", UserRole::ProvinceAdmin),
    ("provincialadministrator", UserRole::ProvinceAdmin),
    ("provincechairperson", UserRole::ProvinceAdmin),
    ("districtadmin", UserRole::DistrictAdmin),
    ("districtadministrator", UserRole::DistrictAdmin),
    ("districtchairperson", UserRole::DistrictAdmin),
    ("wardadmin", UserRole::WardAdmin),
    ("wardadministrator", UserRole::WardAdmin),
    ("wardchairperson", UserRole::WardAdmin),
    ("branchadmin", UserRole::BranchAdmin),
    ("branchadministrator", UserRole::BranchAdmin),
    ("branchchairperson", UserRole::BranchAdmin),
    ("sectionadmin", UserRole::SectionAdmin),
    ("sectionadministrator", UserRole::SectionAdmin),
    ("sectionchairperson", UserRole::SectionAdmin),
    ("member", UserRole::Member),
];

/// Lowercases the role and drops everything that isn't an ASCII letter,
/// so "Provincial Administrator" and "provincial_administrator" agree.
fn clean_role(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl UserRole {
    pub const ALL: [UserRole; 7] = [
        UserRole::Admin,
        UserRole::ProvinceAdmin,
        UserRole::DistrictAdmin,
        UserRole::WardAdmin,
        UserRole::BranchAdmin,
        UserRole::SectionAdmin,
        UserRole::Member,
    ];

    /// Resolve a raw role string to its canonical role.
    ///
    /// Never fails: an absent, empty or unrecognized role is treated as
    /// [UserRole::Member], so a typo can only ever lose privileges.
    pub fn normalize(raw: Option<&str>) -> UserRole {
        let cleaned = match raw {
            Some(raw) => clean_role(raw),
            None => return UserRole::Member,
        };

        ROLE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == cleaned)
            .map(|(_, role)| *role)
            .unwrap_or(UserRole::Member)
    }

    /// The tier of the organization this role belongs to.
    pub fn level(self) -> OrganizationalLevel {
        match self {
            UserRole::Admin => OrganizationalLevel::National,
            UserRole::ProvinceAdmin => OrganizationalLevel::Provincial,
            UserRole::DistrictAdmin => OrganizationalLevel::District,
            UserRole::WardAdmin => OrganizationalLevel::Ward,
            UserRole::BranchAdmin => OrganizationalLevel::Branch,
            UserRole::SectionAdmin | UserRole::Member => OrganizationalLevel::Section,
        }
    }

    pub fn is_admin(self) -> bool {
        self == UserRole::Admin
    }

    /// The pending status this role is responsible for reviewing, if any.
    ///
    /// Admins review every tier and members review none, so both return `None`.
    pub fn review_status(self) -> Option<MembershipStatus> {
        match self {
            UserRole::SectionAdmin => Some(MembershipStatus::PendingSectionReview),
            UserRole::BranchAdmin => Some(MembershipStatus::PendingBranchReview),
            UserRole::WardAdmin => Some(MembershipStatus::PendingWardReview),
            UserRole::DistrictAdmin => Some(MembershipStatus::PendingDistrictReview),
            UserRole::ProvinceAdmin => Some(MembershipStatus::PendingProvincialReview),
            UserRole::Admin | UserRole::Member => None,
        }
    }

    /// The canonical name, as stored on member records.
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::ProvinceAdmin => "provinceadmin",
            UserRole::DistrictAdmin => "districtadmin",
            UserRole::WardAdmin => "wardadmin",
            UserRole::BranchAdmin => "branchadmin",
            UserRole::SectionAdmin => "sectionadmin",
            UserRole::Member => "member",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the raw role resolves to a national administrator.
pub fn has_admin_privileges(raw: Option<&str>) -> bool {
    UserRole::normalize(raw).is_admin()
}
