use std::collections::{HashMap, HashSet};

use crate::models::role::UserRole;

/// A named capability granted to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permission {
    name: &'static str,
}

impl Permission {
    const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub const VIEW_ALL: Self = Self::new("view_all");
    pub const VIEW_PROVINCE: Self = Self::new("view_province");
    pub const VIEW_DISTRICT: Self = Self::new("view_district");
    pub const VIEW_WARD: Self = Self::new("view_ward");
    pub const VIEW_BRANCH: Self = Self::new("view_branch");
    pub const VIEW_SECTION: Self = Self::new("view_section");
    pub const VIEW_PROFILE: Self = Self::new("view_profile");
    pub const VIEW_PERFORMANCE: Self = Self::new("view_performance");

    pub const APPROVE_ALL: Self = Self::new("approve_all");
    pub const APPROVE_MEMBERS: Self = Self::new("approve_members");
    pub const APPROVE_SECTION: Self = Self::new("approve_section");
    pub const APPROVE_BRANCH: Self = Self::new("approve_branch");
    pub const APPROVE_WARD: Self = Self::new("approve_ward");
    pub const APPROVE_DISTRICT: Self = Self::new("approve_district");
    pub const APPROVE_PROVINCE: Self = Self::new("approve_province");
    pub const REVIEW_APPLICATIONS: Self = Self::new("review_applications");

    pub const MANAGE_USERS: Self = Self::new("manage_users");
    pub const MANAGE_PROVINCE_USERS: Self = Self::new("manage_province_users");
    pub const MANAGE_DISTRICT_USERS: Self = Self::new("manage_district_users");
    pub const MANAGE_WARD_USERS: Self = Self::new("manage_ward_users");
    pub const MANAGE_BRANCH_USERS: Self = Self::new("manage_branch_users");

    pub const MANAGE_DISTRICTS: Self = Self::new("manage_districts");
    pub const MANAGE_CONSTITUENCIES: Self = Self::new("manage_constituencies");
    pub const MANAGE_BRANCHES: Self = Self::new("manage_branches");
    pub const MANAGE_SECTIONS: Self = Self::new("manage_sections");
    pub const MANAGE_OFFICIALS: Self = Self::new("manage_officials");

    pub const GENERATE_REPORTS: Self = Self::new("generate_reports");
    pub const EXPORT_DATA: Self = Self::new("export_data");
    pub const SYSTEM_SETTINGS: Self = Self::new("system_settings");
    pub const MANAGE_DISCIPLINARY: Self = Self::new("manage_disciplinary");
    pub const MANAGE_EVENTS: Self = Self::new("manage_events");
    pub const UPDATE_PROFILE: Self = Self::new("update_profile");
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

const NATIONAL: &[Permission] = &[
    Permission::VIEW_ALL,
    Permission::APPROVE_ALL,
    Permission::MANAGE_USERS,
    Permission::GENERATE_REPORTS,
    Permission::EXPORT_DATA,
    Permission::APPROVE_MEMBERS,
    Permission::SYSTEM_SETTINGS,
    Permission::MANAGE_DISCIPLINARY,
    Permission::MANAGE_EVENTS,
    Permission::APPROVE_SECTION,
    Permission::APPROVE_BRANCH,
    Permission::APPROVE_WARD,
    Permission::APPROVE_DISTRICT,
    Permission::APPROVE_PROVINCE,
];

const PROVINCIAL: &[Permission] = &[
    Permission::VIEW_PROVINCE,
    Permission::APPROVE_MEMBERS,
    Permission::MANAGE_PROVINCE_USERS,
    Permission::GENERATE_REPORTS,
    Permission::EXPORT_DATA,
    Permission::MANAGE_DISTRICTS,
    Permission::MANAGE_BRANCHES,
    Permission::MANAGE_OFFICIALS,
    Permission::MANAGE_EVENTS,
    Permission::VIEW_PERFORMANCE,
    Permission::MANAGE_DISCIPLINARY,
    Permission::APPROVE_PROVINCE,
];

const DISTRICT: &[Permission] = &[
    Permission::VIEW_DISTRICT,
    Permission::APPROVE_MEMBERS,
    Permission::MANAGE_DISTRICT_USERS,
    Permission::GENERATE_REPORTS,
    Permission::MANAGE_CONSTITUENCIES,
    Permission::MANAGE_EVENTS,
    Permission::APPROVE_DISTRICT,
];

const WARD: &[Permission] = &[
    Permission::VIEW_WARD,
    Permission::APPROVE_MEMBERS,
    Permission::MANAGE_WARD_USERS,
    Permission::GENERATE_REPORTS,
    Permission::MANAGE_BRANCHES,
    Permission::MANAGE_EVENTS,
    Permission::APPROVE_WARD,
];

const BRANCH: &[Permission] = &[
    Permission::VIEW_BRANCH,
    Permission::APPROVE_MEMBERS,
    Permission::MANAGE_BRANCH_USERS,
    Permission::GENERATE_REPORTS,
    Permission::MANAGE_SECTIONS,
    Permission::MANAGE_EVENTS,
    Permission::APPROVE_BRANCH,
];

const SECTION: &[Permission] = &[
    Permission::VIEW_SECTION,
    Permission::REVIEW_APPLICATIONS,
    Permission::GENERATE_REPORTS,
    Permission::APPROVE_SECTION,
];

const MEMBER: &[Permission] = &[Permission::VIEW_PROFILE, Permission::UPDATE_PROFILE];

/// The static grants of each role.
pub const fn role_grants(role: UserRole) -> &'static [Permission] {
    match role {
        UserRole::Admin => NATIONAL,
        UserRole::ProvinceAdmin => PROVINCIAL,
        UserRole::DistrictAdmin => DISTRICT,
        UserRole::WardAdmin => WARD,
        UserRole::BranchAdmin => BRANCH,
        UserRole::SectionAdmin => SECTION,
        UserRole::Member => MEMBER,
    }
}

/// Role to permission lookup, built once at startup and shared read-only.
///
/// There is deliberately no way to modify a table after construction; hand
/// it around in an `Arc`.
#[derive(Debug)]
pub struct PermissionTable {
    grants: HashMap<UserRole, HashSet<Permission>>,
}

impl PermissionTable {
    pub fn new() -> Self {
        let grants = UserRole::ALL
            .into_iter()
            .map(|role| (role, role_grants(role).iter().copied().collect()))
            .collect();

        Self { grants }
    }

    pub fn permissions_for(&self, role: UserRole) -> &HashSet<Permission> {
        // every role is inserted in `new`
        &self.grants[&role]
    }

    pub fn grants(&self, role: UserRole, permission: Permission) -> bool {
        self.permissions_for(role).contains(&permission)
    }

    /// The role's permission names in a stable order, for display.
    pub fn sorted_names(&self, role: UserRole) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .permissions_for(role)
            .iter()
            .map(Permission::name)
            .collect();
        names.sort_unstable();

        names
    }
}

impl Default for PermissionTable {
    fn default() -> Self {
        Self::new()
    }
}
