pub mod approval;
pub mod member;
pub mod permissions;
pub mod role;
pub mod status;
