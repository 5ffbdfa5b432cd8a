//! Membership approval for the party's registration system.
//!
//! Applications climb from section review up to provincial review before
//! they are approved. [models::role] turns free-form role strings into
//! canonical roles, [models::approval] decides who may act and where an
//! application goes next, and [db] persists the result.

pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod models;
mod util;
