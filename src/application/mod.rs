//! Content catalog, page services, and the contact workflow.

pub mod blog;
pub mod cards;
pub mod catalog;
pub mod chrome;
pub mod contact;
pub mod error;
pub mod filter;
pub mod methodology;
pub mod projects;
pub mod render;
pub mod repos;
pub mod site;
pub mod tutorials;
