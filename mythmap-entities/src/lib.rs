#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(test, deny(warnings))]

//! # mythmap-entities
//!
//! Reusable, agnostic domain entities for mythmap.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod comment;
pub mod geo;
pub mod id;
pub mod image;
pub mod moderation;
pub mod note;
pub mod password;
pub mod place;
pub mod rating;
pub mod time;
pub mod token;
pub mod user;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
