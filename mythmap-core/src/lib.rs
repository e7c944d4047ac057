//! # mythmap-core
//!
//! Business rules of the mythmap catalog: repository and gateway
//! traits, the role-scoped visibility of moderated content and all
//! use cases.

pub mod authorization;
pub mod bbox;
pub mod db;
pub mod gateways;
pub mod repositories;
pub mod usecases;
pub mod visibility;

pub mod entities {
    pub use mythmap_entities::{
        comment::*, geo::*, id::*, image::*, moderation::*, note::*, password::*, place::*,
        rating::*, time::*, token::*, user::*,
    };
}

pub use self::repositories::Error as RepoError;
