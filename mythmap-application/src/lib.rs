#[macro_use]
extern crate log;

mod comments;
mod create_note;
mod create_place;
mod delete_note;
mod delete_place;
mod favorites;
mod hooks;
mod images;
mod moderate;
mod update_note;
mod update_place;
mod users;

pub mod prelude {
    pub use super::{
        comments::*, create_note::*, create_place::*, delete_note::*, delete_place::*,
        favorites::*, images::*, moderate::*, update_note::*, update_place::*, users::*,
    };
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use mythmap_core::{entities::*, gateways::MediaStore, usecases};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use mythmap_db_sqlite::Connections;
}
