pub use mythmap_core::{db, gateways, repositories};

pub mod entities {
    pub use mythmap_core::entities::*;
    #[cfg(test)]
    pub use mythmap_entities::builders::*;
}

pub mod usecases {
    pub use mythmap_core::usecases::*;
}

pub mod prelude {
    pub use super::{
        db::*,
        entities::*,
        gateways::MediaStore,
        repositories::{Error as RepoError, *},
    };
}
