pub mod prelude {
    use std::{cell::RefCell, collections::HashMap, io};

    pub use mythmap_core::{
        entities::*,
        gateways::MediaStore,
        repositories::{Error as RepoError, *},
        usecases,
    };

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub use crate::{error::AppError, prelude as flows};

    pub fn new_place(name: &str, lat: f64, lng: f64) -> usecases::NewPlace {
        usecases::NewPlace {
            name: name.into(),
            description: format!("All about {name}"),
            lat,
            lng,
            categories: None,
        }
    }

    #[derive(Default)]
    pub struct MemoryMediaStore {
        pub files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl MediaStore for MemoryMediaStore {
        fn store(&self, file_name: &str, data: &[u8]) -> io::Result<()> {
            self.files
                .borrow_mut()
                .insert(file_name.to_owned(), data.to_vec());
            Ok(())
        }
        fn remove(&self, file_name: &str) -> io::Result<()> {
            self.files.borrow_mut().remove(file_name);
            Ok(())
        }
        fn url(&self, file_name: &str) -> String {
            format!("/media/{file_name}")
        }
    }

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
        pub media: MemoryMediaStore,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
            mythmap_db_sqlite::run_embedded_database_migrations(
                db_connections.exclusive().unwrap(),
            )
            .unwrap();
            Self {
                db_connections,
                media: MemoryMediaStore::default(),
            }
        }

        pub fn create_user(&self, username: &str, role: Role) -> User {
            let db = self.db_connections.exclusive().unwrap();
            usecases::create_new_user(
                &db,
                usecases::NewUser {
                    username: username.into(),
                    email: None,
                    password: "secret123".into(),
                    role,
                },
            )
            .unwrap()
        }

        pub fn create_place(&self, owner: &User, name: &str) -> Place {
            flows::create_place(
                &self.db_connections,
                Some(owner),
                new_place(name, 48.0, 11.0),
            )
            .unwrap()
        }

        pub fn approve_place(&self, moderator: &User, id: &Id) {
            flows::moderate_place(
                &self.db_connections,
                Some(moderator),
                id.as_str(),
                usecases::ModerationAction::Approve,
            )
            .unwrap();
        }

        pub fn create_note(&self, user: &User, place_id: &Id, rating: Option<i64>) -> Note {
            flows::create_note(
                &self.db_connections,
                Some(user),
                usecases::NewNote {
                    place_id: place_id.to_string(),
                    text: "Spooky!".into(),
                    rating,
                },
            )
            .unwrap()
        }

        pub fn approve_note(&self, moderator: &User, id: &Id) {
            flows::moderate_note(
                &self.db_connections,
                Some(moderator),
                id.as_str(),
                usecases::ModerationAction::Approve,
            )
            .unwrap();
        }

        pub fn get_place(&self, id: &Id) -> Place {
            self.db_connections
                .shared()
                .unwrap()
                .get_place(id.as_str())
                .unwrap()
        }

        pub fn try_get_note(&self, id: &Id) -> Option<Note> {
            match self.db_connections.shared().unwrap().get_note(id.as_str()) {
                Ok(note) => Some(note),
                Err(RepoError::NotFound) => None,
                Err(err) => panic!("{err}"),
            }
        }
    }
}
