#[macro_use]
extern crate log;

mod file_system;

pub use self::file_system::FileSystemMediaStore;
