pub mod store;

pub use store::{AudioStore, DirectoryStore};
