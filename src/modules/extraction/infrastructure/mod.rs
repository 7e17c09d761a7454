pub mod external;
pub mod models;
pub mod repository;
pub mod storage;

pub use repository::CardRepositoryImpl;
