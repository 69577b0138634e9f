pub mod books;
pub mod manager;
pub mod models;
pub mod users;
