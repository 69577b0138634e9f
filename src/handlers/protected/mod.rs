// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route in this tier sits behind the token verification middleware;
// handlers receive the decoded AuthUser from request extensions.
pub mod books;
pub mod user;
