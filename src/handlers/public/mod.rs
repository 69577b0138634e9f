// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition plus the read-only book surface.
pub mod auth;
pub mod books;
