// handlers/mod.rs - Two-tier handler architecture
//
// Public (no auth) -> Protected (JWT auth)
pub mod protected;
pub mod public;
