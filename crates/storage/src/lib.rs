//! Persistence adapters for course progress, affiliate products and
//! client-local state.

pub mod remote;
pub mod repository;
pub mod sqlite;
