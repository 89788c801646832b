//! Sea-ORM entity definitions

pub mod event;
