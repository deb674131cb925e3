//! Marketplace domain model.
//!
//! # Responsibility
//! - Define member/address/board/comment records and their mutators.
//! - Own the field validation rules and their user-facing messages.
//!
//! # Invariants
//! - Relations are plain ids; no entity holds a pointer to another.
//! - Entity fields are private and change only through validated mutators.

pub mod address;
pub mod board;
pub mod comment;
pub mod member;
pub mod profile;
pub mod validation;
