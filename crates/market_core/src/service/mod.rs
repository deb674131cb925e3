//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own validation ordering and unit-of-work boundaries.
//! - Keep callers decoupled from storage details.

pub mod board_service;
pub mod member_service;
