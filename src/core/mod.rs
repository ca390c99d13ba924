//! Core business logic for JWT operations.
//!
//! This module contains the decoding and verification logic separated from
//! CLI concerns. Everything here works on borrowed token strings and is
//! testable without the CLI layer.

pub mod decoder;
pub mod policy;
pub mod validator;
