//! Command handlers.
//!
//! `inspect` runs the decode loop over the token stream; `input` resolves
//! where tokens and the secret come from.

pub mod input;
pub mod inspect;
