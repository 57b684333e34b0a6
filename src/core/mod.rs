//! Core library components.
//!
//! This module contains the reusable logic for parsing `.env` files,
//! synchronizing them with the provider vault, and producing templates.

pub mod constants;
pub mod header;
pub mod parse;
pub mod provider;
pub mod sync;
pub mod template;
pub mod update;
