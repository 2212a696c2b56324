//! Shared utilities for the compliance platform backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Cryptographic utilities (credential hashing, token generation)
//! - Shared helper types

pub mod crypto;
pub mod token;
