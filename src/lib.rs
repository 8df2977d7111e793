// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: cryptokit
// File: lib.rs

//! HMAC-SHA256 tags and cryptographically secure random tokens.
//!
//! Both halves are thin, validated wrappers over RustCrypto's `hmac`
//! and `sha2` crates and the operating system CSPRNG.

pub mod ckit {
	pub mod app;
	pub mod mac;
	pub mod random;
}
