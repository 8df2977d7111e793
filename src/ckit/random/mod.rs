// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: cryptokit
// Module: random (secure random bytes and tokens)

//! Cryptographically secure random bytes for tokens, salts, and nonces.
//!
//! Every function takes an optional [`EntropySource`]; `None` selects
//! [`OsEntropy`]. Passing a deterministic source keeps callers testable.

pub mod commands;
pub mod source;

pub use source::{EntropySource, OsEntropy, ReaderSource, RngSource};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io;

/// Largest request accepted, guarding against unbounded allocation.
pub const MAX_RANDOM_BYTES: usize = 1 << 20;

#[derive(Debug, thiserror::Error)]
pub enum RandomError {
	#[error("n must be > 0")]
	InvalidLength(i64),
	#[error("n too large: {0}")]
	TooLarge(i64),
	#[error("read random: {0}")]
	Read(#[source] io::Error),
}

impl RandomError {
	pub fn is_invalid_length(&self) -> bool {
		matches!(self, RandomError::InvalidLength(_))
	}

	pub fn is_too_large(&self) -> bool {
		matches!(self, RandomError::TooLarge(_))
	}

	pub fn is_read(&self) -> bool {
		matches!(self, RandomError::Read(_))
	}
}

fn checked_len(n: i64) -> Result<usize, RandomError> {
	if n <= 0 {
		return Err(RandomError::InvalidLength(n));
	}
	match usize::try_from(n) {
		Ok(len) if len <= MAX_RANDOM_BYTES => Ok(len),
		_ => Err(RandomError::TooLarge(n)),
	}
}

/// Returns exactly `n` bytes read from `source`, or from the OS when `None`.
pub fn random_bytes(
	n: i64,
	source: Option<&mut dyn EntropySource>,
) -> Result<Vec<u8>, RandomError> {
	let len = checked_len(n)?;
	let mut buffer = vec![0u8; len];
	let filled = match source {
		Some(source) => source.fill_entropy(&mut buffer),
		None => OsEntropy.fill_entropy(&mut buffer),
	};
	filled.map_err(RandomError::Read)?;
	Ok(buffer)
}

/// Lowercase hex encoding of [`random_bytes`], `2 * n` characters long.
pub fn random_hex(
	n: i64,
	source: Option<&mut dyn EntropySource>,
) -> Result<String, RandomError> {
	random_bytes(n, source).map(hex::encode)
}

/// Standard padded base64 encoding of [`random_bytes`].
pub fn random_base64(
	n: i64,
	source: Option<&mut dyn EntropySource>,
) -> Result<String, RandomError> {
	random_bytes(n, source).map(|bytes| STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::error::Error;

	#[test]
	fn read_error_keeps_underlying_cause() {
		let mut source = ReaderSource::new(io::empty());
		let err = random_bytes(8, Some(&mut source)).unwrap_err();
		assert!(err.is_read());
		let cause = err
			.source()
			.and_then(|cause| cause.downcast_ref::<io::Error>())
			.expect("io cause");
		assert_eq!(cause.kind(), io::ErrorKind::UnexpectedEof);
		assert!(err.to_string().starts_with("read random: "));
	}

	#[test]
	fn guard_messages_name_the_request() {
		assert_eq!(
			random_bytes(0, None).unwrap_err().to_string(),
			"n must be > 0"
		);
		assert_eq!(
			random_bytes(MAX_RANDOM_BYTES as i64 + 1, None)
				.unwrap_err()
				.to_string(),
			format!("n too large: {}", MAX_RANDOM_BYTES + 1)
		);
	}

	#[test]
	fn base64_output_uses_standard_alphabet() {
		let mut source = ReaderSource::new(&[0xfbu8, 0xff][..]);
		assert_eq!(random_base64(2, Some(&mut source)).unwrap(), "+/8=");
	}

	#[test]
	fn guards_run_before_the_source_is_touched() {
		let mut source = ReaderSource::new(&[1u8, 2, 3][..]);
		assert!(random_bytes(-4, Some(&mut source))
			.unwrap_err()
			.is_invalid_length());
		let source = source.into_inner();
		assert_eq!(source.len(), 3);
	}
}
