// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: cryptokit
// File: error.rs

use std::io;

/// Failures raised while computing or verifying an HMAC-SHA256 tag.
///
/// A tag that simply does not match is not an error; see
/// [`verify`](super::verify).
#[derive(Debug, thiserror::Error)]
pub enum MacError {
	#[error("empty key")]
	EmptyKey,
	/// Only produced by the streaming entry point.
	#[error("reading payload: {0}")]
	Io(#[from] io::Error),
}

impl MacError {
	pub fn is_empty_key(&self) -> bool {
		matches!(self, MacError::EmptyKey)
	}

	pub fn is_io(&self) -> bool {
		matches!(self, MacError::Io(_))
	}
}
