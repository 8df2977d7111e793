// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: cryptokit
// Module: mac (HMAC-SHA256 tags)

//! Computing and verifying HMAC-SHA256 tags with a caller supplied key.
//!
//! HMAC gives integrity and authenticity, not confidentiality. Tags are
//! always compared in constant time through [`hmac::Mac::verify_slice`].
//! Key material is never stored or logged here.

pub mod commands;
pub mod error;
pub mod key;

pub use error::MacError;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::io::Read;

type HmacSha256 = Hmac<Sha256>;

/// Length in bytes of a full HMAC-SHA256 tag.
pub const TAG_LEN: usize = 32;

/// Shortest prefix accepted by [`verify_truncated`] (128 bits).
pub const MIN_TRUNCATED_TAG_LEN: usize = TAG_LEN / 2;

const MAC_BUFFER_SIZE: usize = 8192;

pub type Tag = [u8; TAG_LEN];

fn keyed(key: &[u8]) -> Result<HmacSha256, MacError> {
	if key.is_empty() {
		return Err(MacError::EmptyKey);
	}
	// HMAC accepts keys of any length; only emptiness is rejected.
	HmacSha256::new_from_slice(key).map_err(|_| MacError::EmptyKey)
}

/// Returns the HMAC-SHA256 tag of `payload` under `key`.
///
/// The payload may be empty. The only failure is an empty key.
pub fn compute(key: &[u8], payload: &[u8]) -> Result<Tag, MacError> {
	let mut mac = keyed(key)?;
	mac.update(payload);
	Ok(mac.finalize().into_bytes().into())
}

/// Streams `reader` to the end and returns the tag of everything read.
pub fn compute_reader<R: Read>(
	key: &[u8],
	mut reader: R,
) -> Result<Tag, MacError> {
	let mut mac = keyed(key)?;
	let mut buffer = [0u8; MAC_BUFFER_SIZE];
	loop {
		let n = match reader.read(&mut buffer) {
			Ok(0) => break,
			Ok(n) => n,
			Err(err) if err.kind() == std::io::ErrorKind::Interrupted => {
				continue
			}
			Err(err) => return Err(err.into()),
		};
		mac.update(&buffer[..n]);
	}
	Ok(mac.finalize().into_bytes().into())
}

/// Reports whether `expected` is the tag of `payload` under `key`.
///
/// A wrong tag, a wrong key, or a tag of the wrong length all yield
/// `Ok(false)`. An empty key yields `Err(MacError::EmptyKey)`, which
/// callers must treat as unverified; [`is_authentic`] folds both
/// outcomes into a single boolean.
pub fn verify(
	key: &[u8],
	payload: &[u8],
	expected: &[u8],
) -> Result<bool, MacError> {
	let mut mac = keyed(key)?;
	mac.update(payload);
	Ok(mac.verify_slice(expected).is_ok())
}

/// Like [`verify`] but accepts a tag truncated to its leading bytes.
///
/// Prefixes shorter than [`MIN_TRUNCATED_TAG_LEN`] never verify.
pub fn verify_truncated(
	key: &[u8],
	payload: &[u8],
	expected: &[u8],
) -> Result<bool, MacError> {
	let mut mac = keyed(key)?;
	if expected.len() < MIN_TRUNCATED_TAG_LEN || expected.len() > TAG_LEN
	{
		return Ok(false);
	}
	mac.update(payload);
	Ok(mac.verify_truncated_left(expected).is_ok())
}

/// Boolean view of [`verify`]: `false` for a mismatch and for any error.
pub fn is_authentic(key: &[u8], payload: &[u8], expected: &[u8]) -> bool {
	verify(key, payload, expected).unwrap_or(false)
}

#[cfg(test)]
mod tests {
	use super::*;
	use hex_literal::hex;

	const KEY: &[u8] = b"supersecret";
	const PAYLOAD: &[u8] = b"payload";
	const TAG: Tag = hex!(
		"338500a9b4a336d8981aaa52bbe15b6537d5c5b76665e33459365c6cc83e68ad"
	);

	#[test]
	fn compute_matches_known_tag() {
		assert_eq!(compute(KEY, PAYLOAD).unwrap(), TAG);
	}

	#[test]
	fn compute_reader_agrees_with_compute() {
		let payload = vec![0x5au8; MAC_BUFFER_SIZE * 3 + 17];
		let streamed = compute_reader(KEY, payload.as_slice()).unwrap();
		assert_eq!(streamed, compute(KEY, &payload).unwrap());
	}

	#[test]
	fn compute_reader_rejects_empty_key_before_reading() {
		let err = compute_reader(b"", PAYLOAD).unwrap_err();
		assert!(err.is_empty_key());
	}

	#[test]
	fn verify_rejects_short_and_long_tags() {
		assert!(!verify(KEY, PAYLOAD, &TAG[..31]).unwrap());
		let mut long = TAG.to_vec();
		long.push(0);
		assert!(!verify(KEY, PAYLOAD, &long).unwrap());
		assert!(!verify(KEY, PAYLOAD, &[]).unwrap());
	}

	#[test]
	fn is_authentic_is_false_for_empty_key() {
		assert!(!is_authentic(b"", PAYLOAD, &TAG));
		assert!(is_authentic(KEY, PAYLOAD, &TAG));
	}

	#[test]
	fn verify_truncated_accepts_prefixes_down_to_half() {
		assert!(verify_truncated(KEY, PAYLOAD, &TAG).unwrap());
		assert!(verify_truncated(KEY, PAYLOAD, &TAG[..16]).unwrap());
		assert!(!verify_truncated(KEY, PAYLOAD, &TAG[..15]).unwrap());
		assert!(!verify_truncated(KEY, PAYLOAD, &TAG[1..17]).unwrap());
		assert!(verify_truncated(b"", PAYLOAD, &TAG[..16])
			.unwrap_err()
			.is_empty_key());
	}
}
