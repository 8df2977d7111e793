// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: cryptokit
// File: key.rs

//! Loading HMAC keys for the command line from inline values or files.

use std::fs;
use std::io;
use std::path::PathBuf;

use zeroize::Zeroizing;

#[derive(Debug)]
pub enum KeySource {
	Inline(Zeroizing<Vec<u8>>),
	File(PathBuf),
}

impl KeySource {
	/// Picks the key source from the two mutually exclusive flags.
	pub fn from_flags(
		inline: Option<&str>,
		file: Option<PathBuf>,
	) -> Result<Self, KeyError> {
		match (inline, file) {
			(Some(_), Some(_)) => Err(KeyError::Conflicting),
			(Some(key), None) => Ok(KeySource::Inline(Zeroizing::new(
				key.as_bytes().to_vec(),
			))),
			(None, Some(path)) => Ok(KeySource::File(path)),
			(None, None) => Err(KeyError::Missing),
		}
	}

	pub fn description(&self) -> &'static str {
		match self {
			KeySource::Inline(_) => "inline",
			KeySource::File(_) => "file",
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
	#[error("both -k and --keyfile are set")]
	Conflicting,
	#[error("no key or keyfile provided")]
	Missing,
	#[error("reading key file `{}`: {source}", .path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

/// Returns the key bytes. Trailing line breaks are stripped from key files.
///
/// An empty key is passed through; the MAC operations reject it.
pub fn load_key(
	source: &KeySource,
) -> Result<Zeroizing<Vec<u8>>, KeyError> {
	match source {
		KeySource::Inline(bytes) => Ok(bytes.clone()),
		KeySource::File(path) => {
			let mut bytes =
				Zeroizing::new(fs::read(path).map_err(|source| {
					KeyError::Read {
						path: path.clone(),
						source,
					}
				})?);
			let trimmed = bytes
				.iter()
				.rposition(|b| *b != b'\n' && *b != b'\r')
				.map_or(0, |last| last + 1);
			bytes.truncate(trimmed);
			Ok(bytes)
		}
	}
}
