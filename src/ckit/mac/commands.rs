// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: cryptokit
// File: commands.rs

//! CLI dispatch for `ckit hmac`.

use crate::ckit::app::Outcome;
use crate::ckit::mac::key::{load_key, KeySource};
use crate::ckit::mac::{self, Tag};
use std::error::Error;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug)]
pub struct MacOptions {
	pub key_source: KeySource,
	pub input: MacInput,
	/// Hex encoded tag to check instead of printing a new one.
	pub verify: Option<String>,
}

#[derive(Debug)]
pub enum MacInput {
	File(PathBuf),
	Stdin,
}

pub fn run_mac(options: MacOptions) -> Result<Outcome, Box<dyn Error>> {
	let key = load_key(&options.key_source)?;
	debug!(
		source = options.key_source.description(),
		len = key.len(),
		"loaded hmac key"
	);

	match &options.verify {
		None => {
			let tag = compute_input(&key, &options.input)?;
			println!("{}", hex::encode(tag));
			Ok(Outcome::Success)
		}
		Some(expected_hex) => {
			let expected =
				hex::decode(expected_hex.trim()).map_err(|err| {
					Box::new(io::Error::new(
						io::ErrorKind::InvalidInput,
						format!("decoding hex tag: {}", err),
					)) as Box<dyn Error>
				})?;
			let payload = read_input(&options.input)?;
			if mac::verify(&key, &payload, &expected)? {
				info!("tag verified");
				Ok(Outcome::Success)
			} else {
				info!(expected_len = expected.len(), "tag mismatch");
				eprintln!("mismatch");
				Ok(Outcome::Mismatch)
			}
		}
	}
}

fn compute_input(
	key: &[u8],
	input: &MacInput,
) -> Result<Tag, Box<dyn Error>> {
	match input {
		MacInput::File(path) => {
			debug!(path = %path.display(), "streaming payload file");
			let file = open_input(path)?;
			Ok(mac::compute_reader(key, file)?)
		}
		MacInput::Stdin => {
			let payload = read_stdin()?;
			Ok(mac::compute(key, &payload)?)
		}
	}
}

fn read_input(input: &MacInput) -> Result<Vec<u8>, Box<dyn Error>> {
	match input {
		MacInput::File(path) => {
			let mut payload = Vec::new();
			open_input(path)?.read_to_end(&mut payload)?;
			debug!(path = %path.display(), len = payload.len(), "read payload file");
			Ok(payload)
		}
		MacInput::Stdin => read_stdin(),
	}
}

fn open_input(path: &Path) -> Result<File, Box<dyn Error>> {
	File::open(path).map_err(|err| {
		Box::new(io::Error::other(format!(
			"reading input file `{}`: {}",
			path.display(),
			err
		))) as Box<dyn Error>
	})
}

fn read_stdin() -> Result<Vec<u8>, Box<dyn Error>> {
	let mut payload = Vec::new();
	io::stdin().lock().read_to_end(&mut payload).map_err(|err| {
		Box::new(io::Error::other(format!(
			"reading input from stdin: {}",
			err
		))) as Box<dyn Error>
	})?;
	if payload.is_empty() {
		return Err(Box::new(io::Error::new(
			io::ErrorKind::UnexpectedEof,
			"no input provided (stdin empty)",
		)));
	}
	debug!(len = payload.len(), "read payload from stdin");
	Ok(payload)
}
