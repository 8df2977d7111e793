// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: cryptokit
// File: commands.rs

//! CLI dispatch for `ckit rand`.

use crate::ckit::app::Outcome;
use crate::ckit::random::{random_base64, random_hex};
use std::error::Error;
use std::fmt;
use std::io;
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RandomFormat {
	#[default]
	Hex,
	Base64,
}

impl fmt::Display for RandomFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RandomFormat::Hex => write!(f, "hex"),
			RandomFormat::Base64 => write!(f, "base64"),
		}
	}
}

#[derive(Debug)]
pub struct RandomOptions {
	pub length: i64,
	pub format: RandomFormat,
}

pub fn run_random(
	options: RandomOptions,
) -> Result<Outcome, Box<dyn Error>> {
	if options.length < 0 {
		return Err(Box::new(io::Error::new(
			io::ErrorKind::InvalidInput,
			format!("negative number of bytes: {}", options.length),
		)));
	}
	debug!(
		length = options.length,
		format = %options.format,
		"generating random token"
	);
	let token = match options.format {
		RandomFormat::Hex => random_hex(options.length, None)?,
		RandomFormat::Base64 => random_base64(options.length, None)?,
	};
	println!("{}", token);
	Ok(Outcome::Success)
}
