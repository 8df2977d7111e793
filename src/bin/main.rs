// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: cryptokit
// File: main.rs

use cryptokit::ckit::app;
use std::process::ExitCode;

fn main() -> ExitCode {
	match app::run() {
		Ok(outcome) => outcome.exit_code(),
		Err(err) => {
			eprintln!("error: {}", err);
			ExitCode::from(app::ERROR_EXIT_CODE)
		}
	}
}
