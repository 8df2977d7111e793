// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: cryptokit
// File: app.rs

use crate::ckit::mac::commands::{run_mac, MacInput, MacOptions};
use crate::ckit::mac::key::KeySource;
use crate::ckit::random::commands::{
	run_random, RandomFormat, RandomOptions,
};
use clap::{crate_name, Arg, ArgAction, ArgMatches};
use clap_complete::{generate, Generator, Shell};
use std::error::Error;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status for every failure other than a tag mismatch.
pub const ERROR_EXIT_CODE: u8 = 2;

const HELP_TEMPLATE: &str = "{before-help}{name} {version}
{about-with-newline}
Commands:
  ckit hmac -k <KEY> [--in <PATH>] [--verify <HEX>]   HMAC-SHA256 tags
  ckit rand [-n <BYTES>] [--hex | --b64]            Random tokens
{usage-heading} {usage}

{all-args}{after-help}
";

/// How a successful run should be reported to the shell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
	Success,
	/// `hmac --verify` recomputed a different tag.
	Mismatch,
}

impl Outcome {
	pub fn exit_code(self) -> ExitCode {
		match self {
			Outcome::Success => ExitCode::SUCCESS,
			Outcome::Mismatch => ExitCode::from(1),
		}
	}
}

fn build_cli() -> clap::Command {
	clap::Command::new(crate_name!())
		.bin_name("ckit")
		.version(clap::crate_version!())
		.about("HMAC-SHA256 tags and secure random tokens")
		.help_template(HELP_TEMPLATE)
		.color(clap::ColorChoice::Never)
		.subcommand_required(true)
		.arg_required_else_help(true)
		.arg(
			Arg::new("verbose")
				.short('v')
				.long("verbose")
				.global(true)
				.action(ArgAction::SetTrue)
				.help("Log debug events to stderr"),
		)
		.subcommand(
			clap::Command::new("hmac")
				.about("Compute or verify an HMAC-SHA256 tag")
				.display_order(1)
				.arg(
					Arg::new("key")
						.short('k')
						.long("key")
						.value_name("KEY")
						.help("Secret key as a string"),
				)
				.arg(
					Arg::new("keyfile")
						.long("keyfile")
						.value_name("PATH")
						.value_parser(clap::value_parser!(PathBuf))
						.help("Path to a secret key file"),
				)
				.arg(
					Arg::new("in")
						.long("in")
						.value_name("PATH")
						.value_parser(clap::value_parser!(PathBuf))
						.help("Input file (default: stdin)"),
				)
				.arg(
					Arg::new("verify")
						.long("verify")
						.value_name("HEX")
						.help("Expected tag in hex; exits 1 on mismatch"),
				),
		)
		.subcommand(
			clap::Command::new("rand")
				.about("Generate secure random bytes")
				.display_order(2)
				.arg(
					Arg::new("length")
						.short('n')
						.long("length")
						.default_value("16")
						.allow_negative_numbers(true)
						.value_parser(clap::value_parser!(i64))
						.help("Number of random bytes"),
				)
				.arg(
					Arg::new("hex")
						.long("hex")
						.action(ArgAction::SetTrue)
						.help("Hex output (default)"),
				)
				.arg(
					Arg::new("b64")
						.long("b64")
						.action(ArgAction::SetTrue)
						.help("Standard base64 output"),
				),
		)
		.subcommand(
			clap::Command::new("completions")
				.about("Print a shell completion script")
				.display_order(3)
				.arg(
					Arg::new("SHELL")
						.required(true)
						.value_parser(clap::value_parser!(Shell)),
				),
		)
}

fn init_logging(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| EnvFilter::new("warn"))
	};
	// A subscriber installed by an embedding process wins.
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.with_target(false)
		.try_init();
}

fn mac_options(m: &ArgMatches) -> Result<MacOptions, Box<dyn Error>> {
	let key_source = KeySource::from_flags(
		m.get_one::<String>("key").map(String::as_str),
		m.get_one::<PathBuf>("keyfile").cloned(),
	)?;
	let input = match m.get_one::<PathBuf>("in") {
		Some(path) => MacInput::File(path.clone()),
		None => MacInput::Stdin,
	};
	Ok(MacOptions {
		key_source,
		input,
		verify: m.get_one::<String>("verify").cloned(),
	})
}

fn random_options(
	m: &ArgMatches,
) -> Result<RandomOptions, Box<dyn Error>> {
	let format = match (m.get_flag("hex"), m.get_flag("b64")) {
		(true, true) => {
			return Err(Box::new(io::Error::new(
				io::ErrorKind::InvalidInput,
				"cannot provide both --b64 and --hex output",
			)))
		}
		(false, true) => RandomFormat::Base64,
		_ => RandomFormat::Hex,
	};
	let length = m.get_one::<i64>("length").copied().unwrap_or(16);
	Ok(RandomOptions { length, format })
}

fn print_completions<G: Generator>(gen: G, cmd: &mut clap::Command) {
	generate(gen, cmd, "ckit", &mut io::stdout());
}

/// Parses `args` (program name first) and runs the selected command.
pub fn run_from<I, T>(args: I) -> Result<Outcome, Box<dyn Error>>
where
	I: IntoIterator<Item = T>,
	T: Into<OsString> + Clone,
{
	let matches = build_cli().get_matches_from(args);
	init_logging(matches.get_flag("verbose"));

	match matches.subcommand() {
		Some(("hmac", m)) => run_mac(mac_options(m)?),
		Some(("rand", m)) => run_random(random_options(m)?),
		Some(("completions", m)) => {
			if let Some(shell) = m.get_one::<Shell>("SHELL") {
				print_completions(*shell, &mut build_cli());
			}
			Ok(Outcome::Success)
		}
		_ => Ok(Outcome::Success),
	}
}

pub fn run() -> Result<Outcome, Box<dyn Error>> {
	run_from(std::env::args_os())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn matches(args: &[&str]) -> ArgMatches {
		build_cli()
			.try_get_matches_from(args.iter().copied())
			.expect("valid args")
	}

	#[test]
	fn cli_definition_is_consistent() {
		build_cli().debug_assert();
	}

	#[test]
	fn rand_defaults_to_sixteen_hex_bytes() {
		let m = matches(&["ckit", "rand"]);
		let (_, sub) = m.subcommand().expect("subcommand");
		let options = random_options(sub).unwrap();
		assert_eq!(options.length, 16);
		assert_eq!(options.format, RandomFormat::Hex);
	}

	#[test]
	fn rand_accepts_negative_length_for_later_rejection() {
		let m = matches(&["ckit", "rand", "-n", "-3", "--b64"]);
		let (_, sub) = m.subcommand().expect("subcommand");
		let options = random_options(sub).unwrap();
		assert_eq!(options.length, -3);
		assert_eq!(options.format, RandomFormat::Base64);
	}

	#[test]
	fn rand_rejects_both_output_formats() {
		let m = matches(&["ckit", "rand", "--hex", "--b64"]);
		let (_, sub) = m.subcommand().expect("subcommand");
		assert!(random_options(sub).is_err());
	}

	#[test]
	fn hmac_without_in_reads_stdin() {
		let m = matches(&["ckit", "hmac", "-k", "secret"]);
		let (_, sub) = m.subcommand().expect("subcommand");
		let options = mac_options(sub).unwrap();
		assert!(matches!(options.input, MacInput::Stdin));
		assert!(options.verify.is_none());
		assert_eq!(options.key_source.description(), "inline");
	}
}
