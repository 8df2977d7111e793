// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: cryptokit
// File: source.rs

//! Entropy sources accepted by [`random_bytes`](super::random_bytes).

use rand_core::RngCore;
use std::io::{self, Read};

/// Something that can fill a buffer with unpredictable bytes.
///
/// Implementations must either fill all of `buf` or return an error;
/// a partial fill is never success.
pub trait EntropySource {
	fn fill_entropy(&mut self, buf: &mut [u8]) -> io::Result<()>;
}

impl<S: EntropySource + ?Sized> EntropySource for &mut S {
	fn fill_entropy(&mut self, buf: &mut [u8]) -> io::Result<()> {
		(**self).fill_entropy(buf)
	}
}

/// The operating system CSPRNG, reached through `getrandom`.
///
/// Holds no state and may be used from any number of threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
	fn fill_entropy(&mut self, buf: &mut [u8]) -> io::Result<()> {
		getrandom::getrandom(buf).map_err(io::Error::from)
	}
}

/// Adapts any reader, such as a device file or a fixed byte slice.
///
/// Short reads are retried until the buffer is full; running out of
/// input first surfaces as [`io::ErrorKind::UnexpectedEof`].
#[derive(Debug)]
pub struct ReaderSource<R> {
	inner: R,
}

impl<R: Read> ReaderSource<R> {
	pub fn new(inner: R) -> Self {
		Self { inner }
	}

	pub fn into_inner(self) -> R {
		self.inner
	}
}

impl<R: Read> EntropySource for ReaderSource<R> {
	fn fill_entropy(&mut self, buf: &mut [u8]) -> io::Result<()> {
		self.inner.read_exact(buf)
	}
}

/// Adapts a `rand_core` generator through its fallible fill.
#[derive(Debug)]
pub struct RngSource<R> {
	rng: R,
}

impl<R: RngCore> RngSource<R> {
	pub fn new(rng: R) -> Self {
		Self { rng }
	}
}

impl<R: RngCore> EntropySource for RngSource<R> {
	fn fill_entropy(&mut self, buf: &mut [u8]) -> io::Result<()> {
		self.rng.try_fill_bytes(buf).map_err(io::Error::other)
	}
}
