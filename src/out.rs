// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

/// Caller owned storage a foreign function writes a result into.
///
/// The slot's address is only ever lent to a closure, so it cannot outlive the
/// storage, and the value cannot be read while the call is in flight.
#[derive(Debug, Default)]
#[repr(transparent)]
pub struct Out<T: Copy>(T);

impl<T: Copy> Out<T> {
	#[inline]
	pub const fn new(init: T) -> Self {
		Self(init)
	}

	/// Lends the slot's address to `f`. It is valid, aligned and writable for the
	/// whole of `f` and no longer.
	#[inline]
	pub fn exchange<R, F>(&mut self, f: F) -> R
	where
		F: FnOnce(*mut T) -> R,
	{
		f(&mut self.0)
	}

	#[inline]
	pub fn get(&self) -> T {
		self.0
	}

	#[inline]
	pub fn into_inner(self) -> T {
		self.0
	}
}
