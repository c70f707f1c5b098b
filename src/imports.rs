// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

use std::marker::PhantomData;
use std::mem;

use log::debug;

use crate::sealed::Sealed;
use crate::sync::LibLock;
use crate::{sym, Error, ErrorKind, Loader, Result, SymAddr};

/// Something symbols can be looked up in. Implemented by [`LibLock`].
pub trait Resolve: Sealed {
	fn resolve(&self, symbol: &str) -> Result<SymAddr>;
}

impl<L: Loader> Sealed for LibLock<'_, L> {}

impl<L: Loader> Resolve for LibLock<'_, L> {
	#[inline]
	fn resolve(&self, symbol: &str) -> Result<SymAddr> {
		self.symbol(symbol)
	}
}

trait AssertSize<T, U> {
	const ASSERT_SIZE: () = assert!(mem::size_of::<T>() == mem::size_of::<U>());
}
impl<F: 'static> AssertSize<SymAddr, F> for Import<F> {}

/// A typed foreign function declared against a library and resolved on demand.
///
/// These are normally produced by the [`import`](crate::import) attribute.
pub struct Import<F: 'static> {
	lib: &'static (dyn Resolve + Sync),
	name: &'static str,
	arg_bytes: usize,
	_marker: PhantomData<F>,
}

impl<F: Copy + 'static> Import<F> {
	/// # Safety
	///
	/// `F` must be a function pointer type that matches the export `name` in `lib`,
	/// calling convention included. `arg_bytes` is the stack size of the declared
	/// arguments (see [`sym::arg_bytes`]).
	#[inline]
	pub const unsafe fn new(
		lib: &'static (dyn Resolve + Sync),
		name: &'static str,
		arg_bytes: usize,
	) -> Self {
		Self {
			lib,
			name,
			arg_bytes,
			_marker: PhantomData,
		}
	}

	/// The exported name, as it appears in the export table.
	#[inline]
	pub const fn name(&self) -> &'static str {
		self.name
	}

	/// Stack bytes taken by the declared arguments on this target.
	#[inline]
	pub const fn arg_bytes(&self) -> usize {
		self.arg_bytes
	}

	/// Resolves the function, opening the library first if needed.
	///
	/// On 32-bit x86 a stdcall-decorated name is checked against the declared
	/// arguments before anything is looked up.
	///
	/// The returned pointer is only valid while the library stays open.
	pub fn get(&self) -> Result<F> {
		#[allow(clippy::let_unit_value)]
		let _ = Self::ASSERT_SIZE;
		if cfg!(target_arch = "x86") && !sym::matches_decoration(self.name, self.arg_bytes) {
			return Err(Error::new(Some(self.name), ErrorKind::SigMismatch));
		}
		let addr = self.lib.resolve(self.name)?;
		debug!("bound `{}` at {addr:p}", self.name);
		// `AssertSize` asserts sizeof(F) = sizeof(SymAddr), so `transmute_copy` is safe.
		Ok(unsafe { mem::transmute_copy::<SymAddr, F>(&addr) })
	}
}

impl<F: 'static> std::fmt::Debug for Import<F> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Import")
			.field("name", &self.name)
			.field("arg_bytes", &self.arg_bytes)
			.finish_non_exhaustive()
	}
}
