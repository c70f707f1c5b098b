// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

use std::{ffi, io};

use crate::os;

/// Raw address of an exported symbol. Cast it to the function pointer type it really is.
pub type SymAddr = *const ();

/// Used to specify the run-time linker loader for [`Library`](crate::Library) and [`sync::LibLock`](crate::sync::LibLock).
/// `Loader` can also be used to make custom loaders, e.g. a stub standing in for a vendor library.
///
/// # Safety
///
/// Addresses returned by `symbol` must stay valid until `close` is called.
pub unsafe trait Loader: Send + Sized {
	/// Attempts to open a shared library.
	///
	/// Returns `Ok` if success, otherwise `Err`.
	unsafe fn open(path: &ffi::OsStr) -> io::Result<Self>;
	/// Retrieves the raw address of `symbol`.
	unsafe fn symbol(&self, symbol: &str) -> io::Result<SymAddr>;
	/// Releases the library. Every address handed out by `symbol` dangles afterwards.
	unsafe fn close(self) -> io::Result<()>;
	/// Whether an error from [`open`](Loader::open) means the image targets another machine.
	fn is_bad_format(_err: &io::Error) -> bool {
		false
	}
}

/// The system's run-time linker: `dlopen` on unix, `LoadLibraryExW` on windows.
#[derive(Debug)]
pub struct System(os::Handle);

// module handles are process wide.
unsafe impl Send for System {}

unsafe impl Loader for System {
	/// If successful, increments the reference count of the shared library.
	unsafe fn open(path: &ffi::OsStr) -> io::Result<Self> {
		os::dylib_open(path).map(Self)
	}

	unsafe fn symbol(&self, symbol: &str) -> io::Result<SymAddr> {
		os::dylib_symbol(self.0, symbol).map(|addr| addr.cast())
	}

	/// Decrements the reference count. When it hits zero the library is unloaded.
	unsafe fn close(self) -> io::Result<()> {
		os::dylib_close(self.0)
	}

	#[inline]
	fn is_bad_format(err: &io::Error) -> bool {
		os::is_bad_format(err)
	}
}
