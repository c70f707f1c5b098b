// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

use std::path::{Path, PathBuf};
use std::{io, sync};

use log::{debug, info, warn};

use crate::{Error, ErrorKind, Library, Loader, Result, SymAddr, System};

/// A process wide, lazily opened library.
///
/// The library is acquired either on first use, from a list of fallback paths, or
/// explicitly with [`open`](LibLock::open). It stays mapped until [`close`](LibLock::close).
/// All access goes through one mutex, so calls are serialized when the vendor library
/// makes no thread-safety promises.
#[derive(Debug)]
pub struct LibLock<'a, L: Loader = System> {
	libs: &'a [&'a str],
	hlib: sync::Mutex<Option<Library<L>>>,
}

impl<'a, L: Loader> LibLock<'a, L> {
	/// Constructs a new `LibLock`.
	///
	/// This function accepts a slice of paths the LibLock will attempt to load from
	/// by priority (where `0..n`, index `0` is highest, and `n` is lowest), but only the first
	/// library successfully loaded will be used. This covers a library that may live in
	/// more than one directory relative to where the process is started.
	///
	/// *Note: symbols must be the same in all fallback paths.*
	///
	/// # Examples
	///
	/// ```rust
	/// # use lscan::*;
	/// static ESSENTIALS: sync::LibLock = sync::LibLock::new(&["LScanEssentials-x86.dll"]);
	/// ```
	#[inline]
	pub const fn new(libs: &'a [&'a str]) -> Self {
		Self {
			libs,
			hlib: sync::Mutex::new(None),
		}
	}

	// the guarded state is a plain `Option`, so a poisoned lock is still consistent.
	fn lock(&self) -> sync::MutexGuard<'_, Option<Library<L>>> {
		self.hlib.lock().unwrap_or_else(sync::PoisonError::into_inner)
	}

	/// Opens the library from `path` now instead of waiting for the first symbol lookup.
	///
	/// Does nothing if a library is already open.
	pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let mut lock = self.lock();
		match *lock {
			Some(ref lib) => {
				if lib.path() != path.as_ref() {
					warn!(
						"`{}` is already open, ignoring `{}`",
						lib.path().display(),
						path.as_ref().display()
					);
				}
			}
			None => *lock = Some(Library::open(path)?),
		}
		Ok(())
	}

	fn open_fallback(&self) -> Result<Library<L>> {
		let mut last: Option<Error> = None;
		for path in self.libs {
			match Library::open(path) {
				Ok(lib) => return Ok(lib),
				Err(e) => {
					debug!("{e}");
					// a wrong architecture says more than a missing file does.
					if !matches!(last, Some(ref err) if err.kind() == ErrorKind::ArchMismatch) {
						last = Some(e);
					}
				}
			}
		}
		match last {
			Some(e) if self.libs.len() == 1 || e.kind() == ErrorKind::ArchMismatch => Err(e),
			_ => Err(Error::new(
				Some(self.libs.join(", ").as_str()),
				ErrorKind::ListNotFound,
			)),
		}
	}

	/// May block if another thread is currently using the library.
	///
	/// Opens the library if it is not open yet.
	///
	/// # Errors
	///
	/// If the library can't be opened, or the requested symbol does not exist in it.
	pub fn symbol(&self, name: &str) -> Result<SymAddr> {
		let mut lock = self.lock();
		if lock.is_none() {
			*lock = Some(self.open_fallback()?);
		}
		match *lock {
			Some(ref lib) => lib.symbol(name),
			None => Err(Error::new(Some(name), ErrorKind::SymNotFound)),
		}
	}

	/// Whether the library is currently open.
	pub fn is_open(&self) -> bool {
		self.lock().is_some()
	}

	/// The path of the open library, if any.
	pub fn path(&self) -> Option<PathBuf> {
		self.lock().as_ref().map(|lib| lib.path().to_owned())
	}

	/// Closes the library. A later symbol lookup opens it again.
	///
	/// # Safety
	///
	/// Function pointers previously resolved through this lock must not be called afterwards.
	///
	/// # Errors
	///
	/// This may error if the library is not open, or the loader fails to close it.
	pub unsafe fn close(&self) -> io::Result<()> {
		match self.lock().take() {
			Some(lib) => {
				let path = lib.path().to_owned();
				lib.close()?;
				info!("unloaded `{}`", path.display());
				Ok(())
			}
			None => Err(io::Error::new(
				io::ErrorKind::InvalidInput,
				"`LibLock` is uninitialized.",
			)),
		}
	}
}
