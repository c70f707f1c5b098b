// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

use std::io;
use std::path::{Path, PathBuf};

use log::{debug, trace, warn};

use crate::img::Machine;
use crate::{Error, ErrorKind, Loader, Result, SymAddr, System};

/// An open shared library. The library is closed when this is dropped.
#[derive(Debug)]
pub struct Library<L: Loader = System> {
	path: PathBuf,
	// only `None` while closing
	inner: Option<L>,
}

impl<L: Loader> Library<L> {
	/// Opens the shared library at `path`.
	///
	/// If `path` names a readable PE or ELF file its machine type is checked first,
	/// so that e.g. a 32-bit DLL is refused by a 64-bit process. Paths the system
	/// loader searches for are not checked here, see [`Machine::of_library`].
	///
	/// # Errors
	///
	/// [`ErrorKind::ArchMismatch`] if the image is for another machine, otherwise
	/// [`ErrorKind::LibNotFound`] with the loader's error as the source.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let subject = path.to_string_lossy();
		debug!("opening library `{subject}`");

		// only read what the loader will open verbatim, a searched name may resolve elsewhere
		match Machine::of_library(path) {
			Ok(Some(machine)) if !machine.is_loadable() => {
				warn!("`{subject}` is built for {machine:?}, this process is {:?}", Machine::host());
				return Err(Error::new(Some(&*subject), ErrorKind::ArchMismatch));
			}
			Ok(_) => (),
			Err(e) => trace!("no machine type for `{subject}`: {e}"),
		}

		match unsafe { L::open(path.as_os_str()) } {
			Ok(inner) => Ok(Self {
				path: path.to_owned(),
				inner: Some(inner),
			}),
			Err(e) => {
				let kind = if L::is_bad_format(&e) {
					ErrorKind::ArchMismatch
				} else {
					ErrorKind::LibNotFound
				};
				Err(Error::new(Some(&*subject), kind).with_source(e))
			}
		}
	}

	/// The path the library was opened with.
	#[inline]
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Retrieves the raw address of `name`. The name must match the export table exactly,
	/// decoration included.
	pub fn symbol(&self, name: &str) -> Result<SymAddr> {
		let Some(ref inner) = self.inner else {
			return Err(Error::new(Some(name), ErrorKind::SymNotFound));
		};
		match unsafe { inner.symbol(name) } {
			Ok(addr) => {
				trace!("resolved `{name}` at {addr:p} in `{}`", self.path.display());
				Ok(addr)
			}
			Err(e) => Err(Error::new(Some(name), ErrorKind::SymNotFound).with_source(e)),
		}
	}

	/// Closes the library, reporting any error the loader gives.
	///
	/// # Safety
	///
	/// No address or function pointer obtained from this library may be used afterwards.
	pub unsafe fn close(mut self) -> io::Result<()> {
		match self.inner.take() {
			Some(inner) => {
				debug!("closing library `{}`", self.path.display());
				inner.close()
			}
			None => Ok(()),
		}
	}
}

impl<L: Loader> Drop for Library<L> {
	fn drop(&mut self) {
		if let Some(inner) = self.inner.take() {
			if let Err(e) = unsafe { inner.close() } {
				warn!("failed to close `{}`: {e}", self.path.display());
			}
		}
	}
}
