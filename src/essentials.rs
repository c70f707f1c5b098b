// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
//! The L SCAN Essentials SDK.
//!
//! The SDK ships as a 32-bit windows DLL whose functions are all `WINAPI` (stdcall)
//! and return a status code, handing their real results back through out-parameters.

use std::ffi::c_int;
use std::{fmt, io};

use log::{debug, warn};

use crate::sync::LibLock;
use crate::{import, Error, ErrorKind, Import, Out, Result};

/// Where the SDK is looked for, relative to the working directory.
pub const LIBRARY_PATHS: &[&str] = &[
	"resources/LScanEssentials-x86.dll",
	"../resources/LScanEssentials-x86.dll",
];

/// The SDK library, opened on first use.
pub static LSCAN_ESSENTIALS: LibLock = LibLock::new(LIBRARY_PATHS);

pub type GetDeviceCountFn = unsafe extern "system" fn(*mut c_int) -> c_int;

#[import(library = LSCAN_ESSENTIALS)]
extern "system" {
	/// Retrieve count of connected L SCAN live scanner devices.
	#[link_name = "_LSCAN_Main_GetDeviceCount@4"]
	pub fn LSCAN_Main_GetDeviceCount(device_count: *mut c_int) -> c_int;
}

/// Status code returned by every SDK function.
///
/// Only `0` is known to mean success; everything else is passed through as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Status(c_int);

impl Status {
	pub const OK: Self = Self(0);

	#[inline]
	pub const fn new(code: c_int) -> Self {
		Self(code)
	}

	#[inline]
	pub const fn code(self) -> i32 {
		self.0
	}

	#[inline]
	pub const fn is_ok(self) -> bool {
		self.0 == Self::OK.0
	}
}

impl fmt::Display for Status {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Number of connected scanners.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct DeviceCount(c_int);

impl DeviceCount {
	#[inline]
	pub const fn new(count: c_int) -> Self {
		Self(count)
	}

	#[inline]
	pub const fn get(self) -> i32 {
		self.0
	}
}

impl fmt::Display for DeviceCount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Everything a call hands back: the status and the out-parameter as the call left it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Reply<T> {
	symbol: &'static str,
	status: Status,
	value: T,
}

impl<T: Copy> Reply<T> {
	#[inline]
	pub const fn status(&self) -> Status {
		self.status
	}

	/// The out-parameter, whether the call succeeded or not.
	///
	/// After a failed call this is usually the value the buffer started with.
	#[inline]
	pub fn value(&self) -> T {
		self.value
	}

	#[inline]
	pub fn into_parts(self) -> (Status, T) {
		(self.status, self.value)
	}

	/// Turns a non-zero status into an [`ErrorKind::Status`] error.
	pub fn check(self) -> Result<T> {
		if self.status.is_ok() {
			Ok(self.value)
		} else {
			Err(Error::new(
				Some(self.symbol),
				ErrorKind::Status(self.status.code()),
			))
		}
	}
}

/// Calls `LSCAN_Main_GetDeviceCount` through `import` and returns what came back.
///
/// The status is not inspected here: on failure the count is the zero the buffer
/// was initialised with. Use [`Reply::check`] or [`device_count`] to treat a
/// non-zero status as an error.
///
/// # Errors
///
/// Only if the function can't be resolved.
pub fn query_device_count(import: &Import<GetDeviceCountFn>) -> Result<Reply<DeviceCount>> {
	let get_device_count = import.get()?;
	let mut device_count = Out::new(0);
	// `Import` vouches for the signature and the slot outlives the call.
	let code = device_count.exchange(|ptr| unsafe { get_device_count(ptr) });
	let status = Status::new(code);
	if status.is_ok() {
		debug!("`{}` wrote {}", import.name(), device_count.get());
	} else {
		warn!("`{}` returned status {status}", import.name());
	}
	Ok(Reply {
		symbol: import.name(),
		status,
		value: DeviceCount(device_count.into_inner()),
	})
}

/// Number of connected scanners, read from the SDK every time it is called.
///
/// # Errors
///
/// If the SDK can't be loaded or resolved, or returns a non-zero status.
///
/// ```no_run
/// let count = lscan::device_count()?;
/// println!("{count}");
/// # Ok::<(), lscan::Error>(())
/// ```
pub fn device_count() -> Result<DeviceCount> {
	query_device_count(&LSCAN_Main_GetDeviceCount)?.check()
}

/// Label that precedes the count in [`report`].
pub const REPORT_LABEL: &str = "device count: ";

/// Writes `device count: <n>` as one line.
pub fn report<W: io::Write>(out: &mut W, count: DeviceCount) -> io::Result<()> {
	writeln!(out, "{REPORT_LABEL}{count}")
}
