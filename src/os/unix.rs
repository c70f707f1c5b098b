// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use super::Handle;
use std::os::unix::ffi::OsStrExt;
use std::{ffi, io};

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
use std::sync;

// `dlerror` keeps its message in a global on some libcs.
#[cfg(not(any(target_os = "linux", target_os = "macos")))]
#[inline]
fn dylib_guard<'a>() -> sync::LockResult<sync::MutexGuard<'a, ()>> {
	static LOCK: sync::Mutex<()> = sync::Mutex::new(());
	LOCK.lock()
}

#[cfg(any(target_os = "linux", target_os = "macos"))]
#[inline(always)]
fn dylib_guard() {}

unsafe fn dylib_error() -> io::Error {
	let msg = libc::dlerror();
	if msg.is_null() {
		io::Error::new(io::ErrorKind::Other, "unknown dynamic linker error")
	} else {
		let e = ffi::CStr::from_ptr(msg).to_string_lossy().into_owned();
		io::Error::new(io::ErrorKind::Other, e)
	}
}

unsafe fn map_result<F>(f: F) -> io::Result<*mut ffi::c_void>
where
	F: FnOnce() -> *mut ffi::c_void,
{
	let _lock = dylib_guard();
	let _ = libc::dlerror(); // clear existing errors
	let handle: *mut ffi::c_void = f();
	if handle.is_null() {
		Err(dylib_error())
	} else {
		Ok(handle)
	}
}

pub(crate) unsafe fn dylib_open(path: &ffi::OsStr) -> io::Result<Handle> {
	let c_str = ffi::CString::new(path.as_bytes())?;
	map_result(|| libc::dlopen(c_str.as_ptr(), libc::RTLD_NOW | libc::RTLD_LOCAL))
}

pub(crate) unsafe fn dylib_symbol(lib_handle: Handle, name: &str) -> io::Result<*const ffi::c_void> {
	let c_str = ffi::CString::new(name)?;
	map_result(|| libc::dlsym(lib_handle, c_str.as_ptr())).map(|p| p.cast_const())
}

pub(crate) unsafe fn dylib_close(lib_handle: Handle) -> io::Result<()> {
	let _lock = dylib_guard();
	let _ = libc::dlerror(); // clear existing errors
	if libc::dlclose(lib_handle) != 0 {
		Err(dylib_error())
	} else {
		Ok(())
	}
}

/// `dlopen` reports everything as a string, so the format check is left to [`img`](crate::img).
#[inline]
pub(crate) fn is_bad_format(_err: &io::Error) -> bool {
	false
}
