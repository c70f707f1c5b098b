#![cfg(all(target_os = "linux", target_env = "gnu"))]

use std::ffi::c_int;

use lscan::sync::LibLock;
use lscan::{import, ErrorKind, Library, System};

static LIBC: LibLock = LibLock::new(&["libc.so.6"]);

#[import(library = LIBC)]
extern "C" {
	fn abs(x: c_int) -> c_int;
	fn atoi(s: *const std::ffi::c_char) -> c_int;
}

#[test]
fn test_linux_libc() {
	let abs_fn = abs.get().unwrap();
	let atoi_fn = atoi.get().unwrap();
	assert_eq!(unsafe { abs_fn(-5) }, 5);
	assert_eq!(unsafe { atoi_fn(b"42\0".as_ptr().cast()) }, 42);
	assert!(LIBC.is_open());
}

#[test]
fn test_linux_symbol_not_found() {
	let lib = Library::<System>::open("libc.so.6").unwrap();
	let err = lib.symbol("_LSCAN_Main_GetDeviceCount@4").unwrap_err();
	assert_eq!(err.kind(), ErrorKind::SymNotFound);
	println!("{err}");
}

#[test]
fn test_linux_close() {
	let lib = Library::<System>::open("libc.so.6").unwrap();
	assert!(lib.symbol("abs").is_ok());
	unsafe { lib.close() }.unwrap();
}
