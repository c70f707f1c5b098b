#![cfg(windows)]

use lscan::sync::LibLock;
use lscan::{import, ErrorKind, Library, System};

static KERNEL32: LibLock = LibLock::new(&["Kernel32.dll"]);

#[import(library = KERNEL32)]
extern "system" {
	fn SetLastError(code: u32);
	fn GetLastError() -> u32;
}

#[test]
fn test_win32_kernel32() {
	let set_last_error = SetLastError.get().unwrap();
	let get_last_error = GetLastError.get().unwrap();
	unsafe {
		set_last_error(53);
		assert_eq!(get_last_error(), 53);
	}
}

#[test]
fn test_win32_symbol_not_found() {
	let lib = Library::<System>::open("Kernel32.dll").unwrap();
	let err = lib.symbol("_LSCAN_Main_GetDeviceCount@4").unwrap_err();
	assert_eq!(err.kind(), ErrorKind::SymNotFound);
}

#[cfg(target_arch = "x86")]
#[test]
#[ignore = "needs the L SCAN Essentials SDK in resources/ and its scanner driver"]
fn test_sdk_device_count() {
	let count = lscan::device_count().unwrap();
	assert!(count.get() >= 0);
	unsafe { lscan::essentials::LSCAN_ESSENTIALS.close() }.unwrap();
}
