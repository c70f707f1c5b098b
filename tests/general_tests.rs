use lscan::sync::LibLock;
use lscan::{report, DeviceCount, Error, ErrorKind, Library, System};

#[test]
fn test_missing_library() {
	let err = Library::<System>::open("definitely/not/here/LScanEssentials-x86.dll").unwrap_err();
	assert_eq!(err.kind(), ErrorKind::LibNotFound);
	assert_eq!(
		err.subject(),
		Some("definitely/not/here/LScanEssentials-x86.dll")
	);
	assert!(std::error::Error::source(&err).is_some());
	println!("{err}");
}

#[test]
fn test_missing_fallback_list() {
	static LIBS: LibLock = LibLock::new(&["nope/a.dll", "nope/b.dll"]);
	let err = LIBS.symbol("_LSCAN_Main_GetDeviceCount@4").unwrap_err();
	assert_eq!(err.kind(), ErrorKind::ListNotFound);
	assert!(!LIBS.is_open());
}

#[test]
fn test_close_uninitialized() {
	static LIBS: LibLock = LibLock::new(&["nope/a.dll"]);
	let err = unsafe { LIBS.close() }.unwrap_err();
	assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}

// without the vendor DLL next to the process this has to fail cleanly.
#[cfg(not(all(windows, target_arch = "x86")))]
#[test]
fn test_device_count_without_sdk() {
	let err = lscan::device_count().unwrap_err();
	assert!(matches!(
		err.kind(),
		ErrorKind::ListNotFound | ErrorKind::ArchMismatch | ErrorKind::LibNotFound
	));
}

#[test]
fn test_report_format() {
	let mut out = Vec::new();
	report(&mut out, DeviceCount::new(12)).unwrap();
	assert_eq!(out, b"device count: 12\n");

	let mut out = Vec::new();
	report(&mut out, DeviceCount::default()).unwrap();
	assert_eq!(out, b"device count: 0\n");
}

#[test]
fn test_error_display() {
	let err = Error::new(Some("_LSCAN_Main_GetDeviceCount@4"), ErrorKind::Status(-1));
	assert_eq!(
		err.to_string(),
		"`_LSCAN_Main_GetDeviceCount@4` returned status code -1"
	);
	assert_eq!(err.status(), Some(-1));

	let err = Error::new(Some("LScanEssentials-x86.dll"), ErrorKind::ArchMismatch);
	assert_eq!(
		err.to_string(),
		"library `LScanEssentials-x86.dll` was built for another architecture"
	);
	assert_eq!(err.status(), None);
}
