use lscan::sym::{self, Decoration};

#[test]
fn test_decorate() {
	assert_eq!(
		sym::decorate("LSCAN_Main_GetDeviceCount", 4),
		"_LSCAN_Main_GetDeviceCount@4"
	);
}

#[test]
fn test_undecorate() {
	assert_eq!(
		sym::undecorate("_LSCAN_Main_GetDeviceCount@4"),
		Some(Decoration {
			name: "LSCAN_Main_GetDeviceCount",
			arg_bytes: 4
		})
	);
	assert_eq!(
		sym::undecorate("_LSCAN_Main_GetAPIVersion@0").map(|d| d.arg_bytes),
		Some(0)
	);
	// undecorated, fastcall, and malformed names
	assert_eq!(sym::undecorate("GetLastError"), None);
	assert_eq!(sym::undecorate("@foo@8"), None);
	assert_eq!(sym::undecorate("_foo@"), None);
	assert_eq!(sym::undecorate("_@4"), None);
	assert_eq!(sym::undecorate("_foo@x4"), None);
}

#[test]
fn test_matches_decoration() {
	assert!(sym::matches_decoration("_LSCAN_Main_GetDeviceCount@4", 4));
	assert!(!sym::matches_decoration("_LSCAN_Main_GetDeviceCount@4", 8));
	assert!(sym::matches_decoration("GetLastError", 12));
}

#[test]
fn test_arg_bytes() {
	assert_eq!(sym::arg_bytes::<u8>(), 4);
	assert_eq!(sym::arg_bytes::<u16>(), 4);
	assert_eq!(sym::arg_bytes::<i32>(), 4);
	assert_eq!(sym::arg_bytes::<u64>(), 8);
	assert_eq!(sym::arg_bytes::<()>(), 0);
	assert_eq!(
		sym::arg_bytes::<*mut i32>(),
		std::mem::size_of::<usize>().max(4)
	);
}
