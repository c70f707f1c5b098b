use std::io::Cursor;

use lscan::img::Machine;

fn pe(machine: u16) -> Vec<u8> {
	let mut image = vec![0u8; 0x86];
	image[..2].copy_from_slice(b"MZ");
	image[0x3c..0x40].copy_from_slice(&0x80u32.to_le_bytes());
	image[0x80..0x84].copy_from_slice(b"PE\0\0");
	image[0x84..0x86].copy_from_slice(&machine.to_le_bytes());
	image
}

fn elf(data: u8, machine: [u8; 2]) -> Vec<u8> {
	let mut image = vec![0u8; 64];
	image[..4].copy_from_slice(&[0x7f, b'E', b'L', b'F']);
	image[4] = 1;
	image[5] = data;
	image[18..20].copy_from_slice(&machine);
	image
}

fn machine_of(image: Vec<u8>) -> Option<Machine> {
	Machine::read(&mut Cursor::new(image)).unwrap()
}

#[test]
fn test_pe_machine() {
	assert_eq!(machine_of(pe(0x014c)), Some(Machine::X86));
	assert_eq!(machine_of(pe(0x8664)), Some(Machine::X86_64));
	assert_eq!(machine_of(pe(0xaa64)), Some(Machine::AArch64));
	assert_eq!(machine_of(pe(0x1234)), Some(Machine::Other(0x1234)));
}

#[test]
fn test_pe_malformed() {
	let mut bad_signature = pe(0x014c);
	bad_signature[0x80] = b'N';
	assert_eq!(machine_of(bad_signature), None);

	let mut truncated = pe(0x014c);
	truncated.truncate(0x82);
	assert_eq!(machine_of(truncated), None);

	assert_eq!(machine_of(b"MZ".to_vec()), None);
}

#[test]
fn test_elf_machine() {
	assert_eq!(machine_of(elf(1, [62, 0])), Some(Machine::X86_64));
	assert_eq!(machine_of(elf(1, [3, 0])), Some(Machine::X86));
	assert_eq!(machine_of(elf(2, [0, 40])), Some(Machine::Arm));
	assert_eq!(machine_of(elf(1, [183, 0])), Some(Machine::AArch64));
}

#[test]
fn test_not_an_image() {
	assert_eq!(machine_of(b"INPUT(libc.so.6)".to_vec()), None);
	assert_eq!(machine_of(Vec::new()), None);
}

#[test]
fn test_is_loadable() {
	assert!(Machine::Other(0x1234).is_loadable());
	if let Some(host) = Machine::host() {
		assert!(host.is_loadable());
	}
}

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
#[test]
fn test_current_exe_machine() {
	let exe = std::env::current_exe().unwrap();
	if cfg!(any(windows, target_os = "linux")) {
		assert_eq!(Machine::of_file(exe).unwrap(), Machine::host());
	}
}

// the 32-bit SDK into a 64-bit process
#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
#[test]
fn test_refuse_x86_image() {
	use lscan::{ErrorKind, Library, System};

	let path = std::env::temp_dir().join(format!("lscan-x86-{}.dll", std::process::id()));
	std::fs::write(&path, pe(0x014c)).unwrap();
	let result = Library::<System>::open(&path);
	std::fs::remove_file(&path).unwrap();
	assert_eq!(result.unwrap_err().kind(), ErrorKind::ArchMismatch);
}

// names the loader searches for may resolve to another file than the one read here
#[test]
fn test_searched_names_are_not_read() {
	let name = "lscan-no-such-image.dll";
	assert!(Machine::of_file(name).is_err());
	assert_eq!(Machine::of_library(name).unwrap(), None);
	#[cfg(windows)]
	assert_eq!(
		Machine::of_library("resources\\lscan-no-such-image.dll").unwrap(),
		None
	);
	#[cfg(unix)]
	assert!(Machine::of_library("resources/lscan-no-such-image.dll").is_err());

	let path = std::env::temp_dir().join(format!("lscan-searched-{}.dll", std::process::id()));
	std::fs::write(&path, pe(0x014c)).unwrap();
	let machine = Machine::of_library(&path);
	std::fs::remove_file(&path).unwrap();
	assert_eq!(machine.unwrap(), Some(Machine::X86));
}
