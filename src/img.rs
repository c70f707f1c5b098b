// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
//! Machine type detection for executable images on disk.
//!
//! Only the headers are read; the image is never mapped. This lets a 32-bit library
//! headed for a 64-bit process be rejected with a clear error instead of whatever
//! the dynamic linker decides to say.

use std::io::{self, Read, Seek, SeekFrom};
use std::{fs, path::Path};

const IMAGE_FILE_MACHINE_I386: u16 = 0x014c;
const IMAGE_FILE_MACHINE_ARMNT: u16 = 0x01c4;
const IMAGE_FILE_MACHINE_AMD64: u16 = 0x8664;
const IMAGE_FILE_MACHINE_ARM64: u16 = 0xaa64;

const EM_386: u16 = 3;
const EM_ARM: u16 = 40;
const EM_X86_64: u16 = 62;
const EM_AARCH64: u16 = 183;

const EI_MAG: [u8; 4] = [0x7f, b'E', b'L', b'F'];
const ELFDATA2MSB: u8 = 2;
// offset of `e_lfanew` in IMAGE_DOS_HEADER
const E_LFANEW: usize = 0x3c;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Machine {
	X86,
	X86_64,
	Arm,
	AArch64,
	/// Raw machine field of a PE or ELF header nobody here cares about.
	Other(u16),
}

impl Machine {
	/// The machine this process was compiled for.
	pub const fn host() -> Option<Self> {
		if cfg!(target_arch = "x86") {
			Some(Self::X86)
		} else if cfg!(target_arch = "x86_64") {
			Some(Self::X86_64)
		} else if cfg!(target_arch = "arm") {
			Some(Self::Arm)
		} else if cfg!(target_arch = "aarch64") {
			Some(Self::AArch64)
		} else {
			None
		}
	}

	fn from_pe(raw: u16) -> Self {
		match raw {
			IMAGE_FILE_MACHINE_I386 => Self::X86,
			IMAGE_FILE_MACHINE_AMD64 => Self::X86_64,
			IMAGE_FILE_MACHINE_ARMNT => Self::Arm,
			IMAGE_FILE_MACHINE_ARM64 => Self::AArch64,
			other => Self::Other(other),
		}
	}

	fn from_elf(raw: u16) -> Self {
		match raw {
			EM_386 => Self::X86,
			EM_X86_64 => Self::X86_64,
			EM_ARM => Self::Arm,
			EM_AARCH64 => Self::AArch64,
			other => Self::Other(other),
		}
	}

	/// Reads the machine type from a PE or ELF image.
	///
	/// Returns `Ok(None)` if the data is neither, or is truncated.
	pub fn read<R: Read + Seek>(reader: &mut R) -> io::Result<Option<Self>> {
		reader.seek(SeekFrom::Start(0))?;
		let mut head = Vec::with_capacity(64);
		reader.by_ref().take(64).read_to_end(&mut head)?;

		if head.starts_with(b"MZ") {
			if head.len() < E_LFANEW + 4 {
				return Ok(None);
			}
			let mut lfanew = [0u8; 4];
			lfanew.copy_from_slice(&head[E_LFANEW..E_LFANEW + 4]);
			reader.seek(SeekFrom::Start(u32::from_le_bytes(lfanew).into()))?;

			// "PE\0\0" followed by IMAGE_FILE_HEADER::Machine
			let mut nt = [0u8; 6];
			match reader.read_exact(&mut nt) {
				Ok(()) => (),
				Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
				Err(e) => return Err(e),
			}
			if nt[..4] != *b"PE\0\0" {
				return Ok(None);
			}
			Ok(Some(Self::from_pe(u16::from_le_bytes([nt[4], nt[5]]))))
		} else if head.starts_with(&EI_MAG) {
			if head.len() < 20 {
				return Ok(None);
			}
			let raw = [head[18], head[19]];
			let machine = if head[5] == ELFDATA2MSB {
				u16::from_be_bytes(raw)
			} else {
				u16::from_le_bytes(raw)
			};
			Ok(Some(Self::from_elf(machine)))
		} else {
			Ok(None)
		}
	}

	/// Reads the machine type of the image at `path`.
	pub fn of_file<P: AsRef<Path>>(path: P) -> io::Result<Option<Self>> {
		let mut file = fs::File::open(path)?;
		Self::read(&mut file)
	}

	/// Reads the machine type of the image the system loader opens for `path`.
	///
	/// Returns `Ok(None)` without touching the disk when the loader searches for
	/// `path` rather than opening it as given: a bare file name on every platform,
	/// and any relative path on Windows, where `LoadLibraryExW` walks the DLL
	/// search order before the working directory.
	pub fn of_library<P: AsRef<Path>>(path: P) -> io::Result<Option<Self>> {
		let path = path.as_ref();
		if is_searched(path) {
			return Ok(None);
		}
		Self::of_file(path)
	}

	/// Whether an image for this machine can be loaded into the current process.
	///
	/// Unknown machines are given the benefit of the doubt.
	pub fn is_loadable(self) -> bool {
		match (self, Self::host()) {
			(Self::Other(_), _) | (_, None) => true,
			(image, Some(host)) => image == host,
		}
	}
}

// dlopen takes any name containing a slash as a path
fn is_searched(path: &Path) -> bool {
	if cfg!(windows) {
		path.is_relative()
	} else {
		path.parent().map_or(true, |dir| dir.as_os_str().is_empty())
	}
}
