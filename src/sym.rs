// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
//! stdcall name decoration.
//!
//! 32-bit MSVC exports `int __stdcall f(int*)` as `_f@4`: a leading underscore and the
//! number of bytes the arguments take on the stack. `GetProcAddress` wants that exact string.

use std::mem;

/// Bytes one argument of type `T` takes on the stack, rounded up to 4.
///
/// Sizes are those of the current target, so only a 32-bit build agrees with the
/// decorations of a 32-bit library.
#[inline]
pub const fn arg_bytes<T>() -> usize {
	(mem::size_of::<T>() + 3) & !3
}

/// A stdcall decorated name split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration<'a> {
	pub name: &'a str,
	pub arg_bytes: usize,
}

/// Builds `_name@arg_bytes`.
pub fn decorate(name: &str, arg_bytes: usize) -> String {
	format!("_{name}@{arg_bytes}")
}

/// Splits `_name@N`. Returns `None` for anything that is not stdcall decorated.
pub fn undecorate(symbol: &str) -> Option<Decoration<'_>> {
	let (name, bytes) = symbol.strip_prefix('_')?.rsplit_once('@')?;
	if name.is_empty() || bytes.is_empty() || !bytes.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	Some(Decoration {
		name,
		arg_bytes: bytes.parse().ok()?,
	})
}

/// Whether `arg_bytes` agrees with the decoration of `symbol`.
/// Undecorated names carry no information and always match.
pub fn matches_decoration(symbol: &str, arg_bytes: usize) -> bool {
	undecorate(symbol).map_or(true, |d| d.arg_bytes == arg_bytes)
}
