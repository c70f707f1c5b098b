// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use std::{error, fmt, io};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
	/// The library could not be opened.
	LibNotFound,
	/// None of the fallback paths could be opened.
	ListNotFound,
	/// The library was built for a different machine than this process.
	ArchMismatch,
	/// The export table has no such symbol.
	SymNotFound,
	/// The declared argument bytes disagree with the stdcall decoration.
	SigMismatch,
	/// The native function returned a non-zero status code.
	Status(i32),
}

#[derive(Debug)]
pub struct Error {
	subject: Option<String>,
	kind: ErrorKind,
	source: Option<io::Error>,
}

impl Error {
	#[inline]
	pub fn new(subject: Option<&str>, kind: ErrorKind) -> Self {
		Self {
			subject: subject.map(str::to_owned),
			kind,
			source: None,
		}
	}

	#[inline]
	pub(crate) fn with_source(mut self, source: io::Error) -> Self {
		self.source = Some(source);
		self
	}

	#[inline]
	pub const fn kind(&self) -> ErrorKind {
		self.kind
	}

	/// The path or symbol the error is about, if any.
	#[inline]
	pub fn subject(&self) -> Option<&str> {
		self.subject.as_deref()
	}

	/// Returns the native status code if this is a [`ErrorKind::Status`] error.
	#[inline]
	pub const fn status(&self) -> Option<i32> {
		match self.kind {
			ErrorKind::Status(code) => Some(code),
			_ => None,
		}
	}
}

impl error::Error for Error {
	fn source(&self) -> Option<&(dyn error::Error + 'static)> {
		self.source.as_ref().map(|e| e as _)
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let subject = self.subject.as_deref().unwrap_or("?");
		match self.kind {
			ErrorKind::LibNotFound => write!(f, "library `{subject}` not found")?,
			ErrorKind::ListNotFound => write!(f, "libraries not found: {subject}")?,
			ErrorKind::ArchMismatch => {
				write!(f, "library `{subject}` was built for another architecture")?
			}
			ErrorKind::SymNotFound => write!(f, "symbol `{subject}` not found")?,
			ErrorKind::SigMismatch => {
				write!(f, "declared arguments of `{subject}` do not match its decoration")?
			}
			ErrorKind::Status(code) => write!(f, "`{subject}` returned status code {code}")?,
		}
		if let Some(ref source) = self.source {
			write!(f, ": {source}")?;
		}
		Ok(())
	}
}
