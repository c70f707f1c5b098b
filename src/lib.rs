// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
//! Run-time binding to the L SCAN Essentials scanner SDK.
//!
//! The SDK is opened lazily from [`essentials::LIBRARY_PATHS`], its exports are
//! declared with [`import`], and [`device_count`] performs the one call this crate
//! cares about.
#![allow(clippy::missing_safety_doc)]

// lets `#[import]` output refer to `::lscan` from inside this crate too.
extern crate self as lscan;

pub mod error;
pub mod essentials;
pub mod img;
mod imports;
mod library;
mod loader;
mod os;
mod out;
mod sealed;
pub mod sym;
pub mod sync;

pub use error::{Error, ErrorKind};
pub use essentials::{device_count, query_device_count, report, DeviceCount, Reply, Status};
pub use imports::{Import, Resolve};
pub use library::Library;
pub use loader::{Loader, SymAddr, System};
pub use lscan_macro::import;
pub use out::Out;

/// The result of a lscan function.
pub type Result<T> = std::result::Result<T, Error>;
