// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use std::error::Error;
use std::io;
use std::process::ExitCode;

use env_logger::Env;
use log::{error, warn};

use lscan::essentials::LSCAN_ESSENTIALS;

fn run() -> Result<(), Box<dyn Error>> {
	let count = lscan::device_count()?;
	lscan::report(&mut io::stdout().lock(), count)?;
	Ok(())
}

fn main() -> ExitCode {
	env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

	let result = run();

	if LSCAN_ESSENTIALS.is_open() {
		// nothing resolved inside `run` is used past this point.
		if let Err(e) = unsafe { LSCAN_ESSENTIALS.close() } {
			warn!("failed to unload the SDK: {e}");
		}
	}

	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			error!("{e}");
			// stderr gets the failure even when `RUST_LOG` filters the record out
			eprintln!("lscan: {e}");
			ExitCode::FAILURE
		}
	}
}
