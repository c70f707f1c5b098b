use std::path::PathBuf;
use std::process::Command;

// a directory whose `resources/` and `../resources/` do not hold the SDK
fn empty_dir() -> PathBuf {
	let dir = std::env::temp_dir()
		.join(format!("lscan-cli-{}", std::process::id()))
		.join("run");
	std::fs::create_dir_all(&dir).unwrap();
	dir
}

#[test]
fn test_failure_reaches_stderr_with_logging_off() {
	let dir = empty_dir();
	let output = Command::new(env!("CARGO_BIN_EXE_lscan"))
		.current_dir(&dir)
		.env("RUST_LOG", "off")
		.output()
		.unwrap();
	std::fs::remove_dir_all(dir.parent().unwrap()).unwrap();

	assert!(!output.status.success());
	assert!(output.stdout.is_empty());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("not found"), "stderr: {stderr}");
	assert!(stderr.contains("LScanEssentials-x86.dll"), "stderr: {stderr}");
}
