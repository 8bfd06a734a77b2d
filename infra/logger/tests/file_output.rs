use hustler_logger::{LevelFilter, Logger};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn json_file_output_is_written_and_flushed_on_drop() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let log_dir = tmp.path().join("nested").join("logs");

    let logger = Logger::builder()
        .name("registration-file-output")
        .console(false)
        .directory(&log_dir)
        .json(true)
        .level(LevelFilter::INFO)
        .init()?;

    assert!(logger.guard().is_some(), "file output should hold a worker guard");
    tracing::info!(step = "otp", "moved to otp step");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("a .log file should exist");

    let contents = fs::read_to_string(log_file)?;
    let line = contents.lines().find(|l| l.contains("moved to otp step")).expect("event logged");
    let parsed: serde_json::Value = serde_json::from_str(line)?;
    assert_eq!(parsed["fields"]["step"], "otp");

    Ok(())
}
