use hustler_logger::{LevelFilter, Logger, LoggerError};

#[test]
fn second_init_reports_existing_subscriber() {
    let first = Logger::builder()
        .name("registration-console")
        .level(LevelFilter::WARN)
        .init()
        .expect("first init should succeed");
    assert!(first.guard().is_none(), "console-only logger should not hold a file guard");

    let err = Logger::builder()
        .name("registration-console-again")
        .init()
        .expect_err("second init should fail");

    assert!(matches!(err, LoggerError::Subscriber { .. }));
}
