//! File sink attachment

use assert_matches::assert_matches;
use distlog_context::SingleProcessContext;
use distlog_context_mock::StaticContext;
use distlog_logger::test_support::CaptureBuffer;
use distlog_logger::*;
use std::fs;
use tempfile::TempDir;

fn registry(context: impl ParallelContext) -> (LoggerRegistry, CaptureBuffer) {
    let console = CaptureBuffer::new();
    let registry = LoggerRegistry::with_config(context, console.config()).unwrap();
    (registry, console)
}

#[test]
fn test_rank_zero_writes_file_and_console() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("x").join("log.txt");
    let (registry, console) = registry(StaticContext::new().with_global(0, 4));
    let logger = registry.get_or_create("train");

    let attached = logger
        .attach_file_sink(&path, FileSinkOptions::default())
        .unwrap();
    assert_eq!(attached, FileAttach::Attached);

    let line = line!() + 1;
    info!(logger, "step 1");

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("train - INFO - "));
    assert!(lines[0].ends_with(&format!(
        "[file_sink.rs, {line}, test_rank_zero_writes_file_and_console] step 1"
    )));

    // The console copy uses the same format as the file
    assert_eq!(console.lines(), vec![lines[0].to_string()]);
}

#[test]
fn test_non_zero_rank_creates_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("x").join("log.txt");
    let (registry, console) = registry(StaticContext::new().with_global(3, 4));
    let logger = registry.get_or_create("train");

    let attached = logger
        .attach_file_sink(&path, FileSinkOptions::default())
        .unwrap();

    assert_eq!(attached, FileAttach::SkippedRank(3));
    assert!(!path.exists());
    assert!(!path.parent().unwrap().exists());
    assert!(logger.propagates());
    assert_eq!(logger.sink_count(), 0);

    logger.info("still on the console");
    assert_eq!(console.len(), 1);
}

#[test]
fn test_uninitialized_global_group_attaches() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("single.log");
    let (registry, _console) = registry(SingleProcessContext);
    let logger = registry.get_or_create("single");

    let attached = logger
        .attach_file_sink(&path, FileSinkOptions::default())
        .unwrap();

    assert_eq!(attached, FileAttach::Attached);
    assert!(path.exists());
}

#[test]
fn test_attach_disables_propagation() {
    let dir = TempDir::new().unwrap();
    let (registry, console) = registry(SingleProcessContext);
    let logger = registry.get_or_create("prop");
    assert!(logger.propagates());

    logger
        .attach_file_sink(dir.path().join("prop.log"), FileSinkOptions::default())
        .unwrap();

    assert!(!logger.propagates());
    // File sink plus one console sink
    assert_eq!(logger.sink_count(), 2);

    logger.info("once");
    assert_eq!(console.len(), 1);
}

#[test]
fn test_attach_same_path_twice_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("twice.log");
    let (registry, console) = registry(SingleProcessContext);
    let logger = registry.get_or_create("twice");

    logger.attach_file_sink(&path, FileSinkOptions::default()).unwrap();
    let again = logger.attach_file_sink(&path, FileSinkOptions::default()).unwrap();

    assert_eq!(again, FileAttach::AlreadyAttached);
    assert_eq!(logger.sink_count(), 2);

    logger.info("not doubled");
    assert_eq!(console.len(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
}

#[test]
fn test_second_file_adds_no_console() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("a.log");
    let second = dir.path().join("b.log");
    let (registry, console) = registry(SingleProcessContext);
    let logger = registry.get_or_create("two-files");

    logger.attach_file_sink(&first, FileSinkOptions::default()).unwrap();
    let attached = logger
        .attach_file_sink(&second, FileSinkOptions::default())
        .unwrap();

    assert_eq!(attached, FileAttach::Attached);
    assert_eq!(logger.sink_count(), 3);
    assert_eq!(logger.file_paths(), vec![first.clone(), second.clone()]);

    logger.warning("both files");
    assert_eq!(console.len(), 1);
    assert!(fs::read_to_string(&first).unwrap().contains("both files"));
    assert!(fs::read_to_string(&second).unwrap().contains("both files"));
}

#[test]
fn test_file_threshold_is_independent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("errors.log");
    let (registry, console) = registry(SingleProcessContext);
    let logger = registry.get_or_create("thresholds");
    logger.set_level(Level::Debug);

    let options = FileSinkOptions::default().with_level(Level::Error);
    logger.attach_file_sink(&path, options).unwrap();

    logger.debug("debug only reaches nothing");
    logger.info("info reaches the console");
    logger.error("error reaches both");

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains("error reaches both"));
    assert_eq!(console.len(), 2);
    assert!(!console.contains("debug only"));
}

#[test]
fn test_append_and_truncate_modes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("modes.log");
    fs::write(&path, "previous run\n").unwrap();

    let (registry, _console) = registry(SingleProcessContext);
    let append = registry.get_or_create("append");
    append
        .attach_file_sink(&path, FileSinkOptions::parse("a", "INFO").unwrap())
        .unwrap();
    append.info("appended");
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("previous run\n"));
    assert!(contents.contains("appended"));

    let truncate = registry.get_or_create("truncate");
    truncate
        .attach_file_sink(&path, FileSinkOptions::parse("w", "INFO").unwrap())
        .unwrap();
    truncate.info("fresh");
    let contents = fs::read_to_string(&path).unwrap();
    assert!(!contents.contains("previous run"));
    assert!(contents.contains("fresh"));
}

#[test]
fn test_directory_creation_failure() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();
    let (registry, _console) = registry(SingleProcessContext);
    let logger = registry.get_or_create("broken");

    let result = logger.attach_file_sink(blocker.join("log.txt"), FileSinkOptions::default());

    assert_matches!(result, Err(Error::CreateDirectory { path, .. }) if path == blocker);
    assert!(logger.propagates());
    assert_eq!(logger.sink_count(), 0);
}

#[test]
fn test_open_failure() {
    let dir = TempDir::new().unwrap();
    let (registry, _console) = registry(SingleProcessContext);
    let logger = registry.get_or_create("dir-as-file");

    let result = logger.attach_file_sink(dir.path(), FileSinkOptions::default());

    assert_matches!(result, Err(Error::OpenFile { .. }));
    assert!(logger.file_paths().is_empty());
}

#[test]
fn test_file_uses_file_date_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dates.log");
    let console = CaptureBuffer::new();
    let config = console.config().with_file_date_format("<%Y>");
    let registry = LoggerRegistry::with_config(SingleProcessContext, config).unwrap();
    let logger = registry.get_or_create("dates");

    logger.attach_file_sink(&path, FileSinkOptions::default()).unwrap();
    logger.info("stamped");

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("dates - INFO - <"));
}

#[test]
fn test_records_during_first_attach_reach_a_console() {
    const MESSAGES: usize = 500;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("race.log");
    let (registry, console) = registry(SingleProcessContext);
    let logger = registry.get_or_create("race");

    std::thread::scope(|scope| {
        let writer = scope.spawn(|| {
            for step in 0..MESSAGES {
                logger.info(format!("step {step}"));
            }
        });
        logger
            .attach_file_sink(&path, FileSinkOptions::default())
            .unwrap();
        writer.join().unwrap();
    });

    // Root and file consoles share the capture buffer, so each record lands
    // there exactly once whichever side of the attach it was logged on
    assert_eq!(console.len(), MESSAGES);
}
