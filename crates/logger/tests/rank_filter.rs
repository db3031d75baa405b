//! Rank-based emission

use distlog_context::{ParallelMode, SingleProcessContext};
use distlog_context_mock::StaticContext;
use distlog_logger::test_support::CaptureBuffer;
use distlog_logger::*;

fn registry(context: impl ParallelContext) -> (LoggerRegistry, CaptureBuffer) {
    let console = CaptureBuffer::new();
    let registry = LoggerRegistry::with_config(context, console.config()).unwrap();
    (registry, console)
}

/// Strip the timestamp so lines from separate calls compare equal
fn without_timestamp(line: &str) -> String {
    let parts: Vec<&str> = line.splitn(4, " - ").collect();
    format!("{} - {} - {}", parts[0], parts[1], parts[3])
}

fn emitted(context: StaticContext, filter: &RankFilter) -> Vec<String> {
    let (registry, console) = registry(context);
    let logger = registry.get_or_create("ranks");
    logger.log(
        Level::Info,
        "hello",
        Some(CallSite::new(file!(), 1, Some("caller"))),
        filter,
    );
    console.lines().iter().map(|l| without_timestamp(l)).collect()
}

#[test]
fn test_rank_outside_allowed_set_is_silent() {
    let context = StaticContext::new().with_global(1, 4);

    assert!(emitted(context, &RankFilter::ranks([0, 2])).is_empty());
}

#[test]
fn test_allowed_ranks_match_unfiltered_output() {
    for rank in [0, 2] {
        let context = StaticContext::new().with_global(rank, 4);

        let filtered = emitted(context.clone(), &RankFilter::ranks([0, 2]));
        let unfiltered = emitted(context, &RankFilter::all());

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered, unfiltered);
    }
}

#[test]
fn test_uninitialized_group_counts_as_rank_zero() {
    let context = StaticContext::new().with_global(3, 4);
    let filter = RankFilter::ranks([0]).in_mode(ParallelMode::Tensor);
    assert_eq!(emitted(context.clone(), &filter).len(), 1);

    let filter = RankFilter::ranks([1, 3]).in_mode(ParallelMode::Tensor);
    assert!(emitted(context, &filter).is_empty());
}

#[test]
fn test_rank_resolved_in_requested_mode() {
    let context = StaticContext::new()
        .with_global(5, 8)
        .with_group(ParallelMode::Data, 1, 2)
        .with_group(ParallelMode::Pipeline, 0, 4);
    let (registry, console) = registry(context);
    let logger = registry.get_or_create("modes");

    info!(logger, ranks = [0]; "global rank 0 only");
    info!(logger, mode = ParallelMode::Data, ranks = [1]; "data rank 1");
    info!(logger, mode = ParallelMode::Pipeline, ranks = [0]; "first stage");
    info!(logger, mode = ParallelMode::Pipeline, ranks = [1, 2, 3,]; "later stages");

    let logs = console.logs();
    assert!(!logs.contains("global rank 0 only"));
    assert!(logs.contains("data rank 1"));
    assert!(logs.contains("first stage"));
    assert!(!logs.contains("later stages"));
}

#[test]
fn test_single_process_emits_for_rank_zero_filters() {
    let (registry, console) = registry(SingleProcessContext);
    let logger = registry.get_or_create("single");

    logger.warning_with("rank zero", &RankFilter::rank_zero());
    logger.warning_with("rank one", &RankFilter::ranks([1]));

    assert!(console.contains("rank zero"));
    assert!(!console.contains("rank one"));
}

#[test]
fn test_would_emit_combines_both_gates() {
    let (registry, _console) = registry(StaticContext::new().with_global(1, 2));
    let logger = registry.get_or_create("gates");
    logger.set_level(Level::Warning);

    assert!(!logger.would_emit(Level::Info, &RankFilter::all()));
    assert!(logger.would_emit(Level::Error, &RankFilter::all()));
    assert!(!logger.would_emit(Level::Error, &RankFilter::rank_zero()));
    assert!(logger.would_emit(Level::Error, &RankFilter::ranks([1])));
}

#[test]
fn test_macro_skips_formatting_when_filtered() {
    struct Loud;
    impl std::fmt::Display for Loud {
        fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            panic!("formatted a suppressed message");
        }
    }

    let (registry, console) = registry(StaticContext::new().with_global(2, 4));
    let logger = registry.get_or_create("lazy");

    error!(logger, ranks = [0]; "{}", Loud);
    debug!(logger, "{}", Loud);

    assert!(console.is_empty());
}

#[test]
fn test_macro_resolves_rank_once() {
    use distlog_context::Result;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Default)]
    struct CountingContext {
        lookups: Arc<AtomicUsize>,
    }

    impl ParallelContext for CountingContext {
        fn is_initialized(&self, _mode: ParallelMode) -> bool {
            true
        }

        fn local_rank(&self, _mode: ParallelMode) -> Result<usize> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(0)
        }

        fn world_size(&self, _mode: ParallelMode) -> Result<usize> {
            Ok(2)
        }
    }

    let context = CountingContext::default();
    let (registry, console) = registry(context.clone());
    let logger = registry.get_or_create("counted");

    info!(logger, ranks = [0]; "once");
    assert_eq!(console.len(), 1);
    assert_eq!(context.lookups.load(Ordering::SeqCst), 1);

    logger.info_with("method", &RankFilter::rank_zero());
    assert_eq!(console.len(), 2);
    assert_eq!(context.lookups.load(Ordering::SeqCst), 2);
}
