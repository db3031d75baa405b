//! Logging macros
//!
//! Unlike the methods on [`DistributedLogger`](crate::DistributedLogger), the
//! macros capture the enclosing function name, and they skip formatting when
//! the level or rank gate would drop the message anyway.

/// Name of the function the macro is expanded in
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __distlog_marker() {}
        fn __distlog_type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::callsite::enclosing_function(__distlog_type_name_of(__distlog_marker))
    }};
}

/// [`CallSite`](crate::CallSite) of the macro invocation
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(
            ::std::file!(),
            ::std::line!(),
            ::std::option::Option::Some($crate::function_name!()),
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($logger:expr, $level:expr, $filter:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let filter = $filter;
        if logger.would_emit($level, &filter) {
            logger.emit_unchecked(
                $level,
                ::std::format!($($arg)+),
                ::std::option::Option::Some($crate::call_site!()),
            );
        }
    }};
}

/// Log a debug message
///
/// ```no_run
/// use distlog_logger::{debug, get_dist_logger, ParallelMode};
///
/// let logger = get_dist_logger("train");
/// let step = 3;
/// debug!(logger, "step {step}");
/// debug!(logger, ranks = [0]; "only global rank 0 prints step {step}");
/// debug!(logger, mode = ParallelMode::Data, ranks = [0, 1]; "first two replicas");
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, mode = $mode:expr, ranks = [$($rank:expr),* $(,)?]; $($arg:tt)+) => {
        $crate::__log!($logger, $crate::Level::Debug, $crate::RankFilter::ranks([$($rank),*]).in_mode($mode), $($arg)+)
    };
    ($logger:expr, ranks = [$($rank:expr),* $(,)?]; $($arg:tt)+) => {
        $crate::__log!($logger, $crate::Level::Debug, $crate::RankFilter::ranks([$($rank),*]), $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log!($logger, $crate::Level::Debug, $crate::RankFilter::all(), $($arg)+)
    };
}

/// Log an info message, see [`debug!`] for the accepted forms
#[macro_export]
macro_rules! info {
    ($logger:expr, mode = $mode:expr, ranks = [$($rank:expr),* $(,)?]; $($arg:tt)+) => {
        $crate::__log!($logger, $crate::Level::Info, $crate::RankFilter::ranks([$($rank),*]).in_mode($mode), $($arg)+)
    };
    ($logger:expr, ranks = [$($rank:expr),* $(,)?]; $($arg:tt)+) => {
        $crate::__log!($logger, $crate::Level::Info, $crate::RankFilter::ranks([$($rank),*]), $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log!($logger, $crate::Level::Info, $crate::RankFilter::all(), $($arg)+)
    };
}

/// Log a warning, see [`debug!`] for the accepted forms
#[macro_export]
macro_rules! warning {
    ($logger:expr, mode = $mode:expr, ranks = [$($rank:expr),* $(,)?]; $($arg:tt)+) => {
        $crate::__log!($logger, $crate::Level::Warning, $crate::RankFilter::ranks([$($rank),*]).in_mode($mode), $($arg)+)
    };
    ($logger:expr, ranks = [$($rank:expr),* $(,)?]; $($arg:tt)+) => {
        $crate::__log!($logger, $crate::Level::Warning, $crate::RankFilter::ranks([$($rank),*]), $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log!($logger, $crate::Level::Warning, $crate::RankFilter::all(), $($arg)+)
    };
}

/// Log an error, see [`debug!`] for the accepted forms
#[macro_export]
macro_rules! error {
    ($logger:expr, mode = $mode:expr, ranks = [$($rank:expr),* $(,)?]; $($arg:tt)+) => {
        $crate::__log!($logger, $crate::Level::Error, $crate::RankFilter::ranks([$($rank),*]).in_mode($mode), $($arg)+)
    };
    ($logger:expr, ranks = [$($rank:expr),* $(,)?]; $($arg:tt)+) => {
        $crate::__log!($logger, $crate::Level::Error, $crate::RankFilter::ranks([$($rank),*]), $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log!($logger, $crate::Level::Error, $crate::RankFilter::all(), $($arg)+)
    };
}
