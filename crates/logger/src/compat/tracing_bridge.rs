//! Bridge from `tracing`

use crate::{CallSite, DistributedLogger, Level, RankFilter};
use std::fmt::Write;
use std::sync::Arc;
use tracing::{Event, Subscriber, field::Visit};
use tracing_subscriber::{Layer, layer::Context, registry::LookupSpan};

/// A tracing layer that forwards events to a [`DistributedLogger`]
pub struct TracingBridge {
    logger: Arc<DistributedLogger>,
}

impl TracingBridge {
    /// Create a new tracing bridge
    #[must_use]
    pub const fn new(logger: Arc<DistributedLogger>) -> Self {
        Self { logger }
    }
}

impl<S> Layer<S> for TracingBridge
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = match *metadata.level() {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warning,
            tracing::Level::INFO => Level::Info,
            tracing::Level::DEBUG | tracing::Level::TRACE => Level::Debug,
        };

        if !self.logger.would_emit(level, &RankFilter::all()) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let spans: Vec<&str> = ctx
            .event_scope(event)
            .map(|scope| scope.from_root().map(|span| span.name()).collect())
            .unwrap_or_default();
        let body = visitor.finish();
        let message = if spans.is_empty() {
            body
        } else {
            format!("{}: {body}", spans.join("::"))
        };

        let call_site = match (metadata.file(), metadata.line()) {
            (Some(file), Some(line)) => Some(CallSite::new(file, line, Some(metadata.target()))),
            _ => None,
        };

        self.logger.emit_unchecked(level, message, call_site);
    }
}

/// Collects the `message` field followed by the other fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn push_field(&mut self, name: &str, value: &dyn std::fmt::Display) {
        let _ = write!(self.fields, " {name}={value}");
    }

    fn finish(mut self) -> String {
        self.message.push_str(&self.fields);
        self.message
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), &value);
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field.name(), &format_args!("{value:?}"));
        }
    }
}

/// Install a subscriber that forwards every tracing event to `logger`
///
/// # Errors
///
/// Fails if a global tracing subscriber is already set.
pub fn init_tracing_bridge(
    logger: Arc<DistributedLogger>,
) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    use tracing_subscriber::prelude::*;

    let subscriber = tracing_subscriber::registry().with(TracingBridge::new(logger));
    tracing::subscriber::set_global_default(subscriber)
}
