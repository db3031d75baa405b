//! Call-site capture for the `[file, line, function]` tag

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

/// Suffix left on the type name of the marker item defined by
/// [`function_name!`](crate::function_name).
#[doc(hidden)]
pub const MARKER_SUFFIX: &str = "::__distlog_marker";

/// Where a log call was made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSite {
    file: Cow<'static, str>,
    line: u32,
    function: Option<Cow<'static, str>>,
}

impl CallSite {
    /// Build a call site; `file` is reduced to its base name.
    #[must_use]
    pub fn new(file: &'static str, line: u32, function: Option<&'static str>) -> Self {
        Self {
            file: Cow::Borrowed(basename(file)),
            line,
            function: function.map(Cow::Borrowed),
        }
    }

    /// Build a call site from borrowed metadata of unknown lifetime.
    #[must_use]
    pub fn from_parts(file: &str, line: u32, function: Option<&str>) -> Self {
        Self {
            file: Cow::Owned(basename(file).to_string()),
            line,
            function: function.map(|f| Cow::Owned(f.to_string())),
        }
    }

    /// The location of the caller of the enclosing `#[track_caller]` function.
    ///
    /// The function name is not known on this path.
    #[track_caller]
    #[must_use]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line(), None)
    }

    /// Base name of the source file
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Line number
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Enclosing function, when known
    #[must_use]
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.function {
            Some(function) => write!(f, "[{}, {}, {}]", self.file, self.line, function),
            None => write!(f, "[{}, {}]", self.file, self.line),
        }
    }
}

fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Reduce the type name of a marker item to the name of the function that
/// defines it.
///
/// Closures are skipped, generic arguments and `<T as Trait>` qualifiers are
/// dropped, so `<app::Model as app::Step>::run::{{closure}}::__distlog_marker`
/// becomes `run`.
#[doc(hidden)]
#[must_use]
pub fn enclosing_function(type_name: &'static str) -> &'static str {
    let path = type_name.strip_suffix(MARKER_SUFFIX).unwrap_or(type_name);
    let bytes = path.as_bytes();

    let mut name = None;
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' if i > 0 && bytes[i - 1] != b'-' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                name = segment_name(&path[start..i]).or(name);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    segment_name(&path[start..]).or(name).unwrap_or(path)
}

fn segment_name(segment: &str) -> Option<&str> {
    let name = segment.split('<').next().unwrap_or(segment);
    (!name.is_empty() && name != "{{closure}}").then_some(name)
}
