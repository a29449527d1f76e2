use tracing::debug;

use crate::obs::MutationSink;
use crate::source::CookieSource;

/// Expiry attribute written on deletion: one second past the epoch.
pub const EPOCH_EXPIRY: &str = "Thu, 01 Jan 1970 00:00:01 GMT";

/// Reads and expires cookies held in the ambient string behind a
/// [`CookieSource`]. No caching: every call goes back to the source.
pub struct CookieStore<S> {
    source: S,
    sink: Option<MutationSink>,
}

impl<S: CookieSource> CookieStore<S> {
    pub fn new(source: S) -> Self {
        Self { source, sink: None }
    }

    /// Same store, with every operation mirrored to a mutation sink.
    pub fn with_sink(source: S, sink: MutationSink) -> Self {
        Self {
            source,
            sink: Some(sink),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Value of the cookie named `name`, or `None` if it is absent.
    ///
    /// An empty value comes back as `Some("")`, which is distinct from
    /// absent. The value is returned as stored, with no decoding.
    ///
    /// Lookup is the sentinel-split idiom: the ambient string is
    /// prefixed with `"; "` and cut at the first `"; name="`. If the
    /// same name occurs twice, the first value wins.
    pub fn get(&self, name: &str) -> Option<String> {
        let ambient = format!("; {}", self.source.read());
        let needle = format!("; {name}=");

        let value = ambient
            .split_once(&needle)
            .map(|(_, rest)| rest.split(';').next().unwrap_or("").to_string());

        debug!(name, found = value.is_some(), "cookie lookup");
        if let Some(sink) = &self.sink {
            sink.record("get", name, Some(value.is_some()));
        }

        value
    }

    /// Expire the cookie named `name` by writing an assignment with an
    /// empty value and an epoch expiry.
    ///
    /// The assignment is scoped to `path=/`; a cookie set under another
    /// path is untouched. Fire-and-forget: nothing verifies the
    /// environment actually evicted it, and repeating the call is
    /// harmless.
    pub fn delete(&mut self, name: &str) {
        self.source
            .write(&format!("{name}=;path=/; expires={EPOCH_EXPIRY};"));

        debug!(name, "cookie expired");
        if let Some(sink) = &self.sink {
            sink.record("delete", name, None);
        }
    }
}
