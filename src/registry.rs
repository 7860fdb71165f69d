//! The formatter registry.
//!
//! See [`Registry`] for more details.

use crate::formatter::{self, FieldFormatter};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The mapping from field names to [`FieldFormatter`]s.
///
/// A new registry already contains the built-in formatters:
///
/// - `datetime`: wall-clock time, rendered with the configured template
/// - `method`: the request's HTTP method token
/// - `endpoint`: the URL path, without the query string
/// - `identifier`: the `id` query parameter, omitted when absent
///
/// Registration takes `&mut self`, so the set is open only while the
/// registry is still owned by the caller (or a [`Builder`]). Building a
/// [`Logger`] consumes the registry and shares it immutably, freezing the
/// set for the logger's lifetime.
///
/// # Examples
/// ```
/// use reqline::Registry;
///
/// let mut registry = Registry::new();
/// registry.register("tab", |_: &reqline::Config, _: &reqline::RequestInfo, _: &reqline::ResponseInfo| {
///     "\t".to_owned()
/// });
/// assert_eq!(registry.names().count(), 5);
/// ```
///
/// [`Builder`]: crate::builder::Builder
/// [`Logger`]: crate::logger::Logger
#[derive(Clone)]
pub struct Registry {
    formatters: HashMap<String, Arc<dyn FieldFormatter>>,
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

impl Registry {
    /// Returns a registry holding the built-in formatters.
    pub fn new() -> Self {
        let mut registry = Registry {
            formatters: HashMap::new(),
        };
        registry.register("datetime", formatter::datetime);
        registry.register("method", formatter::method);
        registry.register("endpoint", formatter::endpoint);
        registry.register("identifier", formatter::identifier);
        registry
    }

    /// Adds or replaces the formatter registered under `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, formatter: F)
    where
        F: 'static + FieldFormatter,
    {
        self.formatters.insert(name.into(), Arc::new(formatter));
    }

    pub(crate) fn get(&self, name: &str) -> Option<Arc<dyn FieldFormatter>> {
        self.formatters.get(name).map(Arc::clone)
    }

    /// All registered names, each exactly once, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.formatters.keys().map(String::as_str)
    }

    /// Space-joined list of registered names, for machine consumption.
    pub fn list(&self) -> String {
        self.names().collect::<Vec<_>>().join(" ")
    }

    /// Multi-line list of registered names, for help text.
    ///
    /// Each name sits on its own indented line; every line but the last is
    /// comma-terminated.
    pub fn pretty_list(&self) -> String {
        let mut out = String::new();
        let mut names = self.names().peekable();
        while let Some(name) = names.next() {
            out.push_str("  ");
            out.push_str(name);
            out.push_str(if names.peek().is_some() { ",\n" } else { "\n" });
        }
        out
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.formatters.keys().collect::<Vec<_>>())
            .finish()
    }
}
