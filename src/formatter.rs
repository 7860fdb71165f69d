//! Trait for rendering one log field.
//!
//! See [`FieldFormatter`] for more details.

use crate::builder::Config;
use crate::request::{RequestInfo, ResponseInfo};
use chrono::Local;

/// A type that derives one short string fact from a request/response pair.
///
/// Formatters are pure: they read the snapshots and the [`Config`], perform
/// no I/O, and mutate nothing. Returning an empty string means "omit this
/// field for this request"; the line assembler drops the field along with
/// its separator.
///
/// # Examples
///
/// This trait is implemented for all
/// `Fn(&Config, &RequestInfo, &ResponseInfo) -> String` types, so a
/// top-level `fn` can be registered directly:
/// ```
/// use reqline::{Config, RequestInfo, ResponseInfo};
///
/// fn status(_: &Config, _: &RequestInfo, response: &ResponseInfo) -> String {
///     response.status().as_u16().to_string()
/// }
///
/// let logger = reqline::builder()
///     .register("status", status)
///     .fields(["method", "status"])
///     .build()
///     .unwrap();
/// ```
pub trait FieldFormatter: Send + Sync {
    /// Renders the field, or returns an empty string to omit it.
    fn fmt(&self, config: &Config, request: &RequestInfo, response: &ResponseInfo) -> String;
}

impl<F> FieldFormatter for F
where
    F: Fn(&Config, &RequestInfo, &ResponseInfo) -> String + Send + Sync,
{
    #[inline]
    fn fmt(&self, config: &Config, request: &RequestInfo, response: &ResponseInfo) -> String {
        self(config, request, response)
    }
}

// The built-ins, registered by `Registry::new`.

/// Current wall-clock time, rendered through `Config::datetime_format`.
///
/// The template is validated when the logger is built, so rendering here
/// cannot fail.
pub(crate) fn datetime(config: &Config, _: &RequestInfo, _: &ResponseInfo) -> String {
    Local::now().format(&config.datetime_format).to_string()
}

/// The request's method token, verbatim.
pub(crate) fn method(_: &Config, request: &RequestInfo, _: &ResponseInfo) -> String {
    request.method().to_string()
}

/// The URL path component, verbatim, without the query string.
pub(crate) fn endpoint(_: &Config, request: &RequestInfo, _: &ResponseInfo) -> String {
    request.path().to_owned()
}

/// The value of the `id` query parameter, or empty if absent.
pub(crate) fn identifier(_: &Config, request: &RequestInfo, _: &ResponseInfo) -> String {
    request.query("id").unwrap_or_default()
}
