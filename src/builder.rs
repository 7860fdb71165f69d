//! Configure and build [`Logger`]s.
//!
//! Call [`builder`] to create a [`Builder`], chain configuration methods,
//! then finish with [`Builder::build`] for a [`Logger`] that writes on the
//! calling thread, or [`Builder::spawn`] for a [`LogHandle`] backed by a
//! dedicated writing task.
//!
//! All validation happens at the end of the chain: an enabled field with no
//! registered formatter, an empty field list, or a malformed datetime
//! template each fail the `build`/`spawn` call, never a later emit.
//!
//! # Examples
//!
//! Logging to stderr with a tab separator:
//! ```
//! let logger = reqline::builder()
//!     .fields(["method", "endpoint"])
//!     .separator("\t")
//!     .with_writer(std::io::stderr)
//!     .build()
//!     .unwrap();
//! ```
//!
//! [`Logger`]: crate::logger::Logger
//! [`LogHandle`]: crate::worker::LogHandle

use crate::error::Error;
use crate::formatter::FieldFormatter;
use crate::logger::Logger;
use crate::registry::Registry;
use crate::worker::{self, LogHandle};
use std::future::Future;
use std::io;
use tracing_subscriber::fmt::{MakeWriter, TestWriter};

/// Configurable rendering values for a [`Logger`].
///
/// The output sink is not part of `Config`; it is carried as a type
/// parameter on the [`Builder`] and [`Logger`], set via
/// [`Builder::with_writer`].
///
/// [`Logger`]: crate::logger::Logger
#[derive(Clone, Debug)]
pub struct Config {
    /// `chrono` strftime template used by the `datetime` field.
    pub datetime_format: String,
    /// String written between non-empty fields.
    pub separator: String,
}

impl Default for Config {
    /// The default configuration: `datetime_format` renders
    /// `MM-DD-YYYY hh:mm:ss.ns` and fields are separated by `" - "`.
    fn default() -> Self {
        Config {
            datetime_format: "%m-%d-%Y %H:%M:%S%.9f".to_owned(),
            separator: " - ".to_owned(),
        }
    }
}

/// Creates a new [`Builder`] with the default [`Config`], the built-in
/// [`Registry`], stdout as the sink, and no fields enabled.
///
/// See the [module level documentation] for details.
///
/// [module level documentation]: self
pub fn builder() -> Builder<fn() -> io::Stdout> {
    Builder {
        config: Config::default(),
        registry: Registry::new(),
        fields: Vec::new(),
        make_writer: io::stdout,
    }
}

/// A type for configuring [`Logger`]s.
///
/// See the [module level documentation] for details.
///
/// [module level documentation]: self
/// [`Logger`]: crate::logger::Logger
pub struct Builder<W> {
    config: Config,
    registry: Registry,
    fields: Vec<String>,
    make_writer: W,
}

impl<W> Builder<W> {
    /// Replaces the whole configuration.
    ///
    /// # Examples
    /// ```
    /// let mut config = reqline::Config::default();
    /// config.separator = "\t".to_owned();
    ///
    /// let logger = reqline::builder()
    ///     .with_config(config)
    ///     .fields(["method"])
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the string written between non-empty fields.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.config.separator = separator.into();
        self
    }

    /// Sets the strftime template used by the `datetime` field.
    ///
    /// The template is parsed when the logger is built; a malformed one
    /// fails the build with [`Error::DatetimeFormat`].
    pub fn datetime_format(mut self, template: impl Into<String>) -> Self {
        self.config.datetime_format = template.into();
        self
    }

    /// Registers an additional field formatter under `name`, replacing any
    /// existing entry.
    ///
    /// See [`FieldFormatter`] for the formatter contract.
    pub fn register<F>(mut self, name: impl Into<String>, formatter: F) -> Self
    where
        F: 'static + FieldFormatter,
    {
        self.registry.register(name, formatter);
        self
    }

    /// Replaces the registry wholesale, for callers that assemble their own.
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Sets the enabled fields. Order is significant: it is the output
    /// order of the line.
    pub fn fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = names.into_iter().map(Into::into).collect();
        self
    }

    /// Applies the specified [`MakeWriter`] as the sink.
    ///
    /// # Examples
    /// ```
    /// let logger = reqline::builder()
    ///     .fields(["method"])
    ///     .with_writer(std::io::stderr)
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn with_writer<W2>(self, make_writer: W2) -> Builder<W2>
    where
        W2: for<'a> MakeWriter<'a>,
    {
        Builder {
            config: self.config,
            registry: self.registry,
            fields: self.fields,
            make_writer,
        }
    }

    /// Applies a writer suitable for test environments, so emitted lines
    /// are captured per test by the default harness.
    pub fn with_test_writer(self) -> Builder<TestWriter> {
        self.with_writer(TestWriter::new())
    }
}

impl<W> Builder<W>
where
    W: 'static + for<'a> MakeWriter<'a>,
{
    /// Validates the configuration and returns a [`Logger`].
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownFormatter`] if an enabled field has no registry
    ///   entry
    /// - [`Error::NoFields`] if no fields were enabled
    /// - [`Error::DatetimeFormat`] if the datetime template fails to parse
    pub fn build(self) -> Result<Logger<W>, Error> {
        Logger::new(self.config, self.registry, self.fields, self.make_writer)
    }

    /// Builds the logger and pairs a [`LogHandle`] with the worker future
    /// that owns it.
    ///
    /// The caller decides where the future runs, typically by handing it to
    /// [`tokio::spawn`]. The handle is cheap to clone and never blocks;
    /// dropping every clone closes the channel, letting the worker drain
    /// and complete.
    ///
    /// # Examples
    /// ```
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let (log, worker) = reqline::builder()
    ///     .fields(["datetime", "method", "endpoint", "identifier"])
    ///     .spawn()
    ///     .unwrap();
    /// let handle = tokio::spawn(worker);
    ///
    /// let request = http::Request::get("/test?id=testid").body(()).unwrap();
    /// let response = http::Response::builder().body(()).unwrap();
    /// log.log((&request).into(), (&response).into());
    ///
    /// drop(log);
    /// handle.await.unwrap();
    /// # }
    /// ```
    pub fn spawn(self) -> Result<(LogHandle, impl Future<Output = ()>), Error>
    where
        W: Send,
    {
        let logger = self.build()?;
        Ok(worker::spawn(logger))
    }
}
