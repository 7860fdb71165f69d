//! Line assembly and the synchronous emit path.
//!
//! See [`Logger`] for more details.

use crate::builder::Config;
use crate::error::Error;
use crate::formatter::FieldFormatter;
use crate::registry::Registry;
use crate::request::{RequestInfo, ResponseInfo};
use chrono::format::{Item, StrftimeItems};
use std::fmt;
use std::io::Write;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

/// A fully validated request logger.
///
/// Every value the logger needs is resolved when it is built: enabled field
/// names are looked up in the [`Registry`] once and held as formatters in
/// output order, so emission can no longer hit an unknown name. The logger
/// is immutable; to change the configuration or the enabled fields, build
/// another logger and use that instead.
///
/// [`emit`] blocks only on the sink write. Callers that must not block the
/// request path should use the worker returned by [`Builder::spawn`]
/// instead of calling `emit` inline.
///
/// Concurrent `emit` calls are not ordered relative to each other; each
/// line is written with a single `write_all`, so lines stay intact exactly
/// when the sink makes single writes atomic (stdout does, an arbitrary
/// shared stream might not).
///
/// [`emit`]: Logger::emit
/// [`Builder::spawn`]: crate::builder::Builder::spawn
pub struct Logger<W> {
    config: Config,
    fields: Vec<Arc<dyn FieldFormatter>>,
    make_writer: W,
}

impl<W> Logger<W>
where
    W: 'static + for<'a> MakeWriter<'a>,
{
    pub(crate) fn new(
        config: Config,
        registry: Registry,
        names: Vec<String>,
        make_writer: W,
    ) -> Result<Self, Error> {
        if names.is_empty() {
            return Err(Error::NoFields);
        }
        // parse the template up front so the detached worker can never hit
        // a formatting panic
        if StrftimeItems::new(&config.datetime_format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::DatetimeFormat(config.datetime_format));
        }
        let fields = names
            .into_iter()
            .map(|name| {
                registry
                    .get(&name)
                    .ok_or(Error::UnknownFormatter(name))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Logger {
            config,
            fields,
            make_writer,
        })
    }

    /// Assembles one log line for the request/response pair and writes it
    /// to the sink with a single `write_all` call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SinkWrite`] if the sink rejects the line.
    pub fn emit(&self, request: &RequestInfo, response: &ResponseInfo) -> Result<(), Error> {
        let line = self.render(request, response);
        self.make_writer
            .make_writer()
            .write_all(line.as_bytes())?;
        Ok(())
    }

    // Fields are invoked in enabled order; empty results vanish along with
    // their separator, and the line always ends in exactly one newline.
    // With every field empty the line is just "\n".
    fn render(&self, request: &RequestInfo, response: &ResponseInfo) -> String {
        let mut line = String::new();
        for formatter in &self.fields {
            let field = formatter.fmt(&self.config, request, response);
            if field.is_empty() {
                continue;
            }
            if !line.is_empty() {
                line.push_str(&self.config.separator);
            }
            line.push_str(&field);
        }
        line.push('\n');
        line
    }
}

impl<W> fmt::Debug for Logger<W> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("fields", &self.fields.len())
            .finish()
    }
}
