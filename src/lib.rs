//! Pluggable, non-blocking request-line logging for HTTP servers.
//!
//! # Overview
//!
//! `reqline` renders one formatted line per handled request and writes it
//! to a configured sink, off the request path. A line is assembled from
//! named *fields*, each produced by a [`FieldFormatter`] held in a
//! [`Registry`]; the enabled fields, their order, the separator between
//! them, and the sink are all chosen when the [`Logger`] is built.
//!
//! The crate is server-agnostic: it works from owned snapshots
//! ([`RequestInfo`], [`ResponseInfo`]) taken from [`http`] request and
//! response values, so it rides on whatever framework produces those.
//!
//! # Getting started
//!
//! Build a worker at startup, spawn it, and hand clones of the returned
//! [`LogHandle`] to request handlers:
//!
//! ```
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (log, worker) = reqline::builder()
//!     .fields(["datetime", "method", "endpoint", "identifier"])
//!     .spawn()
//!     .unwrap();
//! let writing = tokio::spawn(worker);
//!
//! // inside a request handler:
//! let request = http::Request::get("/test?id=testid").body(()).unwrap();
//! let response = http::Response::builder().body(()).unwrap();
//! log.log((&request).into(), (&response).into());
//!
//! // dropping the last handle lets the worker drain and finish
//! drop(log);
//! writing.await.unwrap();
//! # }
//! ```
//!
//! With the default configuration this produces lines like:
//!
//! ```log
//! 08-29-2026 14:03:22.214611358 - GET - /test - testid
//! ```
//!
//! A field that renders empty is omitted together with its separator, so
//! the same logger prints `... - GET - /test` for a request with no `id`
//! parameter, and the line never ends in a dangling separator.
//!
//! # Custom fields
//!
//! Any `Fn(&Config, &RequestInfo, &ResponseInfo) -> String` can be
//! registered as a field:
//!
//! ```
//! use reqline::{Config, RequestInfo, ResponseInfo};
//!
//! fn status(_: &Config, _: &RequestInfo, response: &ResponseInfo) -> String {
//!     response.status().as_u16().to_string()
//! }
//!
//! let logger = reqline::builder()
//!     .register("status", status)
//!     .fields(["method", "endpoint", "status"])
//!     .build()
//!     .unwrap();
//! ```
//!
//! Misconfiguration is caught when the logger is built: enabling a name
//! with no registered formatter fails with [`Error::UnknownFormatter`]
//! before any request is handled.
//!
//! # Ordering
//!
//! Concurrent emits are not ordered relative to each other. Each line goes
//! out in a single write, so lines stay intact on sinks that make single
//! writes atomic (like stdout); `reqline` does not otherwise serialize
//! access to a shared sink, though the worker path does so naturally by
//! funneling every record through one task.

pub mod builder;
pub mod formatter;
pub mod logger;
pub mod registry;
pub mod request;
pub mod worker;

mod error;

pub use crate::builder::{builder, Builder, Config};
pub use crate::error::Error;
pub use crate::formatter::FieldFormatter;
pub use crate::logger::Logger;
pub use crate::registry::Registry;
pub use crate::request::{RequestInfo, ResponseInfo};
pub use crate::worker::LogHandle;
