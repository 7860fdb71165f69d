//! Fire-and-forget emission through a dedicated writing task.
//!
//! See [`LogHandle`] for more details.

use crate::logger::Logger;
use crate::request::{RequestInfo, ResponseInfo};
use std::future::Future;
use tokio::sync::mpsc;
use tracing_subscriber::fmt::MakeWriter;

/// A cheap, cloneable handle that request handlers use to queue log
/// records.
///
/// The handle sends snapshots over an unbounded channel to the worker
/// future that owns the [`Logger`], so [`log`] never blocks and never
/// returns an error to the request path. A slow or broken sink degrades
/// logging, not the service: write failures are reported through
/// [`tracing::error!`] by the worker, which keeps serving later records.
///
/// Dropping every clone of the handle closes the channel; the worker
/// drains what was already queued and completes.
///
/// [`log`]: LogHandle::log
/// [`Logger`]: crate::logger::Logger
#[derive(Clone)]
pub struct LogHandle {
    tx: mpsc::UnboundedSender<Record>,
}

struct Record {
    request: RequestInfo,
    response: ResponseInfo,
}

impl LogHandle {
    /// Queues one request/response snapshot for logging.
    ///
    /// If the worker is already gone the record is dropped and the loss is
    /// reported through [`tracing::error!`]; the caller is unaffected
    /// either way.
    pub fn log(&self, request: RequestInfo, response: ResponseInfo) {
        if self.tx.send(Record { request, response }).is_err() {
            tracing::error!("request log worker is gone, dropping record");
        }
    }
}

/// Pairs a [`LogHandle`] with the worker future that owns `logger`.
pub(crate) fn spawn<W>(logger: Logger<W>) -> (LogHandle, impl Future<Output = ()>)
where
    W: 'static + for<'a> MakeWriter<'a> + Send,
{
    let (tx, mut rx) = mpsc::unbounded_channel();

    let worker = async move {
        while let Some(Record { request, response }) = rx.recv().await {
            if let Err(err) = logger.emit(&request, &response) {
                tracing::error!(%err, "failed writing request log line");
            }
        }
    };

    (LogHandle { tx }, worker)
}
