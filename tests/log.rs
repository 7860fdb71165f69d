use regex::Regex;
use reqline::{Config, Error, RequestInfo, ResponseInfo};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// A sink that appends whole writes to a shared buffer, so each `write`
/// call is atomic from the sink's perspective.
#[derive(Clone, Default)]
struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8(self.buf.lock().unwrap().clone()).unwrap()
    }

    fn make_writer(&self) -> impl Fn() -> Capture + Send + 'static {
        let capture = self.clone();
        move || capture.clone()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A sink that rejects every write.
struct Broken;

impl Write for Broken {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink is broken"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn exchange(uri: &str) -> (RequestInfo, ResponseInfo) {
    let request = http::Request::get(uri).body(()).unwrap();
    let response = http::Response::builder().status(200).body(()).unwrap();
    ((&request).into(), (&response).into())
}

#[test]
fn fields_join_in_configured_order() {
    let capture = Capture::default();
    let logger = reqline::builder()
        .fields(["endpoint", "method", "identifier"])
        .with_writer(capture.make_writer())
        .build()
        .unwrap();

    let (request, response) = exchange("/test?id=testid");
    logger.emit(&request, &response).unwrap();

    assert_eq!(capture.contents(), "/test - GET - testid\n");
}

#[test]
fn separator_is_configurable() {
    let capture = Capture::default();
    let logger = reqline::builder()
        .fields(["method", "endpoint"])
        .separator("\t")
        .with_writer(capture.make_writer())
        .build()
        .unwrap();

    let (request, response) = exchange("/test");
    logger.emit(&request, &response).unwrap();

    assert_eq!(capture.contents(), "GET\t/test\n");
}

#[test]
fn trailing_empty_field_drops_its_separator() {
    let capture = Capture::default();
    let logger = reqline::builder()
        .fields(["method", "identifier"])
        .with_writer(capture.make_writer())
        .build()
        .unwrap();

    // no `id` parameter, so `identifier` renders empty
    let (request, response) = exchange("/test");
    logger.emit(&request, &response).unwrap();

    assert_eq!(capture.contents(), "GET\n");
}

#[test]
fn all_fields_empty_renders_bare_newline() {
    let capture = Capture::default();
    let logger = reqline::builder()
        .fields(["identifier"])
        .with_writer(capture.make_writer())
        .build()
        .unwrap();

    let (request, response) = exchange("/test");
    logger.emit(&request, &response).unwrap();

    assert_eq!(capture.contents(), "\n");
}

#[test]
fn unknown_field_fails_at_build_time() {
    let err = reqline::builder()
        .fields(["method", "nope"])
        .build()
        .unwrap_err();

    match err {
        Error::UnknownFormatter(name) => assert_eq!(name, "nope"),
        other => panic!("expected UnknownFormatter, got {:?}", other),
    }
}

#[test]
fn empty_field_list_fails_at_build_time() {
    let err = reqline::builder().build().unwrap_err();
    assert!(matches!(err, Error::NoFields));
}

#[test]
fn malformed_datetime_template_fails_at_build_time() {
    let err = reqline::builder()
        .fields(["datetime"])
        .datetime_format("%Q")
        .build()
        .unwrap_err();

    match err {
        Error::DatetimeFormat(template) => assert_eq!(template, "%Q"),
        other => panic!("expected DatetimeFormat, got {:?}", other),
    }
}

#[test]
fn contributed_formatter_renders_response_status() {
    let capture = Capture::default();
    let logger = reqline::builder()
        .register(
            "status",
            |_: &Config, _: &RequestInfo, response: &ResponseInfo| {
                response.status().as_u16().to_string()
            },
        )
        .fields(["method", "status"])
        .with_writer(capture.make_writer())
        .build()
        .unwrap();

    let (request, response) = exchange("/test");
    logger.emit(&request, &response).unwrap();

    assert_eq!(capture.contents(), "GET - 200\n");
}

#[test]
fn second_logger_takes_over_without_restart() {
    let (request, response) = exchange("/test?id=testid");

    let first = Capture::default();
    let logger = reqline::builder()
        .fields(["method", "endpoint"])
        .with_writer(first.make_writer())
        .build()
        .unwrap();
    logger.emit(&request, &response).unwrap();
    assert_eq!(first.contents(), "GET - /test\n");

    let second = Capture::default();
    let logger = reqline::builder()
        .fields(["endpoint", "identifier"])
        .separator(" | ")
        .with_writer(second.make_writer())
        .build()
        .unwrap();
    logger.emit(&request, &response).unwrap();
    assert_eq!(second.contents(), "/test | testid\n");
}

#[tokio::test]
async fn default_line_matches_documented_shape() {
    let capture = Capture::default();
    let (log, worker) = reqline::builder()
        .fields(["datetime", "method", "endpoint", "identifier"])
        .with_writer(capture.make_writer())
        .spawn()
        .unwrap();
    let writing = tokio::spawn(worker);

    let (request, response) = exchange("/test?id=testid");
    log.log(request, response);

    drop(log);
    writing.await.unwrap();

    let pattern = Regex::new(r"^\d+-\d+-\d+ \d+:\d+:\d+\.\d+ - GET - /test - testid\n$").unwrap();
    let contents = capture.contents();
    assert!(
        pattern.is_match(&contents),
        "line did not match: {:?}",
        contents
    );
}

#[tokio::test]
async fn missing_identifier_renders_method_only() {
    let capture = Capture::default();
    let (log, worker) = reqline::builder()
        .fields(["method", "identifier"])
        .with_writer(capture.make_writer())
        .spawn()
        .unwrap();
    let writing = tokio::spawn(worker);

    let (request, response) = exchange("/test");
    log.log(request, response);

    drop(log);
    writing.await.unwrap();

    assert_eq!(capture.contents(), "GET\n");
}

#[tokio::test]
async fn concurrent_handles_keep_lines_intact() {
    let capture = Capture::default();
    let (log, worker) = reqline::builder()
        .fields(["method", "endpoint"])
        .with_writer(capture.make_writer())
        .spawn()
        .unwrap();
    let writing = tokio::spawn(worker);

    let mut tasks = Vec::new();
    for i in 0..8 {
        let log = log.clone();
        tasks.push(tokio::spawn(async move {
            let (request, response) = exchange(&format!("/task/{}", i));
            log.log(request, response);
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    drop(log);
    writing.await.unwrap();

    let contents = capture.contents();
    let mut lines: Vec<&str> = contents.lines().collect();
    lines.sort_unstable();
    let expected: Vec<String> = (0..8).map(|i| format!("GET - /task/{}", i)).collect();
    assert_eq!(lines, expected);
}

#[tokio::test]
async fn broken_sink_does_not_kill_the_worker() {
    let (log, worker) = reqline::builder()
        .fields(["method"])
        .with_writer(|| Broken)
        .spawn()
        .unwrap();
    let writing = tokio::spawn(worker);

    let (request, response) = exchange("/test");
    log.log(request.clone(), response.clone());
    log.log(request, response);

    drop(log);
    // the worker reports both failures and still drains to completion
    writing.await.unwrap();
}
