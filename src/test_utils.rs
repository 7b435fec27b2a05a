use std::{
    io::{BufRead, BufReader, Read, Write},
    net::TcpListener,
    thread::{self, JoinHandle},
};

/// A request as seen by [`StubServer`]. Header names are lowercased.
#[derive(Debug)]
pub struct RecordedRequest {
    /// e.g. `GET /v1/catalog/us/search?term=a HTTP/1.1`
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Minimal HTTP/1.1 server on a loopback port that answers one connection per
/// canned response, in order, then stops.
pub struct StubServer {
    listener: TcpListener,
    pub base_url: String,
}

impl StubServer {
    pub fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        Self { listener, base_url }
    }

    /// Join the handle once the client calls are done to get the requests back
    pub fn serve(self, responses: Vec<(u16, String)>) -> JoinHandle<Vec<RecordedRequest>> {
        thread::spawn(move || {
            responses
                .into_iter()
                .map(|(status, body)| {
                    let length = body.len();
                    respond(&self.listener, status, &body, length)
                })
                .collect()
        })
    }

    /// Answers a single request with a `Content-Length` larger than `body`,
    /// then closes the connection mid-body
    pub fn serve_truncated(self, status: u16, body: String) -> JoinHandle<Vec<RecordedRequest>> {
        thread::spawn(move || vec![respond(&self.listener, status, &body, body.len() + 64)])
    }
}

fn respond(listener: &TcpListener, status: u16, body: &str, length: usize) -> RecordedRequest {
    let (stream, _) = listener.accept().unwrap();
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            headers.push((key.trim().to_ascii_lowercase(), value.trim().to_owned()));
        }
    }

    let request_length = headers
        .iter()
        .find(|(key, _)| key == "content-length")
        .map_or(0, |(_, value)| value.parse().unwrap());
    let mut request_body = vec![0; request_length];
    reader.read_exact(&mut request_body).unwrap();

    let mut stream = reader.into_inner();
    write!(
        stream,
        "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {length}\r\nConnection: close\r\n\r\n{body}",
    )
    .unwrap();
    stream.flush().unwrap();

    RecordedRequest {
        request_line: request_line.trim_end().to_owned(),
        headers,
        body: String::from_utf8(request_body).unwrap(),
    }
}
