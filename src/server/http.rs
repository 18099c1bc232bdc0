//! Just enough HTTP/1.1 to serve the game page: one request per connection,
//! `Content-Length` bodies only.

use std::io::{self, BufRead, Read, Write};

/// Largest request body accepted; the only body we expect is a tiny form.
const MAX_BODY_BYTES: usize = 16 * 1024;
const MAX_HEADER_LINES: usize = 100;
/// Longest request line or header line, newline excluded.
const MAX_LINE_BYTES: usize = 8 * 1024;

/// Why a request could not be read.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("connection closed before a request line")]
    Empty,

    #[error("malformed request: {0}")]
    Malformed(&'static str),

    #[error("request body of {0} bytes is too large")]
    BodyTooLarge(usize),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    /// Path without the query string
    pub path: String,
    pub query: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    /// Read one request from a buffered stream.
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self, RequestError> {
        let mut line = String::new();
        if read_line(reader, &mut line)? == 0 {
            return Err(RequestError::Empty);
        }

        // Parse the request: "GET /path HTTP/1.1"
        let mut parts = line.split_whitespace();
        let method = parts.next().ok_or(RequestError::Malformed("missing method"))?;
        let target = parts.next().ok_or(RequestError::Malformed("missing path"))?;
        if !target.starts_with('/') {
            return Err(RequestError::Malformed("path must start with '/'"));
        }
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (target.to_string(), None),
        };
        let method = method.to_ascii_uppercase();

        let mut headers = Vec::new();
        loop {
            if read_line(reader, &mut line)? == 0 {
                break;
            }
            let header = line.trim_end();
            if header.is_empty() {
                break;
            }
            if headers.len() == MAX_HEADER_LINES {
                return Err(RequestError::Malformed("too many headers"));
            }
            let (name, value) = header
                .split_once(':')
                .ok_or(RequestError::Malformed("header without ':'"))?;
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        }

        let mut request = Request {
            method,
            path,
            query,
            headers,
            body: Vec::new(),
        };

        let length = match request.header("content-length") {
            Some(value) => value
                .parse::<usize>()
                .map_err(|_| RequestError::Malformed("bad content-length"))?,
            None => 0,
        };
        if length > MAX_BODY_BYTES {
            return Err(RequestError::BodyTooLarge(length));
        }
        request.body = vec![0; length];
        reader.read_exact(&mut request.body)?;

        Ok(request)
    }

    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// First value of `name` in an `application/x-www-form-urlencoded` body
    pub fn form_value(&self, name: &str) -> Option<String> {
        let body = std::str::from_utf8(&self.body).ok()?;
        body.split('&')
            .filter_map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                Some((url_decode(key)?, url_decode(value)?))
            })
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

/// Read one line into `line`, refusing lines longer than [`MAX_LINE_BYTES`].
fn read_line<R: BufRead>(reader: &mut R, line: &mut String) -> Result<usize, RequestError> {
    line.clear();
    let read = reader
        .by_ref()
        .take(MAX_LINE_BYTES as u64 + 1)
        .read_line(line)?;
    if read > MAX_LINE_BYTES && !line.ends_with('\n') {
        return Err(RequestError::Malformed("line too long"));
    }
    Ok(read)
}

/// Decode `+` and `%XX` escapes. `None` on a broken escape or invalid UTF-8.
pub fn url_decode(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let hex = bytes.get(i + 1..i + 3)?;
                if !hex.iter().all(u8::is_ascii_hexdigit) {
                    return None;
                }
                let hex = std::str::from_utf8(hex).ok()?;
                out.push(u8::from_str_radix(hex, 16).ok()?);
                i += 2;
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8(out).ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Response {
            status,
            headers: vec![("Content-Type".to_string(), content_type.to_string())],
            body: body.into(),
        }
    }

    pub fn html(body: String) -> Self {
        Self::new(200, "text/html; charset=utf-8", body)
    }

    pub fn json(value: &serde_json::Value) -> Self {
        Self::new(200, "application/json", value.to_string())
    }

    /// 303 See Other, so browsers follow a form post with a GET
    pub fn redirect(location: &str) -> Self {
        let mut response = Self::new(303, "text/plain; charset=utf-8", "See Other");
        response
            .headers
            .push(("Location".to_string(), location.to_string()));
        response
    }

    pub fn error(status: u16) -> Self {
        Self::new(status, "text/plain; charset=utf-8", reason_phrase(status))
    }

    #[cfg(test)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(
            writer,
            "HTTP/1.1 {} {}\r\n",
            self.status,
            reason_phrase(self.status)
        )?;
        for (name, value) in &self.headers {
            write!(writer, "{name}: {value}\r\n")?;
        }
        write!(
            writer,
            "Content-Length: {}\r\nConnection: close\r\n\r\n",
            self.body.len()
        )?;
        writer.write_all(&self.body)?;
        writer.flush()
    }
}

pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        303 => "See Other",
        400 => "Bad Request",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        413 => "Payload Too Large",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
