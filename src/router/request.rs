use http::{HeaderMap, Method};

/// What the matcher needs to know about an incoming request.
#[derive(Debug, Clone, Copy)]
pub struct RequestInfo<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    /// An explicit format, used when the path carries no extension.
    pub format: Option<&'a str>,
    pub headers: Option<&'a HeaderMap>,
}

impl<'a> RequestInfo<'a> {
    pub fn new(method: &'a Method, path: &'a str) -> Self {
        Self {
            method,
            path,
            format: None,
            headers: None,
        }
    }

    pub fn with_format(mut self, format: &'a str) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_headers(mut self, headers: &'a HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn header(&self, name: &str) -> Option<&'a str> {
        self.headers?.get(name)?.to_str().ok()
    }
}
