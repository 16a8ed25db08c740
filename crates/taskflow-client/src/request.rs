//! Transport-neutral request description

use serde_json::Value;
use std::fmt;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl Method {
    /// Upper-case method name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One part of a multipart form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// Form field name
    pub name: String,
    /// File name sent with the part
    pub file_name: Option<String>,
    /// Content type of the part
    pub mime_type: Option<String>,
    /// Raw bytes
    pub data: Vec<u8>,
}

impl Part {
    /// File part
    #[must_use]
    pub fn file(name: impl Into<String>, file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            file_name: Some(file_name.into()),
            mime_type: None,
            data,
        }
    }

    /// With content type
    #[inline]
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Request body
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Body {
    /// No body
    #[default]
    Empty,
    /// JSON document
    Json(Value),
    /// multipart/form-data; the transport chooses the boundary
    Multipart(Vec<Part>),
}

/// A request relative to the API base URL
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Method
    pub method: Method,
    /// Path without leading slash, e.g. `projects/3/tasks`
    pub path: String,
    /// Query parameters in insertion order
    pub query: Vec<(String, String)>,
    /// Body
    pub body: Body,
}

impl Request {
    /// Create a request with no body
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            method,
            path: path.trim_start_matches('/').to_string(),
            query: Vec::new(),
            body: Body::Empty,
        }
    }

    /// GET request
    #[inline]
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// DELETE request
    #[inline]
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// With a JSON body
    #[inline]
    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Body::Json(body);
        self
    }

    /// With a multipart body
    #[inline]
    #[must_use]
    pub fn with_parts(mut self, parts: Vec<Part>) -> Self {
        self.body = Body::Multipart(parts);
        self
    }

    /// With one query parameter appended
    #[inline]
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// JSON body, if any
    #[must_use]
    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            Body::Json(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn leading_slash_is_dropped() {
        let request = Request::get("/projects/1");
        assert_eq!(request.path, "projects/1");
        assert_eq!(request.to_string(), "GET projects/1");
    }

    #[test]
    fn builders_compose() {
        let request = Request::new(Method::Post, "tasks/2/comments")
            .with_json(json!({"body": "hi"}))
            .with_query("page", 2);
        assert_eq!(request.json(), Some(&json!({"body": "hi"})));
        assert_eq!(request.query, vec![("page".to_string(), "2".to_string())]);
    }
}
