// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hand-framed `multipart/form-data` bodies.
//!
//! The boundary is a fixed literal, so identical inputs always produce
//! byte-identical bodies. Every part opens with `CRLF--boundary CRLF`.

use tattle_core::{ClosingFraming, SendError};

/// The multipart boundary used for every upload.
pub const BOUNDARY: &str = "---------------------------14737809831466499882746641449";

const CRLF: &str = "\r\n";

/// The `Content-Type` header value announcing [`BOUNDARY`].
pub fn content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// Accumulates parts into a request body.
#[derive(Debug)]
pub struct MultipartBody {
    buf: Vec<u8>,
    framing: ClosingFraming,
}

impl MultipartBody {
    pub fn new(framing: ClosingFraming) -> Self {
        Self {
            buf: Vec::new(),
            framing,
        }
    }

    /// Appends a plain form field.
    pub fn text_field(mut self, name: &str, value: &str) -> Result<Self, SendError> {
        let disposition = format!(
            "Content-Disposition: form-data; name=\"{}\"",
            header_token(name)?
        );
        self.open_part(&[disposition.as_str()]);
        self.buf.extend_from_slice(value.as_bytes());
        Ok(self)
    }

    /// Appends a file part carrying `data` as `application/octet-stream`.
    pub fn file_field(mut self, name: &str, file_name: &str, data: &[u8]) -> Result<Self, SendError> {
        let disposition = format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"",
            header_token(name)?,
            header_token(file_name)?
        );
        self.open_part(&[disposition.as_str(), "Content-Type: application/octet-stream"]);
        self.buf.extend_from_slice(data);
        Ok(self)
    }

    /// Writes the closing delimiter and returns the body.
    pub fn finish(mut self) -> Vec<u8> {
        self.buf.extend_from_slice(CRLF.as_bytes());
        self.buf.extend_from_slice(b"--");
        self.buf.extend_from_slice(BOUNDARY.as_bytes());
        if self.framing == ClosingFraming::Standard {
            self.buf.extend_from_slice(b"--");
            self.buf.extend_from_slice(CRLF.as_bytes());
        }
        self.buf
    }

    fn open_part(&mut self, headers: &[&str]) {
        self.buf
            .extend_from_slice(format!("{CRLF}--{BOUNDARY}{CRLF}").as_bytes());
        for header in headers {
            self.buf.extend_from_slice(header.as_bytes());
            self.buf.extend_from_slice(CRLF.as_bytes());
        }
        self.buf.extend_from_slice(CRLF.as_bytes());
    }
}

/// Checks that `value` can sit inside a quoted header parameter.
fn header_token(value: &str) -> Result<&str, SendError> {
    if value.is_empty() {
        return Err(SendError::TextEncodingFailed {
            reason: "empty header parameter".into(),
        });
    }
    match value
        .chars()
        .find(|c| !c.is_ascii() || c.is_ascii_control() || *c == '"')
    {
        Some(bad) => Err(SendError::TextEncodingFailed {
            reason: format!("header parameter {value:?} contains {bad:?}"),
        }),
        None => Ok(value),
    }
}
