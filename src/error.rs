// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

use std::result;

use thiserror::Error;

/// Error kinds surfaced by every management call.
///
/// Every variant carries the detail of what went wrong: the invalid field,
/// the unreachable endpoints, or the message returned by the conductor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum S5Error {
    /// Malformed or missing input. Raised locally before any conductor is
    /// contacted, or returned by the conductor for an unknown object.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Allocation failure while building a request or a result, on either
    /// side of the connection.
    #[error("Out of memory: {0}")]
    NoMemory(String),
    /// The operation needs an administrator context.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    /// No conductor in the configured set could be reached.
    #[error("Not connected: {0}")]
    NotConnected(String),
    /// The conductor replied with data this library cannot understand.
    #[error("Conductor bug: {0}")]
    ConductorBug(String),
}

pub type Result<T> = result::Result<T, S5Error>;

pub(crate) const EPERM: i32 = 1;
pub(crate) const ENOENT: i32 = 2;
pub(crate) const EIO: i32 = 5;
pub(crate) const ENOMEM: i32 = 12;
pub(crate) const EACCES: i32 = 13;
pub(crate) const EBUSY: i32 = 16;
pub(crate) const EEXIST: i32 = 17;
pub(crate) const EINVAL: i32 = 22;
pub(crate) const ENOTCONN: i32 = 107;

impl S5Error {
    /// The negative errno the C management API returns for this error.
    pub fn errno(&self) -> i32 {
        match *self {
            S5Error::InvalidArgument(_) => -EINVAL,
            S5Error::NoMemory(_) => -ENOMEM,
            S5Error::PermissionDenied(_) => -EPERM,
            S5Error::NotConnected(_) => -ENOTCONN,
            S5Error::ConductorBug(_) => -EIO,
        }
    }

    /// Build an error from the `code` of a conductor error reply.
    ///
    /// Both negative and positive errno values are accepted.
    pub fn from_errno(code: i32, message: &str) -> S5Error {
        let msg = message.to_string();
        match code.abs() {
            EINVAL | EEXIST | EBUSY => S5Error::InvalidArgument(msg),
            ENOENT => S5Error::InvalidArgument(format!("Not found: {}", msg)),
            ENOMEM => S5Error::NoMemory(msg),
            EPERM | EACCES => S5Error::PermissionDenied(msg),
            ENOTCONN => S5Error::NotConnected(msg),
            _ => S5Error::ConductorBug(format!(
                "Unknown error code {}: {}",
                code, msg
            )),
        }
    }
}

impl From<::serde_json::Error> for S5Error {
    fn from(e: ::serde_json::Error) -> Self {
        S5Error::ConductorBug(format!(
            "Failed to convert conductor message to S5 struct: {}",
            e
        ))
    }
}

impl From<::std::string::FromUtf8Error> for S5Error {
    fn from(e: ::std::string::FromUtf8Error) -> Self {
        S5Error::ConductorBug(format!(
            "Failed to convert conductor message to UTF-8 string: {}",
            e
        ))
    }
}

impl From<::std::str::Utf8Error> for S5Error {
    fn from(e: ::std::str::Utf8Error) -> Self {
        S5Error::ConductorBug(format!(
            "Failed to convert conductor message to UTF-8 string: {}",
            e
        ))
    }
}

impl From<::std::num::ParseIntError> for S5Error {
    fn from(e: ::std::num::ParseIntError) -> Self {
        S5Error::ConductorBug(format!(
            "Invalid length header in conductor message: {}",
            e
        ))
    }
}

impl From<::std::io::Error> for S5Error {
    fn from(e: ::std::io::Error) -> Self {
        S5Error::NotConnected(format!("{}", e))
    }
}

impl From<::regex::Error> for S5Error {
    fn from(e: ::regex::Error) -> Self {
        S5Error::ConductorBug(format!("Regex error: {}", e))
    }
}

#[derive(Deserialize, Debug)]
pub(crate) struct S5ErrorIpc {
    pub(crate) code: i32,
    #[serde(default)]
    pub(crate) message: String,
}

impl From<S5ErrorIpc> for S5Error {
    fn from(e: S5ErrorIpc) -> Self {
        S5Error::from_errno(e.code, &e.message)
    }
}
