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

use std::io::prelude::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::str;
use std::time::Duration;

use serde_json;
use serde_json::Value;

use super::config::Endpoint;
use super::error::*;

const IPC_HDR_LEN: usize = 10; // length of u32 max string.
const IPC_BUFF_SIZE: usize = 8192;
// Replies larger than this are refused instead of allocated.
const IPC_MAX_MSG_LEN: usize = 1 << 30;

/// A connection to one conductor, carrying one request envelope at a time.
pub trait Channel: Send {
    /// Send one request envelope and wait for its reply envelope.
    ///
    /// Transport failures are reported as [`S5Error::NotConnected`][1];
    /// remote errors are carried inside the reply envelope.
    ///
    /// [1]: enum.S5Error.html#variant.NotConnected
    fn call(&mut self, request: &Value) -> Result<Value>;

    /// Change the timeout applied to later reads and writes.
    fn set_timeout(&mut self, _timeout: Duration) -> Result<()> {
        Ok(())
    }
}

/// Opens [`Channel`][1]s to conductors.
///
/// [`TcpConnector`][2] is the default. Other transports plug in through
/// [`Context::with_connector()`][3].
///
/// [1]: trait.Channel.html
/// [2]: struct.TcpConnector.html
/// [3]: struct.Context.html#method.with_connector
pub trait Connector: Send + Sync {
    /// Connect to `endpoint`, giving up after `timeout`. The returned
    /// channel applies `timeout` to reads and writes until
    /// [`Channel::set_timeout()`][1] changes it.
    ///
    /// [1]: trait.Channel.html#method.set_timeout
    fn connect(
        &self,
        endpoint: &Endpoint,
        timeout: Duration,
    ) -> Result<Box<dyn Channel>>;
}

/// Framed JSON over TCP: each message is preceded by its length as a
/// 10-digit zero-padded decimal string.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    fn connect(
        &self,
        endpoint: &Endpoint,
        timeout: Duration,
    ) -> Result<Box<dyn Channel>> {
        Ok(Box::new(TransPort::new(endpoint, timeout)?))
    }
}

pub(crate) struct TransPort {
    so: TcpStream,
}

impl TransPort {
    pub(crate) fn new(endpoint: &Endpoint, timeout: Duration) -> Result<TransPort> {
        let not_connected = |reason: String| {
            S5Error::NotConnected(format!(
                "Failed to connect conductor '{}': {}",
                endpoint, reason
            ))
        };
        let addrs = (endpoint.host(), endpoint.port())
            .to_socket_addrs()
            .map_err(|e| not_connected(e.to_string()))?;
        let mut last_err = "no address resolved".to_string();
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(so) => {
                    so.set_read_timeout(Some(timeout))?;
                    so.set_write_timeout(Some(timeout))?;
                    so.set_nodelay(true)?;
                    return Ok(TransPort { so });
                }
                Err(e) => last_err = e.to_string(),
            }
        }
        Err(not_connected(last_err))
    }

    fn send(&mut self, msg: &str) -> Result<()> {
        let msg =
            format!("{:0padding$}{}", msg.len(), msg, padding = IPC_HDR_LEN);

        self.so.write_all(msg.as_bytes())?;
        Ok(())
    }

    fn recv(&mut self) -> Result<String> {
        let mut msg_buff = [0u8; IPC_HDR_LEN];
        self.so.read_exact(&mut msg_buff)?;
        let msg_len = str::from_utf8(&msg_buff)?.parse::<usize>()?;
        if msg_len > IPC_MAX_MSG_LEN {
            return Err(S5Error::ConductorBug(format!(
                "Conductor message of {} bytes is too large",
                msg_len
            )));
        }
        let mut msg: Vec<u8> = Vec::new();
        msg.try_reserve_exact(msg_len).map_err(|e| {
            S5Error::NoMemory(format!(
                "Failed to allocate {} bytes for conductor message: {}",
                msg_len, e
            ))
        })?;
        let mut got: usize = 0;
        let mut msg_buff = [0u8; IPC_BUFF_SIZE];
        while got < msg_len {
            let want = (msg_len - got).min(IPC_BUFF_SIZE);
            let cur_got = self.so.read(&mut msg_buff[0..want])?;
            if cur_got == 0 {
                return Err(S5Error::NotConnected(
                    "Conductor closed connection".to_string(),
                ));
            }
            msg.extend_from_slice(&msg_buff[0..cur_got]);
            got += cur_got;
        }
        let msg = String::from_utf8(msg)?;
        Ok(msg)
    }
}

impl Channel for TransPort {
    fn call(&mut self, request: &Value) -> Result<Value> {
        let msg = serde_json::to_string(request)?;
        self.send(&msg)?;
        Ok(serde_json::from_str(&self.recv()?)?)
    }

    fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.so.set_read_timeout(Some(timeout))?;
        self.so.set_write_timeout(Some(timeout))?;
        Ok(())
    }
}
