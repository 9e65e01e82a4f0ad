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

use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use url;

use super::error::*;

/// Port conductors listen on when an endpoint does not name one.
pub const DEFAULT_CONDUCTOR_PORT: u16 = 49180;
const DEFAULT_PROBE_TIMEOUT_MS: u64 = 3_000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
static CONF_PATH_DEFAULT: &'static str = "/etc/s5/s5.toml";
static CONF_PATH_VAR_NAME: &'static str = "S5_CONF_PATH";

/// Network address of one conductor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    pub fn new(host: &str, port: u16) -> Endpoint {
        Endpoint {
            host: host.to_string(),
            port,
        }
    }

    /// Parse `host`, `host:port` or `tcp://host:port`.
    pub fn parse(s: &str) -> Result<Endpoint> {
        let s = s.trim();
        if s.is_empty() {
            return Err(S5Error::InvalidArgument(
                "Empty conductor endpoint".to_string(),
            ));
        }
        let uri = if s.contains("://") {
            s.to_string()
        } else {
            format!("tcp://{}", s)
        };
        let p = match url::Url::parse(&uri) {
            Ok(p) => p,
            Err(e) => {
                return Err(S5Error::InvalidArgument(format!(
                    "Failed to parse conductor endpoint '{}': {}",
                    s, e
                )))
            }
        };
        if p.scheme() != "tcp" {
            return Err(S5Error::InvalidArgument(format!(
                "Unsupported scheme '{}' in conductor endpoint '{}'",
                p.scheme(),
                s
            )));
        }
        let host = match p.host_str() {
            Some(h) if !h.is_empty() => {
                h.trim_start_matches('[').trim_end_matches(']').to_string()
            }
            _ => {
                return Err(S5Error::InvalidArgument(format!(
                    "No host in conductor endpoint '{}'",
                    s
                )))
            }
        };
        Ok(Endpoint {
            host,
            port: p.port().unwrap_or(DEFAULT_CONDUCTOR_PORT),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    conductor: ConductorSection,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct ConductorSection {
    endpoints: Vec<String>,
    #[serde(default = "default_probe_timeout_ms")]
    probe_timeout_ms: u64,
    #[serde(default = "default_request_timeout_ms")]
    request_timeout_ms: u64,
}

fn default_probe_timeout_ms() -> u64 {
    DEFAULT_PROBE_TIMEOUT_MS
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

/// Client configuration: where the conductors are and how long to wait for
/// them.
///
/// The configuration file is TOML:
///
/// ```toml
/// [conductor]
/// endpoints = ["10.0.0.1:49180", "tcp://10.0.0.2:49180"]
/// probe_timeout_ms = 3000
/// request_timeout_ms = 30000
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    endpoints: Vec<Endpoint>,
    probe_timeout: Duration,
    request_timeout: Duration,
}

impl Config {
    /// Configuration with default timeouts.
    pub fn new(endpoints: Vec<Endpoint>) -> Result<Config> {
        Config::with_timeouts(
            endpoints,
            Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        )
    }

    pub fn with_timeouts(
        endpoints: Vec<Endpoint>,
        probe_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Config> {
        if endpoints.is_empty() {
            return Err(S5Error::InvalidArgument(
                "No conductor endpoint configured".to_string(),
            ));
        }
        if probe_timeout == Duration::from_secs(0)
            || request_timeout == Duration::from_secs(0)
        {
            return Err(S5Error::InvalidArgument(
                "Conductor timeouts should be larger than 0".to_string(),
            ));
        }
        Ok(Config {
            endpoints,
            probe_timeout,
            request_timeout,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Config> {
        let f: ConfigFile = match toml::from_str(content) {
            Ok(f) => f,
            Err(e) => {
                return Err(S5Error::InvalidArgument(format!(
                    "Invalid S5 configuration: {}",
                    e
                )))
            }
        };
        let endpoints = f.conductor
            .endpoints
            .iter()
            .map(|s| Endpoint::parse(s))
            .collect::<Result<Vec<Endpoint>>>()?;
        Config::with_timeouts(
            endpoints,
            Duration::from_millis(f.conductor.probe_timeout_ms),
            Duration::from_millis(f.conductor.request_timeout_ms),
        )
    }

    /// Read configuration from the file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                return Err(S5Error::InvalidArgument(format!(
                    "Failed to read S5 configuration '{}': {}",
                    path.display(),
                    e
                )))
            }
        };
        Config::from_toml(&content)
    }

    /// Read configuration from the file named by `S5_CONF_PATH`, or from
    /// `/etc/s5/s5.toml`.
    pub fn load() -> Result<Config> {
        Config::from_file(conf_path())
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Time allowed to connect to and probe one conductor.
    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// Time allowed for one request round trip.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

pub(crate) fn conf_path() -> String {
    match env::var(CONF_PATH_VAR_NAME) {
        Ok(v) => v,
        Err(_) => CONF_PATH_DEFAULT.to_string(),
    }
}
