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

//! # `s5manager`
//!
//! `s5manager` is the management client of the S5 distributed block
//! storage system. It turns typed calls into requests to the S5 conductors
//! and supports these actions:
//!
//!  * Create, update, delete and list tenants and administrators.
//!
//!  * Create, rename, resize, update, delete and list volumes.
//!
//!  * List client links of the cluster, of a tenant or of a volume.
//!
//!  * Add, delete and inspect storage nodes (s5store), including fan,
//!    power, tray, RGE, BCC and host port hardware.
//!
//!  * Query and change conductor roles.
//!
//!  * Query capacity, occupied size and realtime statistics, power off a
//!    storage node and set its fan speed.
//!
//! To use `s5manager`, you need:
//!
//!  * List the conductors in a [`Config`][1], or in the TOML file named by
//!    the `S5_CONF_PATH` environment variable.
//!
//!  * Log in via [`Context::new()`][2].
//!
//!  * Turn an administrator login into an [`AdminContext`][3] for
//!    administrative calls.
//!
//! # Example code
//!
//! ```no_run
//! extern crate s5manager;
//! use s5manager::{Config, Context, S5Error};
//! fn main() {
//!     let cfg = match Config::load() {
//!         Ok(i) => i,
//!         Err(e) => panic!("{}", e),
//!     };
//!     let ctx = match Context::new("admin", "123456", &cfg) {
//!         Ok(i) => i,
//!         Err(e) => {
//!             match e {
//!                 // Error handling goes here
//!                 S5Error::NotConnected(_) =>
//!                     panic!("Please start the S5 conductor"),
//!                 _ => panic!("{}", e),
//!             };
//!         },
//!     };
//!     let admin = match ctx.into_admin() {
//!         Ok(i) => i,
//!         Err(e) => panic!("{}", e), // Please use error handling as above.
//!     };
//!     let tenants = match admin.list_tenant() {
//!         Ok(i) => i,
//!         Err(e) => panic!("{}", e),
//!     };
//!     for t in &tenants {
//!         println!("Got tenant: {} {}", t.name, t.size);
//!     }
//!     tenants.release();
//! }
//! ```
//!
//! [1]: struct.Config.html
//! [2]: struct.Context.html#method.new
//! [3]: struct.AdminContext.html

extern crate regex;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
#[macro_use]
extern crate log;
extern crate thiserror;
extern crate toml;
extern crate url;

pub use self::admin::AdminContext;
pub use self::client::{Context, Credential};
pub use self::config::{Config, Endpoint, DEFAULT_CONDUCTOR_PORT};
pub use self::data::*;
pub use self::error::{Result, S5Error};
pub use self::ipc::{Channel, Connector, TcpConnector};
pub use self::misc::{
    size_bytes_2_size_human, size_human_2_size_bytes, IOPS_UNIT,
    MAX_FAN_SPEED_RATE, MAX_NAME_LEN, MAX_REPLICA_NUM, MAX_SECRET_LEN,
    MAX_VOLUME_IOPS, PHY_BLOCK_SIZE,
};

mod admin;
mod client;
mod config;
mod data;
mod dispatch;
mod error;
mod ipc;
mod locator;
mod misc;
