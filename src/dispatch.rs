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

use std::fmt;
use std::sync::Arc;

use serde_json;
use serde_json::{Map, Number, Value};

use super::client::Credential;
use super::data::Role;
use super::error::*;
use super::locator::ConductorLocator;

const IPC_JSON_ID: u8 = 100;

/// Management request types understood by conductors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MetaRequest {
    Ping,
    UserLogin,
    TenantCreate,
    TenantDelete,
    TenantUpdate,
    TenantList,
    TenantStat,
    AdminCreate,
    AdminDelete,
    VolumeCreate,
    VolumeDelete,
    VolumeUpdate,
    VolumeStat,
    VolumeRename,
    VolumeResize,
    VolumesOfTenant,
    VolumesOfCluster,
    ClusterStat,
    CltLinkList,
    CltLinkListOfVolume,
    CltLinkListOfTenant,
    S5StoreAdd,
    S5StoreList,
    S5StoreStat,
    S5StoreDelete,
    ConductorStat,
    ConductorRoleSet,
    FanListOfS5Store,
    HostPortListOfS5Store,
    RgeListOfS5Store,
    BccListOfS5Store,
    PowerListOfS5Store,
    TrayListOfS5Store,
    OccupiedSizeOfVolume,
    OccupiedSizeOfTenant,
    RealtimeStatisticOfS5Store,
    RealtimeStatisticOfTenant,
    RealtimeStatisticOfVolume,
    PowerOff,
    SetFanSpeed,
}

impl MetaRequest {
    pub(crate) fn method(self) -> &'static str {
        match self {
            MetaRequest::Ping => "ping",
            MetaRequest::UserLogin => "user_login",
            MetaRequest::TenantCreate => "tenant_create",
            MetaRequest::TenantDelete => "tenant_delete",
            MetaRequest::TenantUpdate => "tenant_update",
            MetaRequest::TenantList => "tenant_list",
            MetaRequest::TenantStat => "tenant_stat",
            MetaRequest::AdminCreate => "admin_create",
            MetaRequest::AdminDelete => "admin_delete",
            MetaRequest::VolumeCreate => "volume_create",
            MetaRequest::VolumeDelete => "volume_delete",
            MetaRequest::VolumeUpdate => "volume_update",
            MetaRequest::VolumeStat => "volume_stat",
            MetaRequest::VolumeRename => "volume_rename",
            MetaRequest::VolumeResize => "volume_resize",
            MetaRequest::VolumesOfTenant => "volume_list_of_tenant",
            MetaRequest::VolumesOfCluster => "volume_list_of_cluster",
            MetaRequest::ClusterStat => "s5_stat",
            MetaRequest::CltLinkList => "cltlink_list",
            MetaRequest::CltLinkListOfVolume => "cltlink_list_of_volume",
            MetaRequest::CltLinkListOfTenant => "cltlink_list_of_tenant",
            MetaRequest::S5StoreAdd => "s5store_add",
            MetaRequest::S5StoreList => "s5store_list",
            MetaRequest::S5StoreStat => "s5store_stat",
            MetaRequest::S5StoreDelete => "s5store_delete",
            MetaRequest::ConductorStat => "conductor_stat",
            MetaRequest::ConductorRoleSet => "conductor_role_set",
            MetaRequest::FanListOfS5Store => "fan_list_of_s5store",
            MetaRequest::HostPortListOfS5Store => "host_port_list_of_s5store",
            MetaRequest::RgeListOfS5Store => "rge_list_of_s5store",
            MetaRequest::BccListOfS5Store => "bcc_list_of_s5store",
            MetaRequest::PowerListOfS5Store => "power_list_of_s5store",
            MetaRequest::TrayListOfS5Store => "tray_list_of_s5store",
            MetaRequest::OccupiedSizeOfVolume => "occupied_size_of_volume",
            MetaRequest::OccupiedSizeOfTenant => "occupied_size_of_tenant",
            MetaRequest::RealtimeStatisticOfS5Store => {
                "realtime_statistic_of_s5store"
            }
            MetaRequest::RealtimeStatisticOfTenant => {
                "realtime_statistic_of_tenant"
            }
            MetaRequest::RealtimeStatisticOfVolume => {
                "realtime_statistic_of_volume"
            }
            MetaRequest::PowerOff => "s5store_poweroff",
            MetaRequest::SetFanSpeed => "s5store_set_fan_speed",
        }
    }
}

impl fmt::Display for MetaRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.method())
    }
}

/// Identity a request is issued from.
pub(crate) struct Executor<'a> {
    pub(crate) credential: &'a Credential,
    pub(crate) role: Role,
}

pub(crate) fn request_envelope(
    req: MetaRequest,
    params: Map<String, Value>,
    executor: Option<&Executor>,
) -> Value {
    let mut msg = Map::new();
    msg.insert("method".to_string(), Value::String(req.method().to_string()));
    msg.insert("id".to_string(), Value::Number(Number::from(IPC_JSON_ID)));
    msg.insert("params".to_string(), Value::Object(params));
    if let Some(exe) = executor {
        let mut ctx = Map::new();
        ctx.insert(
            "user_name".to_string(),
            Value::String(exe.credential.name().to_string()),
        );
        ctx.insert(
            "pass_wd".to_string(),
            Value::String(exe.credential.secret().to_string()),
        );
        ctx.insert(
            "role".to_string(),
            Value::Number(Number::from(exe.role as i32)),
        );
        msg.insert("executor".to_string(), Value::Object(ctx));
    }
    Value::Object(msg)
}

pub(crate) fn decode_reply(req: MetaRequest, reply: Value) -> Result<Value> {
    let mut obj = match reply {
        Value::Object(o) => o,
        v => {
            return Err(S5Error::ConductorBug(format!(
                "Invalid reply to {}: {}",
                req, v
            )))
        }
    };
    if let Some(e) = obj.remove("error") {
        let s5_err_ipc: S5ErrorIpc = serde_json::from_value(e)?;
        return Err(From::from(s5_err_ipc));
    };
    match obj.remove("result") {
        Some(r) => Ok(r),
        None => Err(S5Error::ConductorBug(format!(
            "Got no result for {}",
            req
        ))),
    }
}

/// Turns typed management calls into conductor round trips.
pub(crate) struct Dispatcher {
    locator: Arc<ConductorLocator>,
}

impl Dispatcher {
    pub(crate) fn new(locator: Arc<ConductorLocator>) -> Dispatcher {
        Dispatcher { locator }
    }

    pub(crate) fn locator(&self) -> &ConductorLocator {
        &self.locator
    }

    /// Send `req` with `params` on behalf of `executor`.
    ///
    /// The credential is checked before any conductor is contacted. A
    /// conductor failing mid-request is given up for the next live one
    /// once; remote errors are returned as they are.
    ///
    /// A request is resent even when the reply, not the request, was lost.
    /// A create or rename already applied by the failed conductor then
    /// comes back as `-EEXIST`, i.e. `InvalidArgument`.
    pub(crate) fn send(
        &self,
        executor: &Executor,
        req: MetaRequest,
        params: Map<String, Value>,
    ) -> Result<Value> {
        executor.credential.verify()?;
        let envelope = request_envelope(req, params, Some(executor));

        let mut active = self.locator.acquire()?;
        debug!("Sending {} to conductor '{}'", req, active.endpoint);
        match active.channel.call(&envelope) {
            Ok(reply) => decode_reply(req, reply),
            Err(S5Error::NotConnected(e)) => {
                warn!(
                    "Conductor '{}' failed during {}: {}, retrying",
                    active.endpoint, req, e
                );
                self.locator.mark_failed(&active);
                let mut retry = self.locator.acquire()?;
                debug!("Resending {} to conductor '{}'", req, retry.endpoint);
                match retry.channel.call(&envelope) {
                    Ok(reply) => decode_reply(req, reply),
                    Err(e) => {
                        self.locator.mark_failed(&retry);
                        Err(e)
                    }
                }
            }
            Err(e) => Err(e),
        }
    }
}
