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

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::admin::AdminContext;
use super::config::{Config, Endpoint};
use super::data::*;
use super::dispatch::{Dispatcher, Executor, MetaRequest};
use super::error::*;
use super::ipc::{Connector, TcpConnector};
use super::locator::ConductorLocator;
use super::misc::*;

/// Name and password of a tenant or an administrator.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    name: String,
    secret: String,
}

impl Credential {
    pub fn new(name: &str, secret: &str) -> Credential {
        Credential {
            name: name.to_string(),
            secret: secret.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }

    /// Check the format of name and password.
    ///
    /// # Errors
    ///
    ///  * [`S5Error::InvalidArgument`][1]: empty or overlong name or
    ///    password, or a name not made of letters, numbers and
    ///    underscores.
    ///
    /// [1]: enum.S5Error.html#variant.InvalidArgument
    pub fn verify(&self) -> Result<()> {
        verify_name("User", &self.name)?;
        verify_secret("User", &self.secret)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credential")
            .field("name", &self.name)
            .field("secret", &"<hidden>")
            .finish()
    }
}

#[derive(Deserialize, Debug)]
struct LoginReply {
    role: i32,
}

/// Represent a logged-in identity and the conductors it talks to.
///
/// A `Context` offers the calls open to every tenant. Administrators turn
/// it into an [`AdminContext`][1] with [`Context::into_admin()`][2] to reach
/// the administrative calls.
///
/// `Context` is `Send` and `Sync`: calls may be issued from several threads
/// at once, each call using its own conductor connection.
///
/// A call whose connection breaks is resent once to the next live
/// conductor. When only the reply was lost, a create or rename that took
/// effect reports [`S5Error::InvalidArgument`][3] on the resend; stat the
/// object to tell it apart from a real conflict.
///
/// [1]: struct.AdminContext.html
/// [2]: #method.into_admin
/// [3]: enum.S5Error.html#variant.InvalidArgument
pub struct Context {
    credential: Credential,
    role: Role,
    dispatcher: Dispatcher,
}

impl Context {
    /// Log in to the cluster described by `cfg` over TCP.
    ///
    /// # Errors
    ///
    ///  * [`S5Error::InvalidArgument`][1]: invalid name or password format,
    ///    no conductor is contacted.
    ///  * [`S5Error::NotConnected`][2]: no conductor could be reached.
    ///  * [`S5Error::PermissionDenied`][3]: conductor refused the
    ///    credential.
    ///
    /// [1]: enum.S5Error.html#variant.InvalidArgument
    /// [2]: enum.S5Error.html#variant.NotConnected
    /// [3]: enum.S5Error.html#variant.PermissionDenied
    pub fn new(name: &str, secret: &str, cfg: &Config) -> Result<Context> {
        Context::with_connector(name, secret, cfg, Arc::new(TcpConnector))
    }

    /// Log in using a custom transport.
    pub fn with_connector(
        name: &str,
        secret: &str,
        cfg: &Config,
        connector: Arc<dyn Connector>,
    ) -> Result<Context> {
        let credential = Credential::new(name, secret);
        credential.verify()?;
        let locator = Arc::new(ConductorLocator::new(cfg, connector));
        let mut ctx = Context {
            credential,
            role: Role::Invalid,
            dispatcher: Dispatcher::new(locator),
        };
        let reply: LoginReply = serde_json::from_value(
            ctx.invoke(MetaRequest::UserLogin, Map::new())?,
        )?;
        ctx.role = match Role::from(reply.role) {
            Role::Invalid => {
                return Err(S5Error::PermissionDenied(format!(
                    "Conductor rejected user '{}'",
                    name
                )))
            }
            r => r,
        };
        info!("Logged in as '{}' with role {:?}", name, ctx.role);
        Ok(ctx)
    }

    /// Login name.
    pub fn name(&self) -> &str {
        self.credential.name()
    }

    /// Role granted by the conductor at login.
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Gain access to the administrative calls.
    ///
    /// # Errors
    ///
    ///  * [`S5Error::PermissionDenied`][1]: this is not an administrator
    ///    context.
    ///
    /// [1]: enum.S5Error.html#variant.PermissionDenied
    pub fn into_admin(self) -> Result<AdminContext> {
        if !self.is_admin() {
            return Err(S5Error::PermissionDenied(format!(
                "User '{}' is not an administrator",
                self.name()
            )));
        }
        Ok(AdminContext::new(self))
    }

    /// Conductor endpoints currently known.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.dispatcher.locator().endpoints()
    }

    /// Conductor the next call tries first.
    pub fn active_endpoint(&self) -> Option<Endpoint> {
        self.dispatcher.locator().active_endpoint()
    }

    /// Replace the conductor endpoints, e.g. after the cluster reported
    /// [`S5Error::NotConnected`][1].
    ///
    /// [1]: enum.S5Error.html#variant.NotConnected
    pub fn refresh_endpoints(&self, endpoints: Vec<Endpoint>) -> Result<()> {
        self.dispatcher.locator().refresh(endpoints)
    }

    /// Release the context. Equal to dropping it.
    pub fn release(self) {
        debug!("Releasing context of '{}'", self.name());
    }

    pub(crate) fn invoke(
        &self,
        req: MetaRequest,
        args: Map<String, Value>,
    ) -> Result<Value> {
        let executor = Executor {
            credential: &self.credential,
            role: self.role,
        };
        self.dispatcher.send(&executor, req, args)
    }

    pub(crate) fn invoke_list<T: DeserializeOwned>(
        &self,
        req: MetaRequest,
        args: Map<String, Value>,
    ) -> Result<List<T>> {
        let reply: ListReply<T> =
            serde_json::from_value(self.invoke(req, args)?)?;
        List::from_reply(reply)
    }

    /// Get the information of a tenant.
    pub fn stat_tenant(&self, tenant_name: &str) -> Result<Tenant> {
        verify_name("Tenant", tenant_name)?;
        let mut args = Map::new();
        args.insert("name".to_string(), serde_json::to_value(tenant_name)?);
        Ok(serde_json::from_value(self.invoke(MetaRequest::TenantStat, args)?)?)
    }

    /// Create a volume for a tenant.
    ///
    /// # Errors
    ///
    ///  * [`S5Error::InvalidArgument`][1]: invalid names, a size which is
    ///    zero or not a multiple of 4 MiB, an IOPS which is zero, not a
    ///    multiple of 1024 or above 1M, a zero bandwidth, or a replica
    ///    count out of 1 to 3.
    ///
    /// [1]: enum.S5Error.html#variant.InvalidArgument
    pub fn create_volume(
        &self,
        tenant_name: &str,
        vol: &VolumeCreateArgs,
    ) -> Result<()> {
        verify_name("Tenant", tenant_name)?;
        verify_name("Volume", &vol.name)?;
        verify_volume_size(vol.size)?;
        verify_volume_iops(vol.iops)?;
        verify_volume_bw(vol.bw)?;
        if vol.replicas.is_empty() || vol.replicas.len() > MAX_REPLICA_NUM {
            return Err(S5Error::InvalidArgument(format!(
                "Invalid replica count {}, should be in range 1 - {}",
                vol.replicas.len(),
                MAX_REPLICA_NUM
            )));
        }
        for r in &vol.replicas {
            verify_name("S5store", &r.s5store_name)?;
        }
        let mut args = Map::new();
        args.insert("volume_name".to_string(), serde_json::to_value(&vol.name)?);
        args.insert("tenant_name".to_string(), serde_json::to_value(tenant_name)?);
        args.insert("size".to_string(), serde_json::to_value(vol.size)?);
        args.insert("iops".to_string(), serde_json::to_value(vol.iops)?);
        args.insert("bw".to_string(), serde_json::to_value(vol.bw)?);
        args.insert("flag".to_string(), serde_json::to_value(vol.flag)?);
        args.insert(
            "replica_count".to_string(),
            serde_json::to_value(vol.replicas.len())?,
        );
        args.insert(
            "tray_id".to_string(),
            serde_json::to_value(
                vol.replicas.iter().map(|r| r.tray_id).collect::<Vec<i32>>(),
            )?,
        );
        args.insert(
            "s5store_name".to_string(),
            serde_json::to_value(
                vol.replicas
                    .iter()
                    .map(|r| r.s5store_name.as_str())
                    .collect::<Vec<&str>>(),
            )?,
        );
        self.invoke(MetaRequest::VolumeCreate, args)?;
        Ok(())
    }

    /// Delete a volume. Opened volumes cannot be deleted.
    pub fn delete_volume(&self, tenant_name: &str, volume_name: &str) -> Result<()> {
        let args = volume_args(tenant_name, volume_name)?;
        self.invoke(MetaRequest::VolumeDelete, args)?;
        Ok(())
    }

    pub fn rename_volume(
        &self,
        tenant_name: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<()> {
        let mut args = volume_args(tenant_name, old_name)?;
        verify_name("New volume", new_name)?;
        args.insert("new_name".to_string(), serde_json::to_value(new_name)?);
        self.invoke(MetaRequest::VolumeRename, args)?;
        Ok(())
    }

    /// Resize a volume. `size` should be a non-zero multiple of 4 MiB.
    pub fn resize_volume(
        &self,
        tenant_name: &str,
        volume_name: &str,
        size: u64,
    ) -> Result<()> {
        let mut args = volume_args(tenant_name, volume_name)?;
        verify_volume_size(size)?;
        args.insert("resize".to_string(), serde_json::to_value(size)?);
        self.invoke(MetaRequest::VolumeResize, args)?;
        Ok(())
    }

    /// Update name and QoS of a volume. Fields not set in `changes` are
    /// kept. QoS changes take effect immediately; size changes are refused
    /// while the volume is open.
    pub fn update_volume(
        &self,
        tenant_name: &str,
        volume_name: &str,
        changes: &VolumeUpdate,
    ) -> Result<()> {
        let mut args = volume_args(tenant_name, volume_name)?;
        if changes.is_empty() {
            return Err(S5Error::InvalidArgument(format!(
                "Nothing to update for volume '{}'",
                volume_name
            )));
        }
        verify_update_quota("size", changes.size)?;
        verify_update_quota("iops", changes.iops)?;
        verify_update_quota("bw", changes.bw)?;
        if let Some(ref n) = changes.new_name {
            verify_name("New volume", n)?;
            args.insert("new_name".to_string(), serde_json::to_value(n)?);
        }
        if let Some(size) = changes.size {
            verify_volume_size(size)?;
            args.insert("size".to_string(), serde_json::to_value(size)?);
        }
        if let Some(iops) = changes.iops {
            verify_volume_iops(iops)?;
            args.insert("iops".to_string(), serde_json::to_value(iops)?);
        }
        if let Some(bw) = changes.bw {
            verify_volume_bw(bw)?;
            args.insert("bw".to_string(), serde_json::to_value(bw)?);
        }
        self.invoke(MetaRequest::VolumeUpdate, args)?;
        Ok(())
    }

    pub fn stat_volume(&self, tenant_name: &str, volume_name: &str) -> Result<Volume> {
        let args = volume_args(tenant_name, volume_name)?;
        Ok(serde_json::from_value(self.invoke(MetaRequest::VolumeStat, args)?)?)
    }

    /// Size of a volume in bytes.
    pub fn get_volume_size(&self, tenant_name: &str, volume_name: &str) -> Result<u64> {
        Ok(self.stat_volume(tenant_name, volume_name)?.size)
    }

    /// List volumes of a tenant. Tenants may only list their own volumes.
    pub fn list_volume_by_tenant(&self, tenant_name: &str) -> Result<VolumeList> {
        verify_name("Tenant", tenant_name)?;
        let mut args = Map::new();
        args.insert("tenant_name".to_string(), serde_json::to_value(tenant_name)?);
        self.invoke_list(MetaRequest::VolumesOfTenant, args)
    }

    /// List all volumes visible to this context.
    pub fn list_volume(&self) -> Result<VolumeList> {
        self.invoke_list(MetaRequest::VolumesOfCluster, Map::new())
    }

    /// Capacity of the whole cluster.
    pub fn stat(&self) -> Result<ClusterCapacity> {
        Ok(serde_json::from_value(self.invoke(MetaRequest::ClusterStat, Map::new())?)?)
    }

    pub fn realtime_statistic_by_tenant(
        &self,
        tenant_name: &str,
    ) -> Result<RealtimeStatistic> {
        verify_name("Tenant", tenant_name)?;
        let mut args = Map::new();
        args.insert("tenant_name".to_string(), serde_json::to_value(tenant_name)?);
        Ok(serde_json::from_value(self.invoke(
            MetaRequest::RealtimeStatisticOfTenant,
            args,
        )?)?)
    }

    pub fn realtime_statistic_by_volume(
        &self,
        tenant_name: &str,
        volume_name: &str,
    ) -> Result<RealtimeStatistic> {
        let args = volume_args(tenant_name, volume_name)?;
        Ok(serde_json::from_value(self.invoke(
            MetaRequest::RealtimeStatisticOfVolume,
            args,
        )?)?)
    }

    /// Bytes actually occupied by a volume.
    pub fn occupied_size_by_volume(
        &self,
        tenant_name: &str,
        volume_name: &str,
    ) -> Result<u64> {
        let args = volume_args(tenant_name, volume_name)?;
        Ok(serde_json::from_value(self.invoke(
            MetaRequest::OccupiedSizeOfVolume,
            args,
        )?)?)
    }

    /// Bytes actually occupied by all volumes of a tenant.
    pub fn occupied_size_by_tenant(&self, tenant_name: &str) -> Result<u64> {
        verify_name("Tenant", tenant_name)?;
        let mut args = Map::new();
        args.insert("tenant_name".to_string(), serde_json::to_value(tenant_name)?);
        Ok(serde_json::from_value(self.invoke(
            MetaRequest::OccupiedSizeOfTenant,
            args,
        )?)?)
    }
}

pub(crate) fn volume_args(
    tenant_name: &str,
    volume_name: &str,
) -> Result<Map<String, Value>> {
    verify_name("Tenant", tenant_name)?;
    verify_name("Volume", volume_name)?;
    let mut args = Map::new();
    args.insert("tenant_name".to_string(), serde_json::to_value(tenant_name)?);
    args.insert("volume_name".to_string(), serde_json::to_value(volume_name)?);
    Ok(args)
}
