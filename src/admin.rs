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

use std::ops::Deref;

use serde_json::{Map, Value};

use super::client::{volume_args, Context};
use super::data::*;
use super::dispatch::MetaRequest;
use super::error::*;
use super::misc::*;

/// Administrator context, obtained through
/// [`Context::into_admin()`][1].
///
/// Administrative calls only exist on this type. Calls open to every
/// tenant are reachable through `Deref` to [`Context`][2].
///
/// [1]: struct.Context.html#method.into_admin
/// [2]: struct.Context.html
pub struct AdminContext {
    ctx: Context,
}

impl Deref for AdminContext {
    type Target = Context;

    fn deref(&self) -> &Context {
        &self.ctx
    }
}

fn store_args(store_name: &str) -> Result<Map<String, Value>> {
    verify_name("S5store", store_name)?;
    let mut args = Map::new();
    args.insert("s5store_name".to_string(), serde_json::to_value(store_name)?);
    Ok(args)
}

fn tenant_args(tenant_name: &str) -> Result<Map<String, Value>> {
    verify_name("Tenant", tenant_name)?;
    let mut args = Map::new();
    args.insert("tenant_name".to_string(), serde_json::to_value(tenant_name)?);
    Ok(args)
}

impl AdminContext {
    pub(crate) fn new(ctx: Context) -> AdminContext {
        AdminContext { ctx }
    }

    /// Give up administrative access.
    pub fn into_context(self) -> Context {
        self.ctx
    }

    /// Release the context. Equal to dropping it.
    pub fn release(self) {
        self.ctx.release()
    }

    /// Create a tenant.
    ///
    /// # Errors
    ///
    ///  * [`S5Error::InvalidArgument`][1]: invalid name or password, or the
    ///    tenant already exists.
    ///
    /// [1]: enum.S5Error.html#variant.InvalidArgument
    pub fn create_tenant(
        &self,
        name: &str,
        secret: &str,
        size: u64,
        iops: u64,
        bw: u64,
    ) -> Result<()> {
        verify_name("Tenant", name)?;
        verify_secret("Tenant", secret)?;
        let mut args = Map::new();
        args.insert("name".to_string(), serde_json::to_value(name)?);
        args.insert("pass_wd".to_string(), serde_json::to_value(secret)?);
        args.insert("volume".to_string(), serde_json::to_value(size)?);
        args.insert("iops".to_string(), serde_json::to_value(iops)?);
        args.insert("bw".to_string(), serde_json::to_value(bw)?);
        self.invoke(MetaRequest::TenantCreate, args)?;
        Ok(())
    }

    /// Delete a tenant. Whether a tenant still owning volumes may be
    /// deleted is up to the conductor.
    pub fn delete_tenant(&self, name: &str) -> Result<()> {
        verify_name("Tenant", name)?;
        let mut args = Map::new();
        args.insert("name".to_string(), serde_json::to_value(name)?);
        self.invoke(MetaRequest::TenantDelete, args)?;
        Ok(())
    }

    /// Update a tenant. Fields not set in `changes` are kept.
    ///
    /// ```no_run
    /// # use s5manager::*;
    /// # fn f(admin: &AdminContext) -> Result<()> {
    /// admin.update_tenant("t1", &TenantUpdate::new().iops(8192))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn update_tenant(&self, name: &str, changes: &TenantUpdate) -> Result<()> {
        verify_name("Tenant", name)?;
        if changes.is_empty() {
            return Err(S5Error::InvalidArgument(format!(
                "Nothing to update for tenant '{}'",
                name
            )));
        }
        verify_update_quota("size", changes.size)?;
        verify_update_quota("iops", changes.iops)?;
        verify_update_quota("bw", changes.bw)?;
        let mut args = Map::new();
        args.insert("name".to_string(), serde_json::to_value(name)?);
        if let Some(ref n) = changes.new_name {
            verify_name("New tenant", n)?;
            args.insert("new_name".to_string(), serde_json::to_value(n)?);
        }
        if let Some(ref s) = changes.new_secret {
            verify_secret("New tenant", s)?;
            args.insert("new_pass_wd".to_string(), serde_json::to_value(s)?);
        }
        if let Some(size) = changes.size {
            args.insert("volume".to_string(), serde_json::to_value(size)?);
        }
        if let Some(iops) = changes.iops {
            args.insert("iops".to_string(), serde_json::to_value(iops)?);
        }
        if let Some(bw) = changes.bw {
            args.insert("bw".to_string(), serde_json::to_value(bw)?);
        }
        self.invoke(MetaRequest::TenantUpdate, args)?;
        Ok(())
    }

    pub fn list_tenant(&self) -> Result<TenantList> {
        self.invoke_list(MetaRequest::TenantList, Map::new())
    }

    /// Create another administrator.
    pub fn create_admin(&self, name: &str, secret: &str) -> Result<()> {
        verify_name("Admin", name)?;
        verify_secret("Admin", secret)?;
        let mut args = Map::new();
        args.insert("name".to_string(), serde_json::to_value(name)?);
        args.insert("pass_wd".to_string(), serde_json::to_value(secret)?);
        self.invoke(MetaRequest::AdminCreate, args)?;
        Ok(())
    }

    pub fn delete_admin(&self, name: &str) -> Result<()> {
        verify_name("Admin", name)?;
        let mut args = Map::new();
        args.insert("name".to_string(), serde_json::to_value(name)?);
        self.invoke(MetaRequest::AdminDelete, args)?;
        Ok(())
    }

    /// List client links of the whole cluster.
    pub fn list_client_link(&self) -> Result<ClientLinkList> {
        self.invoke_list(MetaRequest::CltLinkList, Map::new())
    }

    pub fn list_client_link_by_volume(
        &self,
        tenant_name: &str,
        volume_name: &str,
    ) -> Result<ClientLinkList> {
        let args = volume_args(tenant_name, volume_name)?;
        self.invoke_list(MetaRequest::CltLinkListOfVolume, args)
    }

    pub fn list_client_link_by_tenant(
        &self,
        tenant_name: &str,
    ) -> Result<ClientLinkList> {
        let args = tenant_args(tenant_name)?;
        self.invoke_list(MetaRequest::CltLinkListOfTenant, args)
    }

    /// Add a storage node with the addresses of its two daemons.
    ///
    /// # Errors
    ///
    ///  * [`S5Error::InvalidArgument`][1]: invalid name, an address which is
    ///    not IPv4, or the node already exists.
    ///
    /// [1]: enum.S5Error.html#variant.InvalidArgument
    pub fn add_s5store_node(
        &self,
        name: &str,
        daemon_0_ip: &str,
        daemon_1_ip: &str,
    ) -> Result<()> {
        let mut args = store_args(name)?;
        verify_ipv4("daemon 0", daemon_0_ip)?;
        verify_ipv4("daemon 1", daemon_1_ip)?;
        args.insert("daemon_0_ip".to_string(), serde_json::to_value(daemon_0_ip)?);
        args.insert("daemon_1_ip".to_string(), serde_json::to_value(daemon_1_ip)?);
        self.invoke(MetaRequest::S5StoreAdd, args)?;
        Ok(())
    }

    pub fn delete_s5store_node(&self, name: &str) -> Result<()> {
        let args = store_args(name)?;
        self.invoke(MetaRequest::S5StoreDelete, args)?;
        Ok(())
    }

    pub fn list_s5store(&self) -> Result<StoreList> {
        self.invoke_list(MetaRequest::S5StoreList, Map::new())
    }

    /// Detailed information of a storage node, hardware included.
    pub fn stat_s5store(&self, name: &str) -> Result<StoreDetailedInfo> {
        let args = store_args(name)?;
        Ok(serde_json::from_value(self.invoke(MetaRequest::S5StoreStat, args)?)?)
    }

    pub fn stat_conductor(&self, ip: &str) -> Result<ConductorInfo> {
        verify_ipv4("conductor", ip)?;
        let mut args = Map::new();
        args.insert("ip".to_string(), serde_json::to_value(ip)?);
        Ok(serde_json::from_value(self.invoke(MetaRequest::ConductorStat, args)?)?)
    }

    /// Promote or demote a conductor.
    pub fn set_conductor_role(&self, ip: &str, role: ConductorRole) -> Result<()> {
        verify_ipv4("conductor", ip)?;
        if role == ConductorRole::Unknown {
            return Err(S5Error::InvalidArgument(
                "Conductor role should be Master or Slave".to_string(),
            ));
        }
        let mut args = Map::new();
        args.insert("ip".to_string(), serde_json::to_value(ip)?);
        args.insert("role".to_string(), serde_json::to_value(role as i32)?);
        self.invoke(MetaRequest::ConductorRoleSet, args)?;
        info!("Conductor '{}' set to {:?}", ip, role);
        Ok(())
    }

    pub fn list_fan_info(&self, store_name: &str) -> Result<FanList> {
        self.invoke_list(MetaRequest::FanListOfS5Store, store_args(store_name)?)
    }

    pub fn list_host_port_info(&self, store_name: &str) -> Result<HostPortList> {
        self.invoke_list(MetaRequest::HostPortListOfS5Store, store_args(store_name)?)
    }

    pub fn list_rge_module_info(&self, store_name: &str) -> Result<RgeModuleList> {
        self.invoke_list(MetaRequest::RgeListOfS5Store, store_args(store_name)?)
    }

    pub fn list_bcc_module_info(&self, store_name: &str) -> Result<BccModuleList> {
        self.invoke_list(MetaRequest::BccListOfS5Store, store_args(store_name)?)
    }

    pub fn list_power_info(&self, store_name: &str) -> Result<PowerList> {
        self.invoke_list(MetaRequest::PowerListOfS5Store, store_args(store_name)?)
    }

    pub fn list_tray_module_info(&self, store_name: &str) -> Result<TrayModuleList> {
        self.invoke_list(MetaRequest::TrayListOfS5Store, store_args(store_name)?)
    }

    pub fn realtime_statistic_by_s5store(
        &self,
        store_name: &str,
    ) -> Result<RealtimeStatistic> {
        Ok(serde_json::from_value(self.invoke(
            MetaRequest::RealtimeStatisticOfS5Store,
            store_args(store_name)?,
        )?)?)
    }

    /// Power off a storage node.
    pub fn poweroff(&self, store_name: &str) -> Result<()> {
        let args = store_args(store_name)?;
        self.invoke(MetaRequest::PowerOff, args)?;
        warn!("Storage node '{}' powered off", store_name);
        Ok(())
    }

    /// Set fan speed rate of a storage node, returning the speed the node
    /// reports afterwards.
    ///
    /// # Errors
    ///
    ///  * [`S5Error::InvalidArgument`][1]: invalid name or `rate` above
    ///    10000.
    ///
    /// [1]: enum.S5Error.html#variant.InvalidArgument
    pub fn set_fanspeed(&self, store_name: &str, rate: u32) -> Result<i32> {
        let mut args = store_args(store_name)?;
        if rate > MAX_FAN_SPEED_RATE {
            return Err(S5Error::InvalidArgument(format!(
                "Invalid fan speed rate {}, should be no more than {}",
                rate, MAX_FAN_SPEED_RATE
            )));
        }
        args.insert("rate".to_string(), serde_json::to_value(rate)?);
        #[derive(Deserialize)]
        struct FanSpeedReply {
            speed: i32,
        }
        let reply: FanSpeedReply =
            serde_json::from_value(self.invoke(MetaRequest::SetFanSpeed, args)?)?;
        Ok(reply.speed)
    }
}
