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
use std::slice;
use std::vec;

use serde::{Deserialize, Deserializer, Serializer};

use super::error::*;

/// Represent a tenant, the unit of billing and isolation owning volumes and
/// quotas.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Tenant {
    /// Tenant name, unique inside the cluster.
    pub name: String,
    /// Password of the tenant. Conductors may blank it in replies.
    #[serde(default, rename = "pass_wd")]
    pub secret: String,
    /// Capacity quota in bytes.
    #[serde(rename = "volume")]
    pub size: u64,
    /// IOPS quota.
    pub iops: u64,
    /// Bandwidth quota in bytes per second.
    pub bw: u64,
    /// Authority of the tenant.
    #[serde(deserialize_with = "int_to_role")]
    #[serde(serialize_with = "role_to_int")]
    #[serde(default = "default_role", rename = "auth")]
    pub role: Role,
}

/// Access permission level of an identity.
#[repr(i32)]
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub enum Role {
    /// Invalid or unknown identity.
    Invalid = -1,
    /// Normal tenant.
    Tenant = 0,
    /// Administrator.
    Admin = 1,
}

impl From<i32> for Role {
    fn from(i: i32) -> Role {
        match i {
            0 => Role::Tenant,
            1 => Role::Admin,
            _ => Role::Invalid,
        }
    }
}

fn default_role() -> Role {
    Role::Tenant
}

fn int_to_role<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> ::std::result::Result<Role, D::Error> {
    let i: i32 = Deserialize::deserialize(deserializer)?;
    Ok(From::from(i))
}

fn role_to_int<S: Serializer>(
    r: &Role,
    serializer: S,
) -> ::std::result::Result<S::Ok, S::Error> {
    serializer.serialize_i32(*r as i32)
}

/// Volume access property.
#[repr(i32)]
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub enum VolumeAccess {
    /// All read and write permissions are forbidden.
    XxXx = 0,
    /// Only the owner may read.
    RxXx = 8,
    /// Only the owner may read and write.
    RwXx = 12,
    /// Everyone may read, nobody may write.
    RxRx = 10,
    /// Everyone may read and write.
    RwRw = 15,
    /// Access value not known to this library.
    Unknown = -1,
}

impl Default for VolumeAccess {
    fn default() -> Self {
        VolumeAccess::RwXx
    }
}

fn int_to_vol_access<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> ::std::result::Result<VolumeAccess, D::Error> {
    let i: i32 = Deserialize::deserialize(deserializer)?;
    match i {
        0 => Ok(VolumeAccess::XxXx),
        8 => Ok(VolumeAccess::RxXx),
        10 => Ok(VolumeAccess::RxRx),
        12 => Ok(VolumeAccess::RwXx),
        15 => Ok(VolumeAccess::RwRw),
        _ => Ok(VolumeAccess::Unknown),
    }
}

fn vol_access_to_int<S: Serializer>(
    a: &VolumeAccess,
    serializer: S,
) -> ::std::result::Result<S::Ok, S::Error> {
    serializer.serialize_i32(*a as i32)
}

/// Represent a block storage volume owned by a tenant.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Volume {
    /// Volume name, unique inside its tenant.
    #[serde(rename = "volume_name")]
    pub name: String,
    /// Owner tenant.
    pub tenant_name: String,
    /// Quotaset the volume is accounted in.
    #[serde(default)]
    pub quotaset_name: String,
    /// IOPS quota.
    pub iops: u64,
    /// Committed burst size quota.
    #[serde(default)]
    pub cbs: u64,
    /// Bandwidth quota in bytes per second.
    pub bw: u64,
    /// Size in bytes.
    pub size: u64,
    /// Additional features, e.g. encryption scheme or compression mode.
    #[serde(default)]
    pub flag: u64,
    /// Count of replicas.
    pub replica_count: u32,
    /// Tray of each replica.
    #[serde(default)]
    pub tray_id: Vec<i32>,
    /// S5store of each replica.
    #[serde(default)]
    pub s5store_name: Vec<String>,
    #[serde(deserialize_with = "int_to_vol_access")]
    #[serde(serialize_with = "vol_access_to_int")]
    #[serde(default)]
    /// Volume access property.
    pub access: VolumeAccess,
}

/// Identity of a client link.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientLinkId {
    /// IPv4 address of the s5 client.
    pub clt_ip: String,
    /// Port of the s5 client.
    pub clt_port: u16,
    /// IPv4 address of the target NIC.
    pub nic_ip: String,
    /// Port of the target NIC.
    pub nic_port: u16,
}

/// Represent one active connection from a data-plane client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClientLink {
    pub id: ClientLinkId,
    pub tenant_name: String,
    #[serde(default)]
    pub quotaset_name: String,
    pub volume_name: String,
    #[serde(default)]
    pub snap_name: String,
    /// First level Committed Access Rate (CAR) identity.
    pub cid_1: i32,
    /// IOPS quota of the first level CAR.
    pub rate_1: u64,
    pub cid_2: i32,
    pub rate_2: u64,
    /// Quota level CAR identity.
    pub cid_3: i32,
    pub rate_3: u64,
}

/// Represent a storage node, named s5store. Each s5store runs two daemons
/// for redundancy.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StoreInfo {
    pub name: String,
    pub daemon_0_ip: String,
    pub daemon_1_ip: String,
}

/// Hardware component status.
#[repr(i32)]
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub enum HwStatus {
    /// Component is not plugged in.
    NotPlugIn = 0,
    DeviceError = 1,
    InvalidDevice = 2,
    IoError = 3,
    Ok = 4,
    /// Status value not known to this library.
    Unknown = -1,
}

fn int_to_hw_status<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> ::std::result::Result<HwStatus, D::Error> {
    let i: i32 = Deserialize::deserialize(deserializer)?;
    Ok(match i {
        0 => HwStatus::NotPlugIn,
        1 => HwStatus::DeviceError,
        2 => HwStatus::InvalidDevice,
        3 => HwStatus::IoError,
        4 => HwStatus::Ok,
        _ => HwStatus::Unknown,
    })
}

fn hw_status_to_int<S: Serializer>(
    s: &HwStatus,
    serializer: S,
) -> ::std::result::Result<S::Ok, S::Error> {
    serializer.serialize_i32(*s as i32)
}

fn int_to_bool<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> ::std::result::Result<bool, D::Error> {
    let i: i32 = Deserialize::deserialize(deserializer)?;
    Ok(i != 0)
}

fn bool_to_int<S: Serializer>(
    b: &bool,
    serializer: S,
) -> ::std::result::Result<S::Ok, S::Error> {
    serializer.serialize_i32(if *b { 1 } else { 0 })
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FanInfo {
    #[serde(rename = "fan_name")]
    pub name: String,
    #[serde(deserialize_with = "int_to_hw_status")]
    #[serde(serialize_with = "hw_status_to_int")]
    #[serde(rename = "fan_status")]
    pub status: HwStatus,
    /// Fan speed.
    pub speed: i32,
    /// Fan speed rate, percentage multiplied by 100.
    pub rate: i32,
}

/// Represent a tray module with its two disk sets.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrayModuleInfo {
    #[serde(rename = "tray_name")]
    pub name: String,
    #[serde(deserialize_with = "int_to_hw_status")]
    #[serde(serialize_with = "hw_status_to_int")]
    #[serde(rename = "tray_status")]
    pub status: HwStatus,
    #[serde(rename = "tray_model")]
    pub model: String,
    #[serde(rename = "tray_bit")]
    pub bit: i32,
    /// Upper computer firmware version.
    #[serde(rename = "tray_firmware")]
    pub firmware: u32,
    /// Temperature in Celsius.
    #[serde(rename = "tray_temperature")]
    pub temperature: f64,
    /// Raw capacity in MB.
    #[serde(rename = "tray_raw_capacity")]
    pub raw_capacity: u64,
    /// Usable capacity in MB.
    #[serde(rename = "tray_usable_capacity")]
    pub usable_capacity: u64,
    pub sets: Vec<TraySetInfo>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TraySetInfo {
    pub name: String,
    #[serde(deserialize_with = "int_to_hw_status")]
    #[serde(serialize_with = "hw_status_to_int")]
    pub status: HwStatus,
    pub model: String,
    pub bit: i32,
    pub temperature: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RgeModuleInfo {
    #[serde(rename = "rge_name")]
    pub name: String,
    #[serde(deserialize_with = "int_to_hw_status")]
    #[serde(serialize_with = "hw_status_to_int")]
    #[serde(rename = "rge_status")]
    pub status: HwStatus,
    #[serde(rename = "rge_model")]
    pub model: String,
    #[serde(rename = "rge_bit")]
    pub bit: i32,
    /// Temperature in Celsius.
    #[serde(rename = "rge_temperature")]
    pub temperature: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BccModuleInfo {
    #[serde(rename = "bcc_name")]
    pub name: String,
    #[serde(deserialize_with = "int_to_hw_status")]
    #[serde(serialize_with = "hw_status_to_int")]
    #[serde(rename = "bcc_status")]
    pub status: HwStatus,
    #[serde(rename = "bcc_model")]
    pub model: String,
    /// Temperature in Celsius.
    #[serde(rename = "bcc_temperature")]
    pub temperature: f64,
}

/// Represent a power supply. Temperatures are in Celsius, currents in
/// ampere, voltages in volt and power in watt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PowerInfo {
    #[serde(rename = "power_name")]
    pub name: String,
    #[serde(deserialize_with = "int_to_hw_status")]
    #[serde(serialize_with = "hw_status_to_int")]
    #[serde(rename = "power_status")]
    pub status: HwStatus,
    #[serde(deserialize_with = "int_to_bool")]
    #[serde(serialize_with = "bool_to_int")]
    #[serde(rename = "power_input_ok")]
    pub input_ok: bool,
    #[serde(deserialize_with = "int_to_bool")]
    #[serde(serialize_with = "bool_to_int")]
    #[serde(rename = "power_output_ok")]
    pub output_ok: bool,
    #[serde(deserialize_with = "int_to_bool")]
    #[serde(serialize_with = "bool_to_int")]
    #[serde(rename = "power_fan_ok")]
    pub fan_ok: bool,
    #[serde(rename = "power_temperature")]
    pub temperatures: [f64; 3],
    #[serde(rename = "power_output_current")]
    pub output_current: f64,
    #[serde(rename = "power_input_current")]
    pub input_current: f64,
    #[serde(rename = "power_output_voltage")]
    pub output_voltage: f64,
    #[serde(rename = "power_input_voltage")]
    pub input_voltage: f64,
    pub power: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HostPortInfo {
    pub name: String,
    pub ip: String,
    pub mac: String,
    pub mask: String,
    #[serde(deserialize_with = "int_to_hw_status")]
    #[serde(serialize_with = "hw_status_to_int")]
    #[serde(rename = "linked_status")]
    pub status: HwStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct HwBasicInfo {
    pub device_name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub producer: String,
    pub produce_date: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct HwStatusInfo {
    pub start_time: String,
    pub up_time: String,
}

/// Detailed state of one s5store, including every hardware component.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StoreDetailedInfo {
    pub general_info: StoreInfo,
    #[serde(default, rename = "hwbasicinfo")]
    pub hw_basic: HwBasicInfo,
    #[serde(default, rename = "hwstatusinfo")]
    pub hw_status: HwStatusInfo,
    #[serde(default)]
    pub rges: Vec<RgeModuleInfo>,
    #[serde(default)]
    pub nics: Vec<HostPortInfo>,
    #[serde(default)]
    pub trays: Vec<TrayModuleInfo>,
    #[serde(default)]
    pub fans: Vec<FanInfo>,
    #[serde(default)]
    pub bccs: Vec<BccModuleInfo>,
    #[serde(default)]
    pub powers: Vec<PowerInfo>,
    pub capacity_total: u64,
    pub capacity_available: u64,
}

/// Conductor role inside the control plane.
#[repr(i32)]
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub enum ConductorRole {
    Slave = 0,
    Master = 1,
    /// Role value not known to this library.
    Unknown = -1,
}

fn int_to_cdt_role<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> ::std::result::Result<ConductorRole, D::Error> {
    let i: i32 = Deserialize::deserialize(deserializer)?;
    match i {
        0 => Ok(ConductorRole::Slave),
        1 => Ok(ConductorRole::Master),
        _ => Ok(ConductorRole::Unknown),
    }
}

fn cdt_role_to_int<S: Serializer>(
    r: &ConductorRole,
    serializer: S,
) -> ::std::result::Result<S::Ok, S::Error> {
    serializer.serialize_i32(*r as i32)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConductorInfo {
    pub ip: String,
    #[serde(deserialize_with = "int_to_cdt_role")]
    #[serde(serialize_with = "cdt_role_to_int")]
    pub role: ConductorRole,
}

/// Realtime I/O statistic of an s5store, tenant or volume.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RealtimeStatistic {
    /// Bandwidth in bytes per second.
    pub bw: u64,
    pub iops: u64,
    /// Latency in microseconds.
    pub latency: u64,
}

/// Capacity of the whole cluster, in KiB.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterCapacity {
    pub kb: u64,
    pub kb_avail: u64,
    pub kb_used: u64,
}

/// A list returned by one of the `list_*` calls.
///
/// The list owns its items. Hand it back with [`List::release`][1] once
/// done; `release()` consumes the list, so a list cannot be released twice.
/// Dropping a list releases it as well.
///
/// [1]: #method.release
#[derive(Debug, Clone, PartialEq)]
pub struct List<T> {
    items: Vec<T>,
}

pub type TenantList = List<Tenant>;
pub type VolumeList = List<Volume>;
pub type ClientLinkList = List<ClientLink>;
pub type StoreList = List<StoreInfo>;
pub type FanList = List<FanInfo>;
pub type PowerList = List<PowerInfo>;
pub type HostPortList = List<HostPortInfo>;
pub type RgeModuleList = List<RgeModuleInfo>;
pub type BccModuleList = List<BccModuleInfo>;
pub type TrayModuleList = List<TrayModuleInfo>;

#[derive(Deserialize, Debug)]
pub(crate) struct ListReply<T> {
    num: usize,
    items: Vec<T>,
}

impl<T> List<T> {
    pub(crate) fn from_reply(reply: ListReply<T>) -> Result<List<T>> {
        if reply.num != reply.items.len() {
            return Err(S5Error::ConductorBug(format!(
                "Conductor declared {} items but sent {}",
                reply.num,
                reply.items.len()
            )));
        }
        Ok(List { items: reply.items })
    }

    /// Count of items.
    pub fn num(&self) -> usize {
        self.items.len()
    }

    /// Release the list, returning the count of released items.
    pub fn release(self) -> usize {
        let num = self.items.len();
        trace!("Releasing list of {} items", num);
        num
    }

    /// Take the items out of the list.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Deref for List<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Changes to apply to a tenant. Unset fields are left unchanged.
///
/// ```rust
/// use s5manager::TenantUpdate;
///
/// let changes = TenantUpdate::new().iops(20480).bw(100 << 20);
/// assert!(changes.new_name.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TenantUpdate {
    pub new_name: Option<String>,
    pub new_secret: Option<String>,
    pub size: Option<u64>,
    pub iops: Option<u64>,
    pub bw: Option<u64>,
}

impl TenantUpdate {
    pub fn new() -> TenantUpdate {
        Default::default()
    }

    pub fn new_name(mut self, name: &str) -> TenantUpdate {
        self.new_name = Some(name.to_string());
        self
    }

    pub fn new_secret(mut self, secret: &str) -> TenantUpdate {
        self.new_secret = Some(secret.to_string());
        self
    }

    pub fn size(mut self, size: u64) -> TenantUpdate {
        self.size = Some(size);
        self
    }

    pub fn iops(mut self, iops: u64) -> TenantUpdate {
        self.iops = Some(iops);
        self
    }

    pub fn bw(mut self, bw: u64) -> TenantUpdate {
        self.bw = Some(bw);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == TenantUpdate::default()
    }
}

/// Changes to apply to a volume. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolumeUpdate {
    pub new_name: Option<String>,
    pub size: Option<u64>,
    pub iops: Option<u64>,
    pub bw: Option<u64>,
}

impl VolumeUpdate {
    pub fn new() -> VolumeUpdate {
        Default::default()
    }

    pub fn new_name(mut self, name: &str) -> VolumeUpdate {
        self.new_name = Some(name.to_string());
        self
    }

    pub fn size(mut self, size: u64) -> VolumeUpdate {
        self.size = Some(size);
        self
    }

    pub fn iops(mut self, iops: u64) -> VolumeUpdate {
        self.iops = Some(iops);
        self
    }

    pub fn bw(mut self, bw: u64) -> VolumeUpdate {
        self.bw = Some(bw);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == VolumeUpdate::default()
    }
}

/// Placement of one volume replica.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicaPlacement {
    pub tray_id: i32,
    pub s5store_name: String,
}

/// Arguments of [`Context::create_volume()`][1].
///
/// [1]: struct.Context.html#method.create_volume
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeCreateArgs {
    pub name: String,
    /// Size in bytes, a non-zero multiple of 4 MiB.
    pub size: u64,
    /// IOPS quota, a non-zero multiple of 1024, at most 1M.
    pub iops: u64,
    /// Bandwidth quota, non-zero.
    pub bw: u64,
    pub flag: u64,
    /// One entry per replica, 1 to 3 entries.
    pub replicas: Vec<ReplicaPlacement>,
}
