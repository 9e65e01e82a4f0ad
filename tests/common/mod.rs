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

// In-process conductor cluster speaking the request envelope of the
// management client.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use s5manager::*;
use serde_json::{json, Value};

pub static ADMIN_NAME: &'static str = "admin";
pub static ADMIN_SECRET: &'static str = "123456";

const EPERM: i32 = 1;
const ENOENT: i32 = 2;
const EACCES: i32 = 13;
const EBUSY: i32 = 16;
const EEXIST: i32 = 17;
const EINVAL: i32 = 22;

type Reply = std::result::Result<Value, (i32, String)>;

static ADMIN_METHODS: &'static [&'static str] = &[
    "tenant_create",
    "tenant_delete",
    "tenant_update",
    "tenant_list",
    "admin_create",
    "admin_delete",
    "cltlink_list",
    "cltlink_list_of_volume",
    "cltlink_list_of_tenant",
    "s5store_add",
    "s5store_list",
    "s5store_stat",
    "s5store_delete",
    "conductor_stat",
    "conductor_role_set",
    "fan_list_of_s5store",
    "host_port_list_of_s5store",
    "rge_list_of_s5store",
    "bcc_list_of_s5store",
    "power_list_of_s5store",
    "tray_list_of_s5store",
    "realtime_statistic_of_s5store",
    "s5store_poweroff",
    "s5store_set_fan_speed",
];

#[derive(Default)]
pub struct State {
    pub tenants: BTreeMap<String, Tenant>,
    pub admins: BTreeMap<String, String>,
    pub volumes: BTreeMap<(String, String), Volume>,
    pub stores: BTreeMap<String, StoreInfo>,
    pub links: Vec<ClientLink>,
    pub conductors: BTreeMap<String, ConductorRole>,
    pub powered_off: Vec<String>,
    pub fan_rates: BTreeMap<String, i32>,
}

struct Inner {
    endpoints: Vec<Endpoint>,
    down: Mutex<HashSet<Endpoint>>,
    state: Mutex<State>,
    connects: AtomicUsize,
    requests: AtomicUsize,
    drop_calls: AtomicUsize,
    lose_replies: AtomicUsize,
    served: Mutex<Vec<Endpoint>>,
}

impl Inner {
    fn is_down(&self, endpoint: &Endpoint) -> bool {
        self.down.lock().unwrap().contains(endpoint)
    }
}

pub struct FakeCluster {
    inner: Arc<Inner>,
}

impl FakeCluster {
    /// Cluster of `n` conductors with a single administrator. The first
    /// conductor is the master.
    pub fn new(n: usize) -> Arc<FakeCluster> {
        let _ = env_logger::builder().is_test(true).try_init();
        let endpoints: Vec<Endpoint> = (1..=n)
            .map(|i| Endpoint::new(&format!("10.0.0.{}", i), DEFAULT_CONDUCTOR_PORT))
            .collect();
        let mut state = State::default();
        state
            .admins
            .insert(ADMIN_NAME.to_string(), ADMIN_SECRET.to_string());
        for (i, e) in endpoints.iter().enumerate() {
            let role = if i == 0 {
                ConductorRole::Master
            } else {
                ConductorRole::Slave
            };
            state.conductors.insert(e.host().to_string(), role);
        }
        Arc::new(FakeCluster {
            inner: Arc::new(Inner {
                endpoints,
                down: Mutex::new(HashSet::new()),
                state: Mutex::new(state),
                connects: AtomicUsize::new(0),
                requests: AtomicUsize::new(0),
                drop_calls: AtomicUsize::new(0),
                lose_replies: AtomicUsize::new(0),
                served: Mutex::new(Vec::new()),
            }),
        })
    }

    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.inner.endpoints.clone()
    }

    pub fn config(&self) -> Config {
        Config::with_timeouts(
            self.endpoints(),
            Duration::from_millis(100),
            Duration::from_millis(500),
        )
        .unwrap()
    }

    pub fn set_down(&self, idx: usize, down: bool) {
        let e = self.inner.endpoints[idx].clone();
        let mut set = self.inner.down.lock().unwrap();
        if down {
            set.insert(e);
        } else {
            set.remove(&e);
        }
    }

    /// Make the next `n` requests fail with a broken connection after
    /// reaching the conductor.
    pub fn drop_next_calls(&self, n: usize) {
        self.inner.drop_calls.store(n, Ordering::SeqCst);
    }

    /// Make the next `n` requests take effect, then break the connection
    /// before the reply is sent.
    pub fn lose_next_replies(&self, n: usize) {
        self.inner.lose_replies.store(n, Ordering::SeqCst);
    }

    /// Count of connection attempts, liveness probes included.
    pub fn connects(&self) -> usize {
        self.inner.connects.load(Ordering::SeqCst)
    }

    /// Count of requests other than liveness probes.
    pub fn requests(&self) -> usize {
        self.inner.requests.load(Ordering::SeqCst)
    }

    /// Conductor which answered the most recent request.
    pub fn last_served(&self) -> Option<Endpoint> {
        self.inner.served.lock().unwrap().last().cloned()
    }

    pub fn state(&self) -> MutexGuard<State> {
        self.inner.state.lock().unwrap()
    }

    pub fn login(cluster: &Arc<FakeCluster>, name: &str, secret: &str) -> Result<Context> {
        let connector: Arc<dyn Connector> = cluster.clone();
        Context::with_connector(name, secret, &cluster.config(), connector)
    }

    pub fn admin(cluster: &Arc<FakeCluster>) -> AdminContext {
        FakeCluster::login(cluster, ADMIN_NAME, ADMIN_SECRET)
            .unwrap()
            .into_admin()
            .unwrap()
    }
}

impl Connector for FakeCluster {
    fn connect(&self, endpoint: &Endpoint, _timeout: Duration) -> Result<Box<dyn Channel>> {
        self.inner.connects.fetch_add(1, Ordering::SeqCst);
        if self.inner.is_down(endpoint) {
            return Err(S5Error::NotConnected(format!(
                "Connection refused by {}",
                endpoint
            )));
        }
        Ok(Box::new(FakeChannel {
            inner: Arc::clone(&self.inner),
            endpoint: endpoint.clone(),
        }))
    }
}

struct FakeChannel {
    inner: Arc<Inner>,
    endpoint: Endpoint,
}

impl Channel for FakeChannel {
    fn call(&mut self, request: &Value) -> Result<Value> {
        if self.inner.is_down(&self.endpoint) {
            return Err(S5Error::NotConnected(format!(
                "{} went away",
                self.endpoint
            )));
        }
        let method = request["method"].as_str().unwrap_or("");
        if method == "ping" {
            return Ok(json!({"result": 0}));
        }
        self.inner.requests.fetch_add(1, Ordering::SeqCst);
        let dropped = self
            .inner
            .drop_calls
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                n.checked_sub(1)
            })
            .is_ok();
        if dropped {
            return Err(S5Error::NotConnected(
                "Connection reset by peer".to_string(),
            ));
        }
        self.inner.served.lock().unwrap().push(self.endpoint.clone());
        let mut state = self.inner.state.lock().unwrap();
        let reply =
            match handle(&mut state, method, &request["params"], &request["executor"]) {
                Ok(v) => json!({ "result": v }),
                Err((code, msg)) => {
                    json!({"error": {"code": code, "message": msg}})
                }
            };
        let lost = self
            .inner
            .lose_replies
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                n.checked_sub(1)
            })
            .is_ok();
        if lost {
            return Err(S5Error::NotConnected(
                "Timed out waiting for reply".to_string(),
            ));
        }
        Ok(reply)
    }
}

fn s<'a>(p: &'a Value, key: &str) -> std::result::Result<&'a str, (i32, String)> {
    p[key]
        .as_str()
        .ok_or_else(|| (-EINVAL, format!("Missing string '{}'", key)))
}

fn u(p: &Value, key: &str) -> std::result::Result<u64, (i32, String)> {
    p[key]
        .as_u64()
        .ok_or_else(|| (-EINVAL, format!("Missing number '{}'", key)))
}

fn list<T: serde::Serialize>(items: Vec<T>) -> Reply {
    Ok(json!({"num": items.len(), "items": items}))
}

fn not_found(what: &str, name: &str) -> (i32, String) {
    (-ENOENT, format!("{} '{}'", what, name))
}

fn authenticate(st: &State, user: &str, pass: &str) -> std::result::Result<i32, (i32, String)> {
    if st.admins.get(user).map(|p| p == pass).unwrap_or(false) {
        return Ok(1);
    }
    match st.tenants.get(user) {
        Some(t) if t.secret == pass => Ok(0),
        _ => Err((-EACCES, format!("Login failed for '{}'", user))),
    }
}

fn store_exists<'a>(st: &'a State, p: &Value) -> std::result::Result<&'a StoreInfo, (i32, String)> {
    let name = s(p, "s5store_name")?;
    st.stores.get(name).ok_or_else(|| not_found("S5store", name))
}

fn volume_key(p: &Value) -> std::result::Result<(String, String), (i32, String)> {
    Ok((s(p, "tenant_name")?.to_string(), s(p, "volume_name")?.to_string()))
}

fn blank(t: &Tenant) -> Tenant {
    let mut t = t.clone();
    t.secret = String::new();
    t
}

fn handle(st: &mut State, method: &str, p: &Value, exe: &Value) -> Reply {
    let user = s(exe, "user_name")?;
    let role = authenticate(st, user, s(exe, "pass_wd")?)?;
    let is_admin = role == 1;
    if method == "user_login" {
        return Ok(json!({ "role": role }));
    }
    if !is_admin {
        if ADMIN_METHODS.contains(&method) {
            return Err((-EPERM, format!("{} needs an administrator", method)));
        }
        let scope = if method == "tenant_stat" {
            p["name"].as_str()
        } else {
            p["tenant_name"].as_str()
        };
        if let Some(t) = scope {
            if t != user {
                return Err((-EPERM, format!("'{}' may not access '{}'", user, t)));
            }
        }
    }

    match method {
        "tenant_create" => {
            let name = s(p, "name")?;
            if st.tenants.contains_key(name) {
                return Err((-EEXIST, format!("Tenant '{}' exists", name)));
            }
            let t = Tenant {
                name: name.to_string(),
                secret: s(p, "pass_wd")?.to_string(),
                size: u(p, "volume")?,
                iops: u(p, "iops")?,
                bw: u(p, "bw")?,
                role: Role::Tenant,
            };
            st.tenants.insert(name.to_string(), t);
            Ok(Value::Null)
        }
        "tenant_delete" => {
            let name = s(p, "name")?;
            if !st.tenants.contains_key(name) {
                return Err(not_found("Tenant", name));
            }
            if st.volumes.keys().any(|(t, _)| t == name) {
                return Err((-EBUSY, format!("Tenant '{}' owns volumes", name)));
            }
            st.tenants.remove(name);
            Ok(Value::Null)
        }
        "tenant_update" => {
            let name = s(p, "name")?;
            let mut t = st
                .tenants
                .get(name)
                .cloned()
                .ok_or_else(|| not_found("Tenant", name))?;
            if let Some(n) = p["new_name"].as_str() {
                if n != name && st.tenants.contains_key(n) {
                    return Err((-EEXIST, format!("Tenant '{}' exists", n)));
                }
                t.name = n.to_string();
            }
            if let Some(pw) = p["new_pass_wd"].as_str() {
                t.secret = pw.to_string();
            }
            if let Some(v) = p["volume"].as_u64() {
                t.size = v;
            }
            if let Some(v) = p["iops"].as_u64() {
                t.iops = v;
            }
            if let Some(v) = p["bw"].as_u64() {
                t.bw = v;
            }
            st.tenants.remove(name);
            st.tenants.insert(t.name.clone(), t);
            Ok(Value::Null)
        }
        "tenant_list" => list(st.tenants.values().map(blank).collect()),
        "tenant_stat" => {
            let name = s(p, "name")?;
            let t = st.tenants.get(name).ok_or_else(|| not_found("Tenant", name))?;
            Ok(json!(blank(t)))
        }
        "admin_create" => {
            let name = s(p, "name")?;
            if st.admins.contains_key(name) {
                return Err((-EEXIST, format!("Admin '{}' exists", name)));
            }
            st.admins
                .insert(name.to_string(), s(p, "pass_wd")?.to_string());
            Ok(Value::Null)
        }
        "admin_delete" => {
            let name = s(p, "name")?;
            st.admins
                .remove(name)
                .map(|_| Value::Null)
                .ok_or_else(|| not_found("Admin", name))
        }
        "volume_create" => {
            let key = volume_key(p)?;
            let quota = st
                .tenants
                .get(&key.0)
                .map(|t| t.size)
                .ok_or_else(|| not_found("Tenant", &key.0))?;
            if st.volumes.contains_key(&key) {
                return Err((-EEXIST, format!("Volume '{}' exists", key.1)));
            }
            let size = u(p, "size")?;
            let used: u64 = st
                .volumes
                .values()
                .filter(|v| v.tenant_name == key.0)
                .map(|v| v.size)
                .sum();
            if used + size > quota {
                return Err((-EINVAL, format!("Quota of '{}' exceeded", key.0)));
            }
            let replica_count = u(p, "replica_count")? as u32;
            let tray_id: Vec<i32> = serde_json::from_value(p["tray_id"].clone())
                .map_err(|e| (-EINVAL, e.to_string()))?;
            let s5store_name: Vec<String> =
                serde_json::from_value(p["s5store_name"].clone())
                    .map_err(|e| (-EINVAL, e.to_string()))?;
            if tray_id.len() != replica_count as usize
                || s5store_name.len() != replica_count as usize
            {
                return Err((-EINVAL, "Replica arrays mismatch".to_string()));
            }
            let vol = Volume {
                name: key.1.clone(),
                tenant_name: key.0.clone(),
                quotaset_name: String::new(),
                iops: u(p, "iops")?,
                cbs: 0,
                bw: u(p, "bw")?,
                size,
                flag: u(p, "flag")?,
                replica_count,
                tray_id,
                s5store_name,
                access: VolumeAccess::default(),
            };
            st.volumes.insert(key, vol);
            Ok(Value::Null)
        }
        "volume_delete" => {
            let key = volume_key(p)?;
            st.volumes
                .remove(&key)
                .map(|_| Value::Null)
                .ok_or_else(|| not_found("Volume", &key.1))
        }
        "volume_rename" | "volume_update" | "volume_resize" => {
            let key = volume_key(p)?;
            let mut vol = st
                .volumes
                .get(&key)
                .cloned()
                .ok_or_else(|| not_found("Volume", &key.1))?;
            if let Some(n) = p["new_name"].as_str() {
                if n != key.1 && st.volumes.contains_key(&(key.0.clone(), n.to_string())) {
                    return Err((-EEXIST, format!("Volume '{}' exists", n)));
                }
                vol.name = n.to_string();
            }
            if let Some(v) = p["resize"].as_u64().or_else(|| p["size"].as_u64()) {
                vol.size = v;
            }
            if let Some(v) = p["iops"].as_u64() {
                vol.iops = v;
            }
            if let Some(v) = p["bw"].as_u64() {
                vol.bw = v;
            }
            st.volumes.remove(&key);
            st.volumes.insert((key.0, vol.name.clone()), vol);
            Ok(Value::Null)
        }
        "volume_stat" => {
            let key = volume_key(p)?;
            let vol = st.volumes.get(&key).ok_or_else(|| not_found("Volume", &key.1))?;
            Ok(json!(vol))
        }
        "volume_list_of_tenant" => {
            let t = s(p, "tenant_name")?;
            if !st.tenants.contains_key(t) {
                return Err(not_found("Tenant", t));
            }
            list(st.volumes.values().filter(|v| v.tenant_name == t).cloned().collect())
        }
        "volume_list_of_cluster" => list(
            st.volumes
                .values()
                .filter(|v| is_admin || v.tenant_name == user)
                .cloned()
                .collect(),
        ),
        "s5_stat" => {
            let kb = st.stores.len() as u64 * (1 << 30);
            let used: u64 = st.volumes.values().map(|v| v.size >> 10).sum();
            Ok(json!(ClusterCapacity {
                kb,
                kb_avail: kb.saturating_sub(used),
                kb_used: used,
            }))
        }
        "cltlink_list" => list(st.links.clone()),
        "cltlink_list_of_tenant" => {
            let t = s(p, "tenant_name")?;
            list(st.links.iter().filter(|l| l.tenant_name == t).cloned().collect())
        }
        "cltlink_list_of_volume" => {
            let (t, v) = volume_key(p)?;
            list(
                st.links
                    .iter()
                    .filter(|l| l.tenant_name == t && l.volume_name == v)
                    .cloned()
                    .collect(),
            )
        }
        "s5store_add" => {
            let name = s(p, "s5store_name")?;
            if st.stores.contains_key(name) {
                return Err((-EEXIST, format!("S5store '{}' exists", name)));
            }
            let info = StoreInfo {
                name: name.to_string(),
                daemon_0_ip: s(p, "daemon_0_ip")?.to_string(),
                daemon_1_ip: s(p, "daemon_1_ip")?.to_string(),
            };
            st.stores.insert(name.to_string(), info);
            Ok(Value::Null)
        }
        "s5store_list" => list(st.stores.values().cloned().collect()),
        "s5store_stat" => {
            let info = store_exists(st, p)?.clone();
            let rate = fan_rate(st, &info.name);
            Ok(json!(StoreDetailedInfo {
                hw_basic: HwBasicInfo {
                    device_name: info.name.clone(),
                    device_type: "s5store".to_string(),
                    producer: "netbric".to_string(),
                    produce_date: "2018-01-01".to_string(),
                },
                hw_status: HwStatusInfo::default(),
                rges: rges(&info.name),
                nics: host_ports(&info.name),
                trays: trays(&info.name),
                fans: fans(&info.name, rate),
                bccs: bccs(&info.name),
                powers: powers(&info.name),
                capacity_total: 1 << 40,
                capacity_available: 1 << 39,
                general_info: info,
            }))
        }
        "s5store_delete" => {
            let name = s(p, "s5store_name")?;
            if !st.stores.contains_key(name) {
                return Err(not_found("S5store", name));
            }
            if st
                .volumes
                .values()
                .any(|v| v.s5store_name.iter().any(|n| n == name))
            {
                return Err((-EBUSY, format!("S5store '{}' holds replicas", name)));
            }
            st.stores.remove(name);
            Ok(Value::Null)
        }
        "conductor_stat" => {
            let ip = s(p, "ip")?;
            let role = st.conductors.get(ip).ok_or_else(|| not_found("Conductor", ip))?;
            Ok(json!(ConductorInfo {
                ip: ip.to_string(),
                role: *role,
            }))
        }
        "conductor_role_set" => {
            let ip = s(p, "ip")?.to_string();
            if !st.conductors.contains_key(&ip) {
                return Err(not_found("Conductor", &ip));
            }
            let role = match u(p, "role")? {
                1 => ConductorRole::Master,
                _ => ConductorRole::Slave,
            };
            if role == ConductorRole::Master {
                for r in st.conductors.values_mut() {
                    *r = ConductorRole::Slave;
                }
            }
            st.conductors.insert(ip, role);
            Ok(Value::Null)
        }
        "fan_list_of_s5store" => {
            let name = store_exists(st, p)?.name.clone();
            let rate = fan_rate(st, &name);
            list(fans(&name, rate))
        }
        "host_port_list_of_s5store" => list(host_ports(&store_exists(st, p)?.name)),
        "rge_list_of_s5store" => list(rges(&store_exists(st, p)?.name)),
        "bcc_list_of_s5store" => list(bccs(&store_exists(st, p)?.name)),
        "power_list_of_s5store" => list(powers(&store_exists(st, p)?.name)),
        "tray_list_of_s5store" => list(trays(&store_exists(st, p)?.name)),
        "occupied_size_of_volume" => {
            let key = volume_key(p)?;
            let vol = st.volumes.get(&key).ok_or_else(|| not_found("Volume", &key.1))?;
            Ok(json!(vol.size / 2))
        }
        "occupied_size_of_tenant" => {
            let t = s(p, "tenant_name")?;
            if !st.tenants.contains_key(t) {
                return Err(not_found("Tenant", t));
            }
            let total: u64 = st
                .volumes
                .values()
                .filter(|v| v.tenant_name == t)
                .map(|v| v.size / 2)
                .sum();
            Ok(json!(total))
        }
        "realtime_statistic_of_s5store" => {
            store_exists(st, p)?;
            Ok(json!(RealtimeStatistic {
                bw: 1 << 30,
                iops: 65536,
                latency: 250,
            }))
        }
        "realtime_statistic_of_tenant" => {
            let t = s(p, "tenant_name")?;
            if !st.tenants.contains_key(t) {
                return Err(not_found("Tenant", t));
            }
            Ok(json!(RealtimeStatistic {
                bw: 1 << 20,
                iops: 2048,
                latency: 300,
            }))
        }
        "realtime_statistic_of_volume" => {
            let key = volume_key(p)?;
            if !st.volumes.contains_key(&key) {
                return Err(not_found("Volume", &key.1));
            }
            Ok(json!(RealtimeStatistic {
                bw: 1 << 20,
                iops: 1024,
                latency: 300,
            }))
        }
        "s5store_poweroff" => {
            let name = store_exists(st, p)?.name.clone();
            st.powered_off.push(name);
            Ok(Value::Null)
        }
        "s5store_set_fan_speed" => {
            let name = store_exists(st, p)?.name.clone();
            let rate = u(p, "rate")? as i32;
            st.fan_rates.insert(name, rate);
            Ok(json!({ "speed": rate * 2 }))
        }
        _ => Err((-EINVAL, format!("Unknown method '{}'", method))),
    }
}

fn fan_rate(st: &State, store: &str) -> i32 {
    st.fan_rates.get(store).cloned().unwrap_or(5000)
}

fn fans(store: &str, rate: i32) -> Vec<FanInfo> {
    (0..2)
        .map(|i| FanInfo {
            name: format!("{}_fan_{}", store, i),
            status: HwStatus::Ok,
            speed: rate * 2,
            rate,
        })
        .collect()
}

fn host_ports(store: &str) -> Vec<HostPortInfo> {
    vec![HostPortInfo {
        name: format!("{}_eth0", store),
        ip: "192.168.10.2".to_string(),
        mac: "52:54:00:12:34:56".to_string(),
        mask: "255.255.255.0".to_string(),
        status: HwStatus::Ok,
    }]
}

fn rges(store: &str) -> Vec<RgeModuleInfo> {
    vec![RgeModuleInfo {
        name: format!("{}_rge_0", store),
        status: HwStatus::Ok,
        model: "RGE-100".to_string(),
        bit: 0,
        temperature: 41.5,
    }]
}

fn bccs(store: &str) -> Vec<BccModuleInfo> {
    vec![BccModuleInfo {
        name: format!("{}_bcc_0", store),
        status: HwStatus::IoError,
        model: "BCC-2".to_string(),
        temperature: 38.0,
    }]
}

fn powers(store: &str) -> Vec<PowerInfo> {
    vec![PowerInfo {
        name: format!("{}_power_0", store),
        status: HwStatus::Ok,
        input_ok: true,
        output_ok: true,
        fan_ok: false,
        temperatures: [30.0, 31.5, 29.0],
        output_current: 12.5,
        input_current: 2.1,
        output_voltage: 12.0,
        input_voltage: 220.0,
        power: 150.0,
    }]
}

fn trays(store: &str) -> Vec<TrayModuleInfo> {
    vec![TrayModuleInfo {
        name: format!("{}_tray_0", store),
        status: HwStatus::Ok,
        model: "TRAY-8".to_string(),
        bit: 1,
        firmware: 3,
        temperature: 40.0,
        raw_capacity: 8_000_000,
        usable_capacity: 7_600_000,
        sets: (0..2)
            .map(|i| TraySetInfo {
                name: format!("set_{}", i),
                status: HwStatus::Ok,
                model: "SSD".to_string(),
                bit: i,
                temperature: 39.0,
            })
            .collect(),
    }]
}
