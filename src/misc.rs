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

use std::net::Ipv4Addr;

use regex::Regex;

use super::error::*;

/// Longest name accepted for tenants, admins, volumes and s5stores, in
/// bytes. The conductor stores names in 96-byte NUL terminated buffers.
pub const MAX_NAME_LEN: usize = 95;
/// Longest password accepted, in bytes.
pub const MAX_SECRET_LEN: usize = 511;
/// Volume sizes are allocated in physical blocks of this many bytes.
pub const PHY_BLOCK_SIZE: u64 = 4 << 20;
/// Volume IOPS quotas are counted in units of this many operations.
pub const IOPS_UNIT: u64 = 1024;
/// Largest volume IOPS quota.
pub const MAX_VOLUME_IOPS: u64 = 1024 * 1024;
/// Largest replica count of a volume.
pub const MAX_REPLICA_NUM: usize = 3;
/// Fan speed rate is a percentage multiplied by 100.
pub const MAX_FAN_SPEED_RATE: u32 = 10_000;

struct SizeUnit<'a> {
    unit: &'a str,
    bytes: u64,
}

const SIZE_CONVS: [SizeUnit<'static>; 6] = [
    SizeUnit {
        unit: "EiB",
        bytes: 1u64 << 60,
    },
    SizeUnit {
        unit: "PiB",
        bytes: 1u64 << 50,
    },
    SizeUnit {
        unit: "TiB",
        bytes: 1u64 << 40,
    },
    SizeUnit {
        unit: "GiB",
        bytes: 1u64 << 30,
    },
    SizeUnit {
        unit: "MiB",
        bytes: 1u64 << 20,
    },
    SizeUnit {
        unit: "KiB",
        bytes: 1u64 << 10,
    },
];

const DECIMAL_SIZE_CONVS: [SizeUnit<'static>; 7] = [
    SizeUnit {
        unit: "B",
        bytes: 1u64,
    },
    SizeUnit {
        unit: "KB",
        bytes: 1_000u64,
    },
    SizeUnit {
        unit: "MB",
        bytes: 1_000_000u64,
    },
    SizeUnit {
        unit: "GB",
        bytes: 1_000_000_000u64,
    },
    SizeUnit {
        unit: "TB",
        bytes: 1_000_000_000_000u64,
    },
    SizeUnit {
        unit: "PB",
        bytes: 1_000_000_000_000_000u64,
    },
    SizeUnit {
        unit: "EB",
        bytes: 1_000_000_000_000_000_000u64,
    },
];

/// Convert a human readable size such as `"100GB"`, `"1.5 TiB"` or `"4M"`
/// into bytes. A unit without `B` is taken as binary (`4M` is `4MiB`).
///
/// # Errors
///
///  * [`S5Error::InvalidArgument`][1]: unparsable number or unknown unit.
///
/// [1]: enum.S5Error.html#variant.InvalidArgument
pub fn size_human_2_size_bytes(s: &str) -> Result<u64> {
    let regex_size_human = Regex::new(
        r"(?x)
        ^
        ([0-9\.]+)          # 1: number
        [\ \t]*             # might have space between number and unit
        ([a-zA-Z]*)         # 2: units
        $
        ",
    )?;
    let invalid = || {
        S5Error::InvalidArgument(format!("Invalid size string '{}'", s))
    };

    let cap = regex_size_human.captures(s.trim()).ok_or_else(invalid)?;
    let number = cap
        .get(1)
        .and_then(|n| n.as_str().parse::<f64>().ok())
        .ok_or_else(invalid)?;
    let unit = match cap.get(2).map(|u| u.as_str().to_uppercase()) {
        Some(ref u) if u.is_empty() => "B".to_string(),
        Some(u) => {
            if !u.ends_with('B') {
                format!("{}IB", u)
            } else {
                u
            }
        }
        None => return Err(invalid()),
    };
    let size_conv = SIZE_CONVS
        .iter()
        .chain(DECIMAL_SIZE_CONVS.iter())
        .find(|c| c.unit.to_uppercase() == unit)
        .ok_or_else(invalid)?;
    if size_conv.bytes == 1 && number.fract() != 0.0 {
        return Err(S5Error::InvalidArgument(format!(
            "Size '{}' is not a whole number of bytes",
            s
        )));
    }
    let bytes = (size_conv.bytes as f64 * number).round();
    // 2^64 is the first f64 above u64::MAX.
    if bytes >= u64::MAX as f64 {
        return Err(S5Error::InvalidArgument(format!(
            "Size '{}' exceeds {} bytes",
            s,
            u64::MAX
        )));
    }
    Ok(bytes as u64)
}

/// Convert bytes into a human readable binary size string like `"1.50GiB"`.
pub fn size_bytes_2_size_human(i: u64) -> String {
    for size_conv in &SIZE_CONVS {
        if i >= size_conv.bytes {
            let num = (i as f64) / (size_conv.bytes as f64);
            return format!("{:.2}{}", num, size_conv.unit);
        }
    }
    format!("{:.2}B", i as f64)
}

pub(crate) fn verify_name(what: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(S5Error::InvalidArgument(format!(
            "{} name is empty",
            what
        )));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(S5Error::InvalidArgument(format!(
            "{} name '{}' exceeds {} bytes",
            what, name, MAX_NAME_LEN
        )));
    }
    let regex_name = Regex::new(r"^[A-Za-z0-9_]+$")?;
    if !regex_name.is_match(name) {
        return Err(S5Error::InvalidArgument(format!(
            "{} name '{}' should only contain letters, numbers and \
             underscores",
            what, name
        )));
    }
    Ok(())
}

pub(crate) fn verify_secret(what: &str, secret: &str) -> Result<()> {
    if secret.is_empty() {
        return Err(S5Error::InvalidArgument(format!(
            "{} password is empty",
            what
        )));
    }
    if secret.len() > MAX_SECRET_LEN {
        return Err(S5Error::InvalidArgument(format!(
            "{} password exceeds {} bytes",
            what, MAX_SECRET_LEN
        )));
    }
    Ok(())
}

pub(crate) fn verify_ipv4(what: &str, ip: &str) -> Result<()> {
    match ip.parse::<Ipv4Addr>() {
        Ok(_) => Ok(()),
        Err(_) => Err(S5Error::InvalidArgument(format!(
            "Invalid {} IPv4 address '{}'",
            what, ip
        ))),
    }
}

pub(crate) fn verify_volume_size(size: u64) -> Result<()> {
    if size == 0 || size % PHY_BLOCK_SIZE != 0 {
        return Err(S5Error::InvalidArgument(format!(
            "Invalid volume size {}, should be a non-zero multiple of {} \
             bytes",
            size, PHY_BLOCK_SIZE
        )));
    }
    Ok(())
}

pub(crate) fn verify_volume_iops(iops: u64) -> Result<()> {
    if iops == 0 || iops % IOPS_UNIT != 0 || iops > MAX_VOLUME_IOPS {
        return Err(S5Error::InvalidArgument(format!(
            "Invalid volume iops {}, should be a non-zero multiple of {} \
             and no more than {}",
            iops, IOPS_UNIT, MAX_VOLUME_IOPS
        )));
    }
    Ok(())
}

pub(crate) fn verify_volume_bw(bw: u64) -> Result<()> {
    if bw == 0 {
        return Err(S5Error::InvalidArgument(
            "Invalid volume bandwidth 0".to_string(),
        ));
    }
    Ok(())
}

// Quotas on the update path travel as signed 64-bit values.
pub(crate) fn verify_update_quota(what: &str, v: Option<u64>) -> Result<()> {
    match v {
        Some(i) if i > i64::MAX as u64 => Err(S5Error::InvalidArgument(
            format!("New {} {} is out of range", what, i),
        )),
        _ => Ok(()),
    }
}
