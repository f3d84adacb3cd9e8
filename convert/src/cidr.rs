// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Prefix fields.
//!
//! Users write prefixes in CIDR notation (`10.0.0.0/24`). The appliance accepts that
//! but reports IPv4 prefixes back as `10.0.0.0 255.255.255.0`. To keep state stable,
//! the form the user wrote is kept whenever it denotes the same prefix as the wire value.

use std::net::{Ipv4Addr, Ipv6Addr};

use ipnet::{IpNet, Ipv4Net, Ipv6Net};

use crate::errors::ConvertError;

fn invalid(text: &str, reason: impl std::fmt::Display) -> ConvertError {
    ConvertError::InvalidValue(format!("'{text}' is not a valid prefix: {reason}"))
}

/// Parse an IPv4 prefix in either `address/len` or `address netmask` form. A bare
/// address is a host prefix.
///
/// # Errors
/// Fails if the text is not an IPv4 prefix or the netmask is not contiguous.
pub fn parse_v4(text: &str) -> Result<Ipv4Net, ConvertError> {
    let trimmed = text.trim();
    if let Some((addr, mask)) = trimmed.split_once(char::is_whitespace) {
        let addr: Ipv4Addr = addr.parse().map_err(|e| invalid(text, e))?;
        let mask: Ipv4Addr = mask.trim().parse().map_err(|e| invalid(text, e))?;
        let len = ipnet::ipv4_mask_to_prefix(mask).map_err(|e| invalid(text, e))?;
        return Ipv4Net::new(addr, len).map_err(|e| invalid(text, e));
    }
    if let Ok(net) = trimmed.parse::<Ipv4Net>() {
        return Ok(net);
    }
    let addr: Ipv4Addr = trimmed.parse().map_err(|e| invalid(text, e))?;
    Ok(Ipv4Net::from(addr))
}

/// Parse an IPv6 prefix (`address/len`). A bare address is a host prefix.
///
/// # Errors
/// Fails if the text is not an IPv6 prefix.
pub fn parse_v6(text: &str) -> Result<Ipv6Net, ConvertError> {
    let trimmed = text.trim();
    if let Ok(net) = trimmed.parse::<Ipv6Net>() {
        return Ok(net);
    }
    let addr: Ipv6Addr = trimmed.parse().map_err(|e| invalid(text, e))?;
    Ok(Ipv6Net::from(addr))
}

/// Parse a prefix of the given family
///
/// # Errors
/// Fails if `text` is not a prefix of that family.
pub fn parse_prefix(text: &str, ipv6: bool) -> Result<IpNet, ConvertError> {
    if ipv6 {
        parse_v6(text).map(IpNet::V6)
    } else {
        parse_v4(text).map(IpNet::V4)
    }
}

/// Convert the wire form `address netmask` to CIDR notation
///
/// # Errors
/// Fails if `wire` is not an IPv4 prefix.
pub fn mask_to_cidr(wire: &str) -> Result<String, ConvertError> {
    parse_v4(wire).map(|net| net.to_string())
}

/// Choose the state value of a prefix field: the configured text when it denotes the
/// same prefix as the wire value, the wire value in CIDR notation otherwise.
///
/// # Errors
/// Fails if the wire value is not a prefix of the given family.
pub fn normalize_prefix(
    configured: Option<&str>,
    wire: &str,
    ipv6: bool,
) -> Result<String, ConvertError> {
    let reported = parse_prefix(wire, ipv6)?;
    if let Some(configured) = configured
        && let Ok(net) = parse_prefix(configured, ipv6)
        && net == reported
    {
        return Ok(configured.to_owned());
    }
    Ok(reported.to_string())
}
