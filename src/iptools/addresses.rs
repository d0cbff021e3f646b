// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    strings::*,
    structs::{CidrBlock, IpItem},
    AddressError, IPV4_BITS, OCTET_MAX,
};
use ipnet::Ipv4Net;
use std::net::Ipv4Addr;
use tracing::trace;

/**
Parse a dotted-quad IPv4 address into its integer value.

Exactly four `.`-separated fields are required, each a plain decimal
integer in `0..=255`. Signs, whitespace and empty fields are rejected.
Leading zeros are accepted and read as decimal (`010` is `10`).
*/
pub fn parse_address(token: impl AsRef<str>) -> Result<u32, AddressError> {
    let token: &str = token.as_ref();
    let fields: Vec<&str> = token.split(DOT).collect();
    if fields.len() != 4 {
        return Err(AddressError::MalformedAddress(token.into()));
    }

    let mut octets: [u8; 4] = [0; 4];
    for (octet, field) in octets.iter_mut().zip(fields) {
        *octet = parse_octet(field).ok_or_else(|| AddressError::MalformedAddress(token.into()))?;
    }
    Ok(u32::from_be_bytes(octets))
}

#[inline]
fn parse_octet(field: &str) -> Option<u8> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // u32 so that "0255" and friends are range checked rather than overflowing
    match field.parse::<u32>() {
        Ok(val) if val <= OCTET_MAX => Some(val as u8),
        _ => None,
    }
}

/// Format an address as a canonical dotted-quad (no leading zeros).
pub fn format_address(addr: u32) -> String {
    Ipv4Addr::from(addr).to_string()
}

/**
Parse a dashed range `A-B` (both sides full addresses).

A range whose ends are equal collapses to [IpItem::Address].
*/
pub fn parse_range(token: impl AsRef<str>) -> Result<IpItem, AddressError> {
    let token: &str = token.as_ref();
    let (beg_str, end_str) = token
        .split_once(DASH)
        .ok_or_else(|| AddressError::MalformedRange(token.into()))?;

    let beg: u32 = parse_address(beg_str).map_err(|_| AddressError::MalformedRange(token.into()))?;
    let end: u32 = parse_address(end_str).map_err(|_| AddressError::MalformedRange(token.into()))?;

    if beg > end {
        return Err(AddressError::RangeOrder(beg.into(), end.into()));
    }
    if beg == end {
        return Ok(IpItem::Address(beg.into()));
    }
    Ok(IpItem::Range(beg.into(), end.into()))
}

/**
Parse a CIDR block `A/n` with `n` in `0..=32`.

The address is not required to be the network address: host bits are
masked off, so `10.0.0.77/24` yields `10.0.0.0/24`.
*/
pub fn parse_cidr(token: impl AsRef<str>) -> Result<CidrBlock, AddressError> {
    let token: &str = token.as_ref();
    let (addr_str, prefix_str) = token
        .split_once(SLASH)
        .ok_or_else(|| AddressError::MalformedCidr(token.into()))?;

    let addr: u32 = parse_address(addr_str).map_err(|_| AddressError::MalformedCidr(token.into()))?;

    if prefix_str.is_empty() || !prefix_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddressError::InvalidPrefix(prefix_str.into()));
    }
    let prefix: u8 = match prefix_str.parse::<u8>() {
        Ok(p) if p <= IPV4_BITS => p,
        _ => return Err(AddressError::InvalidPrefix(prefix_str.into())),
    };

    let net: Ipv4Net = Ipv4Net::new(Ipv4Addr::from(addr), prefix)
        .map_err(|_| AddressError::InvalidPrefix(prefix_str.into()))?;
    Ok(net.trunc().into())
}

/**
Classify and parse a single (already normalized) token.

The defining characters are mutually exclusive, so the order is fixed:
- contains `/`: CIDR block (a `/32` yields [IpItem::Address])
- contains `-`: dashed range
- otherwise: single address
*/
pub fn parse_token(token: impl AsRef<str>) -> Result<IpItem, AddressError> {
    let token: &str = token.as_ref();
    let item: IpItem = if token.contains(SLASH) {
        let block: CidrBlock = parse_cidr(token)?;
        if block.is_host() {
            IpItem::Address(block.base().into())
        } else {
            IpItem::Cidr(block)
        }
    } else if token.contains(DASH) {
        parse_range(token)?
    } else {
        IpItem::Address(parse_address(token)?.into())
    };
    trace!(token, ?item, "classified token");
    Ok(item)
}

/* -------------------------------------------------------------------------- */
