// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    addresses::{format_address, parse_cidr},
    strings::*,
    AddressError, IPV4_BITS,
};
use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};
use std::{fmt, net::Ipv4Addr, str::FromStr};

/// Inclusive range of IPv4 addresses, stored as integers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    pub start: u32,
    /// inclusive
    pub end: u32,
}

impl Interval {
    /// Create a new [Interval]. Fails if `start > end`.
    pub fn new(start: u32, end: u32) -> Result<Self, AddressError> {
        if start > end {
            return Err(AddressError::RangeOrder(start.into(), end.into()));
        }
        Ok(Self { start, end })
    }

    /// Interval holding exactly one address.
    pub fn single(addr: u32) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// Number of addresses in the interval, `1..=2^32`.
    pub fn len(&self) -> u64 {
        (self.end - self.start) as u64 + 1
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, addr: u32) -> bool {
        self.start <= addr && addr <= self.end
    }

    /// True if both intervals can be merged into one (overlapping or touching).
    pub fn touches(&self, other: &Interval) -> bool {
        let (lo, hi) = if self.start <= other.start {
            (self, other)
        } else {
            (other, self)
        };
        hi.start <= lo.end.saturating_add(1)
    }
}

/// Range notation (`start-end`), or the bare address for a single address.
impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", format_address(self.start))
        } else {
            write!(
                f,
                "{}{DASH}{}",
                format_address(self.start),
                format_address(self.end)
            )
        }
    }
}

impl From<CidrBlock> for Interval {
    fn from(block: CidrBlock) -> Self {
        block.to_interval()
    }
}

/* -------------------------------------------------------------------------- */

/// Power-of-two aligned block of IPv4 addresses.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCidrBlock")]
pub struct CidrBlock {
    /// network address, always aligned to the block size
    base: u32,
    /// `0..=32`
    prefix: u8,
}

impl CidrBlock {
    /**
    Create a new [CidrBlock]. The address does not need to be aligned: host
    bits below the prefix are masked off, as in standard CIDR notation.
    */
    pub fn new(addr: u32, prefix: u8) -> Result<Self, AddressError> {
        if prefix > IPV4_BITS {
            return Err(AddressError::InvalidPrefix(prefix.to_string()));
        }
        Ok(Self {
            base: addr & prefix_mask(prefix),
            prefix,
        })
    }

    /// Caller guarantees `prefix <= 32` and that `base` is aligned.
    #[inline]
    pub(crate) fn from_aligned(base: u32, prefix: u8) -> Self {
        debug_assert!(prefix <= IPV4_BITS);
        debug_assert_eq!(base & !prefix_mask(prefix), 0);
        Self { base, prefix }
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// First address of the block (the network address).
    pub fn first(&self) -> u32 {
        self.base
    }

    /// Last address of the block (the broadcast address).
    pub fn last(&self) -> u32 {
        self.base | !prefix_mask(self.prefix)
    }

    /// Number of addresses in the block, `1..=2^32`.
    pub fn len(&self) -> u64 {
        1u64 << (IPV4_BITS - self.prefix)
    }

    pub fn is_host(&self) -> bool {
        self.prefix == IPV4_BITS
    }

    pub fn to_interval(&self) -> Interval {
        Interval {
            start: self.first(),
            end: self.last(),
        }
    }
}

/// `base/prefix`, or the bare address for a `/32` host block.
impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_host() {
            write!(f, "{}", format_address(self.base))
        } else {
            write!(f, "{}{SLASH}{}", format_address(self.base), self.prefix)
        }
    }
}

impl FromStr for CidrBlock {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cidr(s)
    }
}

impl From<Ipv4Net> for CidrBlock {
    fn from(net: Ipv4Net) -> Self {
        Self {
            base: u32::from(net.network()),
            prefix: net.prefix_len(),
        }
    }
}

impl From<CidrBlock> for Ipv4Net {
    fn from(block: CidrBlock) -> Self {
        // prefix is validated on construction
        Ipv4Net::new(Ipv4Addr::from(block.base), block.prefix)
            .unwrap_or_else(|_| Ipv4Net::from(Ipv4Addr::from(block.base)))
    }
}

/* -------------------------------------------------------------------------- */

/// One successfully parsed input token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IpItem {
    Address(Ipv4Addr),
    /// inclusive, `start < end`
    Range(Ipv4Addr, Ipv4Addr),
    Cidr(CidrBlock),
}

impl IpItem {
    pub fn to_interval(&self) -> Interval {
        match *self {
            IpItem::Address(a) => Interval::single(a.into()),
            IpItem::Range(beg, end) => Interval {
                start: beg.into(),
                end: end.into(),
            },
            IpItem::Cidr(block) => block.to_interval(),
        }
    }
}

/* ---------------------------------- */

/// Unchecked wire form of an [Interval]; validated through [Interval::new].
#[derive(Deserialize)]
struct RawInterval {
    start: u32,
    end: u32,
}

impl TryFrom<RawInterval> for Interval {
    type Error = AddressError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Interval::new(raw.start, raw.end)
    }
}

/// Unchecked wire form of a [CidrBlock]; validated (and aligned) through [CidrBlock::new].
#[derive(Deserialize)]
struct RawCidrBlock {
    base: u32,
    prefix: u8,
}

impl TryFrom<RawCidrBlock> for CidrBlock {
    type Error = AddressError;

    fn try_from(raw: RawCidrBlock) -> Result<Self, Self::Error> {
        CidrBlock::new(raw.base, raw.prefix)
    }
}

/* ---------------------------------- */

/// Netmask with the `prefix` high bits set.
#[inline]
pub(crate) fn prefix_mask(prefix: u8) -> u32 {
    match prefix {
        0 => 0,
        p if p >= IPV4_BITS => u32::MAX,
        p => u32::MAX << (IPV4_BITS - p),
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_NET: &str = "192.168.1.0/30";
    const TEST_UNALIGNED: &str = "192.168.1.77/24";
    const TEST_HOST: &str = "10.0.0.5/32";

    #[test]
    fn test_cidr_parse_and_display() {
        let block: CidrBlock = TEST_NET.parse().unwrap();
        assert_eq!(block.base(), u32::from(Ipv4Addr::new(192, 168, 1, 0)));
        assert_eq!(block.prefix(), 30);
        assert_eq!(block.len(), 4);
        assert_eq!(block.to_string(), TEST_NET);
    }

    #[test]
    fn test_cidr_is_aligned() {
        let block: CidrBlock = TEST_UNALIGNED.parse().unwrap();
        assert_eq!(block.to_string(), "192.168.1.0/24");
        assert_eq!(format_address(block.last()), "192.168.1.255");
    }

    #[test]
    fn test_host_block_display() {
        let block: CidrBlock = TEST_HOST.parse().unwrap();
        assert!(block.is_host());
        assert_eq!(block.to_string(), "10.0.0.5");
        assert_eq!(block.to_interval(), Interval::single(block.base()));
    }

    #[test]
    fn test_whole_space() {
        let block: CidrBlock = CidrBlock::new(0x0a0b0c0d, 0).unwrap();
        assert_eq!(block.base(), 0);
        assert_eq!(block.last(), u32::MAX);
        assert_eq!(block.len(), 1u64 << 32);
        assert_eq!(block.to_interval().len(), 1u64 << 32);
    }

    #[test]
    fn test_invalid_prefix() {
        assert!(CidrBlock::new(0, 33).is_err());
    }

    #[test]
    fn test_ipnet_roundtrip() {
        let block: CidrBlock = TEST_NET.parse().unwrap();
        let net: Ipv4Net = block.into();
        assert_eq!(net.to_string(), TEST_NET);
        assert_eq!(CidrBlock::from(net), block);
    }

    #[test]
    fn test_interval_display() {
        let a: u32 = Ipv4Addr::new(10, 0, 0, 1).into();
        let b: u32 = Ipv4Addr::new(10, 0, 0, 9).into();
        assert_eq!(Interval::new(a, b).unwrap().to_string(), "10.0.0.1-10.0.0.9");
        assert_eq!(Interval::single(a).to_string(), "10.0.0.1");
        assert!(Interval::new(b, a).is_err());
    }

    #[test]
    fn test_interval_touches() {
        let a = Interval::new(10, 20).unwrap();
        assert!(a.touches(&Interval::new(21, 30).unwrap()));
        assert!(a.touches(&Interval::new(0, 9).unwrap()));
        assert!(a.touches(&Interval::new(15, 16).unwrap()));
        assert!(!a.touches(&Interval::new(22, 30).unwrap()));
        assert!(Interval::single(u32::MAX).touches(&Interval::single(u32::MAX)));
    }

    #[test]
    fn test_serde_interval() {
        let iv: Interval = Interval::new(5, 9).unwrap();
        let json: String = serde_json::to_string(&iv).unwrap();
        assert_eq!(json, r#"{"start":5,"end":9}"#);
        assert_eq!(serde_json::from_str::<Interval>(&json).unwrap(), iv);
        assert!(serde_json::from_str::<Interval>(r#"{"start":5,"end":1}"#).is_err());
    }

    #[test]
    fn test_serde_cidr_is_validated() {
        let block: CidrBlock = TEST_NET.parse().unwrap();
        let json: String = serde_json::to_string(&block).unwrap();
        assert_eq!(serde_json::from_str::<CidrBlock>(&json).unwrap(), block);

        assert!(serde_json::from_str::<CidrBlock>(r#"{"base":0,"prefix":40}"#).is_err());

        // host bits are masked off like in CIDR notation
        let block: CidrBlock = serde_json::from_str(r#"{"base":5,"prefix":24}"#).unwrap();
        assert_eq!(block.base(), 0);
        assert_eq!(block.to_string(), "0.0.0.0/24");
    }
}
