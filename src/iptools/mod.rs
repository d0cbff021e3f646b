// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! IPv4 address set engine: token parsing, range algebra, CIDR summarization
//! and textual rendering.

mod addresses;
mod collapsing;
mod formatting;
mod rangeset;
mod strings;
mod structs;
mod tokens;

use std::{error, fmt, net::Ipv4Addr};
use strings::*;

pub use addresses::{format_address, parse_address, parse_cidr, parse_range, parse_token};
pub use formatting::{render, DisplayMode, OptionError, RenderOptions, Separator};
pub use rangeset::RangeSet;
pub use strings::{MSG_IPERROR, MSG_IPERROR_HDR};
pub use structs::{CidrBlock, Interval, IpItem};
pub use tokens::{normalize, parse_intervals, parse_ip_list, ParseFailure};

pub(crate) const IPV4_BITS: u8 = 32;
pub(crate) const OCTET_MAX: u32 = 255;

/// Which validator rejected a token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Address,
    Range,
    Cidr,
}

#[rustfmt::skip]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AddressError {
    /// not four dot-separated decimal fields in `0..=255`
    MalformedAddress(String),
    /// one side of a dashed range is not a valid address
    MalformedRange(String),
    /// dashed range with start > end
    RangeOrder(Ipv4Addr, Ipv4Addr),
    /// address part of a slashed token is not a valid address
    MalformedCidr(String),
    /// prefix part of a slashed token is not an integer in `0..=32`
    InvalidPrefix(String),
}

impl AddressError {
    /// Classify the error by the validator which produced it.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AddressError::MalformedAddress(_) => ErrorKind::Address,
            AddressError::MalformedRange(_) | AddressError::RangeOrder(..) => ErrorKind::Range,
            AddressError::MalformedCidr(_) | AddressError::InvalidPrefix(_) => ErrorKind::Cidr,
        }
    }
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::MalformedAddress(ip) => {
                write!(f, "{ERR_ADDR}: '{ip}'")
            }
            AddressError::MalformedRange(rng) => {
                write!(f, "{ERR_RNG_FMT}: '{rng}'")
            }
            AddressError::RangeOrder(beg, end) => {
                write!(f, "{ERR_RNG_ORDER} ({beg} > {end})")
            }
            AddressError::MalformedCidr(cidr) => {
                write!(f, "{ERR_CIDR_FMT}: '{cidr}'")
            }
            AddressError::InvalidPrefix(pre) => {
                write!(f, "{ERR_CIDR_PREFIX} '{pre}'")
            }
        }
    }
}

impl error::Error for AddressError {}
