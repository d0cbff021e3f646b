// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
IPv4 address set calculator.

Free-form text naming addresses, dashed ranges and CIDR blocks is parsed
into a [RangeSet], combined with the working list by union or difference,
and rendered back as minimal CIDR blocks, contiguous ranges, or a mix.

```
use ipsetcalc::{DisplayMode, RenderOptions, Separator, Session};

let mut s = Session::with_options(RenderOptions::new(DisplayMode::Cidr, Separator::Comma));
s.add("10.0.0.0/24").unwrap();
assert_eq!(s.remove("10.0.0.128 to 10.0.0.255").unwrap(), "10.0.0.0/25");
```
*/

pub mod iptools;
mod session;

pub use iptools::{
    format_address, normalize, parse_address, parse_ip_list, render, AddressError, CidrBlock,
    DisplayMode, ErrorKind, Interval, IpItem, ParseFailure, RangeSet, RenderOptions, Separator,
};
pub use session::{Session, SharedSession};
