// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

pub(crate) static DOT: char = '.';
pub(crate) static DASH: char = '-';
pub(crate) static SLASH: char = '/';
pub(crate) static COMMA: char = ',';
pub(crate) static NEWLINE: char = '\n';

// tokens.rs
pub(crate) static TRIPLE_DOT: &str = "...";
pub(crate) static ELLIPSIS: char = '\u{2026}';
pub(crate) static EN_DASH: char = '\u{2013}';
pub(crate) static EM_DASH: char = '\u{2014}';
pub(crate) static WORD_TO: &str = "to";

// mod.rs
pub(crate) static ERR_ADDR: &str = "malformed IPv4 address";
pub(crate) static ERR_RNG_FMT: &str = "malformed IPv4 range";
pub(crate) static ERR_RNG_ORDER: &str = "start IP is greater than end IP";
pub(crate) static ERR_CIDR_FMT: &str = "malformed CIDR block";
pub(crate) static ERR_CIDR_PREFIX: &str = "CIDR prefix must be an integer in 0..=32, got";

// formatting.rs
pub(crate) static ERR_MODE: &str = "unknown display mode (expected cidr, range or mixed)";
pub(crate) static ERR_SEPARATOR: &str = "unknown separator (expected comma or newline)";

/// Title for the dialog/notice shown when the working text fails to parse.
pub static MSG_IPERROR_HDR: &str = "Validation Error";
/// Prefix of the user facing parse failure message; the bad token follows.
pub static MSG_IPERROR: &str = "Error in IP/CIDR: ";
