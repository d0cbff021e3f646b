// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    addresses::parse_token, rangeset::RangeSet, strings::*, structs::Interval, AddressError,
    ErrorKind,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::{error, fmt};
use tracing::{debug, trace};

// Compiled once per program execution.
lazy_static! {
    static ref RE_DASH_SPACE: Regex = Regex::new(r"\s*-\s*").unwrap();
    static ref RE_SPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref RE_COMMAS: Regex = Regex::new(r",{2,}").unwrap();
}

/// A token of the working text which failed validation. Nothing was applied.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseFailure {
    token: String,
    error: AddressError,
}

impl ParseFailure {
    pub fn new(token: impl Into<String>, error: AddressError) -> Self {
        Self {
            token: token.into(),
            error,
        }
    }

    /// The offending token, exactly as it appeared after normalization.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn error(&self) -> &AddressError {
        &self.error
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    /// Title for a user facing error notice.
    pub fn title(&self) -> &'static str {
        MSG_IPERROR_HDR
    }
}

/// User facing message, f.ex. "Error in IP/CIDR: 999.1.1.1".
impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{MSG_IPERROR}{}", self.token)
    }
}

impl error::Error for ParseFailure {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.error)
    }
}

/**
Normalize free-form separators into a comma separated token stream.

Applied in this order:
1. `...`, `…`, `–` and `—` become `-`
2. every occurrence of `to` becomes `-`
3. whitespace around `-` is removed
4. remaining whitespace runs become `,`
5. repeated commas are collapsed

NOTE: step 2 is a plain substring replacement. It is not limited to a
standalone word, so any text containing "to" is mangled as well.
*/
pub fn normalize(raw: impl AsRef<str>) -> String {
    let dash: String = DASH.to_string();
    let text: String = raw
        .as_ref()
        .replace(TRIPLE_DOT, &dash)
        .replace(ELLIPSIS, &dash)
        .replace(EN_DASH, &dash)
        .replace(EM_DASH, &dash)
        .replace(WORD_TO, &dash);

    let text = RE_DASH_SPACE.replace_all(&text, dash.as_str());
    let text = RE_SPACE.replace_all(&text, COMMA.to_string().as_str());
    let text = RE_COMMAS.replace_all(&text, COMMA.to_string().as_str());
    text.into_owned()
}

/**
Parse free-form working text into the list of [Interval]s it names.

Input order is preserved and duplicates/overlaps are kept. Empty tokens
are skipped. The first invalid token aborts the whole parse and is
returned in the [ParseFailure].
*/
pub fn parse_intervals(raw: impl AsRef<str>) -> Result<Vec<Interval>, ParseFailure> {
    let text: String = normalize(raw);
    trace!(normalized = %text, "tokenizing");

    let mut out: Vec<Interval> = Vec::new();
    for token in text.split(COMMA).filter(|t| !t.is_empty()) {
        match parse_token(token) {
            Ok(item) => out.push(item.to_interval()),
            Err(error) => {
                debug!(token, %error, "rejected token");
                return Err(ParseFailure::new(token, error));
            }
        }
    }
    Ok(out)
}

/// Parse free-form working text straight into a compacted [RangeSet].
pub fn parse_ip_list(raw: impl AsRef<str>) -> Result<RangeSet, ParseFailure> {
    Ok(RangeSet::compact(parse_intervals(raw)?))
}

/* -------------------------------------------------------------------------- */
