// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{collapsing::range_to_cidrs, rangeset::RangeSet, strings::*, structs::CidrBlock};
use serde::{Deserialize, Serialize};
use std::{error, fmt, str::FromStr};

/// How a [RangeSet] is rendered to text.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// minimal CIDR blocks, `/32` hosts as bare addresses
    #[default]
    Cidr,
    /// contiguous `start-end` ranges, single addresses bare
    Range,
    /// one CIDR block where a range is exactly one block, else `start-end`
    Mixed,
}

/// What goes between rendered items.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    Comma,
    #[default]
    Newline,
}

impl Separator {
    pub fn as_char(&self) -> char {
        match self {
            Separator::Comma => COMMA,
            Separator::Newline => NEWLINE,
        }
    }
}

/// Active display settings. Defaults to one CIDR block per line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub mode: DisplayMode,
    pub separator: Separator,
}

impl RenderOptions {
    pub fn new(mode: DisplayMode, separator: Separator) -> Self {
        Self { mode, separator }
    }

    pub fn with_mode(self, mode: DisplayMode) -> Self {
        Self { mode, ..self }
    }

    pub fn with_separator(self, separator: Separator) -> Self {
        Self { separator, ..self }
    }

    pub fn render(&self, set: &RangeSet) -> String {
        render(set, self.mode, self.separator)
    }
}

/* ---------------------------------- */

/// Render a [RangeSet] as text. An empty set renders as an empty string.
pub fn render(set: &RangeSet, mode: DisplayMode, separator: Separator) -> String {
    let items: Vec<String> = match mode {
        DisplayMode::Cidr => set.to_cidr_blocks().iter().map(|b| b.to_string()).collect(),
        DisplayMode::Range => set.iter_ranges().map(|r| r.to_string()).collect(),
        DisplayMode::Mixed => set
            .iter_ranges()
            .map(|r| {
                let blocks: Vec<CidrBlock> = range_to_cidrs(r);
                match blocks.as_slice() {
                    [single] => single.to_string(),
                    _ => r.to_string(),
                }
            })
            .collect(),
    };
    items.join(&separator.as_char().to_string())
}

/* -------------------------------------------------------------------------- */

/// Unrecognized display mode or separator name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OptionError {
    Mode(String),
    Separator(String),
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionError::Mode(s) => write!(f, "{ERR_MODE}: '{s}'"),
            OptionError::Separator(s) => write!(f, "{ERR_SEPARATOR}: '{s}'"),
        }
    }
}

impl error::Error for OptionError {}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: &str = match self {
            DisplayMode::Cidr => "cidr",
            DisplayMode::Range => "range",
            DisplayMode::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

impl FromStr for DisplayMode {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cidr" => Ok(DisplayMode::Cidr),
            "range" => Ok(DisplayMode::Range),
            "mixed" => Ok(DisplayMode::Mixed),
            _ => Err(OptionError::Mode(s.into())),
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: &str = match self {
            Separator::Comma => "comma",
            Separator::Newline => "newline",
        };
        f.write_str(name)
    }
}

impl FromStr for Separator {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "comma" => Ok(Separator::Comma),
            "newline" => Ok(Separator::Newline),
            _ => Err(OptionError::Separator(s.into())),
        }
    }
}

/* -------------------------------------------------------------------------- */
