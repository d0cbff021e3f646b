// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    structs::{CidrBlock, Interval},
    IPV4_BITS,
};

/// Merge overlapping/adjacent intervals. Input must be sorted by start.
#[inline]
pub(crate) fn merge_ranges(sorted: &[Interval]) -> Vec<Interval> {
    let mut out: Vec<Interval> = Vec::with_capacity(sorted.len());
    for r in sorted.iter().copied() {
        if let Some(last) = out.last_mut() {
            if last.touches(&r) {
                if r.end > last.end {
                    last.end = r.end;
                }
                continue;
            }
        }
        out.push(r);
    }
    out
}

/**
Subtract `sub` from `from`. Both inputs must be sorted, disjoint and
non-adjacent (i.e. compacted); the output is too.

Each interval of `from` survives whole, shrinks, vanishes, or is split in
two by a subtrahend lying strictly inside it.
*/
pub(crate) fn subtract_ranges(from: &[Interval], sub: &[Interval]) -> Vec<Interval> {
    let mut out: Vec<Interval> = Vec::with_capacity(from.len());
    let mut first: usize = 0;

    for r in from.iter().copied() {
        // subtrahends wholly below this interval can't touch any later one either
        while first < sub.len() && sub[first].end < r.start {
            first += 1;
        }

        let mut start: u32 = r.start;
        let mut covered: bool = false;

        for s in sub[first..].iter().take_while(|s| s.start <= r.end) {
            if s.start > start {
                out.push(Interval {
                    start,
                    end: s.start - 1,
                });
            }
            if s.end >= r.end {
                covered = true;
                break;
            }
            // s.end < r.end <= u32::MAX
            start = start.max(s.end + 1);
        }

        if !covered {
            out.push(Interval { start, end: r.end });
        }
    }
    out
}

/**
Decompose an inclusive interval into the minimal set of aligned CIDR blocks.

At each step the largest block starting at `start` is taken which is both
aligned on `start` and does not reach past `end`.
*/
pub(crate) fn range_to_cidrs(r: Interval) -> Vec<CidrBlock> {
    let bits: u32 = IPV4_BITS as u32;
    // u64 so that advancing past 255.255.255.255 does not wrap
    let mut start: u64 = r.start as u64;
    let end: u64 = r.end as u64;
    let mut out: Vec<CidrBlock> = Vec::new();

    while start <= end {
        /*
        Largest block aligned at 'start' (power-of-two size).
        trailing_zeros of 0u32 is 32, which gives /0.
        */
        let tz: u32 = (start as u32).trailing_zeros();
        let max_align_prefix: u32 = bits - tz.min(bits);

        // largest block that fits in remaining range length
        let remaining: u64 = end - start + 1;
        let max_fit_prefix: u32 = bits - floor_log2_u64(remaining);

        let prefix: u32 = max_align_prefix.max(max_fit_prefix);
        out.push(CidrBlock::from_aligned(start as u32, prefix as u8));

        start += 1u64 << (bits - prefix);
    }
    out
}

/// floor(log2(x)) for x>=1, returns in [0..63]
#[inline]
fn floor_log2_u64(x: u64) -> u32 {
    debug_assert!(x >= 1);
    63u32.saturating_sub(x.leading_zeros())
}

/* -------------------------------------------------------------------------- */
