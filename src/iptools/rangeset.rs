// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    collapsing::{merge_ranges, range_to_cidrs, subtract_ranges},
    structs::{CidrBlock, Interval},
};
use serde::Serialize;
use std::ops::{BitOr, BitOrAssign, Sub, SubAssign};

/**
A set of IPv4 addresses stored as sorted, disjoint, non-adjacent inclusive
intervals.

Every constructor and operation returns a compacted set, so two sets holding
the same addresses always compare equal.
*/
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct RangeSet {
    ranges: Vec<Interval>,
}

impl RangeSet {
    /// The empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort the intervals by start and merge overlapping/adjacent ones.
    pub fn compact(intervals: impl IntoIterator<Item = Interval>) -> Self {
        let mut ranges: Vec<Interval> = intervals.into_iter().collect();
        ranges.sort_unstable();
        Self {
            ranges: merge_ranges(&ranges),
        }
    }

    /// All addresses in either set.
    pub fn union(&self, other: &RangeSet) -> RangeSet {
        if other.is_empty() {
            return self.clone();
        }
        RangeSet::compact(self.ranges.iter().chain(other.ranges.iter()).copied())
    }

    /// All addresses in `self` which are not in `other`.
    pub fn difference(&self, other: &RangeSet) -> RangeSet {
        if self.is_empty() || other.is_empty() {
            return self.clone();
        }
        let rest: Vec<Interval> = subtract_ranges(&self.ranges, &other.ranges);
        Self {
            ranges: merge_ranges(&rest),
        }
    }

    /// Remove all addresses.
    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    /// Minimal list of aligned CIDR blocks covering exactly this set, in order.
    pub fn to_cidr_blocks(&self) -> Vec<CidrBlock> {
        self.ranges.iter().copied().flat_map(range_to_cidrs).collect()
    }

    /// Set holding every address of the given blocks.
    pub fn from_cidr_blocks(blocks: impl IntoIterator<Item = CidrBlock>) -> Self {
        RangeSet::compact(blocks.into_iter().map(|b| b.to_interval()))
    }

    /// The stored intervals, in ascending order.
    pub fn iter_ranges(&self) -> impl Iterator<Item = Interval> + '_ {
        self.ranges.iter().copied()
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of addresses in the set, `0..=2^32`.
    pub fn len(&self) -> u64 {
        self.ranges.iter().map(|r| r.len()).sum()
    }

    pub fn contains(&self, addr: u32) -> bool {
        let idx: usize = self.ranges.partition_point(|r| r.end < addr);
        self.ranges.get(idx).is_some_and(|r| r.contains(addr))
    }
}

impl FromIterator<Interval> for RangeSet {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        RangeSet::compact(iter)
    }
}

impl FromIterator<CidrBlock> for RangeSet {
    fn from_iter<I: IntoIterator<Item = CidrBlock>>(iter: I) -> Self {
        RangeSet::from_cidr_blocks(iter)
    }
}

impl BitOr<&RangeSet> for &RangeSet {
    type Output = RangeSet;

    /// Same as [RangeSet::union].
    #[inline]
    fn bitor(self, rhs: &RangeSet) -> Self::Output {
        self.union(rhs)
    }
}

impl BitOrAssign<&RangeSet> for RangeSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: &RangeSet) {
        *self = self.union(rhs);
    }
}

impl Sub<&RangeSet> for &RangeSet {
    type Output = RangeSet;

    /// Same as [RangeSet::difference].
    #[inline]
    fn sub(self, rhs: &RangeSet) -> Self::Output {
        self.difference(rhs)
    }
}

impl SubAssign<&RangeSet> for RangeSet {
    #[inline]
    fn sub_assign(&mut self, rhs: &RangeSet) {
        if self.is_empty() || rhs.is_empty() {
            return;
        }
        *self = self.difference(rhs);
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iptools::{parse_address, parse_ip_list};

    fn set(s: &str) -> RangeSet {
        parse_ip_list(s).unwrap()
    }

    /// Representative sets used for the algebraic properties below.
    #[rustfmt::skip]
    const CORPUS: [&str; 9] = [
        "",
        "10.0.0.1",
        "10.0.0.0/24",
        "10.0.0.0/24 10.0.2.0/24 10.0.1.7",
        "192.168.1.0-192.168.1.10, 192.168.1.12-192.168.1.200",
        "0.0.0.0/0",
        "0.0.0.0 255.255.255.255",
        "1.2.3.4-1.2.3.9 1.2.3.200-1.2.4.17 8.8.8.8 8.8.4.4",
        "172.16.0.0/12 172.31.255.255 172.32.0.0",
    ];

    #[test]
    fn test_compact_sorts_and_merges() {
        let a: u32 = parse_address("10.0.0.0").unwrap();
        let raw: Vec<Interval> = vec![
            Interval::single(a + 3),
            Interval::single(a + 1),
            Interval::new(a + 10, a + 20).unwrap(),
            Interval::single(a + 2),
            Interval::single(a),
        ];
        let out: RangeSet = RangeSet::compact(raw);
        assert_eq!(
            out.intervals(),
            &[Interval::new(a, a + 3).unwrap(), Interval::new(a + 10, a + 20).unwrap()]
        );
    }

    #[test]
    fn test_compact_idempotent() {
        for s in CORPUS {
            let once: RangeSet = set(s);
            let twice: RangeSet = RangeSet::compact(once.iter_ranges());
            assert_eq!(once, twice, "Failed: '{s}'");
        }
    }

    #[test]
    fn test_compact_idempotent_raw() {
        let iv = |a: u32, b: u32| Interval::new(a, b).unwrap();
        let max: u32 = u32::MAX;
        // unsorted, overlapping, duplicated and touching input
        #[rustfmt::skip]
        let inputs: Vec<Vec<Interval>> = vec![
            vec![iv(50, 60), iv(1, 5), iv(1, 5), iv(3, 9), iv(10, 10), iv(55, 70)],
            vec![iv(max, max), iv(0, 0), iv(max - 10, max - 1), iv(1, 1), iv(max - 20, max - 11)],
            vec![iv(100, 200), iv(150, 160), iv(0, max), iv(7, 7)],
            vec![iv(9, 9), iv(7, 7), iv(5, 5), iv(3, 3), iv(1, 1)],
        ];
        #[rustfmt::skip]
        let expected: Vec<Vec<Interval>> = vec![
            vec![iv(1, 10), iv(50, 70)],
            vec![iv(0, 1), iv(max - 20, max)],
            vec![iv(0, max)],
            vec![iv(1, 1), iv(3, 3), iv(5, 5), iv(7, 7), iv(9, 9)],
        ];

        for (raw, want) in inputs.into_iter().zip(expected) {
            let once: RangeSet = RangeSet::compact(raw.clone());
            assert_eq!(once.intervals(), want.as_slice(), "Failed: {raw:?}");
            let twice: RangeSet = RangeSet::compact(once.iter_ranges());
            assert_eq!(once, twice, "Failed: {raw:?}");
        }
    }

    #[test]
    fn test_union_properties() {
        let empty: RangeSet = RangeSet::new();
        for a in CORPUS {
            let a: RangeSet = set(a);
            assert_eq!(a.union(&empty), a);
            assert_eq!(empty.union(&a), a);
            assert_eq!(a.union(&a), a);
            for b in CORPUS {
                let b: RangeSet = set(b);
                assert_eq!(a.union(&b), b.union(&a));
                for c in CORPUS {
                    let c: RangeSet = set(c);
                    assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
                }
            }
        }
    }

    #[test]
    fn test_difference_properties() {
        let empty: RangeSet = RangeSet::new();
        for a in CORPUS {
            let a: RangeSet = set(a);
            assert!(a.difference(&a).is_empty());
            assert_eq!(a.difference(&empty), a);
            assert!(empty.difference(&a).is_empty());
            for b in CORPUS {
                let b: RangeSet = set(b);
                let d: RangeSet = a.difference(&b);
                // d is the part of a outside b
                assert!(d.difference(&a).is_empty());
                assert_eq!(d.difference(&b), d);
                assert_eq!(d.len(), a.union(&b).len() - b.len());
                assert_eq!(d.union(&b), a.union(&b));
            }
        }
    }

    #[test]
    fn test_difference_split() {
        let a: RangeSet = set("10.0.0.0/24");
        let b: RangeSet = set("10.0.0.100-10.0.0.150");
        let d: RangeSet = &a - &b;
        assert_eq!(d.len(), 256 - 51);
        assert_eq!(d.intervals().len(), 2);
        assert!(d.contains(parse_address("10.0.0.99").unwrap()));
        assert!(!d.contains(parse_address("10.0.0.100").unwrap()));
        assert!(d.contains(parse_address("10.0.0.151").unwrap()));
    }

    #[test]
    fn test_cidr_roundtrip() {
        for s in CORPUS {
            let r: RangeSet = set(s);
            let back: RangeSet = RangeSet::from_cidr_blocks(r.to_cidr_blocks());
            assert_eq!(back, r, "Failed: '{s}'");
            let back: RangeSet = r.to_cidr_blocks().into_iter().collect();
            assert_eq!(back, r, "Failed: '{s}'");
        }
    }

    #[test]
    fn test_cidr_blocks_ordered() {
        let r: RangeSet = set("10.0.0.1-10.0.0.10 10.0.1.0/24");
        let blocks: Vec<String> = r.to_cidr_blocks().iter().map(|b| b.to_string()).collect();
        assert_eq!(
            blocks,
            vec![
                "10.0.0.1",
                "10.0.0.2/31",
                "10.0.0.4/30",
                "10.0.0.8/31",
                "10.0.0.10",
                "10.0.1.0/24",
            ]
        );
    }

    #[test]
    fn test_len_and_contains() {
        assert_eq!(set("0.0.0.0/0").len(), 1u64 << 32);
        assert_eq!(RangeSet::new().len(), 0);
        let r: RangeSet = set("10.0.0.0/30 10.0.0.8");
        assert_eq!(r.len(), 5);
        assert!(r.contains(parse_address("10.0.0.3").unwrap()));
        assert!(!r.contains(parse_address("10.0.0.4").unwrap()));
        assert!(r.contains(parse_address("10.0.0.8").unwrap()));
        assert!(!r.contains(parse_address("10.0.0.9").unwrap()));
        assert!(!RangeSet::new().contains(0));
    }

    #[test]
    fn test_operators_and_clear() {
        let mut r: RangeSet = set("10.0.0.0/25");
        r |= &set("10.0.0.128/25");
        assert_eq!(r, set("10.0.0.0/24"));
        assert_eq!(&r | &set("10.0.1.0/24"), set("10.0.0.0/23"));
        r -= &set("10.0.0.0/25");
        assert_eq!(r, set("10.0.0.128/25"));
        r.clear();
        assert!(r.is_empty());
    }

    #[test]
    fn test_serialize_intervals() {
        let r: RangeSet = set("0.0.0.9 0.0.0.1-0.0.0.3");
        let json: String = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"[{"start":1,"end":3},{"start":9,"end":9}]"#);
        assert_eq!(serde_json::to_string(&RangeSet::new()).unwrap(), "[]");
    }
}
