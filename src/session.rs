// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::iptools::{
    parse_ip_list, render, DisplayMode, ParseFailure, RangeSet, RenderOptions, Separator,
};
use parking_lot::RwLock;
use tracing::debug;

/**
The working IP list and its display settings.

Starts out empty. `add` and `remove` parse the working text first and only
touch the list if every token in it is valid. Each mutation returns the
list re-rendered with the current [RenderOptions].
*/
#[derive(Clone, Debug, Default)]
pub struct Session {
    state: RangeSet,
    options: RenderOptions,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            state: RangeSet::new(),
            options,
        }
    }

    /// Merge every address named in `raw` into the list.
    pub fn add(&mut self, raw: impl AsRef<str>) -> Result<String, ParseFailure> {
        let parsed: RangeSet = parse_ip_list(raw)?;
        let before: usize = self.state.intervals().len();
        self.state = self.state.union(&parsed);
        debug!(before, after = self.state.intervals().len(), "added to list");
        Ok(self.render())
    }

    /// Drop every address named in `raw` from the list.
    pub fn remove(&mut self, raw: impl AsRef<str>) -> Result<String, ParseFailure> {
        let parsed: RangeSet = parse_ip_list(raw)?;
        let before: usize = self.state.intervals().len();
        self.state = self.state.difference(&parsed);
        debug!(before, after = self.state.intervals().len(), "removed from list");
        Ok(self.render())
    }

    /// Empty the list.
    pub fn clear(&mut self) -> String {
        self.state.clear();
        debug!("list cleared");
        self.render()
    }

    /// Render with the current options.
    pub fn render(&self) -> String {
        self.options.render(&self.state)
    }

    /// Render with explicit options, leaving the current ones untouched.
    pub fn render_as(&self, mode: DisplayMode, separator: Separator) -> String {
        render(&self.state, mode, separator)
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Switch display settings and re-render.
    pub fn set_options(&mut self, options: RenderOptions) -> String {
        self.options = options;
        self.render()
    }

    pub fn state(&self) -> &RangeSet {
        &self.state
    }
}

/* -------------------------------------------------------------------------- */

/// A [Session] which may be shared between threads. Mutations are serialized.
#[derive(Debug, Default)]
pub struct SharedSession {
    inner: RwLock<Session>,
}

impl SharedSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            inner: RwLock::new(Session::with_options(options)),
        }
    }

    pub fn add(&self, raw: impl AsRef<str>) -> Result<String, ParseFailure> {
        self.inner.write().add(raw)
    }

    pub fn remove(&self, raw: impl AsRef<str>) -> Result<String, ParseFailure> {
        self.inner.write().remove(raw)
    }

    pub fn clear(&self) -> String {
        self.inner.write().clear()
    }

    pub fn render(&self) -> String {
        self.inner.read().render()
    }

    pub fn render_as(&self, mode: DisplayMode, separator: Separator) -> String {
        self.inner.read().render_as(mode, separator)
    }

    pub fn set_options(&self, options: RenderOptions) -> String {
        self.inner.write().set_options(options)
    }

    /// Copy of the current list.
    pub fn snapshot(&self) -> RangeSet {
        self.inner.read().state().clone()
    }

    pub fn into_inner(self) -> Session {
        self.inner.into_inner()
    }
}

impl From<Session> for SharedSession {
    fn from(session: Session) -> Self {
        Self {
            inner: RwLock::new(session),
        }
    }
}

/* -------------------------------------------------------------------------- */
