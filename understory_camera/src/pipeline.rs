// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plugin pipeline: one slot per plugin kind plus a priority table.
//!
//! ## Dispatch rules
//!
//! - Enabled plugins see every hook in priority order; paused plugins see
//!   nothing and keep their state.
//! - An input hook returning [`Outcome::Stop`] ends propagation of that event.
//! - After every input dispatch the corrective `after_input` pass runs on all
//!   enabled plugins regardless of `Stop`.
//! - Signals queued by a hook are delivered to the other enabled plugins
//!   before the next hook runs. Removal requests are deferred until the
//!   dispatch has finished.
//!
//! ## Minimal example
//!
//! ```
//! use understory_camera::{Pipeline, PluginKind};
//! use understory_camera::plugins::{Decelerate, DecelerateOptions};
//!
//! let mut plugins = Pipeline::new();
//! plugins.add(Decelerate::new(DecelerateOptions::default()));
//! assert!(plugins.contains("decelerate"));
//!
//! // Unknown names are ignored.
//! assert!(!plugins.pause("warp-drive"));
//!
//! assert!(plugins.pause(PluginKind::Decelerate));
//! assert!(plugins.is_paused("decelerate"));
//! ```

use tracing::{debug, trace};

use crate::plugin::{Activity, Context, Hooks, Outcome, Plugin, PluginKey, PluginKind, Signal};
use crate::plugins::ClampZoomOptions;

/// Upper bound on signal rounds per hook; plugins answering signals with
/// signals must settle within it.
const MAX_SIGNAL_ROUNDS: usize = 4;

#[derive(Debug)]
struct Entry {
    plugin: Plugin,
    paused: bool,
}

/// The registered plugins and their priority order.
#[derive(Debug)]
pub struct Pipeline {
    slots: [Option<Entry>; PluginKind::COUNT],
    order: [PluginKind; PluginKind::COUNT],
    pending_removal: Vec<PluginKind>,
    removed: Vec<PluginKind>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
            order: PluginKind::DEFAULT_ORDER,
            pending_removal: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl Pipeline {
    /// Creates an empty pipeline with the default priority order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin at its kind's slot.
    ///
    /// An existing plugin of the same kind is dropped together with its
    /// in‑flight state and returned.
    pub fn add(&mut self, plugin: impl Into<Plugin>) -> Option<Plugin> {
        let plugin = plugin.into();
        let kind = plugin.kind();
        let previous = self.slots[kind.slot()].replace(Entry {
            plugin,
            paused: false,
        });
        self.pending_removal.retain(|&k| k != kind);
        if previous.is_some() {
            debug!(plugin = %kind, "replaced plugin");
        } else {
            debug!(plugin = %kind, "added plugin");
        }
        previous.map(|e| e.plugin)
    }

    /// Looks up a plugin.
    #[must_use]
    pub fn get(&self, key: impl PluginKey) -> Option<&Plugin> {
        let kind = key.kind()?;
        self.slots[kind.slot()].as_ref().map(|e| &e.plugin)
    }

    /// Looks up a plugin for modification.
    pub fn get_mut(&mut self, key: impl PluginKey) -> Option<&mut Plugin> {
        let kind = key.kind()?;
        self.slots[kind.slot()].as_mut().map(|e| &mut e.plugin)
    }

    /// Returns `true` if a plugin of this kind is registered.
    #[must_use]
    pub fn contains(&self, key: impl PluginKey) -> bool {
        self.get(key).is_some()
    }

    /// Unregisters a plugin and returns it.
    pub fn remove(&mut self, key: impl PluginKey) -> Option<Plugin> {
        let kind = key.kind()?;
        let entry = self.slots[kind.slot()].take()?;
        debug!(plugin = %kind, "removed plugin");
        self.removed.push(kind);
        Some(entry.plugin)
    }

    /// Pauses a plugin. Returns `false` if it is not registered.
    pub fn pause(&mut self, key: impl PluginKey) -> bool {
        let Some(entry) = self.entry_mut(key) else {
            return false;
        };
        if !entry.paused {
            entry.paused = true;
            debug!(plugin = %entry.plugin.kind(), "paused plugin");
        }
        true
    }

    /// Resumes a paused plugin. Returns `false` if it is not registered.
    pub fn resume(&mut self, key: impl PluginKey) -> bool {
        let Some(entry) = self.entry_mut(key) else {
            return false;
        };
        if entry.paused {
            entry.paused = false;
            entry.plugin.hooks_mut().resumed();
            debug!(plugin = %entry.plugin.kind(), "resumed plugin");
        }
        true
    }

    /// Returns `true` if the plugin is registered and paused.
    #[must_use]
    pub fn is_paused(&self, key: impl PluginKey) -> bool {
        key.kind()
            .and_then(|kind| self.slots[kind.slot()].as_ref())
            .is_some_and(|e| e.paused)
    }

    /// Moves `kind` to position `index` of the priority order. Indices past
    /// the end move it last.
    pub fn set_priority(&mut self, kind: PluginKind, index: usize) {
        let mut order: Vec<PluginKind> =
            self.order.iter().copied().filter(|&k| k != kind).collect();
        order.insert(index.min(order.len()), kind);
        self.order.copy_from_slice(&order);
        debug!(plugin = %kind, index, "reordered plugin");
    }

    /// The priority order over all kinds, registered or not.
    #[must_use]
    pub fn order(&self) -> &[PluginKind] {
        &self.order
    }

    /// Registered plugins in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Plugin> {
        self.order
            .iter()
            .filter_map(|kind| self.slots[kind.slot()].as_ref().map(|e| &e.plugin))
    }

    fn entry_mut(&mut self, key: impl PluginKey) -> Option<&mut Entry> {
        let kind = key.kind()?;
        self.slots[kind.slot()].as_mut()
    }

    fn enabled(&self, kind: PluginKind) -> Option<&Plugin> {
        self.slots[kind.slot()]
            .as_ref()
            .filter(|e| !e.paused)
            .map(|e| &e.plugin)
    }

    fn enabled_mut(&mut self, kind: PluginKind) -> Option<&mut Plugin> {
        self.slots[kind.slot()]
            .as_mut()
            .filter(|e| !e.paused)
            .map(|e| &mut e.plugin)
    }

    /// What the enabled plugins are currently doing.
    pub(crate) fn activity(&self) -> Activity {
        let mut activity = Activity::default();
        for kind in self.order {
            if let Some(plugin) = self.enabled(kind) {
                plugin.hooks().report(&mut activity);
            }
        }
        activity
    }

    /// Options of the enabled zoom limits.
    pub(crate) fn zoom_limits(&self) -> Option<ClampZoomOptions> {
        match self.enabled(PluginKind::ClampZoom) {
            Some(Plugin::ClampZoom(c)) => Some(*c.options()),
            _ => None,
        }
    }

    /// Runs an input hook over the enabled plugins, honoring [`Outcome::Stop`],
    /// then the corrective pass. Returns `true` if any plugin used the event.
    pub(crate) fn dispatch(
        &mut self,
        cx: &mut Context<'_>,
        mut hook: impl FnMut(&mut dyn Hooks, &mut Context<'_>) -> Outcome,
    ) -> bool {
        cx.zoom_limits = self.zoom_limits();
        let mut used = false;
        for kind in self.order {
            cx.activity = self.activity();
            let Some(plugin) = self.enabled_mut(kind) else {
                continue;
            };
            let outcome = hook(plugin.hooks_mut(), cx);
            self.route_signals(cx);
            match outcome {
                Outcome::Continue => {}
                Outcome::Handled => used = true,
                Outcome::Stop => {
                    trace!(plugin = %kind, "stopped propagation");
                    used = true;
                    break;
                }
            }
        }
        self.each(cx, |h, cx| h.after_input(cx));
        used
    }

    /// Runs a non‑input hook on every enabled plugin, in order.
    pub(crate) fn each(
        &mut self,
        cx: &mut Context<'_>,
        mut hook: impl FnMut(&mut dyn Hooks, &mut Context<'_>),
    ) {
        cx.zoom_limits = self.zoom_limits();
        for kind in self.order {
            cx.activity = self.activity();
            let Some(plugin) = self.enabled_mut(kind) else {
                continue;
            };
            hook(plugin.hooks_mut(), cx);
            self.route_signals(cx);
        }
        self.finish();
    }

    fn route_signals(&mut self, cx: &mut Context<'_>) {
        for _ in 0..MAX_SIGNAL_ROUNDS {
            if cx.signals.is_empty() {
                return;
            }
            let signals = core::mem::take(&mut cx.signals);
            for signal in signals {
                if let Signal::Remove(kind) = signal {
                    if !self.pending_removal.contains(&kind) {
                        self.pending_removal.push(kind);
                    }
                    continue;
                }
                trace!(?signal, "routing signal");
                for kind in self.order {
                    cx.activity = self.activity();
                    if let Some(plugin) = self.enabled_mut(kind) {
                        plugin.hooks_mut().signal(cx, signal);
                    }
                }
            }
        }
        cx.signals.clear();
    }

    /// Applies deferred removals.
    fn finish(&mut self) {
        for kind in core::mem::take(&mut self.pending_removal) {
            self.remove(kind);
        }
    }

    /// Kinds removed since the last call.
    pub(crate) fn take_removed(&mut self) -> Vec<PluginKind> {
        core::mem::take(&mut self.removed)
    }
}
