//! Per-tick regeneration scheduling.
//!
//! Watches the session tree's dirty flags and drives the injected
//! generation callbacks. Group-level regeneration supersedes and
//! clears its containers; repeat dirtying inside one throttle window
//! collapses to at most one regeneration per node, keyed by stable
//! node id so structural edits cannot confuse the bookkeeping.
//!
//! Everything here runs synchronously inside the host's scheduling
//! callback. Nothing is raised to the caller: a node that cannot be
//! resolved anymore is skipped this tick and reconsidered on the next.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use dz_doc::{group_paths, resolve_group, resolve_group_mut, NodeId, NodePath, Session};

/// Default minimum seconds between two regenerations of one node.
pub const MIN_REGEN_QUANTUM: f64 = 0.25;

/// Monotonic time source for throttle windows.
pub trait Clock {
    /// Seconds from an arbitrary fixed origin; must never decrease.
    fn now(&self) -> f64;
}

/// Wall clock counting from its creation instant.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct MonotonicClock(std::time::Instant);

#[cfg(feature = "std")]
impl MonotonicClock {
    pub fn new() -> Self {
        Self(std::time::Instant::now())
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.0.elapsed().as_secs_f64()
    }
}

/// Host-advanced clock for virtual-time drivers and tests. Interior
/// mutability lets the owner hand out shared references and still move
/// time forward.
#[derive(Debug, Default)]
pub struct ManualClock(core::cell::Cell<f64>);

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `seconds`; backwards or non-finite steps are ignored
    /// so the clock stays monotonic.
    pub fn advance(&self, seconds: f64) {
        if seconds.is_finite() && seconds > 0.0 {
            self.0.set(self.0.get() + seconds);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.0.get()
    }
}

/// Generation callbacks supplied by the surrounding system.
///
/// The coordinator decides when and at most how often these run; what
/// they do with the session is the caller's business. Callbacks may
/// edit the tree, which is why every action after a callback
/// re-resolves its path.
pub trait Generator {
    /// Regenerate every container of the group at `path`.
    fn generate_group(&mut self, session: &mut Session, path: &NodePath);

    /// Regenerate the single container at `index` of the group at
    /// `path`.
    fn generate_container(&mut self, session: &mut Session, path: &NodePath, index: usize);
}

/// Per-session regeneration scheduler.
#[derive(Debug)]
pub struct Coordinator<C: Clock> {
    clock: C,
    /// Minimum seconds between two regenerations of one node.
    quantum: f64,
    /// When the current throttle window opened.
    window_start: f64,
    /// Nodes already regenerated in the current window.
    regenerated: BTreeSet<NodeId>,
}

impl<C: Clock> Coordinator<C> {
    pub fn new(clock: C) -> Self {
        Self::with_quantum(clock, MIN_REGEN_QUANTUM)
    }

    /// Coordinator with a custom throttle quantum. Zero disables
    /// throttling entirely; negative or non-finite values are treated
    /// as zero.
    pub fn with_quantum(clock: C, quantum: f64) -> Self {
        let quantum = if quantum.is_finite() && quantum > 0.0 {
            quantum
        } else {
            0.0
        };
        let window_start = clock.now();
        Self {
            clock,
            quantum,
            window_start,
            regenerated: BTreeSet::new(),
        }
    }

    /// The time source, shared so virtual clocks can be advanced while
    /// the coordinator owns them.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run one scheduling pass over the session.
    ///
    /// Without an active selection this is a no-op; dirty flags keep
    /// accumulating until a selection appears.
    pub fn tick(&mut self, session: &mut Session, generator: &mut impl Generator) {
        if session.selection.is_none() {
            return;
        }

        let now = self.clock.now();
        if now - self.window_start > self.quantum {
            self.regenerated.clear();
            self.window_start = now;
        }

        // Snapshot (path, id) pairs up front. Callbacks may edit the
        // tree, so every action below re-resolves its path and checks
        // the id before touching anything.
        for (path, id) in group_paths(&session.root) {
            let Some(group) = resolve_group(&session.root, &path) else {
                continue;
            };
            if group.id != id {
                continue;
            }

            if group.needs_regen {
                if self.regenerated.contains(&id) {
                    continue;
                }
                generator.generate_group(session, &path);
                self.finish_group(session, &path, id);
                continue;
            }

            let pending: Vec<(usize, NodeId)> = group
                .containers
                .iter()
                .enumerate()
                .filter(|(_, c)| c.needs_regen && !self.regenerated.contains(&c.id))
                .map(|(index, c)| (index, c.id))
                .collect();

            for (index, container_id) in pending {
                // An earlier callback may have reshaped the group, so
                // only invoke while the snapshot coordinates still name
                // the same container and it is still dirty.
                let due = resolve_group(&session.root, &path)
                    .and_then(|g| g.containers.get(index))
                    .map_or(false, |c| c.id == container_id && c.needs_regen);
                if !due {
                    continue;
                }
                generator.generate_container(session, &path, index);
                self.finish_container(session, &path, index, container_id);
            }
        }
    }

    /// Clear-after-regenerate for a whole group: the group and every
    /// container under it count as covered for this window.
    fn finish_group(&mut self, session: &mut Session, path: &NodePath, id: NodeId) {
        let Some(group) = resolve_group_mut(&mut session.root, path) else {
            return;
        };
        if group.id != id {
            return;
        }
        group.needs_regen = false;
        self.regenerated.insert(id);
        for container in &mut group.containers {
            container.needs_regen = false;
            self.regenerated.insert(container.id);
        }
    }

    fn finish_container(&mut self, session: &mut Session, path: &NodePath, index: usize, id: NodeId) {
        let Some(group) = resolve_group_mut(&mut session.root, path) else {
            return;
        };
        let Some(container) = group.containers.get_mut(index) else {
            return;
        };
        if container.id != id {
            return;
        }
        container.needs_regen = false;
        self.regenerated.insert(id);
    }
}
