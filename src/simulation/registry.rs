//! Driver-owned registry of charged bodies
//!
//! An explicit arena replaces scene-global instance sets: stable handles
//! index into slots, and an `active` flag models the body's
//! activation/deactivation lifecycle with set semantics. Membership only
//! changes at those boundaries, never during a tick, so force passes see a
//! fixed population in a fixed order

use crate::simulation::charge::{ChargeKind, ChargedBody};

/// Stable handle to a registry slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(usize);

impl BodyHandle {
    /// Slot index, usable for force-buffer addressing
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Slot {
    body: ChargedBody,
    active: bool,
}

/// Arena of charged bodies with set-semantics activation
#[derive(Debug, Default)]
pub struct Registry {
    slots: Vec<Slot>,
}

impl Registry {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Number of slots ever inserted, active or not
    /// Force buffers are sized by this
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Insert a body, active immediately
    pub fn insert(&mut self, body: ChargedBody) -> BodyHandle {
        let handle = BodyHandle(self.slots.len());
        self.slots.push(Slot { body, active: true });
        handle
    }

    /// Idempotent: activating an already-active body changes nothing
    pub fn activate(&mut self, handle: BodyHandle) {
        if let Some(slot) = self.slots.get_mut(handle.0) {
            slot.active = true;
        }
    }

    /// Idempotent: deactivating an inactive body changes nothing
    pub fn deactivate(&mut self, handle: BodyHandle) {
        if let Some(slot) = self.slots.get_mut(handle.0) {
            slot.active = false;
        }
    }

    pub fn is_active(&self, handle: BodyHandle) -> bool {
        self.slots.get(handle.0).map(|s| s.active).unwrap_or(false)
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&ChargedBody> {
        self.slots.get(handle.0).map(|s| &s.body)
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut ChargedBody> {
        self.slots.get_mut(handle.0).map(|s| &mut s.body)
    }

    /// Active bodies in slot order
    pub fn iter_active(&self) -> impl Iterator<Item = (BodyHandle, &ChargedBody)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, s)| (BodyHandle(i), &s.body))
    }

    /// Active bodies of one kind, in slot order
    pub fn iter_active_of_kind(
        &self,
        kind: ChargeKind,
    ) -> impl Iterator<Item = (BodyHandle, &ChargedBody)> + '_ {
        self.iter_active().filter(move |(_, b)| b.kind == kind)
    }

    /// Active interaction partners: every active body except `this`
    pub fn iter_active_excluding(
        &self,
        this: BodyHandle,
    ) -> impl Iterator<Item = (BodyHandle, &ChargedBody)> + '_ {
        self.iter_active().filter(move |(h, _)| *h != this)
    }

    /// Mutable sweep over active bodies, for the translational update
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut ChargedBody)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, s)| (BodyHandle(i), &mut s.body))
    }

    /// Count of active bodies participating in `kind` interactions
    pub fn count_of_kind(&self, kind: ChargeKind) -> usize {
        self.iter_active_of_kind(kind).count()
    }
}
