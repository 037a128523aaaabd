//! Driving input: the typed per-frame input set and the merger that
//! resolves it from keyboard and touch sources.
//!
//! Precedence: when a direction and its opposite are both held (on any
//! combination of sources) the most recently pressed one wins. A touch
//! press additionally releases the opposite touch button, matching the
//! on-screen pad's behaviour.

use serde::{Deserialize, Serialize};

use crate::enums::{DriveKey, InputSource};

/// Resolved driving input for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl DriveInput {
    pub const NONE: DriveInput = DriveInput {
        forward: false,
        backward: false,
        left: false,
        right: false,
    };

    pub fn is_idle(&self) -> bool {
        *self == Self::NONE
    }

    pub fn is_held(&self, key: DriveKey) -> bool {
        match key {
            DriveKey::Forward => self.forward,
            DriveKey::Backward => self.backward,
            DriveKey::Left => self.left,
            DriveKey::Right => self.right,
        }
    }
}

/// Tracks held keys per source with a press stamp for precedence.
#[derive(Debug, Clone, Default)]
pub struct InputMerger {
    /// `held[source][key]` = stamp of the press that is still held.
    held: [[Option<u64>; 4]; 2],
    next_stamp: u64,
}

fn source_index(source: InputSource) -> usize {
    match source {
        InputSource::Keyboard => 0,
        InputSource::Touch => 1,
    }
}

fn key_index(key: DriveKey) -> usize {
    match key {
        DriveKey::Forward => 0,
        DriveKey::Backward => 1,
        DriveKey::Left => 2,
        DriveKey::Right => 3,
    }
}

impl InputMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Auto-repeat of an already held key keeps its
    /// original stamp.
    pub fn press(&mut self, source: InputSource, key: DriveKey) {
        let s = source_index(source);
        if source == InputSource::Touch {
            self.held[s][key_index(key.opposite())] = None;
        }
        let slot = &mut self.held[s][key_index(key)];
        if slot.is_none() {
            *slot = Some(self.next_stamp);
            self.next_stamp += 1;
        }
    }

    pub fn release(&mut self, source: InputSource, key: DriveKey) {
        self.held[source_index(source)][key_index(key)] = None;
    }

    /// Drop every held key (focus loss, race restart).
    pub fn clear(&mut self) {
        self.held = [[None; 4]; 2];
    }

    /// Latest press stamp of `key` across all sources.
    fn latest(&self, key: DriveKey) -> Option<u64> {
        let k = key_index(key);
        self.held.iter().filter_map(|per_source| per_source[k]).max()
    }

    /// Resolve the merged input for this frame.
    pub fn resolve(&self) -> DriveInput {
        let (forward, backward) =
            resolve_axis(self.latest(DriveKey::Forward), self.latest(DriveKey::Backward));
        let (left, right) =
            resolve_axis(self.latest(DriveKey::Left), self.latest(DriveKey::Right));
        DriveInput {
            forward,
            backward,
            left,
            right,
        }
    }
}

fn resolve_axis(a: Option<u64>, b: Option<u64>) -> (bool, bool) {
    match (a, b) {
        (Some(a), Some(b)) => (a > b, b > a),
        (a, b) => (a.is_some(), b.is_some()),
    }
}
