use std::collections::HashMap;

use crate::snapshot::ShaderStageState;

/// Lookup from a raw bind slot to the read-only declaration bound there.
///
/// Built once per stage at the start of a resolution pass. If malformed
/// reflection maps several declarations to one slot, the first declaration
/// keeps the slot and the others are recorded in `conflicts`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindSlotMap {
    slots: HashMap<usize, usize>,
    conflicts: Vec<SlotConflict>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotConflict {
    pub slot: usize,
    pub kept: usize,
    pub ignored: usize,
}

impl BindSlotMap {
    pub fn for_read_only(state: &ShaderStageState) -> Self {
        let mut map = Self::default();
        let declared = state.reflection.read_only.len();
        for (declaration, bindpoint) in state.mapping.read_only.iter().enumerate().take(declared) {
            let Some(slot) = bindpoint.slot() else {
                continue;
            };
            match map.slots.get(&slot) {
                Some(&kept) => map.conflicts.push(SlotConflict {
                    slot,
                    kept,
                    ignored: declaration,
                }),
                None => {
                    map.slots.insert(slot, declaration);
                }
            }
        }

        for conflict in &map.conflicts {
            tracing::warn!(
                slot = conflict.slot,
                kept = %state.reflection.read_only[conflict.kept].name,
                ignored = %state.reflection.read_only[conflict.ignored].name,
                "multiple read-only declarations bound to one slot; keeping the first"
            );
        }

        map
    }

    /// Declaration index bound to `slot`.
    pub fn declaration(&self, slot: usize) -> Option<usize> {
        self.slots.get(&slot).copied()
    }

    pub fn conflicts(&self) -> &[SlotConflict] {
        &self.conflicts
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
