//! Rollback guard for attribute edits
//!
//! An import that fails halfway must not leave a scene object with half
//! its attributes rewritten. The transaction snapshots the bag up front
//! and restores it on drop unless the caller commits.

use super::{AttributeMap, SceneObject};

/// Guard over one object's attribute bag. Dropping without
/// [`commit`](Self::commit) restores the snapshot taken at construction.
#[derive(Debug)]
pub struct AttributeTransaction<'a> {
    object: &'a mut SceneObject,
    snapshot: AttributeMap,
    committed: bool,
}

impl<'a> AttributeTransaction<'a> {
    pub fn begin(object: &'a mut SceneObject) -> Self {
        let snapshot = object.attributes.clone();
        Self {
            object,
            snapshot,
            committed: false,
        }
    }

    /// The attribute bag under edit.
    pub fn attributes(&mut self) -> &mut AttributeMap {
        &mut self.object.attributes
    }

    /// Keep the edits made since [`begin`](Self::begin).
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for AttributeTransaction<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.object.attributes = std::mem::take(&mut self.snapshot);
        }
    }
}
