use crate::domain::{Distance, Qualifier};

/// Working-tree state of the branch a version was computed on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchState {
    /// Distance from the last tag, if HEAD is not exactly on it
    pub distance: Option<Distance>,
    /// Uncommitted changes in the working tree
    pub dirty: bool,
}

impl BranchState {
    pub fn new(distance: Option<Distance>, dirty: bool) -> Self {
        BranchState { distance, dirty }
    }

    /// HEAD sits exactly on a tag with a clean working tree
    pub fn clean() -> Self {
        BranchState::default()
    }

    pub fn is_on_tag(&self) -> bool {
        self.distance.is_none()
    }

    /// The qualifier fitting this branch at the tagged commit itself
    pub fn qualifier(&self) -> Option<Qualifier> {
        Qualifier::from_parts(self.distance.clone(), self.dirty)
    }

    /// The snapshot qualifier for a version that no longer matches any tag.
    ///
    /// Dirtiness and distance already present in `existing` are carried over.
    pub fn snapshot_qualifier(&self, existing: Option<&Qualifier>) -> Qualifier {
        let distance = self
            .distance
            .clone()
            .or_else(|| existing.and_then(|q| q.distance().cloned()));
        let dirty = self.dirty || existing.is_some_and(|q| q.is_dirty_tree());

        if dirty {
            Qualifier::DirtySnapshot(distance)
        } else {
            Qualifier::Snapshot(distance)
        }
    }
}
