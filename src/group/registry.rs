//! Group Registry Module
//!
//! Name -> group lookup shared by everything that serves groups.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::group::{Group, Loader};

// == Group Registry ==
/// Owns every group created through it, keyed by name.
///
/// Create one registry per process and hand it to whoever needs lookups
/// (the HTTP layer takes it through `AppState`). Groups are never removed;
/// registering an existing name replaces the previous group. Registration
/// takes the write lock, lookups only the read lock.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: RwLock<HashMap<String, Arc<Group>>>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // == New Group ==
    /// Creates a group named `name` holding at most `capacity_bytes`
    /// (0 = unbounded) and registers it.
    pub fn new_group<L>(&self, name: impl Into<String>, capacity_bytes: usize, loader: L) -> Arc<Group>
    where
        L: Loader + 'static,
    {
        self.register(name.into(), capacity_bytes, Arc::new(loader))
    }

    /// Like [`new_group`](Self::new_group) for a loader that is already shared.
    pub fn new_group_shared(
        &self,
        name: impl Into<String>,
        capacity_bytes: usize,
        loader: Arc<dyn Loader>,
    ) -> Arc<Group> {
        self.register(name.into(), capacity_bytes, loader)
    }

    fn register(&self, name: String, capacity_bytes: usize, loader: Arc<dyn Loader>) -> Arc<Group> {
        let group = Arc::new(Group::new(name.clone(), capacity_bytes, loader));
        let mut groups = self.groups.write();
        if groups.insert(name.clone(), Arc::clone(&group)).is_some() {
            warn!(group = %name, "replaced existing group");
        }
        info!(group = %name, capacity_bytes, "group created");
        group
    }

    // == Get Group ==
    /// Returns the group registered under `name`, if any.
    pub fn get_group(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.read().get(name).cloned()
    }

    /// Registered group names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.groups.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.read().is_empty()
    }
}
