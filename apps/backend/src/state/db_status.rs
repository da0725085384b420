use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

/// Store connectivity as seen by the request handlers.
///
/// Starts offline; the bootstrap task flips it online once the schema is in
/// place and the connectivity watcher keeps it current afterwards.
#[derive(Debug, Default)]
pub struct DbStatus {
    online: AtomicBool,
}

impl DbStatus {
    pub fn offline() -> Self {
        Self {
            online: AtomicBool::new(false),
        }
    }

    pub fn online() -> Self {
        Self {
            online: AtomicBool::new(true),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    /// Returns true when this call changed the state.
    pub fn mark_online(&self) -> bool {
        let changed = !self.online.swap(true, Ordering::AcqRel);
        if changed {
            info!(db_status = "online", "database connectivity restored");
        }
        changed
    }

    /// Returns true when this call changed the state.
    pub fn mark_offline(&self) -> bool {
        let changed = self.online.swap(false, Ordering::AcqRel);
        if changed {
            warn!(db_status = "offline", "database connectivity lost, serving in offline mode");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_report_changes_once() {
        let status = DbStatus::offline();
        assert!(!status.is_online());

        assert!(status.mark_online());
        assert!(!status.mark_online());
        assert!(status.is_online());

        assert!(status.mark_offline());
        assert!(!status.mark_offline());
        assert!(!status.is_online());
    }

    #[test]
    fn default_is_offline() {
        assert!(!DbStatus::default().is_online());
        assert!(DbStatus::online().is_online());
    }
}
