use crate::course_label::PolicyStore;

/// State shared by every request handler.
pub struct PortalState {
    /// Refund/reschedule policy table, reloaded from disk on expiry
    pub policy_store: PolicyStore,
}

impl PortalState {
    pub fn new(policy_store: PolicyStore) -> Self {
        Self { policy_store }
    }
}
