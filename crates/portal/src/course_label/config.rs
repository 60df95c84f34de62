/// Loading of the refund/reschedule policy table
use super::error::PolicyConfigError;
use super::types::PolicyTable;
use std::fs;
use std::path::Path;

impl PolicyTable {
    /// Loads the policy table from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to a JSON file with `refundPolicy` and `reschedulePolicy` maps
    ///
    /// # Returns
    /// * `Ok(PolicyTable)` - The loaded table
    /// * `Err` - If the file can't be read or isn't a policy table
    pub fn load_from_file(path: &Path) -> Result<Self, PolicyConfigError> {
        let content = fs::read_to_string(path).map_err(|source| PolicyConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&content).map_err(|source| PolicyConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses a policy table from its JSON representation
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Returns true if neither policy has any entries
    pub fn is_empty(&self) -> bool {
        self.refund_policy.is_empty() && self.reschedule_policy.is_empty()
    }
}
