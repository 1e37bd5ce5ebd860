//! Memoizing user-id to display-name lookup.

use std::collections::HashMap;
use tracing::debug;

use crate::api::ChatApi;
use crate::error::ExportResult;

/// Resolves reactor ids to full names, asking the server at most once per id.
///
/// Names are assumed stable for the duration of a run; the cache is never
/// invalidated. Failed lookups are not cached.
pub struct IdentityResolver<'a, A: ChatApi + ?Sized> {
    api: &'a A,
    names: HashMap<u64, String>,
}

impl<'a, A: ChatApi + ?Sized> IdentityResolver<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            names: HashMap::new(),
        }
    }

    /// Full name of `user_id`, fetching it on first use.
    pub fn resolve(&mut self, user_id: u64) -> ExportResult<&str> {
        if !self.names.contains_key(&user_id) {
            let name = self.api.fetch_user(user_id)?;
            debug!(user_id, name = %name, "resolved user");
            self.names.insert(user_id, name);
        }
        Ok(self.names[&user_id].as_str())
    }

    /// Number of distinct users looked up so far.
    pub fn resolved_count(&self) -> usize {
        self.names.len()
    }
}
