//! Entry selection: newest listing entry whose name matches a filter.

use crate::error::{PipelineError, PipelineResult};
use crate::types::RemoteEntry;

/// Name constraints applied to a listing before picking the newest entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameCriteria {
    /// If set, only an entry with exactly this name is eligible.
    pub exact: Option<String>,
    /// Case-sensitive substring the name must contain. Empty matches everything.
    pub contains: String,
}

impl NameCriteria {
    /// Criteria that only filter by substring.
    pub fn contains(filter: impl Into<String>) -> Self {
        Self {
            exact: None,
            contains: filter.into(),
        }
    }

    /// Returns `true` if `name` satisfies the criteria.
    pub fn matches(&self, name: &str) -> bool {
        if let Some(exact) = self.exact.as_deref() {
            if name != exact {
                return false;
            }
        }
        name.contains(self.contains.as_str())
    }

    fn describe(&self) -> String {
        match self.exact.as_deref() {
            Some(exact) => format!("{exact} (contains '{}')", self.contains),
            None => self.contains.clone(),
        }
    }
}

/// Select the most recently modified entry whose name contains `filter`.
///
/// Entries sharing the newest timestamp resolve to whichever came first in `entries`.
pub fn select_entry<'a>(entries: &'a [RemoteEntry], filter: &str) -> PipelineResult<&'a RemoteEntry> {
    select_entry_matching(entries, &NameCriteria::contains(filter))
}

/// Like [`select_entry`], with an optional exact-name constraint.
pub fn select_entry_matching<'a>(
    entries: &'a [RemoteEntry],
    criteria: &NameCriteria,
) -> PipelineResult<&'a RemoteEntry> {
    let mut matching: Vec<&RemoteEntry> = entries.iter().filter(|e| criteria.matches(&e.name)).collect();

    // `sort_by` is stable: equal timestamps keep listing order.
    matching.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));

    matching.first().copied().ok_or_else(|| PipelineError::NoMatch {
        filter: criteria.describe(),
    })
}
