//! Search box filtering for the nominee list.

use super::payloads::NomineeItem;

/// Criteria shorter than this keep the whole list.
pub const MIN_CRITERIA_LEN: usize = 3;

impl NomineeItem {
    /// Case-insensitive match on name, position, manager or department.
    pub fn matches(&self, criteria: &str) -> bool {
        if criteria.chars().count() < MIN_CRITERIA_LEN {
            return true;
        }
        let needle = criteria.to_lowercase();
        [
            &self.display_name,
            &self.position,
            &self.manager_display_name,
            &self.department,
        ]
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Nominees matching `criteria`, in their original order.
pub fn filter_nominees<'a>(nominees: &'a [NomineeItem], criteria: &str) -> Vec<&'a NomineeItem> {
    nominees
        .iter()
        .filter(|nominee| nominee.matches(criteria))
        .collect()
}
