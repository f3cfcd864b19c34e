use chrono::{Datelike, NaiveDate};

use std::collections::{HashMap, HashSet};

use crate::common::StoreError;
use crate::db::{self, DocumentStore, Record};
use crate::models::{Member, MemberStatus, MemberType};

/// In-memory filter for the admin member list. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    pub search: String,
    pub member_type: Option<MemberType>,
    pub status: Option<MemberStatus>,
}

impl MemberFilter {
    /// Builds a filter from raw query values; "All", empty and unknown values
    /// do not restrict.
    pub fn from_params(search: Option<&str>, member_type: Option<&str>, status: Option<&str>) -> Self {
        Self {
            search: search.unwrap_or_default().trim().to_string(),
            member_type: member_type.and_then(|t| t.parse().ok()),
            status: status.and_then(|s| s.parse().ok()),
        }
    }

    pub fn matches(&self, member: &Member) -> bool {
        if self.member_type.is_some_and(|t| t != member.member_type) {
            return false;
        }
        if self.status.is_some_and(|s| s != member.status) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();
        member.full_name().to_lowercase().contains(&needle)
            || member.email.to_lowercase().contains(&needle)
    }
}

/// Whole years between the birth year and `today`'s year. Month and day are
/// ignored, so the result can be one year high before the birthday.
pub fn derive_age(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - date_of_birth.year()
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Lowercased emails used by more than one member.
pub fn duplicate_emails(members: &[Record<Member>]) -> HashSet<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for member in members {
        let key = email_key(&member.email);
        if !key.is_empty() {
            *counts.entry(key).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(email, _)| email)
        .collect()
}

pub fn is_duplicate(duplicates: &HashSet<String>, member: &Member) -> bool {
    duplicates.contains(&email_key(&member.email))
}

/// Number of stored members whose email matches `email`, ignoring case and
/// surrounding whitespace.
pub async fn count_email_uses(store: &dyn DocumentStore, email: &str) -> Result<usize, StoreError> {
    let key = email_key(email);
    if key.is_empty() {
        return Ok(0);
    }

    let members = db::list_members(store).await?;
    Ok(members.iter().filter(|m| email_key(&m.email) == key).count())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(first: &str, last: &str, email: &str) -> Member {
        Member {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            ..Member::default()
        }
    }

    #[test]
    fn search_matches_full_name_or_email_case_insensitively() {
        let juan = member("Juan", "Dela Cruz", "juan@example.com");
        let filter = MemberFilter::from_params(Some("JUAN DELA"), None, None);
        assert!(filter.matches(&juan));

        let filter = MemberFilter::from_params(Some("Example.COM"), None, None);
        assert!(filter.matches(&juan));

        let filter = MemberFilter::from_params(Some("maria"), None, None);
        assert!(!filter.matches(&juan));
    }

    #[test]
    fn all_and_unknown_values_do_not_restrict() {
        let filter = MemberFilter::from_params(None, Some("All"), Some("bogus"));
        assert_eq!(filter, MemberFilter::default());
    }

    #[test]
    fn type_and_status_restrict() {
        let mut m = member("Ana", "Reyes", "ana@example.com");
        m.member_type = MemberType::Associate;
        m.status = MemberStatus::Inactive;

        assert!(MemberFilter::from_params(None, Some("Associate"), Some("Inactive")).matches(&m));
        assert!(!MemberFilter::from_params(None, Some("Regular"), None).matches(&m));
        assert!(!MemberFilter::from_params(None, None, Some("Active")).matches(&m));
    }

    #[test]
    fn age_ignores_month_and_day() {
        let dob = NaiveDate::from_ymd_opt(1990, 12, 31).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(derive_age(dob, today), 35);
    }
}
