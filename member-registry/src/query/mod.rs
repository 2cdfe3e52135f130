//! Directory query engine
//!
//! Pure functions over the roster. Results borrow from the collection and keep
//! insertion order.

use shared::Member;
use std::collections::BTreeSet;

/// Search text plus state filter, as typed into the directory controls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberQuery {
    pub search: String,
    pub state: String,
}

impl MemberQuery {
    pub fn new(search: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            state: state.into(),
        }
    }

    /// True when the query matches every record
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.state.is_empty()
    }

    pub fn matches(&self, member: &Member) -> bool {
        let needle = self.search.to_lowercase();
        self.matches_lowered(member, &needle)
    }

    fn matches_lowered(&self, member: &Member, needle: &str) -> bool {
        let matches_search = needle.is_empty()
            || member.full_name.to_lowercase().contains(needle)
            || member.school.to_lowercase().contains(needle)
            || member.state.to_lowercase().contains(needle);
        let matches_state = self.state.is_empty() || member.state == self.state;
        matches_search && matches_state
    }

    /// Stable filter over any sequence of borrowed members
    pub fn apply<'a, I>(&self, members: I) -> Vec<&'a Member>
    where
        I: IntoIterator<Item = &'a Member>,
    {
        let needle = self.search.to_lowercase();
        members
            .into_iter()
            .filter(|m| self.matches_lowered(m, &needle))
            .collect()
    }
}

/// Members whose name, school or state contains `search` (case-insensitive)
/// and whose state equals `state_filter` when one is given.
pub fn filter<'a>(members: &'a [Member], search: &str, state_filter: &str) -> Vec<&'a Member> {
    MemberQuery::new(search, state_filter).apply(members)
}

/// Deduplicated states, sorted lexicographically
pub fn distinct_states(members: &[Member]) -> Vec<String> {
    members
        .iter()
        .map(|m| m.state.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{AttachmentFlags, MemberCreate, TeachingLevel};

    fn member(id: u64, name: &str, state: &str, school: &str) -> Member {
        MemberCreate {
            full_name: name.into(),
            email: format!("m{id}@example.com"),
            phone: "0800".into(),
            teaching_level: TeachingLevel::Primary,
            state: state.into(),
            lga: "Central".into(),
            school: school.into(),
            years_experience: 1,
            qualification: "NCE".into(),
            trcn: None,
            id_type: "nin".into(),
            id_number: id.to_string(),
            photo_consent: false,
        }
        .into_member(id, AttachmentFlags::none(), shared::util::now_utc())
    }

    fn roster() -> Vec<Member> {
        vec![
            member(1, "Ada Obi", "lagos", "Gra Primary"),
            member(2, "Bola Ade", "rivers", "Gra Secondary"),
            member(3, "Chidi Eze", "kano", "Fagge Model"),
            member(4, "Dayo Grant", "lagos", "Ikeja High"),
        ]
    }

    fn ids(members: &[&Member]) -> Vec<u64> {
        members.iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let members = roster();
        assert_eq!(ids(&filter(&members, "", "")), vec![1, 2, 3, 4]);
        assert!(MemberQuery::default().is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_school_state() {
        let members = roster();
        // "gra" hits two schools and one surname
        assert_eq!(ids(&filter(&members, "GRA", "")), vec![1, 2, 4]);
        assert_eq!(ids(&filter(&members, "kan", "")), vec![3]);
        assert_eq!(ids(&filter(&members, "obi", "")), vec![1]);
        assert!(filter(&members, "zzz", "").is_empty());
    }

    #[test]
    fn test_state_filter_is_exact() {
        let members = roster();
        assert_eq!(ids(&filter(&members, "", "lagos")), vec![1, 4]);
        assert!(filter(&members, "", "Lagos").is_empty());
        assert_eq!(ids(&filter(&members, "gra", "rivers")), vec![2]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let members = roster();
        let query = MemberQuery::new("gra", "lagos");
        let once = query.apply(&members);
        let twice = query.apply(once.iter().copied());
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_distinct_states_sorted_and_deduplicated() {
        let members = vec![
            member(1, "A", "lagos", "S"),
            member(2, "B", "kano", "S"),
            member(3, "C", "lagos", "S"),
        ];
        assert_eq!(distinct_states(&members), vec!["kano", "lagos"]);
        assert!(distinct_states(&[]).is_empty());
    }
}
