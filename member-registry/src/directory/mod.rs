//! Directory render boundary
//!
//! The registry never draws anything. After every change it hands a
//! [`DirectoryView`] to the host's [`DirectoryRenderer`].

use shared::Member;

use crate::query::MemberQuery;

/// One render pass worth of data
#[derive(Debug, Clone)]
pub struct DirectoryView<'a> {
    /// Records matching the query, in insertion order
    pub members: Vec<&'a Member>,
    /// Size of the whole roster
    pub total: usize,
    /// Options for the state filter
    pub states: &'a [String],
    pub query: &'a MemberQuery,
}

impl DirectoryView<'_> {
    pub fn visible_count(&self) -> usize {
        self.members.len()
    }

    /// Nothing to show: either an empty roster or no matches
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

pub trait DirectoryRenderer {
    fn render(&self, view: &DirectoryView<'_>);
}

impl<F> DirectoryRenderer for F
where
    F: Fn(&DirectoryView<'_>),
{
    fn render(&self, view: &DirectoryView<'_>) {
        self(view)
    }
}
