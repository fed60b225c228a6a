//! Authorization contract used by menu builders.

use crate::page::{GroupId, GUESTS_GROUP};

/// Role granted to every logged-in front end member.
pub const ROLE_MEMBER: &str = "ROLE_MEMBER";

/// Answers authorization questions about the current visitor.
pub trait PermissionChecker {
    /// Whether the visitor holds `role`.
    fn is_granted(&self, role: &str) -> bool;

    /// Whether the visitor may see content restricted to `groups`.
    fn is_granted_groups(&self, groups: &[GroupId]) -> bool;
}

/// The visitor of a front end request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Visitor {
    /// Not logged in.
    #[default]
    Guest,
    /// A logged-in member and the groups they belong to.
    Member {
        /// Member groups.
        groups: Vec<GroupId>,
    },
}

impl Visitor {
    /// Creates a member visitor.
    pub fn member(groups: impl Into<Vec<GroupId>>) -> Self {
        Self::Member {
            groups: groups.into(),
        }
    }

    /// Whether the visitor is logged in.
    pub fn is_member(&self) -> bool {
        matches!(self, Self::Member { .. })
    }
}

impl PermissionChecker for Visitor {
    fn is_granted(&self, role: &str) -> bool {
        role == ROLE_MEMBER && self.is_member()
    }

    fn is_granted_groups(&self, groups: &[GroupId]) -> bool {
        match self {
            Self::Guest => groups.contains(&GUESTS_GROUP),
            Self::Member { groups: own } => groups
                .iter()
                .any(|group| *group != GUESTS_GROUP && own.contains(group)),
        }
    }
}
