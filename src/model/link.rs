use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::issue::KeyRef;

/// Relationship vocabulary accepted in `linked_issues` entries.
///
/// Wire names are the camelCase serde renames (`blockedBy`, `splitTo`, ...),
/// which is also what the task schema enumerates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum LinkKind {
    Blocks,
    BlockedBy,
    Clones,
    ClonedBy,
    Duplicates,
    DuplicatedBy,
    Escalates,
    EscalatedBy,
    SplitTo,
    SplitFrom,
    Causes,
    CausedBy,
    RelatesTo,
}

/// Which side of the native link the *target* issue is sent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDirection {
    Inward,
    Outward,
}

/// A native Jira link type, spelled the way the update payload expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NativeLinkType {
    pub name: &'static str,
    pub inward: &'static str,
    pub outward: &'static str,
}

const BLOCKS: NativeLinkType = NativeLinkType {
    name: "Blocks",
    inward: "is blocked by",
    outward: "blocks",
};
const CLONERS: NativeLinkType = NativeLinkType {
    name: "Cloners",
    inward: "is cloned by",
    outward: "clones",
};
const DUPLICATE: NativeLinkType = NativeLinkType {
    name: "Duplicate",
    inward: "is duplicated by",
    outward: "duplicates",
};
const ESCALATED: NativeLinkType = NativeLinkType {
    name: "Escalated",
    inward: "Escalates",
    outward: "Escalated by",
};
const ISSUE_SPLIT: NativeLinkType = NativeLinkType {
    name: "Issue split",
    inward: "split from",
    outward: "split to",
};
const PROBLEM_INCIDENT: NativeLinkType = NativeLinkType {
    name: "Problem/Incident",
    inward: "is caused by",
    outward: "causes",
};
const RELATES: NativeLinkType = NativeLinkType {
    name: "Relates",
    inward: "relates to",
    outward: "relates to",
};

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Blocks => "blocks",
            LinkKind::BlockedBy => "blockedBy",
            LinkKind::Clones => "clones",
            LinkKind::ClonedBy => "clonedBy",
            LinkKind::Duplicates => "duplicates",
            LinkKind::DuplicatedBy => "duplicatedBy",
            LinkKind::Escalates => "escalates",
            LinkKind::EscalatedBy => "escalatedBy",
            LinkKind::SplitTo => "splitTo",
            LinkKind::SplitFrom => "splitFrom",
            LinkKind::Causes => "causes",
            LinkKind::CausedBy => "causedBy",
            LinkKind::RelatesTo => "relatesTo",
        }
    }

    /// The native link type plus the side the target issue takes.
    ///
    /// The escalates pair points the opposite way from the rest: the native
    /// "Escalated" type reads "Escalates" on its inward side.
    pub fn native(&self) -> (NativeLinkType, LinkDirection) {
        use LinkDirection::{Inward, Outward};
        match self {
            LinkKind::Blocks => (BLOCKS, Outward),
            LinkKind::BlockedBy => (BLOCKS, Inward),
            LinkKind::Clones => (CLONERS, Outward),
            LinkKind::ClonedBy => (CLONERS, Inward),
            LinkKind::Duplicates => (DUPLICATE, Outward),
            LinkKind::DuplicatedBy => (DUPLICATE, Inward),
            LinkKind::Escalates => (ESCALATED, Inward),
            LinkKind::EscalatedBy => (ESCALATED, Outward),
            LinkKind::SplitTo => (ISSUE_SPLIT, Outward),
            LinkKind::SplitFrom => (ISSUE_SPLIT, Inward),
            LinkKind::Causes => (PROBLEM_INCIDENT, Outward),
            LinkKind::CausedBy => (PROBLEM_INCIDENT, Inward),
            LinkKind::RelatesTo => (RELATES, Outward),
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `issuelinks` update verb: `{"add": {...}}`, applied to the source
/// issue with `PUT /rest/api/2/issue/<key>`.
#[derive(Debug, Clone, Serialize)]
pub struct LinkUpdate {
    pub add: LinkAdd,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkAdd {
    #[serde(rename = "type")]
    pub link_type: NativeLinkType,
    #[serde(rename = "inwardIssue", skip_serializing_if = "Option::is_none")]
    pub inward_issue: Option<KeyRef>,
    #[serde(rename = "outwardIssue", skip_serializing_if = "Option::is_none")]
    pub outward_issue: Option<KeyRef>,
}

impl LinkUpdate {
    /// Payload attaching `target_key` to some source issue by `kind`, with
    /// the target on whichever side the native vocabulary puts it.
    pub fn for_target(kind: LinkKind, target_key: &str) -> Self {
        let (link_type, direction) = kind.native();
        let target = KeyRef::new(target_key);
        let (inward_issue, outward_issue) = match direction {
            LinkDirection::Inward => (Some(target), None),
            LinkDirection::Outward => (None, Some(target)),
        };
        Self {
            add: LinkAdd {
                link_type,
                inward_issue,
                outward_issue,
            },
        }
    }
}
