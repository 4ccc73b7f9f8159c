//! Citation viewer state
//!
//! Expand/collapse flags for the "Citations" panel under each bot answer and
//! for every citation inside it. This is view state: the rendering layer owns
//! it, separately from `SessionState`. Everything starts collapsed, and since
//! turn identities are never reused, a newly rendered answer never inherits
//! flags from an older one.

use super::extract::{extract_citations, Citation};
use crate::state::{ConversationTurn, TurnId};
use std::collections::HashSet;

/// Identity of one citation within the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CitationKey {
    /// Bot turn the citation belongs to
    pub turn_id: TurnId,
    /// Position within the turn's citations
    pub index: usize,
}

/// Expand/collapse state for citation panels
#[derive(Debug, Clone, Default)]
pub struct CitationViewer {
    expanded_groups: HashSet<TurnId>,
    expanded_citations: HashSet<CitationKey>,
}

/// What to draw for one turn's citations
#[derive(Debug, Clone, PartialEq)]
pub struct CitationPanel<'a> {
    /// Turn the panel belongs to
    pub turn_id: TurnId,
    /// Whether the panel is open
    pub expanded: bool,
    /// Citation rows; empty while the panel is closed
    pub entries: Vec<CitationEntry<'a>>,
}

/// One citation row
#[derive(Debug, Clone, PartialEq)]
pub struct CitationEntry<'a> {
    /// Position within the turn's citations
    pub index: usize,
    /// Title and value derived from the search metadata
    pub citation: Citation,
    /// Fragment text, present only while the row is expanded
    pub content: Option<&'a str>,
}

impl CitationViewer {
    /// Create a viewer with everything collapsed
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a turn's panel is open
    pub fn is_group_expanded(&self, turn_id: TurnId) -> bool {
        self.expanded_groups.contains(&turn_id)
    }

    /// Open or close a turn's panel; returns the new state
    pub fn toggle_group(&mut self, turn_id: TurnId) -> bool {
        toggle(&mut self.expanded_groups, turn_id)
    }

    /// Whether one citation is expanded
    pub fn is_citation_expanded(&self, turn_id: TurnId, index: usize) -> bool {
        self.expanded_citations
            .contains(&CitationKey { turn_id, index })
    }

    /// Expand or collapse one citation; returns the new state
    ///
    /// Independent of the panel flag and of sibling citations.
    pub fn toggle_citation(&mut self, turn_id: TurnId, index: usize) -> bool {
        toggle(&mut self.expanded_citations, CitationKey { turn_id, index })
    }

    /// Forget state for turns no longer in the conversation
    pub fn retain_turns<'a>(&mut self, turns: impl IntoIterator<Item = &'a ConversationTurn>) {
        let live: HashSet<TurnId> = turns.into_iter().map(|t| t.id).collect();
        self.expanded_groups.retain(|id| live.contains(id));
        self.expanded_citations.retain(|key| live.contains(&key.turn_id));
    }

    /// Build the panel for a turn
    ///
    /// Returns `None` for turns without citations, which get no panel.
    pub fn panel<'a>(&self, turn: &'a ConversationTurn) -> Option<CitationPanel<'a>> {
        if turn.citations.is_empty() {
            return None;
        }
        let expanded = self.is_group_expanded(turn.id);
        let entries = if expanded {
            extract_citations(Some(turn.citations.as_slice()))
                .into_iter()
                .zip(&turn.citations)
                .enumerate()
                .map(|(index, (citation, item))| CitationEntry {
                    index,
                    citation,
                    content: self
                        .is_citation_expanded(turn.id, index)
                        .then_some(item.content.as_str()),
                })
                .collect()
        } else {
            Vec::new()
        };
        Some(CitationPanel {
            turn_id: turn.id,
            expanded,
            entries,
        })
    }
}

fn toggle<T: Eq + std::hash::Hash>(set: &mut HashSet<T>, key: T) -> bool {
    if set.remove(&key) {
        false
    } else {
        set.insert(key);
        true
    }
}
