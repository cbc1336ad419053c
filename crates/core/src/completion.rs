//! Habit completion toggle and streak bookkeeping.
//!
//! A habit carries three fields that change together whenever its
//! completion is set: `completed`, `streak`, and the append-only
//! `completion_history`. [`apply_completion`] computes the new values from
//! the stored ones; the caller persists all three in a single write.
//!
//! Rules:
//!
//! - Setting `completed = true` increments the streak by one and appends
//!   `{date: now, completed: true}` to the history. This happens on every
//!   such request, including when the habit is already completed, so a
//!   repeated request counts twice. [`CompletionChange::RepeatedCompletion`]
//!   marks that case so callers can log it.
//! - Setting `completed = false` resets the streak to zero and leaves the
//!   history untouched.
//! - `best_streak` is the longest streak ever reached. It only grows, so
//!   milestones survive a reset.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// One entry in a habit's completion history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEntry {
    pub date: Timestamp,
    pub completed: bool,
}

/// The completion-related fields of a habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionState {
    pub completed: bool,
    pub streak: i32,
    pub best_streak: i32,
    pub history: Vec<CompletionEntry>,
}

impl Default for CompletionState {
    fn default() -> Self {
        Self {
            completed: false,
            streak: 0,
            best_streak: 0,
            history: Vec::new(),
        }
    }
}

/// What a call to [`apply_completion`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionChange {
    /// Incomplete → complete: streak incremented, history appended.
    Completed,
    /// Complete → complete: streak incremented and history appended again.
    RepeatedCompletion,
    /// Any → incomplete: streak reset to zero.
    Reset,
}

impl CompletionChange {
    pub fn as_str(self) -> &'static str {
        match self {
            CompletionChange::Completed => "completed",
            CompletionChange::RepeatedCompletion => "repeated_completion",
            CompletionChange::Reset => "reset",
        }
    }
}

/// Apply a completion toggle to `state`, returning the new state.
pub fn apply_completion(
    state: &CompletionState,
    completed: bool,
    now: Timestamp,
) -> (CompletionState, CompletionChange) {
    if !completed {
        let next = CompletionState {
            completed: false,
            streak: 0,
            best_streak: state.best_streak,
            history: state.history.clone(),
        };
        return (next, CompletionChange::Reset);
    }

    let change = if state.completed {
        CompletionChange::RepeatedCompletion
    } else {
        CompletionChange::Completed
    };

    let mut history = Vec::with_capacity(state.history.len() + 1);
    history.extend_from_slice(&state.history);
    history.push(CompletionEntry {
        date: now,
        completed: true,
    });

    let streak = state.streak.saturating_add(1);
    let next = CompletionState {
        completed: true,
        streak,
        best_streak: state.best_streak.max(streak),
        history,
    };
    (next, change)
}
