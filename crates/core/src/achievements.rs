//! Progress insights and achievement unlocking.
//!
//! Computed on demand from the stored habits; nothing here is persisted.
//! Streak achievements and the highest streak use each habit's best
//! streak, so a reset never locks a milestone again. The unlock date is
//! only derivable while the qualifying run is still current: the history
//! records completions but not resets, so the current run is the last
//! `streak` entries and the date is the entry at which that run reached
//! the threshold.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::completion::CompletionEntry;
use crate::types::{DbId, Timestamp};

/// Streak thresholds for the streak achievements.
pub const ON_A_ROLL_STREAK: i32 = 3;
pub const CONSISTENT_STREAK: i32 = 7;
pub const HABIT_MASTER_STREAK: i32 = 30;

/// Distinct categories required for "Diversifying".
pub const DIVERSIFYING_CATEGORIES: usize = 3;

/// Window lengths, in days, of the weekly and monthly completion rates.
pub const WEEK_DAYS: i64 = 7;
pub const MONTH_DAYS: i64 = 30;

/// The fields of a habit that insights are computed from.
///
/// `category_id` should only be set for categories that still exist;
/// callers drop dangling references before building the facts.
#[derive(Debug, Clone, Copy)]
pub struct HabitFacts<'a> {
    pub category_id: Option<DbId>,
    pub completed: bool,
    pub streak: i32,
    pub best_streak: i32,
    pub history: &'a [CompletionEntry],
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub unlocked: bool,
    pub unlocked_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub total_habits: usize,
    pub completed_habits: usize,
    /// Fraction of habits currently completed, in `[0, 1]`.
    pub completion_rate: f64,
    /// Distinct (habit, day) completions over the last 7 days, divided by
    /// habits × 7.
    pub weekly_completion_rate: f64,
    /// As `weekly_completion_rate`, over the last 30 days.
    pub monthly_completion_rate: f64,
    /// Best streak ever reached by any habit.
    pub highest_streak: i32,
    pub total_completions: usize,
    pub achievements: Vec<Achievement>,
}

pub fn compute_insights(habits: &[HabitFacts<'_>], now: Timestamp) -> Insights {
    let total_habits = habits.len();
    let completed_habits = habits.iter().filter(|h| h.completed).count();

    Insights {
        total_habits,
        completed_habits,
        completion_rate: ratio(completed_habits, total_habits),
        weekly_completion_rate: window_completion_rate(habits, now, WEEK_DAYS),
        monthly_completion_rate: window_completion_rate(habits, now, MONTH_DAYS),
        highest_streak: habits.iter().map(|h| h.best_streak).max().unwrap_or(0),
        total_completions: habits
            .iter()
            .map(|h| h.history.iter().filter(|e| e.completed).count())
            .sum(),
        achievements: evaluate_achievements(habits),
    }
}

/// Share of habit-days in the `days`-day window ending today (UTC) on
/// which the habit was completed. Several completions of one habit on the
/// same day count once; entries after today are ignored.
pub fn window_completion_rate(habits: &[HabitFacts<'_>], now: Timestamp, days: i64) -> f64 {
    if days <= 0 {
        return 0.0;
    }
    let today = now.date_naive();
    let first = today - Duration::days(days - 1);

    let completed_days: usize = habits
        .iter()
        .map(|h| {
            h.history
                .iter()
                .filter(|e| e.completed)
                .map(|e| e.date.date_naive())
                .filter(|d| (first..=today).contains(d))
                .collect::<HashSet<NaiveDate>>()
                .len()
        })
        .sum();

    let slots = habits.len() * usize::try_from(days).unwrap_or(0);
    ratio(completed_days, slots)
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

pub fn evaluate_achievements(habits: &[HabitFacts<'_>]) -> Vec<Achievement> {
    let first_created = habits.iter().map(|h| h.created_at).min();

    let categories: HashSet<DbId> = habits.iter().filter_map(|h| h.category_id).collect();

    vec![
        achievement(
            "getting-started",
            "Getting Started",
            "Create your first habit",
            !habits.is_empty(),
            first_created,
        ),
        streak_achievement(
            "on-a-roll",
            "On a Roll",
            "Reach a 3-day streak on any habit",
            habits,
            ON_A_ROLL_STREAK,
        ),
        streak_achievement(
            "consistent",
            "Consistent",
            "Reach a 7-day streak on any habit",
            habits,
            CONSISTENT_STREAK,
        ),
        streak_achievement(
            "habit-master",
            "Habit Master",
            "Reach a 30-day streak on any habit",
            habits,
            HABIT_MASTER_STREAK,
        ),
        achievement(
            "diversifying",
            "Diversifying",
            "Create habits in 3 different categories",
            categories.len() >= DIVERSIFYING_CATEGORIES,
            None,
        ),
    ]
}

fn achievement(
    id: &str,
    title: &str,
    description: &str,
    unlocked: bool,
    unlocked_at: Option<Timestamp>,
) -> Achievement {
    Achievement {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        unlocked,
        unlocked_at: if unlocked { unlocked_at } else { None },
    }
}

fn streak_achievement(
    id: &str,
    title: &str,
    description: &str,
    habits: &[HabitFacts<'_>],
    threshold: i32,
) -> Achievement {
    let unlocked = habits.iter().any(|h| h.best_streak >= threshold);
    let unlocked_at = habits
        .iter()
        .filter_map(|h| threshold_reached_at(h, threshold))
        .min();
    achievement(id, title, description, unlocked, unlocked_at)
}

/// Date of the history entry at which the current run reached `threshold`.
fn threshold_reached_at(habit: &HabitFacts<'_>, threshold: i32) -> Option<Timestamp> {
    if habit.streak < threshold {
        return None;
    }
    let streak = usize::try_from(habit.streak).ok()?;
    let threshold = usize::try_from(threshold).ok()?;
    let run_start = habit.history.len().checked_sub(streak)?;
    habit
        .history
        .get(run_start + threshold.checked_sub(1)?)
        .map(|e| e.date)
}
