use super::domain::{Axis, Role, SEED_CATEGORIES};
use super::expression::{segments, SegmentError};
use serde::Serialize;
use std::collections::BTreeMap;

/// Accumulated points per category.
///
/// Categories that were never seeded are inserted at zero on first write, so
/// anything a score expression names is tracked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tally {
    scores: BTreeMap<String, i64>,
}

impl Tally {
    /// Tally holding every role and axis category at zero.
    pub fn seeded() -> Self {
        Self::with_categories(SEED_CATEGORIES)
    }

    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let scores = categories
            .into_iter()
            .map(|category| (category.into(), 0))
            .collect();
        Self { scores }
    }

    pub fn add(&mut self, category: &str, points: i64) {
        match self.scores.get_mut(category) {
            Some(total) => *total = total.saturating_add(points),
            None => {
                self.scores.insert(category.to_string(), points);
            }
        }
    }

    /// Applies every well-formed segment of `expression` and returns the
    /// segments that were skipped.
    pub fn apply_expression(&mut self, expression: &str) -> Vec<SegmentError> {
        let mut rejected = Vec::new();
        for parsed in segments(expression) {
            match parsed {
                Ok(segment) => self.add(segment.category, segment.points),
                Err(err) => rejected.push(err),
            }
        }
        rejected
    }

    /// Score for `category`, zero when it was never seen.
    pub fn get(&self, category: &str) -> i64 {
        self.scores.get(category).copied().unwrap_or(0)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.scores.contains_key(category)
    }

    pub fn role_score(&self, role: Role) -> i64 {
        self.get(role.category())
    }

    pub fn axis_score(&self, axis: Axis) -> i64 {
        self.get(axis.category())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.scores
            .iter()
            .map(|(category, points)| (category.as_str(), *points))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Collecting adds each pair onto a [`Tally::seeded`] base.
impl<S: AsRef<str>> FromIterator<(S, i64)> for Tally {
    fn from_iter<T: IntoIterator<Item = (S, i64)>>(iter: T) -> Self {
        let mut tally = Self::seeded();
        for (category, points) in iter {
            tally.add(category.as_ref(), points);
        }
        tally
    }
}
