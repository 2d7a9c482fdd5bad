//! Parent ratings, feedback notes, and favorites for catalog toys.
//!
//! TRADE-OFFS
//! ==========
//! Maps are keyed by toy id with no eviction. That is fine for a small
//! static catalog and would not scale to an open-ended one.

use std::collections::HashMap;

/// Longest feedback note kept, in characters.
pub const MAX_FEEDBACK_CHARS: usize = 1000;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    #[error("rating must be between 1 and 5 stars, got {0}")]
    RatingOutOfRange(u8),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToyReview {
    pub rating: Option<u8>,
    pub feedback: String,
}

#[derive(Debug, Clone, Default)]
pub struct ToyReviews {
    reviews: HashMap<u32, ToyReview>,
    favorites: HashMap<u32, bool>,
}

impl ToyReviews {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a 1-5 star rating, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::RatingOutOfRange`] outside 1..=5.
    pub fn rate(&mut self, toy_id: u32, stars: u8) -> Result<(), ReviewError> {
        if !(1..=5).contains(&stars) {
            return Err(ReviewError::RatingOutOfRange(stars));
        }
        self.reviews.entry(toy_id).or_default().rating = Some(stars);
        Ok(())
    }

    /// Store a feedback note, truncated to [`MAX_FEEDBACK_CHARS`].
    pub fn set_feedback(&mut self, toy_id: u32, text: &str) {
        let kept: String = text.chars().take(MAX_FEEDBACK_CHARS).collect();
        self.reviews.entry(toy_id).or_default().feedback = kept;
    }

    /// Flip the favorite flag and return the new value.
    pub fn toggle_favorite(&mut self, toy_id: u32) -> bool {
        let flag = self.favorites.entry(toy_id).or_insert(false);
        *flag = !*flag;
        *flag
    }

    #[must_use]
    pub fn is_favorite(&self, toy_id: u32) -> bool {
        self.favorites.get(&toy_id).copied().unwrap_or(false)
    }

    /// Star rating, 0 when unrated.
    #[must_use]
    pub fn rating(&self, toy_id: u32) -> u8 {
        self.reviews
            .get(&toy_id)
            .and_then(|r| r.rating)
            .unwrap_or(0)
    }

    #[must_use]
    pub fn feedback(&self, toy_id: u32) -> Option<&str> {
        self.reviews
            .get(&toy_id)
            .map(|r| r.feedback.as_str())
            .filter(|f| !f.is_empty())
    }

    #[must_use]
    pub fn review(&self, toy_id: u32) -> Option<&ToyReview> {
        self.reviews.get(&toy_id)
    }
}

#[cfg(test)]
#[path = "reviews_test.rs"]
mod tests;
