//! Toy catalog: static records, filtering, and parent reviews.

pub mod reviews;
pub mod toys;
