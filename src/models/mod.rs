pub mod book;
pub mod lists;
pub mod recommendations;

pub use book::{Book, ImageLinks, IndustryIdentifier, VolumeInfo};
pub use lists::{ListName, MutationOutcome, ReadingLists};
pub use recommendations::RecommendationCache;
