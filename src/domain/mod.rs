pub mod listing;
pub mod merge;
pub mod normalize;
pub mod search;
