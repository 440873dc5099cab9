pub mod compensation;
pub mod occurrences;
