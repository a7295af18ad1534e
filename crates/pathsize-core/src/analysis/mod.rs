/// Analysis modules: reports built over an expanded node.

pub mod listing;

pub use listing::{ListingReport, ListingRow};
