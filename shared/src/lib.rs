pub mod entry;
pub mod filter;
pub mod geo;

pub use entry::{EnergySource, Entry, EntryError, EntryStore};
pub use filter::{FilterState, SourceFilter, apply_filter, visible_count};
pub use geo::{Coordinate, RankedCandidate, rank_by_distance};
