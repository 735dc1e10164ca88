pub mod hash_index;
pub mod ordered_index;
pub mod traits;

pub use hash_index::HashIndex;
pub use ordered_index::OrderedIndex;
pub use traits::{Index, IndexKind};

/// Instantiates an empty index of the requested kind.
pub fn new_index(kind: IndexKind) -> Box<dyn Index> {
    match kind {
        IndexKind::Equality => Box::new(HashIndex::new()),
        IndexKind::Ordered => Box::new(OrderedIndex::new()),
    }
}
