mod artist;
mod entry;
mod indexes;

pub use artist::{Artist, SHORTCUT_INDEX};
pub use entry::Entry;
pub use indexes::{Indexes, IndexesUpdate};
