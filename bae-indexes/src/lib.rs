//! Parsing of Subsonic artist-index responses (`getIndexes` / `getArtists`).
//!
//! The parser is a decode-then-merge pipeline over a forward-only event
//! stream: [`events`] defines the stream, [`decoder`] turns one element into a
//! [`decoder::Record`], [`merge`] accumulates records and [`parser`] drives the
//! whole thing and assembles the result.

pub mod config;
pub mod decoder;
pub mod entry;
pub mod error;
pub mod events;
pub mod merge;
pub mod parser;
pub mod preferences;
pub mod progress;
pub mod subsonic_client;
pub mod validate;
pub mod xml_source;

pub use bae_common::{Artist, Entry, Indexes, IndexesUpdate};
pub use error::{IndexesError, TransportError};
pub use events::{Attributes, EventSource, ParseEvent};
pub use parser::IndexesParser;
pub use preferences::{MemoryPreferences, PreferencesStore, YamlPreferences};
pub use progress::{NoProgress, ProgressSink};
pub use xml_source::XmlEventSource;
