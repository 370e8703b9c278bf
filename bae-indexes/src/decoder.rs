//! Element → record classification.
//!
//! Decoding is pure: it looks at one element and its attributes and never
//! touches parser state. Missing attributes come through as `None`.

use crate::entry::EntryDecoder;
use crate::events::Attributes;
use bae_common::Entry;

/// What a single element means to the index parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// `<indexes>` or `<artists>`: the response carries an index.
    Container { ignored_articles: Option<String> },
    /// `<index name="A">`: label for the artists that follow.
    IndexHeader { name: Option<String> },
    Artist {
        id: Option<String>,
        name: Option<String>,
    },
    Shortcut {
        id: Option<String>,
        name: Option<String>,
    },
    Child(Entry),
    /// `<error code=".." message="..">` embedded by the server.
    Error { code: u32, message: String },
    Ignored,
}

pub fn decode(name: &str, attributes: &Attributes, entries: &dyn EntryDecoder) -> Record {
    match name {
        "indexes" | "artists" => Record::Container {
            ignored_articles: attributes.get_owned("ignoredArticles"),
        },
        "index" => Record::IndexHeader {
            name: attributes.get_owned("name"),
        },
        "artist" => Record::Artist {
            id: attributes.get_owned("id"),
            name: attributes.get_owned("name"),
        },
        "shortcut" => Record::Shortcut {
            id: attributes.get_owned("id"),
            name: attributes.get_owned("name"),
        },
        "child" => Record::Child(entries.decode_entry("", attributes)),
        "error" => Record::Error {
            code: attributes
                .get("code")
                .and_then(|c| c.trim().parse().ok())
                .unwrap_or(0),
            message: attributes
                .get("message")
                .unwrap_or("Unknown error")
                .to_string(),
        },
        _ => Record::Ignored,
    }
}
