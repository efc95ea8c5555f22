//! # rmai-notes
//!
//! Free-text notes about characters, kept in SQLite.
//!
//! ```rust,ignore
//! use rmai_notes::NoteStore;
//!
//! let store = NoteStore::open("data/notes.db").await?;
//! store.add_note("1", "Rick Sanchez", "Hates the Citadel", None).await?;
//! let notes = store.list_by_character("1").await?;
//! ```

pub mod error;
pub mod note;
pub mod store;

pub use error::{NoteError, Result};
pub use note::{Note, encode_embedding};
pub use store::NoteStore;
