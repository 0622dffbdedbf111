//! Typed records of contact book mutations.

use crate::model::contact::{Contact, Note};
use std::fmt::{Display, Formatter};

/// One semantic change to the contact book.
///
/// Payloads hold full contact values so a record stays meaningful after the
/// live book moves on. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modification {
    /// A contact was added.
    Add(Contact),
    /// A contact was removed.
    Delete(Contact),
    /// A contact was replaced by an edited version.
    Edit { old: Contact, new: Contact },
    /// A contact's note was overwritten.
    NoteChange { target: Contact, note: Note },
    /// Every contact was removed.
    Clear,
    /// Contacts were loaded from an external source.
    Import { location: String, overwrite: bool },
}

impl Modification {
    /// Short label for the kind of change, stable for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Delete(_) => "delete",
            Self::Edit { .. } => "edit",
            Self::NoteChange { .. } => "note",
            Self::Clear => "clear",
            Self::Import { .. } => "import",
        }
    }

    /// Contact the change was applied to, when there is one.
    pub fn target(&self) -> Option<&Contact> {
        match self {
            Self::Add(contact) | Self::Delete(contact) => Some(contact),
            Self::Edit { old, .. } => Some(old),
            Self::NoteChange { target, .. } => Some(target),
            Self::Clear | Self::Import { .. } => None,
        }
    }

    /// Human-readable description shown after undo/redo.
    pub fn user_description(&self) -> String {
        self.to_string()
    }
}

impl Display for Modification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add(contact) => write!(f, "Add person {contact}"),
            Self::Delete(contact) => write!(f, "Delete person {contact}"),
            Self::Edit { old, new } => write!(f, "Edit person {old} to {new}"),
            Self::NoteChange { target, note } => {
                write!(f, "Edit note of person {target} to {note}")
            }
            Self::Clear => write!(f, "Clear the address book"),
            Self::Import {
                location,
                overwrite,
            } => write!(f, "Import data from {location} (overwrite: {overwrite})"),
        }
    }
}
