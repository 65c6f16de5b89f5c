//! Common type definitions.
//!
//! - [`BreedId`]: identifier of a catalogue row
//! - [`Operation`]: the engine operation a failure happened in, carried by persistence errors so
//!   logs and responses can say what was being attempted

use std::fmt;

/// Identifier of a breed (the `breeds.id` SERIAL column).
pub type BreedId = i32;

/// Operations the breed engines perform against storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
    Import,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            Operation::List => "list breeds",
            Operation::Get => "get breed",
            Operation::Create => "create breed",
            Operation::Update => "update breed",
            Operation::Delete => "delete breed",
            Operation::Import => "import breeds",
        };
        f.write_str(action)
    }
}
