//! Item and snapshot definitions
//!
//! An item binds a parameter id to its typed value; a snapshot is the full
//! ordered parameter dump received from the DUT in one fetch.

use serde::{Deserialize, Serialize};

use super::value::{Value, ValueKind};
use crate::error::Result;

/// One named parameter from the DUT
///
/// Invariant: `type_code` always equals `value.kind().code()` for items
/// produced by this crate (constructor and decoder both derive it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Parameter id, e.g. `InternetGatewayDevice.Time.Enable.control`
    pub id: String,

    /// Wire type code (1-based, positional)
    pub type_code: u8,

    /// The typed value
    pub value: Value,
}

impl Item {
    /// Create an item; the type code is derived from the value's kind
    pub fn new(id: impl Into<String>, value: Value) -> Self {
        Self {
            id: id.into(),
            type_code: value.kind().code(),
            value,
        }
    }

    /// Resolve the item's type code against the fixed kind table
    pub fn kind(&self) -> Result<ValueKind> {
        ValueKind::from_code(self.type_code)
    }
}

/// The full ordered parameter dump from one fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub items: Vec<Item>,
}

impl Snapshot {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Linear search by parameter id
    pub fn find(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
