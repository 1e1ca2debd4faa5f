//! Value kinds and tagged values
//!
//! The debug-tool schema is a fixed table of 20 value kinds with 1-based
//! positional type codes. The table order is part of the wire contract and
//! must match the protocol definition exactly; `value_kind_table_order` in
//! the protocol tests pins it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GdtError, Result};

/// The 20 value kinds, in the protocol's declared order
///
/// Discriminants are the wire type codes. Whether the firmware guarantees
/// this order stays stable across versions is unconfirmed; treat any
/// renumbering in the protocol definition as a breaking change here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ValueKind {
    Unknown = 1,
    Bool = 2,
    Text = 3,
    Interval = 4,
    Enum = 5,
    UInterval = 6,
    UllInterval = 7,
    Udid = 8,
    LlInterval = 9,
    SInterval = 10,
    UsInterval = 11,
    Ipv4 = 12,
    Eui48 = 13,
    Ipv6 = 14,
    Multi = 15,
    DInterval = 16,
    Container = 17,
    AddToContainer = 18,
    RemoveFromContainer = 19,
    TimeVal = 20,
}

/// All kinds in type-code order
pub const ALL_KINDS: [ValueKind; 20] = [
    ValueKind::Unknown,
    ValueKind::Bool,
    ValueKind::Text,
    ValueKind::Interval,
    ValueKind::Enum,
    ValueKind::UInterval,
    ValueKind::UllInterval,
    ValueKind::Udid,
    ValueKind::LlInterval,
    ValueKind::SInterval,
    ValueKind::UsInterval,
    ValueKind::Ipv4,
    ValueKind::Eui48,
    ValueKind::Ipv6,
    ValueKind::Multi,
    ValueKind::DInterval,
    ValueKind::Container,
    ValueKind::AddToContainer,
    ValueKind::RemoveFromContainer,
    ValueKind::TimeVal,
];

/// The 9 kinds this client may edit
pub const SETTABLE_KINDS: [ValueKind; 9] = [
    ValueKind::Unknown,
    ValueKind::Text,
    ValueKind::Bool,
    ValueKind::Interval,
    ValueKind::Enum,
    ValueKind::UInterval,
    ValueKind::LlInterval,
    ValueKind::Ipv4,
    ValueKind::Ipv6,
];

impl ValueKind {
    /// The wire type code (1-based)
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a kind by wire type code
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(ValueKind::Unknown),
            2 => Ok(ValueKind::Bool),
            3 => Ok(ValueKind::Text),
            4 => Ok(ValueKind::Interval),
            5 => Ok(ValueKind::Enum),
            6 => Ok(ValueKind::UInterval),
            7 => Ok(ValueKind::UllInterval),
            8 => Ok(ValueKind::Udid),
            9 => Ok(ValueKind::LlInterval),
            10 => Ok(ValueKind::SInterval),
            11 => Ok(ValueKind::UsInterval),
            12 => Ok(ValueKind::Ipv4),
            13 => Ok(ValueKind::Eui48),
            14 => Ok(ValueKind::Ipv6),
            15 => Ok(ValueKind::Multi),
            16 => Ok(ValueKind::DInterval),
            17 => Ok(ValueKind::Container),
            18 => Ok(ValueKind::AddToContainer),
            19 => Ok(ValueKind::RemoveFromContainer),
            20 => Ok(ValueKind::TimeVal),
            other => Err(GdtError::UnknownType(format!("type code {other}"))),
        }
    }

    /// The schema field name for this kind
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Unknown => "unknownValue",
            ValueKind::Bool => "boolValue",
            ValueKind::Text => "textValue",
            ValueKind::Interval => "intervalValue",
            ValueKind::Enum => "enumValue",
            ValueKind::UInterval => "uIntervalValue",
            ValueKind::UllInterval => "ullIntervalValue",
            ValueKind::Udid => "udidValueValue",
            ValueKind::LlInterval => "llIntervalValue",
            ValueKind::SInterval => "sIntervalValue",
            ValueKind::UsInterval => "usIntervalValue",
            ValueKind::Ipv4 => "iPv4Value",
            ValueKind::Eui48 => "eui48Value",
            ValueKind::Ipv6 => "iPv6Value",
            ValueKind::Multi => "multiValue",
            ValueKind::DInterval => "dIntervalValue",
            ValueKind::Container => "container",
            ValueKind::AddToContainer => "addToContainer",
            ValueKind::RemoveFromContainer => "removeFromContainer",
            ValueKind::TimeVal => "timeValValue",
        }
    }

    /// Look up a kind by schema field name
    pub fn from_name(name: &str) -> Result<Self> {
        ALL_KINDS
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| GdtError::UnknownType(format!("name '{name}'")))
    }

    /// Whether this kind may be edited by the client
    pub fn is_settable(self) -> bool {
        SETTABLE_KINDS.contains(&self)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Tagged Value
// =============================================================================

/// A typed parameter value; exactly one payload per kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Unknown(String),
    Bool(bool),
    Text(String),
    Interval(i32),
    Enum(i32),
    UInterval(u32),
    UllInterval(u64),
    Udid(String),
    LlInterval(i64),
    SInterval(i16),
    UsInterval(u16),
    Ipv4(String),
    Eui48(String),
    Ipv6(String),
    Multi(String),
    DInterval(f64),
    Container(Vec<u8>),
    AddToContainer(Vec<u8>),
    RemoveFromContainer(Vec<u8>),
    TimeVal { secs: i64, micros: i32 },
}

impl Value {
    /// The kind tag of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Unknown(_) => ValueKind::Unknown,
            Value::Bool(_) => ValueKind::Bool,
            Value::Text(_) => ValueKind::Text,
            Value::Interval(_) => ValueKind::Interval,
            Value::Enum(_) => ValueKind::Enum,
            Value::UInterval(_) => ValueKind::UInterval,
            Value::UllInterval(_) => ValueKind::UllInterval,
            Value::Udid(_) => ValueKind::Udid,
            Value::LlInterval(_) => ValueKind::LlInterval,
            Value::SInterval(_) => ValueKind::SInterval,
            Value::UsInterval(_) => ValueKind::UsInterval,
            Value::Ipv4(_) => ValueKind::Ipv4,
            Value::Eui48(_) => ValueKind::Eui48,
            Value::Ipv6(_) => ValueKind::Ipv6,
            Value::Multi(_) => ValueKind::Multi,
            Value::DInterval(_) => ValueKind::DInterval,
            Value::Container(_) => ValueKind::Container,
            Value::AddToContainer(_) => ValueKind::AddToContainer,
            Value::RemoveFromContainer(_) => ValueKind::RemoveFromContainer,
            Value::TimeVal { .. } => ValueKind::TimeVal,
        }
    }

    /// The caller-facing scalar for this value
    pub fn scalar(&self) -> ParamValue {
        match self {
            Value::Unknown(s)
            | Value::Text(s)
            | Value::Udid(s)
            | Value::Ipv4(s)
            | Value::Eui48(s)
            | Value::Ipv6(s)
            | Value::Multi(s) => ParamValue::Text(s.clone()),
            Value::Bool(b) => ParamValue::Bool(*b),
            Value::Interval(v) => ParamValue::Int(i64::from(*v)),
            Value::Enum(v) => ParamValue::Int(i64::from(*v)),
            Value::LlInterval(v) => ParamValue::Int(*v),
            Value::SInterval(v) => ParamValue::Int(i64::from(*v)),
            Value::UInterval(v) => ParamValue::UInt(u64::from(*v)),
            Value::UllInterval(v) => ParamValue::UInt(*v),
            Value::UsInterval(v) => ParamValue::UInt(u64::from(*v)),
            Value::DInterval(v) => ParamValue::Float(*v),
            Value::Container(b) | Value::AddToContainer(b) | Value::RemoveFromContainer(b) => {
                ParamValue::Bytes(b.clone())
            }
            Value::TimeVal { secs, micros } => {
                ParamValue::Float(*secs as f64 + f64::from(*micros) * 1e-6)
            }
        }
    }
}

// =============================================================================
// Caller-facing Scalar
// =============================================================================

/// The scalar shape a caller passes to `set_value` or gets back from
/// `get_value`
///
/// Equality coerces across `Int`/`UInt` so a verification read against an
/// unsigned kind compares cleanly with a requested signed literal.
#[derive(Debug, Clone)]
pub enum ParamValue {
    Text(String),
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bytes(Vec<u8>),
}

impl PartialEq for ParamValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ParamValue::Text(a), ParamValue::Text(b)) => a == b,
            (ParamValue::Bool(a), ParamValue::Bool(b)) => a == b,
            (ParamValue::Int(a), ParamValue::Int(b)) => a == b,
            (ParamValue::UInt(a), ParamValue::UInt(b)) => a == b,
            (ParamValue::Int(a), ParamValue::UInt(b)) | (ParamValue::UInt(b), ParamValue::Int(a)) => {
                u64::try_from(*a).map(|a| a == *b).unwrap_or(false)
            }
            (ParamValue::Float(a), ParamValue::Float(b)) => a == b,
            (ParamValue::Bytes(a), ParamValue::Bytes(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::UInt(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}
