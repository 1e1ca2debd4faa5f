//! Parameter Client
//!
//! Orchestrates transport, codec, and value store into the get/set/type
//! surface.
//!
//! ## Call Model
//! Fully synchronous, one socket per call, no retries. Edits are
//! fire-and-forget at the protocol level: the DUT never acknowledges them,
//! so a non-verified set can only report [`SetOutcome::Unconfirmed`].

use std::sync::Arc;

use crate::config::Config;
use crate::context::{HostContext, LogLevel};
use crate::error::{GdtError, Result};
use crate::protocol::{EditRequest, Item, ParamValue, Value, ValueKind};
use crate::store::ValueStore;
use crate::transport::TransportChannel;

/// How a set operation concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// A verification read confirmed the device applied the edit
    Verified,

    /// The edit was sent; the protocol gives no acknowledgement
    Unconfirmed,
}

/// Client for reading and writing named parameters on one DUT
///
/// Capabilities the harness owns (interface configuration, verdict logging,
/// pacing sleeps) are injected through [`HostContext`] rather than inherited.
pub struct ParameterClient {
    config: Config,
    store: ValueStore,
    context: Arc<dyn HostContext>,
}

impl ParameterClient {
    /// Create a client from a config and a capability context
    pub fn new(config: Config, context: Arc<dyn HostContext>) -> Self {
        let store = ValueStore::new(config.cache_dir.clone());
        Self {
            config,
            store,
            context,
        }
    }

    /// Read a parameter's current value
    ///
    /// Always refreshes from the DUT so the answer reflects the device, not
    /// the cache.
    pub fn get_value(&self, id: &str) -> Result<ParamValue> {
        let item = self.resolve(id, true)?;
        let value = item.value.scalar();
        self.context
            .log(LogLevel::Info, &format!("the value of '{id}' is {value}"));
        Ok(value)
    }

    /// Look up a parameter's type, cached-first
    ///
    /// Fails with `UnsupportedType` when the parameter exists but its kind
    /// is not one of the 9 settable kinds.
    pub fn get_param_type(&self, id: &str) -> Result<ValueKind> {
        let item = self.resolve(id, false)?;
        let kind = item.kind()?;
        tracing::debug!(id, kind = %kind, "resolved parameter type");

        if !kind.is_settable() {
            self.context.log(
                LogLevel::Fail,
                &format!("type '{kind}' of '{id}' is not settable"),
            );
            return Err(GdtError::UnsupportedType(kind.name().to_string()));
        }
        Ok(kind)
    }

    /// Write a parameter, optionally verifying with a follow-up read
    ///
    /// Validation happens before any bytes are sent, so a mistyped value
    /// never reaches the device.
    pub fn set_value(&self, id: &str, value: ParamValue, verify: bool) -> Result<SetOutcome> {
        let kind = self.get_param_type(id)?;
        validate_value(&value, kind)?;

        let request = EditRequest::new(build_item(id, kind, &value)?);

        self.context.configure(
            self.config.interface.as_deref(),
            self.config.local_addr.as_deref(),
        )?;
        let mut channel = TransportChannel::open(&self.config)?;
        channel.send_framed(&request.encode())?;
        // Fire-and-forget: the protocol defines no response for edits.
        drop(channel);

        if !verify {
            self.context
                .log(LogLevel::Info, &format!("edit for '{id}' sent, unverified"));
            return Ok(SetOutcome::Unconfirmed);
        }

        // Give the device time to apply the edit before reading it back.
        self.context.delay(self.config.pacing_delay);
        let actual = self.get_value(id)?;
        if actual == value {
            self.context
                .log(LogLevel::Pass, &format!("the value of '{id}' is updated"));
            Ok(SetOutcome::Verified)
        } else {
            self.context.log(
                LogLevel::Fail,
                &format!("the value of '{id}' is not updated"),
            );
            Err(GdtError::VerificationFailed {
                id: id.to_string(),
                expected: value.to_string(),
                actual: actual.to_string(),
            })
        }
    }

    fn resolve(&self, id: &str, force_fresh: bool) -> Result<Item> {
        self.store.resolve_item(
            id,
            self.config.cache_key(),
            force_fresh,
            &self.config,
            self.context.as_ref(),
        )
    }

    /// The client's configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

// =============================================================================
// Value Validation and Construction
// =============================================================================

/// Check that `value` has the right scalar shape for `kind`
///
/// text/ipv4/ipv6 take text, bool takes a boolean, the four integer kinds
/// take integers, unknown accepts anything, every other kind rejects.
pub fn validate_value(value: &ParamValue, kind: ValueKind) -> Result<()> {
    let ok = match kind {
        ValueKind::Unknown => true,
        ValueKind::Text | ValueKind::Ipv4 | ValueKind::Ipv6 => {
            matches!(value, ParamValue::Text(_))
        }
        ValueKind::Bool => matches!(value, ParamValue::Bool(_)),
        ValueKind::Interval | ValueKind::Enum | ValueKind::UInterval | ValueKind::LlInterval => {
            matches!(value, ParamValue::Int(_) | ParamValue::UInt(_))
        }
        _ => false,
    };

    if ok {
        Ok(())
    } else {
        Err(mismatch(value, kind))
    }
}

/// Build the edited item with the value assigned into the correct field
///
/// Narrowing conversions are range-checked; an out-of-range integer is a
/// `TypeMismatch`, same as a wrong scalar shape.
fn build_item(id: &str, kind: ValueKind, value: &ParamValue) -> Result<Item> {
    let typed = match (kind, value) {
        (ValueKind::Unknown, v) => Value::Unknown(v.to_string()),
        (ValueKind::Text, ParamValue::Text(s)) => Value::Text(s.clone()),
        (ValueKind::Ipv4, ParamValue::Text(s)) => Value::Ipv4(s.clone()),
        (ValueKind::Ipv6, ParamValue::Text(s)) => Value::Ipv6(s.clone()),
        (ValueKind::Bool, ParamValue::Bool(b)) => Value::Bool(*b),
        (ValueKind::Interval, v) => Value::Interval(narrow(v, kind)?),
        (ValueKind::Enum, v) => Value::Enum(narrow(v, kind)?),
        (ValueKind::UInterval, v) => Value::UInterval(narrow(v, kind)?),
        (ValueKind::LlInterval, v) => Value::LlInterval(int_value(v, kind)?),
        _ => return Err(mismatch(value, kind)),
    };
    Ok(Item::new(id, typed))
}

fn int_value(value: &ParamValue, kind: ValueKind) -> Result<i64> {
    match value {
        ParamValue::Int(v) => Ok(*v),
        ParamValue::UInt(v) => i64::try_from(*v).map_err(|_| mismatch(value, kind)),
        _ => Err(mismatch(value, kind)),
    }
}

fn narrow<T: TryFrom<i64>>(value: &ParamValue, kind: ValueKind) -> Result<T> {
    T::try_from(int_value(value, kind)?).map_err(|_| mismatch(value, kind))
}

fn mismatch(value: &ParamValue, kind: ValueKind) -> GdtError {
    GdtError::TypeMismatch {
        value: value.to_string(),
        kind: kind.name().to_string(),
    }
}
