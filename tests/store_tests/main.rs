//! Value store tests
//!
//! Cache persistence and the cache-or-refresh resolution policy.

mod support;
