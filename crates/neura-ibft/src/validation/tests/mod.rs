//! Tests for the message validators.
