//! Edge case tests for mcc-gen.
