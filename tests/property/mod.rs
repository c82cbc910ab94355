//! Property-based tests
//!
//! Uses proptest to check the membership rules over random participants

mod membership_proptest;
mod validation_proptest;
