//! Test suite for listshare
//!
//! This module organizes all tests

pub mod integration;
pub mod property;
