//! Items Module
//!
//! The standalone item catalog.

pub mod service;
pub mod handlers;

pub use service::ItemService;
