//! Adapters implementing the membership port.

pub mod memory;
pub mod postgres;
