#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod classifier;
pub mod command;
pub mod config;
pub mod error;
pub mod location;
pub mod module_timing;
pub mod traits;

pub mod asynch;

#[cfg(test)]
mod test_helpers;
