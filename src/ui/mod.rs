//! UI module - contains UI rendering components

pub mod card;
pub mod components;
