//! Integration test modules.

mod active_trail;
mod depth;
mod links;
mod visibility;
