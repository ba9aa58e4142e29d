//! Items API: length-indexed line selection for resume items, plus the HTTP surface that
//! exposes it to the rest of the resume pipeline.

pub mod config;
pub mod errors;
pub mod items;
pub mod layout;
pub mod render;
pub mod routes;
pub mod skill_scoring;
pub mod state;
