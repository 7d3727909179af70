//! Core data models mirroring the relational schema.

mod filters;
mod game;
mod rows;
mod team;

pub use filters::*;
pub use game::*;
pub use rows::*;
pub use team::*;
