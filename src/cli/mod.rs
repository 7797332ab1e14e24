//! Pieces of the command-line front end

pub mod session;
pub mod table;
