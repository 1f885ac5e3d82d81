//! Library components of the census validator CLI.

pub mod logging;
pub mod output;
