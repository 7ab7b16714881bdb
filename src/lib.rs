pub mod cli;
pub mod daily;
pub mod error;
pub mod git;
pub mod model;
pub mod util;
