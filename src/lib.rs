pub mod cli;
pub mod compare;
pub mod export;
pub mod formatters;
pub mod github;
