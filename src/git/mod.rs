pub mod command;
pub mod log_parser;
pub mod repository;
pub mod stat_parser;
