//! different utility modules used throughout the project
/// logger setup and saving of iteration traces into CSV files
pub mod logger;
/// read root finding tasks and solver settings from TOML files
pub mod task_parser;
/// pretty-printing of iteration traces and result summaries
pub mod trace_table;
