//! Writes the folder tree and concatenated file contents of selected project directories
//! into a single text report.

pub mod app;
