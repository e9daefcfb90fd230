//! Script Adapters - Scenario definitions on disk.

mod file_script_repository;

pub use file_script_repository::FileScriptRepository;
