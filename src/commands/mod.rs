// Command handlers module
pub mod config;
pub mod poll;
pub mod run;
pub mod version;

// Re-exports for cleaner imports
pub use poll::execute as poll;
pub use run::execute as run;
pub use version::execute as version;
