// Shared constants used across the core and the application layers
pub mod constants;
