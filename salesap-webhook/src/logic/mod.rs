pub mod duplicate;
pub mod webhook;
