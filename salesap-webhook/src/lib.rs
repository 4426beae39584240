pub mod algebra;
pub mod domain;
pub mod logic;
pub mod router;
pub mod server;
