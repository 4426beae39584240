pub mod client;
pub mod dispatcher;
