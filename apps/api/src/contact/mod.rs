// Contact screen: payload model, submit gate, and the relay client used to send it.

pub mod client;
pub mod handlers;
pub mod models;
pub mod validation;
