// Public handlers: post reads and token acquisition. No authentication
// required on any route in this tree.

pub mod auth;
pub mod posts;
