mod domain;
mod nameserver;
mod state;

pub use domain::*;
pub use nameserver::*;
pub use state::*;
