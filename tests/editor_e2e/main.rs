#[path = "../helpers/mod.rs"]
mod helpers;

mod snapshot;
mod state;
