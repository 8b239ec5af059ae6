pub mod binding;
pub mod form;
pub mod io;
pub mod notify;
pub mod plugin;
pub mod preview;
pub mod project;
pub mod state;
pub mod store;
pub mod upload;

pub use plugin::SunbirdEditorPlugin;
