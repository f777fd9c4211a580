pub mod clipboard;
pub mod compose;
pub mod composer;
pub mod install;
pub mod logging;
pub mod session;
pub mod status;
pub mod validate;
