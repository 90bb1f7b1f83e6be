// Module exports for models

pub mod entry;
pub mod section;
pub mod settings;
