// Service module exports

pub mod backup;
pub mod entry;
pub mod report;
pub mod settings;
pub mod storage;
pub mod timeline;
