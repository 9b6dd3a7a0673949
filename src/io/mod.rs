pub mod config_io;
pub mod data_dir;
pub mod diagnostics;
pub mod storage;
pub mod store;
