pub mod completion;
pub mod config;
pub mod toc;
pub mod version;
