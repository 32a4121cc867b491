pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod names;
pub mod write;

pub use config::ExportConfig;
pub use error::{ExportError, Stage};
pub use export::export;
pub use names::{CountryRecord, NameList};
