pub mod csv_export;
pub mod csv_import;
pub mod file;
pub mod settings;

pub use file::{load_schedule, save_schedule};
pub use settings::Settings;
