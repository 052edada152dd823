pub mod export_csv;
pub mod export_json;

pub use export_csv::save_to_csv;
pub use export_json::save_to_json;
