mod export;
mod summary;
pub mod views;

pub use export::{roster_csv_string, write_roster_csv, ExportError};
pub use summary::{client_roster, dashboard, stage_catalog};
pub use views::ClientProgressReport;
