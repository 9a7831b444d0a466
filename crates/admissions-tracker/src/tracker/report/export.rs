use super::views::ClientSummaryView;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write roster CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush roster CSV: {0}")]
    Flush(String),
    #[error("roster CSV was not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Serialize)]
struct RosterRow<'a> {
    client_id: &'a str,
    name: &'a str,
    email: &'a str,
    stream: &'static str,
    applicable: usize,
    completed: usize,
    progress_percent: u8,
    stages_complete: usize,
    created_at: String,
}

impl<'a> From<&'a ClientSummaryView> for RosterRow<'a> {
    fn from(view: &'a ClientSummaryView) -> Self {
        Self {
            client_id: view.client_id.as_str(),
            name: &view.name,
            email: &view.email,
            stream: view.stream_label,
            applicable: view.applicable,
            completed: view.completed,
            progress_percent: view.progress_percent,
            stages_complete: view.stages_complete,
            created_at: view.created_at.to_rfc3339(),
        }
    }
}

pub fn write_roster_csv<W: Write>(rows: &[ClientSummaryView], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(RosterRow::from(row))?;
    }
    csv_writer
        .flush()
        .map_err(|err| ExportError::Flush(err.to_string()))?;
    Ok(())
}

pub fn roster_csv_string(rows: &[ClientSummaryView]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_roster_csv(rows, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
