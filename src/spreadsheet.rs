//! Reads repository URL candidates from a workbook.

use crate::error::{AutoStarError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::info;

/// Collect the `github.com` strings found in the first column of the first worksheet.
///
/// Any format `calamine` can detect from the extension (xlsx, xlsm, xls, ods) is accepted.
pub fn load_repository_urls(path: &Path) -> Result<Vec<String>> {
    info!("Reading spreadsheet {}", path.display());

    let mut workbook = open_workbook_auto(path).map_err(|e| {
        AutoStarError::Spreadsheet(format!("failed to open {}: {}", path.display(), e))
    })?;

    let sheet_name = workbook.sheet_names().first().cloned().ok_or_else(|| {
        AutoStarError::Spreadsheet(format!("{} has no worksheets", path.display()))
    })?;

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
        AutoStarError::Spreadsheet(format!("failed to read worksheet {}: {}", sheet_name, e))
    })?;

    info!(worksheet = %sheet_name, rows = range.height(), "Loaded worksheet");

    let urls = candidate_urls(range.rows());
    info!("Found {} GitHub repository URLs", urls.len());

    Ok(urls)
}

/// First-column string cells that mention `github.com`, trimmed.
pub fn candidate_urls<'a, I>(rows: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [Data]>,
{
    rows.into_iter()
        .filter_map(|row| match row.first() {
            Some(Data::String(cell)) if !cell.is_empty() => {
                let url = cell.trim();
                url.contains("github.com").then(|| url.to_string())
            }
            _ => None,
        })
        .collect()
}
