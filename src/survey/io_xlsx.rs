// Primitives for reading Excel workbooks, as downloaded from Google Forms or Microsoft Forms.

use calamine::{open_workbook, DataType, Reader, Xlsx};

use survey_aggregation::builder::Builder;

use crate::survey::{
    config_reader::{ColumnMapping, FileSource},
    io_common::{add_row, get_col_index_mapping, is_blank_row},
    *,
};

pub fn read_xlsx_survey(
    path: &str,
    cfs: &FileSource,
    columns: &ColumnMapping,
) -> SurveyResult<Vec<Record>> {
    let wrange = get_range(path, cfs)?;

    let mut iter = wrange.rows();
    let header: Vec<Option<String>> = iter
        .next()
        .context(EmptyExcelSnafu { path })?
        .iter()
        .map(read_cell)
        .collect();
    debug!("read_xlsx_survey: header: {:?}", header);
    let col_indexes = get_col_index_mapping(columns, &header)?;

    let mut builder = Builder::new();
    for (idx, cells) in iter.enumerate() {
        let row: Vec<Option<String>> = cells.iter().map(read_cell).collect();
        if is_blank_row(&row) {
            debug!("read_xlsx_survey: row {}: blank, skipping", idx + 1);
            continue;
        }
        debug!("read_xlsx_survey: row {}: {:?}", idx + 1, row);
        add_row(&mut builder, &col_indexes, &row);
    }
    info!("read_xlsx_survey: {:?}: {} records", path, builder.len());
    Ok(builder.build())
}

/// The text of a cell. Whole numbers are written without decimals, so that a
/// satisfaction level stored as a number compares equal to its label.
fn read_cell(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) => Some(s.clone()),
        DataType::Int(i) => Some(i.to_string()),
        DataType::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(format!("{:.0}", f)),
        DataType::Float(f) => Some(f.to_string()),
        DataType::Bool(b) => Some(b.to_string()),
        DataType::DateTime(f) => Some(f.to_string()),
        DataType::Empty => None,
        other => {
            warn!("read_cell: could not understand cell {:?}, skipping", other);
            None
        }
    }
}

fn get_range(path: &str, cfs: &FileSource) -> SurveyResult<calamine::Range<DataType>> {
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        path, &cfs.excel_worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = cfs.excel_worksheet_name.as_deref() {
        workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                name: worksheet_name,
                path,
            })?
            .context(OpeningExcelSnafu { path })
    } else {
        workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })
    }
}
