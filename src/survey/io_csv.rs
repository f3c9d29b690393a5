// Primitives for reading CSV files.

use std::io;

use survey_aggregation::builder::Builder;

use crate::survey::{
    config_reader::ColumnMapping,
    io_common::{add_row, get_col_index_mapping, is_blank_row},
    *,
};

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    // Forms exports drop the trailing empty cells of some rows.
    builder.has_headers(true).flexible(true);
    builder
}

pub fn read_csv_survey(path: &str, columns: &ColumnMapping) -> SurveyResult<Vec<Record>> {
    let rdr = reader_builder()
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let table = read_csv_records(rdr, columns)?;
    info!("read_csv_survey: {:?}: {} records", path, table.len());
    Ok(table)
}

pub fn read_csv_records<R: io::Read>(
    mut rdr: csv::Reader<R>,
    columns: &ColumnMapping,
) -> SurveyResult<Vec<Record>> {
    let header: Vec<Option<String>> = rdr
        .headers()
        .context(CsvHeaderSnafu {})?
        .iter()
        .map(|s| Some(s.to_string()))
        .collect();
    debug!("read_csv_records: header: {:?}", header);
    let col_indexes = get_col_index_mapping(columns, &header)?;

    let mut builder = Builder::new();
    for (idx, line_r) in rdr.records().enumerate() {
        let row_number = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { row: row_number })?;
        let row: Vec<Option<String>> = line.iter().map(|s| Some(s.to_string())).collect();
        if is_blank_row(&row) {
            debug!("read_csv_records: row {}: blank, skipping", row_number);
            continue;
        }
        debug!("read_csv_records: row {}: {:?}", row_number, row);
        add_row(&mut builder, &col_indexes, &row);
    }
    Ok(builder.build())
}
