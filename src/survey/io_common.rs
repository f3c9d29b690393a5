use std::collections::HashMap;
use std::path::Path;

use survey_aggregation::builder::Builder;

use crate::survey::{config_reader::ColumnMapping, *};

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Given the header of a file (names of each of the columns), finds the column
/// index of every field.
///
/// A missing required column is an error. Other missing columns are skipped:
/// the corresponding fields will be absent in every record.
pub fn get_col_index_mapping(
    columns: &ColumnMapping,
    header: &[Option<String>],
) -> SurveyResult<Vec<(Field, usize)>> {
    let mut col_names: HashMap<&str, usize> = HashMap::new();
    for (idx, name) in header.iter().enumerate() {
        if let Some(name) = name {
            // Keep the first column in case of duplicates.
            col_names.entry(name.as_str()).or_insert(idx);
        }
    }
    debug!("get_col_index_mapping: col_names: {:?}", col_names);

    let mut col_indexes: Vec<(Field, usize)> = Vec::new();
    for field in Field::ALL {
        let cname = columns.column(field);
        match col_names.get(cname) {
            Some(idx) => col_indexes.push((field, *idx)),
            None if ColumnMapping::is_required(field) => {
                return MissingColumnSnafu {
                    field,
                    column: cname,
                }
                .fail();
            }
            None => {
                warn!(
                    "get_col_index_mapping: column {:?} for {:?} not found, the field will be empty",
                    cname, field
                );
            }
        }
    }
    Ok(col_indexes)
}

/// True if the row has no cell with content.
pub fn is_blank_row(row: &[Option<String>]) -> bool {
    row.iter()
        .all(|c| c.as_deref().map(|s| s.is_empty()).unwrap_or(true))
}

/// Adds one row to the table. Cells past the end of the row are absent fields.
pub fn add_row(builder: &mut Builder, col_indexes: &[(Field, usize)], row: &[Option<String>]) {
    let fields: Vec<(Field, &str)> = col_indexes
        .iter()
        .filter_map(|(field, idx)| {
            row.get(*idx)
                .and_then(|c| c.as_deref())
                .map(|s| (*field, s))
        })
        .collect();
    builder.add_record(&fields);
}
