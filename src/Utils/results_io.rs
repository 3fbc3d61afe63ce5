use csv::Writer;
use nalgebra::{DMatrix, DVector};
use std::fs::File;
use std::io::{self, Write};

/// Save a batch of evaluated piecewise polynomial values into a
/// tab-separated file: one header row (query argument name first, then one
/// name per polynomial column), one row per query point.
pub fn save_evaluation_to_file(
    values: &DMatrix<f64>,
    headers: &Vec<String>,
    filename: &str,
    queries: &DVector<f64>,
    arg: &String,
) -> io::Result<()> {
    let mut file = File::create(filename)?;
    let mut headers_with_arg = Vec::new();
    headers_with_arg.push(arg.clone());
    headers_with_arg.extend(headers.iter().cloned());
    // Write headers
    writeln!(file, "{}", headers_with_arg.join("\t"))?;
    for (i, row) in values.row_iter().enumerate() {
        let mut row_data = Vec::new();
        row_data.push(queries[i].to_string());
        row_data.extend(row.iter().map(|&val| val.to_string()));
        writeln!(file, "{}", row_data.join("\t"))?;
    }

    Ok(())
}

/// Same table in CSV form. NaN rows (queries outside the breakpoint span
/// with extrapolation disabled) are written verbatim.
pub fn save_evaluation_to_csv(
    values: &DMatrix<f64>,
    headers: &Vec<String>,
    filename: &str,
    queries: &DVector<f64>,
    arg: &String,
) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);

    // Prepare and write headers
    let mut headers_with_arg = Vec::new();
    headers_with_arg.push(arg.clone());
    headers_with_arg.extend(headers.iter().cloned());
    writer.write_record(&headers_with_arg)?;

    // Write data rows
    for (i, row) in values.row_iter().enumerate() {
        let mut row_data = Vec::new();
        row_data.push(queries[i].to_string());
        row_data.extend(row.iter().map(|&val| val.to_string()));
        writer.write_record(&row_data)?;
    }

    writer.flush()?;
    Ok(())
}
