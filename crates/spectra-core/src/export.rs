use crate::domain::{SpectraError, SpectraResult};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes `headers` then `rows` as comma-separated text to `folder/filename`,
/// creating `folder` when missing. Returns the written path.
///
/// Every row must have exactly as many cells as there are headers; the check
/// runs before the file is created.
pub fn export_csv<R, C>(
    folder: impl AsRef<Path>,
    filename: &str,
    headers: &[&str],
    rows: R,
) -> SpectraResult<PathBuf>
where
    R: IntoIterator,
    R::Item: AsRef<[C]>,
    C: ToString,
{
    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(|row| row.as_ref().iter().map(ToString::to_string).collect())
        .collect();
    if let Some((index, row)) = rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != headers.len())
    {
        return Err(SpectraError::input_validation(
            "INPUT.CSV_ROW_WIDTH",
            format!(
                "row {} has {} cells, expected {} to match headers",
                index,
                row.len(),
                headers.len()
            ),
        ));
    }

    let folder = folder.as_ref();
    fs::create_dir_all(folder).map_err(|source| {
        SpectraError::io_system(
            "IO.CSV_DIRECTORY",
            format!("failed to create '{}': {}", folder.display(), source),
        )
    })?;

    let path = folder.join(filename);
    let write_error = |source: std::io::Error| {
        SpectraError::io_system(
            "IO.CSV_WRITE",
            format!("failed to write '{}': {}", path.display(), source),
        )
    };
    let file = fs::File::create(&path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    write_record(&mut writer, headers.iter().copied()).map_err(write_error)?;
    for row in &rows {
        write_record(&mut writer, row.iter().map(String::as_str)).map_err(write_error)?;
    }
    writer.flush().map_err(write_error)?;

    Ok(path)
}

fn write_record<'a>(
    writer: &mut impl Write,
    fields: impl Iterator<Item = &'a str>,
) -> std::io::Result<()> {
    let line = fields.map(escape_field).collect::<Vec<_>>().join(",");
    writeln!(writer, "{line}")
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
