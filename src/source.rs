//! Load the input CSV into a typed, column-normalized dataset.
//!
//! Column names are trimmed and lowercased so that matching downstream is
//! case- and whitespace-insensitive. `views` and `likes` are coerced to
//! Float64 here, so the aggregation layer never sees raw text values:
//! non-numeric or missing `views` become 0, while `likes` keeps nulls (a
//! missing like count is excluded from ratios, not treated as zero).

use color_eyre::Result;
use polars::prelude::*;
use std::path::Path;

use crate::OpenOptions;

pub fn load_dataset(path: &Path, options: &OpenOptions) -> Result<DataFrame> {
    let mut read_options = CsvReadOptions::default();
    if let Some(has_header) = options.has_header {
        read_options.has_header = has_header;
    }
    if let Some(delimiter) = options.delimiter {
        read_options = read_options.map_parse_options(|opts| opts.with_separator(delimiter));
    }
    let mut df = read_options
        .try_into_reader_with_file_path(Some(path.into()))?
        .finish()?;

    normalize_column_names(&mut df)?;
    coerce_numeric(&mut df, "views", true)?;
    coerce_numeric(&mut df, "likes", false)?;
    Ok(df)
}

/// Trim and lowercase every column name in place.
fn normalize_column_names(df: &mut DataFrame) -> Result<()> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    for name in names {
        let normalized = name.trim().to_lowercase();
        if normalized != name {
            df.rename(&name, normalized.into())?;
        }
    }
    Ok(())
}

/// Cast the named column to Float64 if present. Values that fail to parse
/// become null; with `fill_zero`, nulls are then replaced by 0.
fn coerce_numeric(df: &mut DataFrame, name: &str, fill_zero: bool) -> Result<()> {
    if df.schema().get(name).is_none() {
        return Ok(());
    }
    let column = df.column(name)?.cast(&DataType::Float64)?;
    let mut series = column.take_materialized_series();
    if fill_zero {
        series = series.fill_null(FillNullStrategy::Zero)?;
    }
    df.with_column(series)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn normalizes_header_case_and_whitespace() {
        let file = write_csv("Title, VIEWS ,Likes\na,100,10\n");
        let df = load_dataset(file.path(), &OpenOptions::default()).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["title", "views", "likes"]);
    }

    #[test]
    fn non_numeric_views_become_zero() {
        let file = write_csv("title,views\na,100\nb,abc\nc,\n");
        let df = load_dataset(file.path(), &OpenOptions::default()).unwrap();
        let views: Vec<f64> = df.column("views").unwrap().f64().unwrap().iter().flatten().collect();
        assert_eq!(views, vec![100.0, 0.0, 0.0]);
    }

    #[test]
    fn missing_likes_stay_null() {
        let file = write_csv("title,views,likes\na,100,10\nb,50,\n");
        let df = load_dataset(file.path(), &OpenOptions::default()).unwrap();
        let likes = df.column("likes").unwrap();
        assert_eq!(likes.null_count(), 1);
        assert_eq!(likes.f64().unwrap().get(0), Some(10.0));
    }

    #[test]
    fn absent_columns_are_left_alone() {
        let file = write_csv("title,channel_title\na,ch1\n");
        let df = load_dataset(file.path(), &OpenOptions::default()).unwrap();
        assert!(df.schema().get("views").is_none());
        assert!(df.schema().get("likes").is_none());
    }

    #[test]
    fn custom_delimiter() {
        let file = write_csv("title;views\na;100\n");
        let options = OpenOptions::default().with_delimiter(b';');
        let df = load_dataset(file.path(), &options).unwrap();
        assert_eq!(df.column("views").unwrap().f64().unwrap().get(0), Some(100.0));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = load_dataset(Path::new("does/not/exist.csv"), &OpenOptions::default());
        assert!(result.is_err());
    }
}
