//! Shared CLI utilities.

use crate::flow::{ColumnType, SchemeName};

/// Parse a comma-separated string into a `Vec<String>`, trimming whitespace and
/// discarding empty segments.  Returns `None` when `value` is `None`.
pub fn parse_csv(value: &Option<String>) -> Option<Vec<String>> {
    value.as_ref().map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.to_string())
            .collect::<Vec<_>>()
    })
}

/// `--columns company,indication,drug` into column types.
pub fn parse_columns(value: &Option<String>) -> anyhow::Result<Option<Vec<ColumnType>>> {
    let Some(parts) = parse_csv(value) else {
        return Ok(None);
    };
    let columns = parts.iter().map(|p| ColumnType::parse(p)).collect::<Result<Vec<_>, _>>()?;
    Ok(Some(columns))
}

/// clap value parser for `--scheme`.
pub fn parse_scheme(value: &str) -> Result<SchemeName, String> {
    SchemeName::parse(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_trims_and_drops_empty_parts() {
        assert_eq!(
            parse_csv(&Some(" a, ,b ,".to_string())),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(parse_csv(&None), None);
    }

    #[test]
    fn columns_parse_in_order() {
        let columns = parse_columns(&Some("company, issue ,year".to_string())).expect("columns");
        assert_eq!(columns, Some(vec![ColumnType::Company, ColumnType::Category, ColumnType::Year]));
        assert!(parse_columns(&Some("company,planet".to_string())).is_err());
    }

    #[test]
    fn scheme_names_are_case_insensitive() {
        assert_eq!(parse_scheme("Products"), Ok(SchemeName::Products));
        assert!(parse_scheme("galaxies").is_err());
    }
}
