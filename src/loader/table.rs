//! Delimited table parser (.csv format)
//!
//! Parses the comma-separated card tables into rows mapping column name to
//! value. Handles quoted fields with embedded commas, doubled quotes and
//! line breaks, and strips a UTF-8 byte order mark.

use crate::{BoosterError, Result};
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{char, line_ending},
    combinator::{map, opt, value},
    multi::{fold_many0, separated_list1},
    sequence::delimited,
    IResult,
};
use rustc_hash::FxHashMap;

/// A parsed table: header row plus data rows in file order
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    headers: Vec<String>,
    rows: Vec<Row>,
}

/// One data row, keyed by column name
#[derive(Debug, Clone, Default)]
pub struct Row {
    /// 1-based data row number (the header is row 0)
    pub number: usize,
    fields: FxHashMap<String, String>,
}

impl Row {
    /// Value of a column, None when the row is shorter than the header
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

impl Table {
    /// Parse a whole table from its text content
    pub fn parse(name: &str, content: &str) -> Result<Table> {
        let mut input = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut records: Vec<Vec<String>> = Vec::new();

        while !input.is_empty() {
            let (rest, fields) = record(input).map_err(|e| BoosterError::Table {
                table: name.to_string(),
                row: records.len(),
                message: e.to_string(),
            })?;

            let rest = match line_ending::<_, nom::error::Error<&str>>(rest) {
                Ok((rest, _)) => rest,
                Err(_) if rest.is_empty() => rest,
                Err(_) => {
                    let snippet: String = rest.chars().take(20).collect();
                    return Err(BoosterError::Table {
                        table: name.to_string(),
                        row: records.len(),
                        message: format!("unexpected characters after field: {snippet:?}"),
                    });
                }
            };

            // Blank lines carry no record
            if !(fields.len() == 1 && fields[0].is_empty()) {
                records.push(fields);
            }
            input = rest;
        }

        let mut records = records.into_iter();
        let headers = records.next().ok_or_else(|| BoosterError::Table {
            table: name.to_string(),
            row: 0,
            message: "missing header row".to_string(),
        })?;

        let rows = records
            .enumerate()
            .map(|(i, values)| Row {
                number: i + 1,
                fields: headers.iter().cloned().zip(values).collect(),
            })
            .collect();

        Ok(Table {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of a column that every row must carry
    pub fn require<'a>(&self, row: &'a Row, column: &str) -> Result<&'a str> {
        row.get(column).ok_or_else(|| BoosterError::Table {
            table: self.name.clone(),
            row: row.number,
            message: format!("missing column '{column}'"),
        })
    }

    /// Non-negative integer column; a blank cell counts as zero
    pub fn require_count(&self, row: &Row, column: &str) -> Result<usize> {
        let raw = self.require(row, column)?.trim();
        if raw.is_empty() {
            return Ok(0);
        }
        raw.parse::<usize>().map_err(|_| BoosterError::Table {
            table: self.name.clone(),
            row: row.number,
            message: format!("column '{column}' is not a count: {raw:?}"),
        })
    }
}

fn quoted_field(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        fold_many0(
            alt((is_not("\""), value("\"", tag("\"\"")))),
            String::new,
            |mut acc: String, part: &str| {
                acc.push_str(part);
                acc
            },
        ),
        char('"'),
    )(input)
}

fn bare_field(input: &str) -> IResult<&str, String> {
    map(opt(is_not(",\r\n")), |s: Option<&str>| {
        s.unwrap_or_default().to_string()
    })(input)
}

fn field(input: &str) -> IResult<&str, String> {
    alt((quoted_field, bare_field))(input)
}

fn record(input: &str) -> IResult<&str, Vec<String>> {
    separated_list1(char(','), field)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_table() {
        let content = "Abbrev,Full Name\nJyhad,Jyhad\nBH,Black Hand\n";
        let table = Table::parse("sets", content).unwrap();

        assert_eq!(table.headers(), &["Abbrev".to_string(), "Full Name".to_string()]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].get("Abbrev"), Some("BH"));
        assert_eq!(table.rows()[1].get("Full Name"), Some("Black Hand"));
        assert_eq!(table.rows()[1].number, 2);
    }

    #[test]
    fn test_quoted_fields() {
        let content = "Name,Set,Text\r\n\"Bum's Rush\",\"Jyhad:C, VTES:C\",\"Say \"\"hi\"\",\nthen leave\"\r\n";
        let table = Table::parse("library", content).unwrap();

        assert_eq!(table.len(), 1);
        let row = &table.rows()[0];
        assert_eq!(row.get("Name"), Some("Bum's Rush"));
        assert_eq!(row.get("Set"), Some("Jyhad:C, VTES:C"));
        assert_eq!(row.get("Text"), Some("Say \"hi\",\nthen leave"));
    }

    #[test]
    fn test_empty_and_short_rows() {
        let content = "\u{feff}Name,Adv,Set\nAlpha,,Jyhad:V\n\nBeta\n";
        let table = Table::parse("crypt", content).unwrap();

        assert_eq!(table.headers()[0], "Name");
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].get("Adv"), Some(""));
        assert_eq!(table.rows()[1].get("Set"), None);
        assert!(table.require(&table.rows()[1], "Set").is_err());
    }

    #[test]
    fn test_empty_quoted_field() {
        let table = Table::parse("t", "A,B,C\n\"\",x,\"\"\n").unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.get("A"), Some(""));
        assert_eq!(row.get("B"), Some("x"));
        assert_eq!(row.get("C"), Some(""));
    }

    #[test]
    fn test_trailing_garbage_is_an_error() {
        let err = Table::parse("sets", "Abbrev,Full Name\n\"BH\"x,Black Hand\n").unwrap_err();
        match err {
            BoosterError::Table { table, row, .. } => {
                assert_eq!(table, "sets");
                assert_eq!(row, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_header() {
        assert!(Table::parse("sets", "").is_err());
        assert!(Table::parse("sets", "\n\n").is_err());
    }

    #[test]
    fn test_require_count() {
        let table = Table::parse("boosters", "Set,C,V,U,R\nKoT,8,,2,x\n").unwrap();
        let row = &table.rows()[0];
        assert_eq!(table.require_count(row, "C").unwrap(), 8);
        assert_eq!(table.require_count(row, "V").unwrap(), 0);
        assert!(table.require_count(row, "R").is_err());
    }
}
