//! Dataset loading: the built-in motor-trend table and a delimited-text reader.

use crate::error::{AnalysisError, Result};
use crate::table::{Column, Table};
use std::path::Path;

/// One record of the 1974 Motor Trend road-test data.
struct CarRecord {
    model: &'static str,
    mpg: f64,
    cyl: f64,
    disp: f64,
    hp: f64,
    drat: f64,
    wt: f64,
    qsec: f64,
    vs: f64,
    am: f64,
    gear: f64,
    carb: f64,
}

const fn car(
    model: &'static str,
    mpg: f64,
    cyl: f64,
    disp: f64,
    hp: f64,
    drat: f64,
    wt: f64,
    qsec: f64,
    vs: f64,
    am: f64,
    gear: f64,
    carb: f64,
) -> CarRecord {
    CarRecord { model, mpg, cyl, disp, hp, drat, wt, qsec, vs, am, gear, carb }
}

/// The 32 road-tested cars: fuel economy plus ten design/performance
/// attributes. `vs` is engine shape (0 = v-shaped, 1 = straight), `am` is
/// transmission (0 = automatic, 1 = manual).
#[rustfmt::skip]
const CARS: [CarRecord; 32] = [
    car("Mazda RX4",           21.0, 6.0, 160.0, 110.0, 3.90, 2.620, 16.46, 0.0, 1.0, 4.0, 4.0),
    car("Mazda RX4 Wag",       21.0, 6.0, 160.0, 110.0, 3.90, 2.875, 17.02, 0.0, 1.0, 4.0, 4.0),
    car("Datsun 710",          22.8, 4.0, 108.0,  93.0, 3.85, 2.320, 18.61, 1.0, 1.0, 4.0, 1.0),
    car("Hornet 4 Drive",      21.4, 6.0, 258.0, 110.0, 3.08, 3.215, 19.44, 1.0, 0.0, 3.0, 1.0),
    car("Hornet Sportabout",   18.7, 8.0, 360.0, 175.0, 3.15, 3.440, 17.02, 0.0, 0.0, 3.0, 2.0),
    car("Valiant",             18.1, 6.0, 225.0, 105.0, 2.76, 3.460, 20.22, 1.0, 0.0, 3.0, 1.0),
    car("Duster 360",          14.3, 8.0, 360.0, 245.0, 3.21, 3.570, 15.84, 0.0, 0.0, 3.0, 4.0),
    car("Merc 240D",           24.4, 4.0, 146.7,  62.0, 3.69, 3.190, 20.00, 1.0, 0.0, 4.0, 2.0),
    car("Merc 230",            22.8, 4.0, 140.8,  95.0, 3.92, 3.150, 22.90, 1.0, 0.0, 4.0, 2.0),
    car("Merc 280",            19.2, 6.0, 167.6, 123.0, 3.92, 3.440, 18.30, 1.0, 0.0, 4.0, 4.0),
    car("Merc 280C",           17.8, 6.0, 167.6, 123.0, 3.92, 3.440, 18.90, 1.0, 0.0, 4.0, 4.0),
    car("Merc 450SE",          16.4, 8.0, 275.8, 180.0, 3.07, 4.070, 17.40, 0.0, 0.0, 3.0, 3.0),
    car("Merc 450SL",          17.3, 8.0, 275.8, 180.0, 3.07, 3.730, 17.60, 0.0, 0.0, 3.0, 3.0),
    car("Merc 450SLC",         15.2, 8.0, 275.8, 180.0, 3.07, 3.780, 18.00, 0.0, 0.0, 3.0, 3.0),
    car("Cadillac Fleetwood",  10.4, 8.0, 472.0, 205.0, 2.93, 5.250, 17.98, 0.0, 0.0, 3.0, 4.0),
    car("Lincoln Continental", 10.4, 8.0, 460.0, 215.0, 3.00, 5.424, 17.82, 0.0, 0.0, 3.0, 4.0),
    car("Chrysler Imperial",   14.7, 8.0, 440.0, 230.0, 3.23, 5.345, 17.42, 0.0, 0.0, 3.0, 4.0),
    car("Fiat 128",            32.4, 4.0,  78.7,  66.0, 4.08, 2.200, 19.47, 1.0, 1.0, 4.0, 1.0),
    car("Honda Civic",         30.4, 4.0,  75.7,  52.0, 4.93, 1.615, 18.52, 1.0, 1.0, 4.0, 2.0),
    car("Toyota Corolla",      33.9, 4.0,  71.1,  65.0, 4.22, 1.835, 19.90, 1.0, 1.0, 4.0, 1.0),
    car("Toyota Corona",       21.5, 4.0, 120.1,  97.0, 3.70, 2.465, 20.01, 1.0, 0.0, 3.0, 1.0),
    car("Dodge Challenger",    15.5, 8.0, 318.0, 150.0, 2.76, 3.520, 16.87, 0.0, 0.0, 3.0, 2.0),
    car("AMC Javelin",         15.2, 8.0, 304.0, 150.0, 3.15, 3.435, 17.30, 0.0, 0.0, 3.0, 2.0),
    car("Camaro Z28",          13.3, 8.0, 350.0, 245.0, 3.73, 3.840, 15.41, 0.0, 0.0, 3.0, 4.0),
    car("Pontiac Firebird",    19.2, 8.0, 400.0, 175.0, 3.08, 3.845, 17.05, 0.0, 0.0, 3.0, 2.0),
    car("Fiat X1-9",           27.3, 4.0,  79.0,  66.0, 4.08, 1.935, 18.90, 1.0, 1.0, 4.0, 1.0),
    car("Porsche 914-2",       26.0, 4.0, 120.3,  91.0, 4.43, 2.140, 16.70, 0.0, 1.0, 5.0, 2.0),
    car("Lotus Europa",        30.4, 4.0,  95.1, 113.0, 3.77, 1.513, 16.90, 1.0, 1.0, 5.0, 2.0),
    car("Ford Pantera L",      15.8, 8.0, 351.0, 264.0, 4.22, 3.170, 14.50, 0.0, 1.0, 5.0, 4.0),
    car("Ferrari Dino",        19.7, 6.0, 145.0, 175.0, 3.62, 2.770, 15.50, 0.0, 1.0, 5.0, 6.0),
    car("Maserati Bora",       15.0, 8.0, 301.0, 335.0, 3.54, 3.570, 14.60, 0.0, 1.0, 5.0, 8.0),
    car("Volvo 142E",          21.4, 4.0, 121.0, 109.0, 4.11, 1.780, 18.60, 1.0, 1.0, 4.0, 2.0),
];

/// Build the fixed in-memory motor-trend table: a `model` label column
/// followed by the eleven numeric attributes.
pub fn motor_trend() -> Table {
    let mut table = Table::new();
    let models = CARS.iter().map(|c| c.model.to_string()).collect();
    // Column names are distinct and lengths all equal 32, so adds cannot fail.
    table
        .add_column("model", Column::Categorical(models))
        .unwrap_or_else(|_| unreachable!("fixed dataset columns are well-formed"));
    let numeric: [(&str, fn(&CarRecord) -> f64); 11] = [
        ("mpg", |c| c.mpg),
        ("cyl", |c| c.cyl),
        ("disp", |c| c.disp),
        ("hp", |c| c.hp),
        ("drat", |c| c.drat),
        ("wt", |c| c.wt),
        ("qsec", |c| c.qsec),
        ("vs", |c| c.vs),
        ("am", |c| c.am),
        ("gear", |c| c.gear),
        ("carb", |c| c.carb),
    ];
    for (name, get) in numeric {
        table
            .add_column(name, Column::Numeric(CARS.iter().map(get).collect()))
            .unwrap_or_else(|_| unreachable!("fixed dataset columns are well-formed"));
    }
    table
}

/// Read a comma-delimited file with a header row into a [`Table`].
///
/// Column types are inferred: a column where every field parses as a number
/// becomes numeric, anything else becomes categorical.
pub fn load_csv(path: &Path) -> Result<Table> {
    let content = std::fs::read_to_string(path)?;
    parse_delimited(&content)
}

/// Parse delimited text (comma separator, RFC-4180 quoting) into a table.
pub fn parse_delimited(input: &str) -> Result<Table> {
    let rows = tokenize(input)?;
    let mut rows = rows.into_iter();
    let header = rows.next().ok_or(AnalysisError::Parse {
        line: 1,
        message: "input has no header row".to_string(),
    })?;
    let width = header.len();

    let mut fields: Vec<Vec<String>> = vec![Vec::new(); width];
    for (i, row) in rows.enumerate() {
        if row.len() != width {
            return Err(AnalysisError::Parse {
                line: i + 2,
                message: format!("expected {width} fields, got {}", row.len()),
            });
        }
        for (col, field) in fields.iter_mut().zip(row) {
            col.push(field);
        }
    }

    let mut table = Table::new();
    for (name, values) in header.into_iter().zip(fields) {
        let parsed: Option<Vec<f64>> =
            values.iter().map(|v| v.trim().parse::<f64>().ok()).collect();
        let column = match parsed {
            Some(numeric) => Column::Numeric(numeric),
            None => Column::Categorical(values),
        };
        table.add_column(name, column)?;
    }
    Ok(table)
}

/// Split delimited text into rows of fields, honoring quoted fields with
/// embedded commas, escaped quotes, and CRLF line endings.
fn tokenize(input: &str) -> Result<Vec<Vec<String>>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' if field.is_empty() => in_quotes = true,
                ',' => row.push(std::mem::take(&mut field)),
                '\r' => {}
                '\n' => {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                _ => field.push(c),
            }
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    while rows.last().is_some_and(|r| r.iter().all(String::is_empty)) {
        rows.pop();
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motor_trend_dimensions() {
        let t = motor_trend();
        assert_eq!(t.row_count(), 32);
        assert_eq!(t.column_count(), 12); // model + 11 attributes
        assert_eq!(t.numeric_names().len(), 11);
    }

    #[test]
    fn test_motor_trend_known_values() {
        let t = motor_trend();
        let mpg = t.numeric("mpg").unwrap();
        assert_eq!(mpg[0], 21.0);
        assert_eq!(mpg[19], 33.9); // Toyota Corolla, best economy
        let models = t.categorical("model").unwrap();
        assert_eq!(models[31], "Volvo 142E");
    }

    #[test]
    fn test_parse_delimited_type_inference() {
        let t = parse_delimited("name,score\nalpha,1.5\nbeta,2\n").unwrap();
        assert_eq!(t.row_count(), 2);
        assert!(t.numeric("score").is_ok());
        assert!(t.categorical("name").is_ok());
    }

    #[test]
    fn test_parse_delimited_quoted_fields() {
        let t = parse_delimited("name,x\n\"a, b\",1\n\"say \"\"hi\"\"\",2\n").unwrap();
        let names = t.categorical("name").unwrap();
        assert_eq!(names[0], "a, b");
        assert_eq!(names[1], "say \"hi\"");
    }

    #[test]
    fn test_parse_delimited_ragged_row_fails() {
        let err = parse_delimited("a,b\n1,2\n3\n").unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_parse_delimited_empty_input_fails() {
        assert!(parse_delimited("").is_err());
    }
}
