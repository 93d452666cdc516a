use std::fs::File;
use std::path::Path;

use crate::data_structures::CaseRecord;
use crate::error::VizError;

// Macro which expands into color definition
#[macro_export]
macro_rules! predefined_color {
    ($name:ident, $r:expr, $g:expr, $b:expr, $doc:expr) => {
        #[doc = $doc]
        pub const $name: RGBColor = RGBColor($r, $g, $b);
    };

    ($name:ident, $r:expr, $g:expr, $b:expr, $a: expr, $doc:expr) => {
        #[doc = $doc]
        pub const $name: RGBAColor = RGBAColor($r, $g, $b, $a);
    }
}

/// Loads the case dataset from a CSV file. Columns beyond
/// date/state/confirmed/deaths are ignored, rows keep file order.
pub fn load_cases<P: AsRef<Path>>(path: P) -> Result<Vec<CaseRecord>, VizError> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: CaseRecord = row?;
        records.push(record);
    }
    Ok(records)
}

/// Formats an integer with thousands separators, 1234567 -> "1,234,567".
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
