use super::record::OccurrenceRecord;
use std::io::Read;

/// Reads a spreadsheet export. The operations desk saves with `;` as often as
/// with `,`, so the delimiter is taken from whichever the header line uses.
pub(crate) fn parse_records<R: Read>(mut reader: R) -> Result<Vec<OccurrenceRecord>, ParseFailure> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    let raw = raw.trim_start_matches('\u{feff}');

    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .delimiter(sniff_delimiter(raw))
        .from_reader(raw.as_bytes());
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<OccurrenceRecord>() {
        records.push(record?);
    }

    Ok(records)
}

#[derive(Debug)]
pub(crate) enum ParseFailure {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl From<std::io::Error> for ParseFailure {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ParseFailure {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub(super) fn sniff_delimiter(raw: &str) -> u8 {
    let header = raw.lines().next().unwrap_or_default();
    if header.matches(';').count() > header.matches(',').count() {
        b';'
    } else {
        b','
    }
}

