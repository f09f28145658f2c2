use std::collections::BTreeMap;
use std::io::Read;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Failed to read records: {0}")]
    Csv(#[from] csv::Error),
}

/// One row of card data, keyed by column header.
///
/// Empty cells are treated as absent, so `get` never returns `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub const TITLE: &'static str = "title";
    pub const BACKTEXT: &'static str = "backtext";
    pub const PHOTO_URL: &'static str = "photo_url";
    pub const BG_COLOR: &'static str = "bg_color";
    pub const LEVEL: &'static str = "level";

    const KNOWN: [&'static str; 5] = [
        Self::TITLE,
        Self::BACKTEXT,
        Self::PHOTO_URL,
        Self::BG_COLOR,
        Self::LEVEL,
    ];

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get(Self::TITLE)
    }

    pub fn backtext(&self) -> Option<&str> {
        self.get(Self::BACKTEXT)
    }

    pub fn photo_url(&self) -> Option<&str> {
        self.get(Self::PHOTO_URL)
    }

    pub fn bg_color(&self) -> Option<&str> {
        self.get(Self::BG_COLOR)
    }

    pub fn level(&self) -> Option<&str> {
        self.get(Self::LEVEL)
    }

    /// Fields the card generator does not interpret, in key order.
    pub fn passthrough(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter(|(k, _)| !Self::KNOWN.contains(&k.as_str()))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v): &(String, String)| !v.is_empty())
            .collect();
        Self { fields }
    }
}

/// Reads CSV data whose header row names the record fields.
///
/// Header names are trimmed. Any malformed row (including a row with the
/// wrong number of cells) fails the whole read.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>, RecordError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        records.push(headers.iter().zip(row.iter()).collect());
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_row_names_fields() {
        let data = "title,backtext,photo_url\nAda Lovelace,\"## Notes\nFirst **programmer**\",ada.png\n";
        let records = read_records(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.title(), Some("Ada Lovelace"));
        assert_eq!(r.backtext(), Some("## Notes\nFirst **programmer**"));
        assert_eq!(r.photo_url(), Some("ada.png"));
        assert_eq!(r.bg_color(), None);
    }

    #[test]
    fn empty_cells_are_absent() {
        let data = "title,bg_color,level\nBob,,\n";
        let records = read_records(data.as_bytes()).unwrap();
        assert_eq!(records[0].bg_color(), None);
        assert_eq!(records[0].level(), None);
        assert_eq!(records[0].len(), 1);
    }

    #[test]
    fn headers_are_trimmed() {
        let data = " title , level \nX,3\n";
        let records = read_records(data.as_bytes()).unwrap();
        assert_eq!(records[0].title(), Some("X"));
        assert_eq!(records[0].level(), Some("3"));
    }

    #[test]
    fn extra_columns_pass_through() {
        let data = "title,rarity,artist\nX,rare,Someone\n";
        let records = read_records(data.as_bytes()).unwrap();
        let extra: Vec<_> = records[0].passthrough().collect();
        assert_eq!(extra, vec![("artist", "Someone"), ("rarity", "rare")]);
    }

    #[test]
    fn ragged_row_fails_the_batch() {
        let data = "title,backtext\nA,text\nB\n";
        let err = read_records(data.as_bytes()).unwrap_err();
        assert!(matches!(err, RecordError::Csv(_)));
    }

    #[test]
    fn header_only_input_has_no_records() {
        let records = read_records("title,backtext\n".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn collect_from_pairs() {
        let record: Record = [("title", "T"), ("backtext", "")].into_iter().collect();
        assert_eq!(record.title(), Some("T"));
        assert!(record.backtext().is_none());
    }
}
