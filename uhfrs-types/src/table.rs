//! De-duplicated view of an inventory run

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use crate::tag::TagRecord;

/// A distinct tag and how often it was read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRow {
    /// First read of this tag
    pub record: TagRecord,

    /// Reads counted on the first antenna
    pub count: u32,

    pub last_seen: DateTime<Utc>,
}

/// Tags keyed by EPC + TID, in first-seen order
#[derive(Debug, Default)]
pub struct TagTable {
    rows: Vec<TagRow>,
    index: HashMap<String, usize>,
}

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a read; returns `true` if the tag was not in the table
    ///
    /// Repeat reads count only when they come from the antenna that first
    /// saw the tag.
    pub fn record(&mut self, record: TagRecord) -> bool {
        let key = format!("{}{}", record.epc, record.tid.as_deref().unwrap_or(""));

        if let Some(&i) = self.index.get(&key) {
            let row = &mut self.rows[i];
            if row.record.antenna == record.antenna {
                row.count += 1;
                row.last_seen = record.seen_at;
            }
            return false;
        }

        self.index.insert(key, self.rows.len());
        self.rows.push(TagRow {
            last_seen: record.seen_at,
            record,
            count: 1,
        });
        true
    }

    pub fn rows(&self) -> &[TagRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Time from the first tag to the most recently added one
    pub fn elapsed(&self) -> Duration {
        match (self.rows.first(), self.rows.last()) {
            (Some(first), Some(last)) => last.record.seen_at - first.record.seen_at,
            _ => Duration::zero(),
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn read(epc: &str, antenna: u8, second: u32) -> TagRecord {
        TagRecord::new(epc, antenna, -55)
            .unwrap()
            .with_seen_at(Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, second).unwrap())
    }

    #[test]
    fn test_new_tags_are_added_in_order() {
        let mut table = TagTable::new();
        assert!(table.is_empty());

        assert!(table.record(read("3000AA", 1, 0)));
        assert!(table.record(read("3000BB", 2, 3)));

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].record.epc, "3000AA");
        assert_eq!(table.rows()[1].record.epc, "3000BB");
        assert_eq!(table.elapsed(), Duration::seconds(3));
    }

    #[test]
    fn test_repeat_on_same_antenna_counts() {
        let mut table = TagTable::new();
        table.record(read("3000AA", 1, 0));

        assert!(!table.record(read("3000AA", 1, 5)));
        assert!(!table.record(read("3000AA", 1, 9)));

        let row = &table.rows()[0];
        assert_eq!(row.count, 3);
        assert_eq!(row.last_seen, Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 9).unwrap());
        // Only new tags move the elapsed window
        assert_eq!(table.elapsed(), Duration::zero());
    }

    #[test]
    fn test_repeat_on_other_antenna_is_not_counted() {
        let mut table = TagTable::new();
        table.record(read("3000AA", 1, 0));

        assert!(!table.record(read("3000AA", 2, 1)));
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].count, 1);
    }

    #[test]
    fn test_tid_is_part_of_the_key() {
        let mut table = TagTable::new();
        assert!(table.record(read("3000AA", 1, 0).with_tid("E200")));
        assert!(table.record(read("3000AA", 1, 1).with_tid("E201")));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut table = TagTable::new();
        table.record(read("3000AA", 1, 0));
        table.clear();

        assert!(table.is_empty());
        assert!(table.record(read("3000AA", 1, 2)));
    }
}
