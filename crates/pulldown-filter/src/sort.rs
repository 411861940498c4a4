//! Multi-column sorting.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use pulldown_common::{Column, Record};

use crate::error::{FilterError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: Column,
    pub direction: SortDirection,
}

/// Parse `LFC:desc,Gene` into sort keys. Direction defaults to ascending.
pub fn parse_sort(input: &str) -> Result<Vec<SortKey>> {
    input.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (name, dir) = match part.rsplit_once(':') {
                Some((name, dir)) => (name, Some(dir.trim())),
                None => (part, None),
            };
            let column = Column::from_name(name)
                .ok_or_else(|| FilterError::UnknownColumn(name.trim().to_string()))?;
            let direction = match dir.map(str::to_ascii_lowercase).as_deref() {
                None | Some("asc") => SortDirection::Asc,
                Some("desc") => SortDirection::Desc,
                Some(other) => return Err(FilterError::SortDirection(other.to_string())),
            };
            Ok(SortKey { column, direction })
        })
        .collect()
}

/// Stable sort by each key in turn; the first key has priority.
pub fn sort_rows(rows: &mut [&Record], keys: &[SortKey]) {
    if keys.is_empty() {
        return;
    }
    rows.sort_by(|a, b| {
        keys.iter()
            .map(|key| {
                let ord = a.cell(key.column).total_cmp(&b.cell(key.column));
                match key.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rec(gene: &str, bait: &str, lfc: f64) -> Record {
        Record::new("P1", gene, "Ovary", bait, lfc, 0.01).unwrap()
    }

    #[test]
    fn test_parse_sort() {
        let keys = parse_sort("LFC:desc, gene").unwrap();
        assert_eq!(
            keys,
            vec![
                SortKey { column: Column::Lfc, direction: SortDirection::Desc },
                SortKey { column: Column::Gene, direction: SortDirection::Asc },
            ]
        );
        assert!(parse_sort("").unwrap().is_empty());
        assert_eq!(parse_sort("LFC:up"), Err(FilterError::SortDirection("up".into())));
        assert_eq!(parse_sort("Score"), Err(FilterError::UnknownColumn("Score".into())));
    }

    #[test]
    fn test_multi_column_sort_is_stable() {
        let records = vec![
            rec("b", "D1", 1.0),
            rec("a", "Prod", 2.0),
            rec("c", "D1", 2.0),
            rec("d", "Prod", 1.0),
        ];
        let mut rows: Vec<&Record> = records.iter().collect();
        sort_rows(&mut rows, &parse_sort("Bait,LFC:desc").unwrap());
        let genes: Vec<&str> = rows.iter().map(|r| r.gene.as_str()).collect();
        assert_eq!(genes, vec!["c", "b", "a", "d"]);
    }

    #[test]
    fn test_no_keys_keeps_order() {
        let records = vec![rec("b", "D1", 1.0), rec("a", "D1", 0.0)];
        let mut rows: Vec<&Record> = records.iter().collect();
        sort_rows(&mut rows, &[]);
        assert_eq!(rows[0].gene, "b");
    }
}
