//! Derived views over a fetched row set: filter, then sort, then page.
//!
//! Every step is pure and recomputed from the base fetch; nothing here
//! touches the network.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::value::Row;

/// Fixed number of rows shown per page.
pub const PAGE_SIZE: usize = 50;

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Keep rows where any column's string form contains `query`, ignoring case.
///
/// An empty query keeps everything.
pub fn filter_rows<'a>(rows: &'a [Row], query: &str) -> Vec<&'a Row> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.iter().collect();
    }
    rows.iter()
        .filter(|row| {
            row.values()
                .any(|v| v.as_plain_string().to_lowercase().contains(&needle))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Sort
// ---------------------------------------------------------------------------

/// Current sort column and direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: Option<String>,
    #[serde(default)]
    pub descending: bool,
}

impl SortState {
    /// Apply a click on a column header.
    ///
    /// Clicking the active column flips the direction; clicking another
    /// column makes it active in ascending order.
    pub fn toggle(&mut self, column: &str) {
        if self.column.as_deref() == Some(column) {
            self.descending = !self.descending;
        } else {
            self.column = Some(column.to_string());
            self.descending = false;
        }
    }
}

/// Sort rows in place by the active column. Stable; a missing cell sorts as "".
pub fn sort_rows(rows: &mut [&Row], sort: &SortState) {
    let Some(column) = sort.column.as_deref() else {
        return;
    };
    rows.sort_by(|a, b| {
        let left = a.get(column).map(|v| v.as_plain_string()).unwrap_or_default();
        let right = b.get(column).map(|v| v.as_plain_string()).unwrap_or_default();
        let ord = natural_cmp(&left, &right);
        if sort.descending {
            ord.reverse()
        } else {
            ord
        }
    });
}

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits: Option<bool> = None;
    for (idx, c) in s.char_indices() {
        let is_digit = c.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != is_digit => {
                out.push(make_chunk(&s[start..idx], prev));
                start = idx;
            }
            _ => {}
        }
        in_digits = Some(is_digit);
    }
    if let Some(prev) = in_digits {
        out.push(make_chunk(&s[start..], prev));
    }
    out
}

fn make_chunk(text: &str, digits: bool) -> Chunk<'_> {
    if digits {
        Chunk::Digits(text)
    } else {
        Chunk::Text(text)
    }
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Case-insensitive comparison that orders embedded numbers by value.
///
/// `"Room 9" < "Room 10"`, `"a" == "A"` on the first pass. Digit runs sort
/// before text. Strings equal under those rules fall back to a byte
/// comparison so the order is total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);
    for (l, r) in left.iter().zip(right.iter()) {
        let ord = match (l, r) {
            (Chunk::Digits(x), Chunk::Digits(y)) => cmp_digits(x, y),
            (Chunk::Text(x), Chunk::Text(y)) => cmp_text(x, y),
            (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    left.len().cmp(&right.len()).then_with(|| a.cmp(b))
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// Number of pages needed for `total` rows. Zero rows means zero pages.
pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE)
}

/// The slice of `items` shown on page `page` (zero-based).
///
/// A page past the end is empty rather than an error.
pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    let start = page.saturating_mul(PAGE_SIZE).min(items.len());
    let end = start.saturating_add(PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// One rendered page of a filtered, sorted row set.
#[derive(Debug)]
pub struct TableView<'a> {
    pub rows: Vec<&'a Row>,
    /// Rows surviving the filter, across all pages.
    pub total: usize,
    pub page: usize,
    pub page_count: usize,
}

/// Filter, sort, and return everything (used by export and by paging).
pub fn filtered_sorted<'a>(rows: &'a [Row], query: &str, sort: &SortState) -> Vec<&'a Row> {
    let mut kept = filter_rows(rows, query);
    sort_rows(&mut kept, sort);
    kept
}

/// Filter, sort, and slice out one page.
pub fn derive_view<'a>(rows: &'a [Row], query: &str, sort: &SortState, page: usize) -> TableView<'a> {
    let all = filtered_sorted(rows, query, sort);
    let total = all.len();
    TableView {
        rows: page_slice(&all, page).to_vec(),
        total,
        page,
        page_count: page_count(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn numbered(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| row(&[("id", Value::from(i as i64)), ("name", Value::from(format!("row {i}")))]))
            .collect()
    }

    // -- filter ---------------------------------------------------------------

    #[test]
    fn filter_matches_any_column_case_insensitively() {
        let rows = vec![
            row(&[("name", Value::from("A. Karim")), ("dept", Value::from("CSE"))]),
            row(&[("name", Value::from("B. Rahman")), ("dept", Value::from("EEE"))]),
        ];
        let kept = filter_rows(&rows, "cse");
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0]["name"], Value::from("A. Karim"));
    }

    #[test]
    fn filter_sees_numbers_and_booleans() {
        let rows = vec![
            row(&[("room", Value::from(302)), ("found", Value::from(false))]),
            row(&[("room", Value::from(110)), ("found", Value::from(true))]),
        ];
        assert_eq!(filter_rows(&rows, "30").len(), 1);
        assert_eq!(filter_rows(&rows, "TRUE").len(), 1);
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let rows = numbered(3);
        assert_eq!(filter_rows(&rows, "  ").len(), 3);
    }

    // -- sort -----------------------------------------------------------------

    #[test]
    fn natural_order_for_embedded_numbers() {
        assert_eq!(natural_cmp("Room 9", "Room 10"), Ordering::Less);
        assert_eq!(natural_cmp("2", "10"), Ordering::Less);
        // Equal by value, so the byte order breaks the tie.
        assert_eq!(natural_cmp("07", "7"), Ordering::Less);
        assert_eq!(natural_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(natural_cmp("abc", "abcd"), Ordering::Less);
    }

    #[test]
    fn toggle_flips_same_column_and_resets_on_new_column() {
        let mut sort = SortState::default();
        sort.toggle("name");
        assert_eq!(sort.column.as_deref(), Some("name"));
        assert!(!sort.descending);
        sort.toggle("name");
        assert!(sort.descending);
        sort.toggle("room");
        assert_eq!(sort.column.as_deref(), Some("room"));
        assert!(!sort.descending);
    }

    #[test]
    fn sort_descending_by_numeric_strings() {
        let rows = vec![
            row(&[("seat", Value::from("A-2"))]),
            row(&[("seat", Value::from("A-10"))]),
            row(&[("seat", Value::from("A-1"))]),
        ];
        let sort = SortState {
            column: Some("seat".into()),
            descending: true,
        };
        let sorted = filtered_sorted(&rows, "", &sort);
        let seats: Vec<String> = sorted.iter().map(|r| r["seat"].as_plain_string()).collect();
        assert_eq!(seats, vec!["A-10", "A-2", "A-1"]);
    }

    // -- page -----------------------------------------------------------------

    #[test]
    fn page_count_is_ceiling() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(50), 1);
        assert_eq!(page_count(51), 2);
        assert_eq!(page_count(120), 3);
    }

    #[test]
    fn pages_concatenate_to_the_full_set_exactly_once() {
        for n in [0usize, 1, 49, 50, 51, 100, 137] {
            let rows = numbered(n);
            let sort = SortState {
                column: Some("name".into()),
                descending: false,
            };
            let all = filtered_sorted(&rows, "", &sort);
            let pages = page_count(all.len());
            let mut joined: Vec<&Row> = Vec::new();
            for p in 0..pages {
                let view = derive_view(&rows, "", &sort, p);
                assert!(view.rows.len() <= PAGE_SIZE);
                joined.extend(view.rows);
            }
            assert_eq!(joined, all, "n = {n}");
        }
    }

    #[test]
    fn page_past_end_is_empty() {
        let rows = numbered(10);
        let view = derive_view(&rows, "", &SortState::default(), 4);
        assert!(view.rows.is_empty());
        assert_eq!(view.total, 10);
        assert_eq!(view.page_count, 1);
    }
}
