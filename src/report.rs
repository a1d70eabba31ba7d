//! Read-only numbers over a finished `ResultTable`: the metrics, distributions, leaderboards and
//! name word counts the dashboard draws.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::record::ProductRecord;
use crate::ResultTable;

pub const DEFAULT_PRICE_BINS: usize = 20;
pub const DEFAULT_TOP: usize = 10;

/// Plain English filler words. Product words such as "men" or "pack" are counted.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "by", "for", "from", "in", "of", "on", "or", "the", "to", "with",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total_products: usize,
    pub average_price: Option<f64>,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Box-plot numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

pub fn summary(table: &ResultTable) -> Summary {
    Summary {
        total_products: table.len(),
        average_price: mean(table.prices()),
        average_rating: mean(table.ratings()),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Equal-width bins spanning the present prices. The last bin is closed on the right.
pub fn price_histogram(table: &ResultTable, bins: usize) -> Vec<HistogramBin> {
    let prices: Vec<f64> = table.prices().collect();
    if prices.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: prices.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut hist: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();
    for price in prices {
        let idx = (((price - min) / width) as usize).min(bins - 1);
        hist[idx].count += 1;
    }
    hist
}

/// `None` when no record has a price.
pub fn price_quartiles(table: &ResultTable) -> Option<Quartiles> {
    let mut prices: Vec<f64> = table.prices().collect();
    if prices.is_empty() {
        return None;
    }
    prices.sort_by(f64::total_cmp);
    Some(Quartiles {
        min: prices[0],
        q1: quantile(&prices, 0.25),
        median: quantile(&prices, 0.5),
        q3: quantile(&prices, 0.75),
        max: prices[prices.len() - 1],
    })
}

/// Linear interpolation between closest ranks. `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Ratings rounded to one decimal with how often each occurs, ascending by rating.
pub fn rating_counts(table: &ResultTable) -> Vec<(f64, usize)> {
    // Keyed by tenths so the map can order them.
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for rating in table.ratings() {
        *counts.entry((rating * 10.0).round() as i64).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(tenths, count)| (tenths as f64 / 10.0, count))
        .collect()
}

pub fn top_by_price(table: &ResultTable, n: usize) -> Vec<&ProductRecord> {
    top_by(table, n, |r| r.price)
}

pub fn top_by_rating(table: &ResultTable, n: usize) -> Vec<&ProductRecord> {
    top_by(table, n, |r| r.rating)
}

/// Records with the largest `key`, descending. Records without a value are left out
/// and ties keep table order.
fn top_by(
    table: &ResultTable,
    n: usize,
    key: impl Fn(&ProductRecord) -> Option<f64>,
) -> Vec<&ProductRecord> {
    let mut ranked: Vec<(f64, &ProductRecord)> =
        table.iter().filter_map(|r| key(r).map(|v| (v, r))).collect();
    // Stable sort keeps table order for ties.
    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    ranked.into_iter().take(n).map(|(_, r)| r).collect()
}

/// Word counts over product names, for the word cloud. Placeholder names are skipped.
/// Sorted by count descending, then alphabetically.
pub fn word_frequencies(table: &ResultTable, n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for name in table.iter().filter_map(|r| r.name.text()) {
        for word in name
            .split(|c: char| !c.is_alphanumeric())
            .map(str::to_lowercase)
            .filter(|w| w.chars().count() > 1 && !STOPWORDS.contains(&w.as_str()))
        {
            *counts.entry(word).or_default() += 1;
        }
    }

    let mut words: Vec<(String, usize)> = counts.into_iter().collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    words.truncate(n);
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Label;

    fn record(name: Option<&str>, price: Option<f64>, rating: Option<f64>) -> ProductRecord {
        ProductRecord {
            name: name.map_or(Label::NotAvailable, |n| Label::Text(n.into())),
            price,
            discount: Label::NotAvailable,
            rating,
        }
    }

    fn sample() -> ResultTable {
        ResultTable::from(vec![
            record(Some("Men Cotton Polo T-Shirt"), Some(500.0), Some(4.3)),
            record(Some("Cotton Round Neck T-Shirt"), None, Some(4.04)),
            record(None, Some(100.0), None),
            record(Some("Printed Polo"), Some(300.0), Some(4.26)),
            record(Some("Cotton Polo"), Some(500.0), None),
        ])
    }

    #[test]
    fn summary_ignores_absent_values() {
        let s = summary(&sample());
        assert_eq!(s.total_products, 5);
        assert_eq!(s.average_price, Some(350.0));
        let avg_rating = s.average_rating.unwrap();
        assert!((avg_rating - 4.2).abs() < 1e-9);
    }

    #[test]
    fn summary_of_empty_table() {
        let s = summary(&ResultTable::new());
        assert_eq!(s.total_products, 0);
        assert_eq!(s.average_price, None);
        assert_eq!(s.average_rating, None);
    }

    #[test]
    fn histogram_covers_every_price() {
        let hist = price_histogram(&sample(), 4);
        assert_eq!(hist.len(), 4);
        assert_eq!(hist[0].start, 100.0);
        assert_eq!(hist[3].end, 500.0);
        assert_eq!(hist.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 0, 1, 2]);
    }

    #[test]
    fn histogram_of_single_price() {
        let table = ResultTable::from(vec![record(None, Some(9.0), None), record(None, Some(9.0), None)]);
        assert_eq!(
            price_histogram(&table, DEFAULT_PRICE_BINS),
            vec![HistogramBin {
                start: 9.0,
                end: 9.0,
                count: 2
            }]
        );
        assert!(price_histogram(&ResultTable::new(), DEFAULT_PRICE_BINS).is_empty());
    }

    #[test]
    fn quartiles_interpolate() {
        let q = price_quartiles(&sample()).unwrap();
        assert_eq!(
            q,
            Quartiles {
                min: 100.0,
                q1: 250.0,
                median: 400.0,
                q3: 500.0,
                max: 500.0
            }
        );
        assert_eq!(price_quartiles(&ResultTable::new()), None);
    }

    #[test]
    fn ratings_are_rounded_and_counted() {
        assert_eq!(rating_counts(&sample()), vec![(4.0, 1), (4.3, 2)]);
    }

    #[test]
    fn leaderboards_skip_absent_and_keep_tie_order() {
        let table = sample();
        let by_price: Vec<_> = top_by_price(&table, 2).iter().map(|r| r.name.to_string()).collect();
        assert_eq!(by_price, vec!["Men Cotton Polo T-Shirt", "Cotton Polo"]);

        let by_rating = top_by_rating(&table, DEFAULT_TOP);
        assert_eq!(by_rating.len(), 3);
        assert_eq!(by_rating[0].rating, Some(4.3));
        assert_eq!(by_rating[2].rating, Some(4.04));
    }

    #[test]
    fn word_counts_from_names() {
        let words = word_frequencies(&sample(), 3);
        assert_eq!(
            words,
            vec![("cotton".to_string(), 3), ("polo".to_string(), 3), ("shirt".to_string(), 2)]
        );
    }

    #[test]
    fn product_words_are_not_stopwords() {
        let table = ResultTable::from(vec![
            record(Some("Pack of 2 Men Shirts for Men"), None, None),
            record(Some("Women and the Sea"), None, None),
        ]);
        let words = word_frequencies(&table, DEFAULT_TOP);
        assert_eq!(
            words,
            vec![
                ("men".to_string(), 2),
                ("pack".to_string(), 1),
                ("sea".to_string(), 1),
                ("shirts".to_string(), 1),
                ("women".to_string(), 1),
            ]
        );
    }
}
