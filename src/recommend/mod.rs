//! Recommendations
//!
//! Ranks items by a score learned from the user's favorite/unfavorite
//! labels. The scoring model is pluggable; none is bundled.

use std::cmp::Ordering;

use crate::error::{ClientError, ClientResult};

/// Default number of recommendations returned.
pub const DEFAULT_TOP_N: usize = 10;

/// User label on an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Label {
    Favorite,
    Unfavorite,
    #[default]
    Unknown,
}

impl Label {
    /// Numeric training target.
    pub fn target(&self) -> f64 {
        match self {
            Label::Favorite => 1.0,
            Label::Unfavorite => -1.0,
            Label::Unknown => 0.0,
        }
    }

    /// Check whether the user has labelled the item.
    pub fn is_known(&self) -> bool {
        !matches!(self, Label::Unknown)
    }
}

impl From<Option<bool>> for Label {
    fn from(favorite: Option<bool>) -> Self {
        match favorite {
            Some(true) => Label::Favorite,
            Some(false) => Label::Unfavorite,
            None => Label::Unknown,
        }
    }
}

/// An item with its label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledItem<T> {
    pub item: T,
    pub label: Label,
}

impl<T> LabeledItem<T> {
    /// Create new labelled item.
    pub fn new(item: T, label: Label) -> Self {
        Self { item, label }
    }
}

/// Scoring model interface.
pub trait ScoringStrategy<T> {
    /// Trained model.
    type Model;

    /// Fit a model on labelled rows. Every row passed here has a known label.
    fn train(&self, rows: &[&LabeledItem<T>]) -> ClientResult<Self::Model>;

    /// Score every row; one score per row, in order.
    fn score(&self, model: &Self::Model, rows: &[LabeledItem<T>]) -> ClientResult<Vec<f64>>;
}

/// Recommend up to `top_n` items.
///
/// Trains on labelled rows, scores all rows, keeps strictly positive scores
/// and returns items by descending score.
pub fn recommend<T, S>(strategy: &S, items: &[LabeledItem<T>], top_n: usize) -> ClientResult<Vec<T>>
where
    T: Clone,
    S: ScoringStrategy<T>,
{
    let training: Vec<&LabeledItem<T>> = items.iter().filter(|row| row.label.is_known()).collect();
    let model = strategy.train(&training)?;
    let scores = strategy.score(&model, items)?;

    if scores.len() != items.len() {
        return Err(ClientError::Internal(format!(
            "scoring returned {} values for {} items",
            scores.len(),
            items.len()
        )));
    }

    let mut ranked: Vec<(&LabeledItem<T>, f64)> = items
        .iter()
        .zip(scores)
        .filter(|(_, score)| *score > 0.0)
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    Ok(ranked
        .into_iter()
        .take(top_n)
        .map(|(row, _)| row.item.clone())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Clone, Debug, PartialEq)]
    struct Shirt {
        name: &'static str,
        color: &'static str,
    }

    /// Mean label per color.
    struct ColorMean;

    impl ScoringStrategy<Shirt> for ColorMean {
        type Model = HashMap<&'static str, f64>;

        fn train(&self, rows: &[&LabeledItem<Shirt>]) -> ClientResult<Self::Model> {
            let mut sums: HashMap<&'static str, (f64, f64)> = HashMap::new();
            for row in rows {
                let entry = sums.entry(row.item.color).or_default();
                entry.0 += row.label.target();
                entry.1 += 1.0;
            }
            Ok(sums.into_iter().map(|(k, (sum, n))| (k, sum / n)).collect())
        }

        fn score(&self, model: &Self::Model, rows: &[LabeledItem<Shirt>]) -> ClientResult<Vec<f64>> {
            Ok(rows
                .iter()
                .map(|row| model.get(row.item.color).copied().unwrap_or(0.0))
                .collect())
        }
    }

    struct Broken;

    impl ScoringStrategy<Shirt> for Broken {
        type Model = ();

        fn train(&self, _: &[&LabeledItem<Shirt>]) -> ClientResult<()> {
            Ok(())
        }

        fn score(&self, _: &(), _: &[LabeledItem<Shirt>]) -> ClientResult<Vec<f64>> {
            Ok(vec![1.0])
        }
    }

    fn shirt(name: &'static str, color: &'static str, label: Label) -> LabeledItem<Shirt> {
        LabeledItem::new(Shirt { name, color }, label)
    }

    #[test]
    fn test_label_targets() {
        assert_eq!(Label::from(Some(true)).target(), 1.0);
        assert_eq!(Label::from(Some(false)).target(), -1.0);
        assert_eq!(Label::from(None).target(), 0.0);
    }

    #[test]
    fn test_keeps_positive_scores_in_order() {
        let items = vec![
            shirt("a", "red", Label::Favorite),
            shirt("b", "blue", Label::Unfavorite),
            shirt("c", "red", Label::Unknown),
            shirt("d", "green", Label::Favorite),
            shirt("e", "green", Label::Unfavorite),
            shirt("f", "green", Label::Favorite),
        ];

        let names: Vec<_> = recommend(&ColorMean, &items, DEFAULT_TOP_N)
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();

        assert_eq!(names[..2], ["a", "c"]);
        assert_eq!(names, ["a", "c", "d", "e", "f"]);
        assert!(!names.contains(&"b"));
    }

    #[test]
    fn test_top_n_limits_results() {
        let items: Vec<_> = (0..15).map(|_| shirt("x", "red", Label::Favorite)).collect();
        assert_eq!(recommend(&ColorMean, &items, DEFAULT_TOP_N).unwrap().len(), 10);
        assert_eq!(recommend(&ColorMean, &items, 3).unwrap().len(), 3);
    }

    #[test]
    fn test_unlabelled_only_yields_nothing() {
        let items = vec![shirt("a", "red", Label::Unknown)];
        assert!(recommend(&ColorMean, &items, DEFAULT_TOP_N).unwrap().is_empty());
    }

    #[test]
    fn test_score_count_mismatch() {
        let items = vec![shirt("a", "red", Label::Favorite), shirt("b", "red", Label::Favorite)];
        assert!(matches!(
            recommend(&Broken, &items, DEFAULT_TOP_N),
            Err(ClientError::Internal(_))
        ));
    }
}
