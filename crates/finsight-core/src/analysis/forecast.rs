//! Next-period spend projection
//!
//! Each category's average is nudged by its positional trend:
//! `predicted = average * (1 + trend * 0.1)`. The total is the sum of the
//! rounded per-category predictions. A category named `total` would collide
//! with the reserved key, so it is left out of the projection entirely.

use std::collections::BTreeMap;

use crate::models::{CategoryPattern, Forecast};
use crate::stats::round2;

/// Weight applied to the pattern trend slope
pub const TREND_WEIGHT: f64 = 0.1;

pub fn project(patterns: &BTreeMap<String, CategoryPattern>) -> Forecast {
    let categories: BTreeMap<String, f64> = patterns
        .iter()
        .filter(|(category, _)| {
            let reserved = category.as_str() == Forecast::TOTAL_KEY;
            if reserved {
                tracing::debug!(
                    category = %category,
                    "Category collides with forecast total, not projected"
                );
            }
            !reserved
        })
        .map(|(category, pattern)| {
            let predicted = pattern.average * (1.0 + pattern.trend * TREND_WEIGHT);
            (category.clone(), round2(predicted))
        })
        .collect();

    let total = round2(categories.values().sum());

    Forecast { categories, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(average: f64, trend: f64) -> CategoryPattern {
        CategoryPattern {
            average,
            max: average,
            min: average,
            standard_deviation: 0.0,
            frequency: 1,
            trend,
        }
    }

    #[test]
    fn test_empty_patterns_yield_zero_total() {
        let forecast = project(&BTreeMap::new());
        assert!(forecast.categories.is_empty());
        assert_eq!(forecast.total, 0.0);
        assert_eq!(
            serde_json::to_value(&forecast).unwrap(),
            serde_json::json!({ "total": 0.0 })
        );
    }

    #[test]
    fn test_trend_adjusts_prediction() {
        let mut patterns = BTreeMap::new();
        patterns.insert("Lazer".to_string(), pattern(200.0, 0.5));
        patterns.insert("Mercado".to_string(), pattern(100.0, -1.0));
        patterns.insert("Saúde".to_string(), pattern(33.33, 0.0));

        let forecast = project(&patterns);
        assert_eq!(forecast.get("Lazer"), Some(210.0));
        assert_eq!(forecast.get("Mercado"), Some(90.0));
        assert_eq!(forecast.get("Saúde"), Some(33.33));
        assert_eq!(forecast.total, 333.33);
    }

    #[test]
    fn test_total_matches_sum_of_entries() {
        let mut patterns = BTreeMap::new();
        patterns.insert("A".to_string(), pattern(10.005, 0.333));
        patterns.insert("B".to_string(), pattern(19.99, -0.7));
        patterns.insert("C".to_string(), pattern(1234.56, 2.25));

        let forecast = project(&patterns);
        let sum: f64 = forecast.categories.values().sum();
        assert!((forecast.total - sum).abs() <= 0.01);
    }

    #[test]
    fn test_category_named_total_is_not_projected() {
        let mut patterns = BTreeMap::new();
        patterns.insert("total".to_string(), pattern(100.0, 0.0));
        patterns.insert("Lazer".to_string(), pattern(50.0, 0.0));

        let forecast = project(&patterns);
        assert_eq!(forecast.categories.len(), 1);
        assert_eq!(forecast.total, 50.0);

        let json = serde_json::to_value(&forecast).unwrap();
        let map = json.as_object().unwrap();
        let emitted: f64 = map
            .iter()
            .filter(|(key, _)| key.as_str() != Forecast::TOTAL_KEY)
            .map(|(_, value)| value.as_f64().unwrap())
            .sum();
        assert_eq!(map.len(), 2);
        assert_eq!(json["total"], emitted);
    }
}
