//! Aggregation layer.
//!
//! Pure transformations from the query layer's tabular rows into the ranked
//! tables, pivots, and comparison metrics the dashboard renders. Nothing in
//! this module touches the database: every function is input rows in,
//! result table out, so the whole layer is testable without a connection.

mod comparison;
mod rounds;
mod standings;

pub use comparison::*;
pub use rounds::*;
pub use standings::*;

/// Round value to one decimal for display.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Sort round names naturally so "round 2" comes before "round 10".
///
/// Names without digits sort after numbered rounds, alphabetically.
pub fn sort_round_names(names: &mut [String]) {
    names.sort_by(|a, b| round_sort_key(a).cmp(&round_sort_key(b)));
}

fn round_sort_key(name: &str) -> (u64, String) {
    let digits: String = name.chars().filter(|c| c.is_ascii_digit()).collect();
    let number = digits.parse::<u64>().unwrap_or(u64::MAX);
    (number, name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_round_names_numeric() {
        let mut names = vec![
            "round 10".to_string(),
            "round 2".to_string(),
            "round 1".to_string(),
        ];
        sort_round_names(&mut names);
        assert_eq!(names, vec!["round 1", "round 2", "round 10"]);
    }

    #[test]
    fn test_sort_round_names_unnumbered_last() {
        let mut names = vec![
            "blitz".to_string(),
            "round 3".to_string(),
            "aces".to_string(),
        ];
        sort_round_names(&mut names);
        assert_eq!(names, vec!["round 3", "aces", "blitz"]);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(2.349), 2.3);
        assert_eq!(round1(2.35), 2.4);
    }
}
