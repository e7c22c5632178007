//! Client-side transforms for the review list: star filtering, date
//! ordering and the "show more" window. These run over the already
//! loaded reviews, so tweaking a filter never refetches.

use crate::models::fallback::parse_timestamp;
use crate::models::review::ReviewView;

/// How many reviews a fresh list shows before "show more".
pub const INITIAL_VISIBLE_REVIEWS: usize = 2;

/// Star filter selected in the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingFilter {
    #[default]
    All,
    Stars(u8),
}

impl RatingFilter {
    pub fn code(&self) -> String {
        match self {
            RatingFilter::All => "all".to_string(),
            RatingFilter::Stars(stars) => stars.to_string(),
        }
    }

    /// Parses a dropdown value; anything unrecognized selects all.
    pub fn from_code(code: &str) -> Self {
        match code {
            "1" | "2" | "3" | "4" | "5" => RatingFilter::Stars(code.parse().unwrap_or(5)),
            _ => RatingFilter::All,
        }
    }

    /// Fractional ratings count toward the nearest whole star, so a 4.5
    /// review shows up under the five-star filter.
    pub fn matches(&self, rating: f64) -> bool {
        match self {
            RatingFilter::All => true,
            RatingFilter::Stars(stars) => rating.round() as i64 == *stars as i64,
        }
    }
}

/// Date ordering selected in the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn code(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "oldest" => SortOrder::Oldest,
            _ => SortOrder::Newest,
        }
    }
}

/// Applies the star filter, then orders by creation date. The sort is
/// stable, so reviews whose timestamps are unparseable keep their
/// incoming order and sort as oldest.
pub fn filter_and_sort(
    reviews: &[ReviewView],
    filter: RatingFilter,
    order: SortOrder,
) -> Vec<ReviewView> {
    let mut selected: Vec<ReviewView> = reviews
        .iter()
        .filter(|review| filter.matches(review.rating))
        .cloned()
        .collect();
    selected.sort_by(|a, b| {
        let a = sort_key(a);
        let b = sort_key(b);
        match order {
            SortOrder::Newest => b.cmp(&a),
            SortOrder::Oldest => a.cmp(&b),
        }
    });
    selected
}

/// How many of the filtered reviews are on screen.
pub fn visible_count(filtered: usize, show_all: bool) -> usize {
    if show_all {
        filtered
    } else {
        filtered.min(INITIAL_VISIBLE_REVIEWS)
    }
}

/// Whether the list is long enough for a "show more" control.
pub fn has_hidden_reviews(filtered: usize) -> bool {
    filtered > INITIAL_VISIBLE_REVIEWS
}

fn sort_key(review: &ReviewView) -> i64 {
    parse_timestamp(&review.created_at)
        .map(|moment| moment.timestamp_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(id: &str, rating: f64, created_at: &str) -> ReviewView {
        ReviewView {
            id: id.to_string(),
            host_id: format!("h-{id}"),
            host_name: "Laura Méndez".to_string(),
            host_picture: "/placeholder.svg?height=40&width=40".to_string(),
            rating,
            comment: "Muy buena experiencia con el arrendatario.".to_string(),
            created_at: created_at.to_string(),
            date: String::new(),
        }
    }

    #[test]
    fn filter_codes_round_trip() {
        assert_eq!(RatingFilter::from_code("all"), RatingFilter::All);
        assert_eq!(RatingFilter::from_code("4"), RatingFilter::Stars(4));
        assert_eq!(RatingFilter::from_code("banana"), RatingFilter::All);
        assert_eq!(RatingFilter::Stars(3).code(), "3");
        assert_eq!(SortOrder::from_code("oldest"), SortOrder::Oldest);
        assert_eq!(SortOrder::from_code(""), SortOrder::Newest);
    }

    #[test]
    fn star_filter_rounds_fractional_ratings() {
        assert!(RatingFilter::Stars(5).matches(4.5));
        assert!(RatingFilter::Stars(4).matches(4.4));
        assert!(!RatingFilter::Stars(4).matches(4.5));
        assert!(RatingFilter::All.matches(1.2));
    }

    #[test]
    fn newest_first_is_the_default_order() {
        let reviews = vec![
            review("a", 5.0, "2024-01-05T08:00:00Z"),
            review("b", 4.0, "2024-03-01T08:00:00Z"),
            review("c", 3.0, "2024-02-10T08:00:00Z"),
        ];
        let sorted = filter_and_sort(&reviews, RatingFilter::All, SortOrder::Newest);
        let ids: Vec<&str> = sorted.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn oldest_order_reverses_and_unparseable_dates_sort_first() {
        let reviews = vec![
            review("a", 5.0, "2024-01-05T08:00:00Z"),
            review("b", 4.0, "no es una fecha"),
            review("c", 3.0, "2024-02-10T08:00:00Z"),
        ];
        let sorted = filter_and_sort(&reviews, RatingFilter::All, SortOrder::Oldest);
        let ids: Vec<&str> = sorted.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn equal_timestamps_keep_their_incoming_order() {
        let reviews = vec![
            review("a", 5.0, "2024-01-05T08:00:00Z"),
            review("b", 4.0, "2024-01-05T08:00:00Z"),
            review("c", 3.0, "2024-01-05T08:00:00Z"),
        ];
        let sorted = filter_and_sort(&reviews, RatingFilter::All, SortOrder::Oldest);
        let ids: Vec<&str> = sorted.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn filtering_runs_before_sorting() {
        let reviews = vec![
            review("a", 5.0, "2024-01-05T08:00:00Z"),
            review("b", 2.0, "2024-03-01T08:00:00Z"),
            review("c", 5.0, "2024-02-10T08:00:00Z"),
        ];
        let sorted = filter_and_sort(&reviews, RatingFilter::Stars(5), SortOrder::Newest);
        let ids: Vec<&str> = sorted.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["c", "a"]);
    }

    #[test]
    fn visible_window_expands_with_show_all() {
        assert_eq!(visible_count(5, false), 2);
        assert_eq!(visible_count(5, true), 5);
        assert_eq!(visible_count(1, false), 1);
        assert!(has_hidden_reviews(3));
        assert!(!has_hidden_reviews(2));
    }

    #[test]
    fn collapsed_default_view_shows_the_two_most_recent() {
        let reviews = vec![
            review("a", 5.0, "2024-01-05T08:00:00Z"),
            review("b", 4.0, "2024-03-01T08:00:00Z"),
            review("c", 3.0, "2024-02-10T08:00:00Z"),
            review("d", 2.0, "2024-05-20T08:00:00Z"),
            review("e", 1.0, "2024-04-15T08:00:00Z"),
        ];
        let sorted = filter_and_sort(&reviews, RatingFilter::All, SortOrder::Newest);
        let shown: Vec<&str> = sorted
            .iter()
            .take(visible_count(sorted.len(), false))
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(shown, ["d", "e"]);
    }
}
