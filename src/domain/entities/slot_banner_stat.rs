//! Per-(slot, banner, group) show/click counters.

use sqlx::FromRow;

/// One row of rotation statistics for a banner linked to a slot, scoped to
/// a social group.
///
/// Counters come from an outer join against the stats table: a linked banner
/// with no recorded shows in the group yields NULL counters. Both are kept
/// as `Option<i64>` and projected to 0 through [`clicks`](Self::clicks) and
/// [`shows`](Self::shows).
///
/// `shows >= clicks` is not an invariant: a click may be counted against a
/// row whose shows were recorded by an earlier process.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SlotBannerStat {
    pub banner_id: String,
    pub clicks_amount: Option<i64>,
    pub shows_amount: Option<i64>,
}

impl SlotBannerStat {
    pub fn clicks(&self) -> i64 {
        self.clicks_amount.unwrap_or(0)
    }

    pub fn shows(&self) -> i64 {
        self.shows_amount.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_counters_project_to_zero() {
        let stat = SlotBannerStat {
            banner_id: "b-1".to_string(),
            clicks_amount: None,
            shows_amount: None,
        };

        assert_eq!(stat.clicks(), 0);
        assert_eq!(stat.shows(), 0);
    }

    #[test]
    fn present_counters_project_as_is() {
        let stat = SlotBannerStat {
            banner_id: "b-1".to_string(),
            clicks_amount: Some(3),
            shows_amount: Some(17),
        };

        assert_eq!(stat.clicks(), 3);
        assert_eq!(stat.shows(), 17);
    }
}
