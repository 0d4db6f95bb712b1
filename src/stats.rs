use crate::model::{Category, Report, Status};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub resolved: usize,
    pub rejected: usize,
}

impl ReportStats {
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Pending => self.pending,
            Status::Approved => self.approved,
            Status::Resolved => self.resolved,
            Status::Rejected => self.rejected,
        }
    }
}

pub fn aggregate_stats(reports: &[Report]) -> ReportStats {
    let mut stats = ReportStats {
        total: reports.len(),
        ..Default::default()
    };
    for r in reports {
        match r.status {
            Status::Pending => stats.pending += 1,
            Status::Approved => stats.approved += 1,
            Status::Resolved => stats.resolved += 1,
            Status::Rejected => stats.rejected += 1,
        }
    }
    stats
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
    /// Share of the whole collection, one decimal place.
    pub percentage: f64,
}

/// Counts per category in first-seen order.
pub fn category_distribution(reports: &[Report]) -> Vec<CategoryCount> {
    let mut out: Vec<CategoryCount> = Vec::new();
    for r in reports {
        match out.iter_mut().find(|c| c.category == r.category) {
            Some(entry) => entry.count += 1,
            None => out.push(CategoryCount {
                category: r.category,
                count: 1,
                percentage: 0.0,
            }),
        }
    }

    let total = reports.len();
    for entry in &mut out {
        entry.percentage = percentage(entry.count, total);
    }
    out
}

/// The head of the collection, as the overview's recent panel shows it.
pub fn recent(reports: &[Report], limit: usize) -> &[Report] {
    &reports[..limit.min(reports.len())]
}

pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = part as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert_eq!(percentage(1, 6), 16.7);
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(3, 3), 100.0);
    }

    #[test]
    fn empty_collection_has_zero_stats() {
        assert_eq!(aggregate_stats(&[]), ReportStats::default());
        assert!(category_distribution(&[]).is_empty());
        assert!(recent(&[], 5).is_empty());
    }
}
