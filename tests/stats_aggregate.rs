use civic_triage::{
    fixture,
    model::{Category, Report, Status},
    stats::{ReportStats, aggregate_stats, category_distribution, recent},
};

fn shuffled_collection() -> Vec<Report> {
    let base = fixture::builtin().unwrap();
    let statuses = [Status::Resolved, Status::Pending, Status::Pending, Status::Rejected];
    let categories = [Category::Parks, Category::Roads, Category::Parks, Category::Waste];
    (0..23u64)
        .map(|i| {
            let mut r = base[(i % 6) as usize].clone();
            r.id = i + 1;
            r.status = statuses[(i % 4) as usize];
            r.category = categories[(i % 4) as usize];
            r
        })
        .collect()
}

#[test]
fn fixture_stats() {
    let reports = fixture::builtin().unwrap();
    let stats = aggregate_stats(&reports);
    assert_eq!(
        stats,
        ReportStats {
            total: 6,
            pending: 2,
            approved: 2,
            resolved: 1,
            rejected: 1,
        }
    );
}

#[test]
fn status_counts_sum_to_total() {
    for reports in [fixture::builtin().unwrap(), shuffled_collection(), Vec::new()] {
        let stats = aggregate_stats(&reports);
        let sum: usize = Status::ALL.iter().map(|s| stats.count(*s)).sum();
        assert_eq!(stats.total, reports.len());
        assert_eq!(sum, stats.total);
    }
}

#[test]
fn fixture_categories_in_first_seen_order() {
    let reports = fixture::builtin().unwrap();
    let dist = category_distribution(&reports);
    let order: Vec<Category> = dist.iter().map(|c| c.category).collect();
    assert_eq!(
        order,
        vec![
            Category::Roads,
            Category::Water,
            Category::Waste,
            Category::PublicSafety,
            Category::Parks,
            Category::Utilities,
        ]
    );
    assert!(dist.iter().all(|c| c.count == 1));
    assert!(dist.iter().all(|c| c.percentage == 16.7));
}

#[test]
fn distribution_groups_once_per_category() {
    let reports = shuffled_collection();
    let dist = category_distribution(&reports);
    let order: Vec<Category> = dist.iter().map(|c| c.category).collect();
    assert_eq!(order, vec![Category::Parks, Category::Roads, Category::Waste]);
    assert_eq!(dist.iter().map(|c| c.count).sum::<usize>(), reports.len());
    assert_eq!(dist[0].count, 12);
}

#[test]
fn recent_takes_head_of_collection() {
    let reports = fixture::builtin().unwrap();
    let head: Vec<u64> = recent(&reports, 5).iter().map(|r| r.id).collect();
    assert_eq!(head, vec![1, 2, 3, 4, 5]);
    assert_eq!(recent(&reports, 50).len(), 6);
}
