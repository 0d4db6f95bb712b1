use crate::{
    error::{ParseValueError, TriageError},
    model::{Category, Report, ReportId, Status},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;

/// `All` or exactly one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T: PartialEq> Selector<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(want) => want == value,
        }
    }
}

impl<T: FromStr<Err = ParseValueError>> FromStr for Selector<T> {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Selector::All)
        } else {
            s.parse().map(Selector::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str("all"),
            Selector::Only(v) => v.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Severity,
}

impl FromStr for SortKey {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "severity" => Ok(SortKey::Severity),
            _ => Err(ParseValueError::new("sort key", s)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Severity => "severity",
        })
    }
}

/// The list screen's filter bar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportQuery {
    pub search_term: String,
    pub status: Selector<Status>,
    pub category: Selector<Category>,
    pub sort: SortKey,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub normalize_unicode: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
        }
    }
}

fn fold(s: &str, opts: SearchOptions) -> String {
    if opts.normalize_unicode {
        s.nfkc().collect::<String>().to_lowercase()
    } else {
        s.to_lowercase()
    }
}

struct SearchNeedle {
    folded: String,
    opts: SearchOptions,
}

impl SearchNeedle {
    fn new(term: &str, opts: SearchOptions) -> Self {
        Self {
            folded: fold(term, opts),
            opts,
        }
    }

    fn matches(&self, report: &Report) -> bool {
        if self.folded.is_empty() {
            return true;
        }
        [
            report.title.as_str(),
            report.description.as_str(),
            report.location.address.as_str(),
        ]
        .into_iter()
        .any(|field| fold(field, self.opts).contains(&self.folded))
    }
}

/// Filters `reports` by the query and orders the survivors by its sort key.
///
/// The sort is stable, so records that tie on the key keep their input order.
pub fn filter_and_sort<'a>(
    reports: &'a [Report],
    query: &ReportQuery,
    opts: SearchOptions,
) -> Vec<&'a Report> {
    let needle = SearchNeedle::new(&query.search_term, opts);

    let mut out: Vec<&Report> = reports
        .iter()
        .filter(|r| {
            needle.matches(r)
                && query.status.accepts(&r.status)
                && query.category.accepts(&r.category)
        })
        .collect();

    match query.sort {
        SortKey::Newest => out.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Oldest => out.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::Severity => out.sort_by(|a, b| b.severity.cmp(&a.severity)),
    }

    out
}

pub fn lookup_by_id(reports: &[Report], id: ReportId) -> Result<&Report, TriageError> {
    reports
        .iter()
        .find(|r| r.id == id)
        .ok_or(TriageError::NotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_parses_all_and_values() {
        assert_eq!("ALL".parse::<Selector<Status>>().unwrap(), Selector::All);
        assert_eq!(
            "pending".parse::<Selector<Status>>().unwrap(),
            Selector::Only(Status::Pending)
        );
        assert!("sideways".parse::<Selector<Status>>().is_err());
    }

    #[test]
    fn fold_handles_compatibility_forms() {
        let opts = SearchOptions::default();
        // fullwidth "ＷＡＴＥＲ" folds to plain ASCII under NFKC
        assert_eq!(fold("\u{FF37}\u{FF21}\u{FF34}\u{FF25}\u{FF32}", opts), "water");
        let raw = SearchOptions {
            normalize_unicode: false,
        };
        assert_ne!(fold("\u{FF37}\u{FF21}\u{FF34}\u{FF25}\u{FF32}", raw), "water");
    }
}
