//! Symptom analytics
//!
//! Mines the symptom log against the phase model: frequency ranking,
//! per-phase bucketing, same-day pair co-occurrence, recency trends, and
//! same-cycle-day symptom prediction. Every operation degrades to empty
//! results on insufficient data; nothing here errors for an empty log.
//!
//! All rankings break count ties alphabetically by tag so repeated calls
//! over the same input are bit-identical.

use chrono::{Months, NaiveDate};
use std::collections::BTreeMap;

use crate::error::EngineError;
use crate::history;
use crate::phase;
use crate::types::{
    CycleInterval, Phase, SymptomInsights, SymptomLog, TagCount, TagPairCount, TagTrend,
};

/// Number of tags reported by the overall frequency ranking
pub const MOST_COMMON_LIMIT: usize = 5;
/// Number of tags reported per phase
pub const PER_PHASE_LIMIT: usize = 3;
/// Number of co-occurring pairs reported
pub const PAIR_LIMIT: usize = 3;
/// Number of trending tags reported
pub const TREND_LIMIT: usize = 3;
/// Minimum absolute share change (percentage points) for a tag to trend
pub const TREND_MIN_CHANGE_PCT: f64 = 5.0;
/// Logs newer than `now` minus this many months count as recent
pub const TREND_LOOKBACK_MONTHS: u32 = 3;
/// A tag must appear in at least this share of a cycle day's logs to be predicted
pub const SAME_DAY_MIN_SHARE: f64 = 0.5;

/// Run the full symptom analysis over one log/history snapshot.
///
/// `now` anchors the trend partition and must be supplied by the caller so
/// results stay deterministic. Errors only on a structurally invalid interval.
pub fn analyze_symptoms(
    logs: &[SymptomLog],
    intervals: &[CycleInterval],
    now: NaiveDate,
) -> Result<SymptomInsights, EngineError> {
    let sorted = history::prepare(intervals)?;
    Ok(analyze_from_sorted(logs, &sorted, now))
}

/// Full analysis over an already validated, sorted history
pub(crate) fn analyze_from_sorted(
    logs: &[SymptomLog],
    sorted: &[CycleInterval],
    now: NaiveDate,
) -> SymptomInsights {
    SymptomInsights {
        most_common: most_common_symptoms(logs),
        by_phase: by_phase_from_sorted(logs, sorted),
        correlated_pairs: correlated_pairs(logs),
        trends: trend_analysis(logs, now),
    }
}

/// Top tags across all logs, ranked by occurrence count.
///
/// `pct` is the share of logs carrying the tag, rounded to the nearest
/// integer.
pub fn most_common_symptoms(logs: &[SymptomLog]) -> Vec<TagCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for log in logs {
        for tag in &log.symptoms {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }
    rank_counts(counts, logs.len(), MOST_COMMON_LIMIT)
}

/// Top tags per cycle phase.
///
/// Each log's date is classified against the interval history; `pct` is
/// relative to the number of logs falling in that phase. Every phase appears
/// in the result, with an empty list when no log landed in it.
pub fn symptoms_by_phase(
    logs: &[SymptomLog],
    intervals: &[CycleInterval],
) -> Result<BTreeMap<Phase, Vec<TagCount>>, EngineError> {
    let sorted = history::prepare(intervals)?;
    Ok(by_phase_from_sorted(logs, &sorted))
}

fn by_phase_from_sorted(
    logs: &[SymptomLog],
    sorted: &[CycleInterval],
) -> BTreeMap<Phase, Vec<TagCount>> {
    let mut phase_logs: BTreeMap<Phase, usize> = BTreeMap::new();
    let mut phase_counts: BTreeMap<Phase, BTreeMap<&str, usize>> = BTreeMap::new();

    for log in logs {
        let assigned = phase::classify_from_sorted(sorted, log.date).phase;
        *phase_logs.entry(assigned).or_insert(0) += 1;
        let counts = phase_counts.entry(assigned).or_default();
        for tag in &log.symptoms {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }

    Phase::ALL
        .into_iter()
        .map(|p| {
            let ranked = match phase_counts.remove(&p) {
                Some(counts) => {
                    let total = phase_logs.get(&p).copied().unwrap_or(0);
                    rank_counts(counts, total, PER_PHASE_LIMIT)
                }
                None => Vec::new(),
            };
            (p, ranked)
        })
        .collect()
}

/// Most frequent unordered same-day tag pairs.
///
/// Only logs carrying two or more tags contribute; pair keys are
/// alphabetically normalized so (a, b) and (b, a) count together. `pct` is
/// relative to the total number of logs.
pub fn correlated_pairs(logs: &[SymptomLog]) -> Vec<TagPairCount> {
    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();

    for log in logs {
        // BTreeSet iterates in lexicographic order, so i < j pairs are
        // already normalized
        let tags: Vec<&str> = log.symptoms.iter().map(String::as_str).collect();
        for i in 0..tags.len() {
            for j in (i + 1)..tags.len() {
                *counts.entry((tags[i], tags[j])).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<TagPairCount> = counts
        .into_iter()
        .map(|((tag_a, tag_b), count)| TagPairCount {
            tag_a: tag_a.to_string(),
            tag_b: tag_b.to_string(),
            count,
            pct: pct_of(count, logs.len()),
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.tag_a.cmp(&b.tag_a))
            .then_with(|| a.tag_b.cmp(&b.tag_b))
    });
    ranked.truncate(PAIR_LIMIT);
    ranked
}

/// Tags whose share of recent logs shifted notably versus older logs.
///
/// Logs are partitioned at `now` minus three months. A tag's change is its
/// recent share minus its older share in percentage points; a side with no
/// logs contributes zero. Only shifts above five points are reported, largest
/// first.
pub fn trend_analysis(logs: &[SymptomLog], now: NaiveDate) -> Vec<TagTrend> {
    let cutoff = now
        .checked_sub_months(Months::new(TREND_LOOKBACK_MONTHS))
        .unwrap_or(NaiveDate::MIN);

    let mut recent_counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut older_counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut recent_total = 0usize;
    let mut older_total = 0usize;

    for log in logs {
        let (counts, total) = if log.date >= cutoff {
            (&mut recent_counts, &mut recent_total)
        } else {
            (&mut older_counts, &mut older_total)
        };
        *total += 1;
        for tag in &log.symptoms {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }

    let mut tags: Vec<&str> = recent_counts.keys().copied().collect();
    for &tag in older_counts.keys() {
        if !recent_counts.contains_key(tag) {
            tags.push(tag);
        }
    }
    tags.sort_unstable();

    let mut trends: Vec<TagTrend> = tags
        .into_iter()
        .filter_map(|tag| {
            let recent_pct = share_pct(recent_counts.get(tag), recent_total);
            let older_pct = share_pct(older_counts.get(tag), older_total);
            let change = recent_pct - older_pct;
            if change.abs() > TREND_MIN_CHANGE_PCT {
                Some(TagTrend {
                    tag: tag.to_string(),
                    change_pct: change,
                    increasing: change > 0.0,
                })
            } else {
                None
            }
        })
        .collect();

    trends.sort_by(|a, b| {
        b.change_pct
            .abs()
            .partial_cmp(&a.change_pct.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.tag.cmp(&b.tag))
    });
    trends.truncate(TREND_LIMIT);
    trends
}

/// Tags that historically appear on a given cycle day.
///
/// Considers logs whose `cycle_day` matches `target_day` and returns the tags
/// present in at least half of them, most frequent first. An unmatched day
/// yields an empty list.
pub fn predict_symptoms_for_day(logs: &[SymptomLog], target_day: u32) -> Vec<String> {
    let matching: Vec<&SymptomLog> = logs
        .iter()
        .filter(|log| log.cycle_day == Some(target_day))
        .collect();

    if matching.is_empty() {
        return Vec::new();
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for log in &matching {
        for tag in &log.symptoms {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }

    let threshold = matching.len() as f64 * SAME_DAY_MIN_SHARE;
    let mut frequent: Vec<(&str, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count as f64 >= threshold)
        .collect();
    frequent.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    frequent.into_iter().map(|(tag, _)| tag.to_string()).collect()
}

/// Rank a tag count map, largest count first, ties alphabetical
fn rank_counts(counts: BTreeMap<&str, usize>, total_logs: usize, limit: usize) -> Vec<TagCount> {
    let mut ranked: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
            pct: pct_of(count, total_logs),
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    ranked.truncate(limit);
    ranked
}

/// Share of `total`, rounded to the nearest whole percent
fn pct_of(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

/// Unrounded share of `total` in percent; zero when `total` is zero
fn share_pct(count: Option<&usize>, total: usize) -> f64 {
    match (count, total) {
        (Some(&count), total) if total > 0 => count as f64 / total as f64 * 100.0,
        _ => 0.0,
    }
}
