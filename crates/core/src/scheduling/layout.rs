//! Collision layout engine for the calendar grid
//!
//! Partitions a day's appointments into collision groups (connected
//! components of the overlap graph) and assigns each member a rendering
//! lane: a width and left offset in percent of the day column.
//!
//! Groups are transitive by design: A overlapping B and B overlapping C puts
//! all three in one group even when A and C never touch, so a chain of
//! overlapping appointments lays out without gaps or double-painting.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use ahash::AHasher;
use chrono::NaiveDate;
use praxis_domain::constants::LANE_GAP_PERCENT;
use praxis_domain::{Appointment, DayLayout, LayoutAssignment};

/// Compute the lane layout for every appointment scheduled on `date`.
///
/// Pure and deterministic: identical snapshots produce identical layouts,
/// so recomputation is always safe. Appointments on other dates are
/// ignored.
#[must_use]
pub fn compute_layout(date: NaiveDate, appointments: &[Appointment]) -> DayLayout {
    let fingerprint = fingerprint(date, appointments);
    let day: Vec<&Appointment> =
        appointments.iter().filter(|a| a.scheduled_start.date() == date).collect();

    let mut layout = DayLayout::empty(date, fingerprint);

    // 0 or 1 appointments: nothing can collide.
    if day.len() <= 1 {
        if let Some(only) = day.first() {
            layout.assignments.insert(only.id, LayoutAssignment::full_width(0));
        }
        return layout;
    }

    for (group_index, group) in collision_groups(&day).into_iter().enumerate() {
        assign_lanes(&mut layout.assignments, group, group_index);
    }

    layout
}

/// Stable fingerprint of `(date, appointment set)` for advisory caching.
///
/// Order-insensitive: the identifying tuples are sorted before hashing so a
/// reordered snapshot of the same appointments yields the same key.
#[must_use]
pub fn fingerprint(date: NaiveDate, appointments: &[Appointment]) -> u64 {
    let mut entries: Vec<_> = appointments
        .iter()
        .filter(|a| a.scheduled_start.date() == date)
        .map(|a| (a.id, a.scheduled_start, a.effective_duration_minutes(), a.status.as_str()))
        .collect();
    entries.sort_unstable();

    let mut hasher = AHasher::default();
    date.hash(&mut hasher);
    for (id, start, duration, status) in entries {
        id.hash(&mut hasher);
        start.hash(&mut hasher);
        duration.hash(&mut hasher);
        status.hash(&mut hasher);
    }
    hasher.finish()
}

/// Partition a day's appointments into connected components of the overlap
/// graph.
///
/// Expansion is transitive: a group grows by scanning all unvisited
/// appointments and absorbing any that overlap ANY current member, until a
/// full scan adds nothing. Group order follows first-discovery order, which
/// is input order.
fn collision_groups<'a>(day: &[&'a Appointment]) -> Vec<Vec<&'a Appointment>> {
    let mut visited = vec![false; day.len()];
    let mut groups = Vec::new();

    for seed in 0..day.len() {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        let mut group = vec![day[seed]];

        loop {
            let mut grew = false;
            for (index, candidate) in day.iter().enumerate() {
                if visited[index] {
                    continue;
                }
                let candidate_interval = candidate.interval();
                if group.iter().any(|member| member.interval().overlaps(&candidate_interval)) {
                    visited[index] = true;
                    group.push(candidate);
                    grew = true;
                }
            }
            if !grew {
                break;
            }
        }

        groups.push(group);
    }

    groups
}

/// Assign lanes within one collision group.
///
/// Members are ordered by `(scheduled_start, id)` so lane order is
/// deterministic. A group of size k splits the column into k lanes with a
/// small constant gap between adjacent lanes.
fn assign_lanes(
    assignments: &mut BTreeMap<uuid::Uuid, LayoutAssignment>,
    mut group: Vec<&Appointment>,
    group_index: usize,
) {
    if group.len() == 1 {
        assignments.insert(group[0].id, LayoutAssignment::full_width(group_index));
        return;
    }

    group.sort_by_key(|a| (a.scheduled_start, a.id));

    #[allow(clippy::cast_precision_loss)]
    let lane_width = 100.0 / group.len() as f64;
    for (lane, member) in group.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let left = lane as f64 * lane_width + LANE_GAP_PERCENT / 2.0;
        assignments.insert(
            member.id,
            LayoutAssignment {
                width_percent: lane_width - LANE_GAP_PERCENT,
                left_percent: left,
                group: group_index,
            },
        );
    }
}
