// Match reduction: collapse clusters of nearby raw matches.
//
// A real occurrence of the target usually scores above the threshold at
// several neighbouring offsets. Two matches are neighbours when they are
// within `delta` of each other on both axes (Chebyshev distance). Each
// connected cluster of neighbours is replaced by its best-scoring member.
//
// Grouping is a repeated scan over the remaining matches rather than a
// union-find: the order in which matches join a group decides which of
// several equal-scoring members is kept, and the scan order is the one
// callers rely on.

use super::Match;

/// True if some match in `candidates` is within `delta` of `m` on both axes.
pub fn around(m: &Match, candidates: &[Match], delta: usize) -> bool {
    candidates
        .iter()
        .any(|c| c.x.abs_diff(m.x) <= delta && c.y.abs_diff(m.y) <= delta)
}

/// Grow a group from `seed` until no match in `universe` is adjacent to
/// any group member.
///
/// Returns the group (seed first, then members in the order they joined)
/// and the matches that were never absorbed, in their original order.
pub fn group_near(seed: Match, universe: Vec<Match>, delta: usize) -> (Vec<Match>, Vec<Match>) {
    let mut group = vec![seed];
    let mut rest = universe;

    loop {
        let joined_before = group.len();
        let mut remaining = Vec::with_capacity(rest.len());
        for m in rest {
            if around(&m, &group, delta) {
                group.push(m);
            } else {
                remaining.push(m);
            }
        }
        rest = remaining;

        if group.len() == joined_before {
            break;
        }
    }

    (group, rest)
}

/// The highest-scoring match of a group.
///
/// On ties the later match wins. An empty group yields `Match::default()`.
pub fn best_match(group: &[Match]) -> Match {
    let mut best = Match::default();
    let mut highest = 0.0;

    for m in group {
        if m.percentage >= highest {
            best = *m;
            highest = m.percentage;
        }
    }

    best
}

/// Replace every cluster of adjacent matches with its best member.
///
/// Clusters are emitted in the order they are formed, seeded by the first
/// match not yet grouped.
pub fn reduce(matches: Vec<Match>, delta: usize) -> Vec<Match> {
    let mut reduced = Vec::new();
    let mut remaining = matches;

    while !remaining.is_empty() {
        let seed = remaining.remove(0);
        let (group, rest) = group_near(seed, remaining, delta);
        reduced.push(best_match(&group));
        remaining = rest;
    }

    reduced
}
