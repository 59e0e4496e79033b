// src/hops.rs
//
// Next hop-addition countdown for boil steps. CBPi boil steps carry up to
// five "Hop_n" props holding minutes-before-boil-end offsets.

use serde_json::{Map, Value};

use crate::deutils::{seconds_to_hms, value_as_i64};

const MAX_HOPS: usize = 5;

/// Scans `Hop_1`..`Hop_5` and returns the soonest upcoming addition as
/// "HH:MM:SS", or `None` when every addition already passed (or none is
/// configured). `time_left` is the remaining boil time in seconds.
pub fn next_hop_timer(props: &Map<String, Value>, time_left: i64) -> Option<String> {
    let mut soonest: Option<i64> = None;
    for n in 1..=MAX_HOPS {
        let key = format!("Hop_{}", n);
        let Some(minutes) = props.get(&key).and_then(value_as_i64) else {
            continue;
        };
        let hop_left = time_left - minutes * 60;
        if hop_left > 0 {
            soonest = Some(match soonest {
                Some(current) => current.min(hop_left),
                None => hop_left,
            });
        }
    }
    soonest.map(|secs| seconds_to_hms(secs as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_minimum_positive_candidate_wins() {
        // 60 min left; additions at 10, 40 and 70 minutes before the end.
        // 70 already passed (negative), 40 is the next one: 20 min away.
        let p = props(&[
            ("Hop_1", json!(10)),
            ("Hop_2", json!(40)),
            ("Hop_3", json!(70)),
        ]);
        assert_eq!(next_hop_timer(&p, 3600), Some("00:20:00".to_string()));
    }

    #[test]
    fn test_no_upcoming_hop() {
        let p = props(&[("Hop_1", json!(90))]);
        assert_eq!(next_hop_timer(&p, 3600), None);
        assert_eq!(next_hop_timer(&Map::new(), 3600), None);
    }

    #[test]
    fn test_string_minutes_and_junk_props() {
        // Props are duck-typed; numeric strings count, junk is skipped.
        let p = props(&[
            ("Hop_1", json!("15")),
            ("Hop_2", json!("first wort")),
            ("Hop_3", json!(null)),
        ]);
        assert_eq!(next_hop_timer(&p, 3600), Some("00:45:00".to_string()));
    }

    #[test]
    fn test_exactly_due_hop_is_excluded() {
        // Strictly positive only: an addition due right now is not "upcoming".
        let p = props(&[("Hop_1", json!(60))]);
        assert_eq!(next_hop_timer(&p, 3600), None);
    }
}
