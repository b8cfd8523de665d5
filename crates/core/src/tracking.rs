//! Latest-position selection.
//!
//! A shipment's position history is an unbounded series of pings. Tracking
//! only ever needs the newest one per shipment: partition by shipment, keep
//! the row with the greatest timestamp, and break timestamp ties by the
//! greater insertion sequence so the choice is deterministic.
//!
//! The Postgres repository expresses this as `DISTINCT ON`; this module is
//! the same rule for in-process data.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::ShipmentId;

/// A single position ping.
pub trait PositionSample {
    fn shipment_id(&self) -> ShipmentId;
    fn recorded_at(&self) -> DateTime<Utc>;
    /// Insertion order, used only to break timestamp ties.
    fn sequence(&self) -> i64;
}

/// Select the newest sample per shipment, ordered by shipment ID ascending.
///
/// Shipments without samples produce no output.
pub fn latest_per_shipment<T, I>(samples: I) -> Vec<T>
where
    T: PositionSample,
    I: IntoIterator<Item = T>,
{
    let mut latest: BTreeMap<ShipmentId, T> = BTreeMap::new();
    for sample in samples {
        match latest.get(&sample.shipment_id()) {
            Some(current) if !supersedes(&sample, current) => {}
            _ => {
                latest.insert(sample.shipment_id(), sample);
            }
        }
    }
    latest.into_values().collect()
}

fn supersedes<T: PositionSample>(candidate: &T, current: &T) -> bool {
    (candidate.recorded_at(), candidate.sequence()) > (current.recorded_at(), current.sequence())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Ping {
        shipment: i64,
        at: i64,
        seq: i64,
        lat: f64,
    }

    impl PositionSample for Ping {
        fn shipment_id(&self) -> ShipmentId {
            ShipmentId::new(self.shipment)
        }

        fn recorded_at(&self) -> DateTime<Utc> {
            Utc.timestamp_opt(self.at, 0).single().unwrap_or_default()
        }

        fn sequence(&self) -> i64 {
            self.seq
        }
    }

    fn ping(shipment: i64, at: i64, seq: i64, lat: f64) -> Ping {
        Ping {
            shipment,
            at,
            seq,
            lat,
        }
    }

    #[test]
    fn test_empty_series_yields_nothing() {
        assert!(latest_per_shipment(Vec::<Ping>::new()).is_empty());
    }

    #[test]
    fn test_picks_max_timestamp_regardless_of_arrival_order() {
        let out = latest_per_shipment(vec![
            ping(1, 300, 1, 3.0),
            ping(1, 100, 2, 1.0),
            ping(1, 200, 3, 2.0),
        ]);
        assert_eq!(out, vec![ping(1, 300, 1, 3.0)]);
    }

    #[test]
    fn test_timestamp_tie_goes_to_latest_insert() {
        let out = latest_per_shipment(vec![
            ping(4, 100, 7, 7.0),
            ping(4, 100, 9, 9.0),
            ping(4, 100, 8, 8.0),
        ]);
        assert_eq!(out, vec![ping(4, 100, 9, 9.0)]);
    }

    #[test]
    fn test_one_record_per_shipment_ordered_by_id() {
        let out = latest_per_shipment(vec![
            ping(30, 10, 1, 0.0),
            ping(2, 10, 2, 0.0),
            ping(30, 20, 3, 1.0),
            ping(11, 5, 4, 0.0),
        ]);
        let ids: Vec<i64> = out.iter().map(|p| p.shipment).collect();
        assert_eq!(ids, vec![2, 11, 30]);
        assert!((out[2].lat - 1.0).abs() < f64::EPSILON);
    }
}
