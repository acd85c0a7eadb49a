use serde::{Deserialize, Serialize};

/// A map coordinate in degrees.
///
/// Distances are computed on a flat lat/lon plane, not geodesically. At the
/// zoom level the locator operates at, the difference is well below marker
/// size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Flat-plane Euclidean distance to `other`, in degrees.
    pub fn distance_to(&self, other: Coordinate) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        (dlat * dlat + dlon * dlon).sqrt()
    }
}

/// One entry of a per-locate ranking. Built fresh for every locate call and
/// discarded immediately after use.
#[derive(Debug, Clone)]
pub struct RankedCandidate<T> {
    pub item: T,
    pub distance: f64,
}

/// Rank `items` ascending by flat-plane distance from `target`.
pub fn rank_by_distance<T>(
    target: Coordinate,
    items: Vec<(T, Coordinate)>,
) -> Vec<RankedCandidate<T>> {
    let mut ranked: Vec<RankedCandidate<T>> = items
        .into_iter()
        .map(|(item, coord)| RankedCandidate {
            item,
            distance: target.distance_to(coord),
        })
        .collect();
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_flat_plane_euclidean() {
        let a = Coordinate::new(10.0, 20.0);
        let b = Coordinate::new(13.0, 24.0);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(b.distance_to(a), 5.0);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = Coordinate::new(36.6, -119.5);
        assert_eq!(a.distance_to(a), 0.0);
    }

    #[test]
    fn rank_places_exact_match_before_distant_layer() {
        let target = Coordinate::new(10.0, 20.0);
        let ranked = rank_by_distance(
            target,
            vec![
                ("far", Coordinate::new(13.0, 24.0)),
                ("near", Coordinate::new(10.0, 20.0)),
            ],
        );
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].item, "near");
        assert_eq!(ranked[0].distance, 0.0);
        assert_eq!(ranked[1].item, "far");
        assert_eq!(ranked[1].distance, 5.0);
    }

    #[test]
    fn rank_of_empty_input_is_empty() {
        let ranked = rank_by_distance::<&str>(Coordinate::new(0.0, 0.0), Vec::new());
        assert!(ranked.is_empty());
    }

    #[test]
    fn rank_orders_many_candidates_ascending() {
        let target = Coordinate::new(0.0, 0.0);
        let ranked = rank_by_distance(
            target,
            vec![
                (3, Coordinate::new(0.0, 3.0)),
                (1, Coordinate::new(1.0, 0.0)),
                (2, Coordinate::new(0.0, -2.0)),
            ],
        );
        let order: Vec<i32> = ranked.iter().map(|c| c.item).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }
}
