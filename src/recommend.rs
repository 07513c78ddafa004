//! Preference-weighted hotel re-ranking

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::errors::{Error, Result};
use crate::profile::HotelProfile;
use crate::types::TopicSet;

/// Highest importance a user can give a topic
pub const MAX_WEIGHT: u32 = 5;

/// A hotel with its preference-weighted score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedHotel {
    pub hotel: String,
    pub score: f64,
}

/// Normalize per-topic weights in `0..=5` to sum to 1, in topic order
///
/// Every configured topic needs a weight, and at least one must be non-zero.
pub fn normalized_weights(
    topics: &TopicSet,
    weights: &FxHashMap<String, u32>,
) -> Result<Vec<f64>> {
    let raw = topics
        .iter()
        .map(|topic| match weights.get(topic) {
            None => Err(Error::InvalidWeights(format!("no weight for topic \"{topic}\""))),
            Some(&w) if w > MAX_WEIGHT => Err(Error::InvalidWeights(format!(
                "weight for \"{topic}\" must be between 0 and {MAX_WEIGHT}, got {w}"
            ))),
            Some(&w) => Ok(w),
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(extra) = weights.keys().find(|k| !topics.names().contains(k)) {
        return Err(Error::InvalidWeights(format!("unknown topic \"{extra}\"")));
    }

    let total: u32 = raw.iter().sum();
    if total == 0 {
        return Err(Error::InvalidWeights("all weights are zero".to_string()));
    }
    Ok(raw.iter().map(|&w| w as f64 / total as f64).collect())
}

/// Rank hotels by the weighted sum of their topic scores, best first
///
/// Only hotels named in `selection` are ranked; an empty selection ranks
/// every profile. Hotels with equal scores keep their input order.
pub fn rank_hotels(
    profiles: &[HotelProfile],
    topics: &TopicSet,
    weights: &FxHashMap<String, u32>,
    selection: &[String],
) -> Result<Vec<RankedHotel>> {
    let weights = normalized_weights(topics, weights)?;

    let unknown: Vec<String> = selection
        .iter()
        .filter(|name| !profiles.iter().any(|p| &p.hotel == *name))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(Error::UnknownHotels(unknown));
    }

    let mut ranked: Vec<RankedHotel> = profiles
        .iter()
        .filter(|p| selection.is_empty() || selection.contains(&p.hotel))
        .map(|p| RankedHotel {
            hotel: p.hotel.clone(),
            score: weights
                .iter()
                .enumerate()
                .map(|(t, w)| w * p.scores.get(t))
                .sum(),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(ranked)
}
