//! # Movement Fingerprint
//!
//! Directional histogram of skating headings with average speed per sector.
//!
//! ## Conventions
//! - Headings in degrees, 0 = toward +x, counter-clockwise, any real value
//!   accepted and wrapped into [0, 360)
//! - Bucket 0 is centred on 0°, so with 8 buckets it covers [-22.5°, 22.5°)
//! - Dominant direction is the angle of the frequency-weighted sum of bucket
//!   unit vectors, so a fingerprint split between two neighbours points
//!   between them

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use nalgebra::Vector2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{BucketCount, FingerprintConfig};
use crate::models::GameId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementSample {
    pub heading_deg: f64,
    /// Feet per second.
    pub speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<GameId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionBucket {
    pub center_deg: f64,
    /// Share of samples in this sector.
    pub frequency: f64,
    pub avg_speed: f64,
    pub sample_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementFingerprint {
    pub bucket_count: BucketCount,
    pub buckets: Vec<DirectionBucket>,
    /// 0 when there are no samples or headings cancel out.
    pub dominant_direction_deg: f64,
    /// Shannon entropy of the sector counts, normalized to [0, 1].
    pub direction_entropy: f64,
    pub sample_count: u32,
    pub game_count: u32,
}

impl MovementFingerprint {
    pub fn empty(bucket_count: BucketCount) -> Self {
        FingerprintBuilder::new(bucket_count).finish()
    }

    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }
}

/// Wrap any heading into [0, 360).
pub fn normalize_heading(heading_deg: f64) -> f64 {
    let wrapped = heading_deg.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

pub fn bucket_index(heading_deg: f64, bucket_count: BucketCount) -> usize {
    let width = bucket_count.sector_deg();
    let shifted = normalize_heading(heading_deg + width / 2.0);
    ((shifted / width).floor() as usize) % bucket_count.get()
}

/// Spread of a frequency profile: Shannon entropy over the sectors, scaled
/// so a uniform profile scores 1 and a single sector scores 0.
fn direction_entropy(buckets: &[DirectionBucket]) -> f64 {
    let max_entropy = (buckets.len() as f64).ln();
    if max_entropy <= 0.0 {
        return 0.0;
    }
    let entropy = buckets
        .iter()
        .map(|b| b.frequency)
        .filter(|&p| p > 0.0)
        .fold(0.0, |acc, p| acc - p * p.ln());
    entropy / max_entropy
}

/// Incremental accumulator; frequencies are only normalized in [`finish`](Self::finish).
#[derive(Debug, Clone)]
pub struct FingerprintBuilder {
    bucket_count: BucketCount,
    min_speed: f64,
    counts: Vec<u32>,
    speed_means: Vec<f64>,
    games: BTreeSet<GameId>,
    skipped: u32,
}

impl FingerprintBuilder {
    pub fn new(bucket_count: BucketCount) -> Self {
        Self {
            bucket_count,
            min_speed: 0.0,
            counts: vec![0; bucket_count.get()],
            speed_means: vec![0.0; bucket_count.get()],
            games: BTreeSet::new(),
            skipped: 0,
        }
    }

    pub fn from_config(config: &FingerprintConfig) -> Self {
        let mut builder = Self::new(config.bucket_count);
        builder.min_speed = config.min_speed;
        builder
    }

    /// Add one sample; returns `false` if it was rejected as invalid.
    pub fn add(&mut self, sample: &MovementSample) -> bool {
        if !sample.heading_deg.is_finite()
            || !sample.speed.is_finite()
            || sample.speed < 0.0
            || sample.speed < self.min_speed
        {
            self.skipped += 1;
            return false;
        }

        let idx = bucket_index(sample.heading_deg, self.bucket_count);
        self.counts[idx] += 1;
        let n = self.counts[idx] as f64;
        self.speed_means[idx] += (sample.speed - self.speed_means[idx]) / n;
        if let Some(game_id) = sample.game_id {
            self.games.insert(game_id);
        }
        true
    }

    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    pub fn finish(&self) -> MovementFingerprint {
        let total: u32 = self.counts.iter().sum();
        let width = self.bucket_count.sector_deg();

        let buckets: Vec<DirectionBucket> = self
            .counts
            .iter()
            .zip(&self.speed_means)
            .enumerate()
            .map(|(i, (&count, &avg_speed))| DirectionBucket {
                center_deg: i as f64 * width,
                frequency: if total > 0 { count as f64 / total as f64 } else { 0.0 },
                avg_speed,
                sample_count: count,
            })
            .collect();

        let resultant = buckets.iter().fold(Vector2::zeros(), |acc: Vector2<f64>, b| {
            let rad = b.center_deg.to_radians();
            acc + Vector2::new(rad.cos(), rad.sin()) * b.frequency
        });
        let direction_entropy = direction_entropy(&buckets);
        let dominant_direction_deg = if resultant.norm() > 1e-12 {
            normalize_heading(resultant.y.atan2(resultant.x).to_degrees())
        } else {
            0.0
        };

        MovementFingerprint {
            bucket_count: self.bucket_count,
            buckets,
            dominant_direction_deg,
            direction_entropy,
            sample_count: total,
            game_count: self.games.len() as u32,
        }
    }
}

pub fn calculate_fingerprint(samples: &[MovementSample], config: &FingerprintConfig) -> MovementFingerprint {
    let mut builder = FingerprintBuilder::from_config(config);
    for sample in samples {
        builder.add(sample);
    }
    if builder.skipped() > 0 {
        log::warn!(
            "movement fingerprint skipped {} of {} samples",
            builder.skipped(),
            samples.len()
        );
    }
    builder.finish()
}

/// Fingerprints for many players (or teams) at once.
pub fn calculate_fingerprints<K>(
    groups: &HashMap<K, Vec<MovementSample>>,
    config: &FingerprintConfig,
) -> HashMap<K, MovementFingerprint>
where
    K: Eq + Hash + Clone + Send + Sync,
{
    groups
        .par_iter()
        .map(|(key, samples)| (key.clone(), calculate_fingerprint(samples, config)))
        .collect()
}

/// Cosine similarity of two frequency profiles; `None` if either is empty
/// or the bucket counts differ.
pub fn fingerprint_similarity(a: &MovementFingerprint, b: &MovementFingerprint) -> Option<f64> {
    if a.bucket_count != b.bucket_count || a.is_empty() || b.is_empty() {
        return None;
    }
    let dot: f64 = a.buckets.iter().zip(&b.buckets).map(|(x, y)| x.frequency * y.frequency).sum();
    let norm_a: f64 = a.buckets.iter().map(|x| x.frequency * x.frequency).sum::<f64>().sqrt();
    let norm_b: f64 = b.buckets.iter().map(|y| y.frequency * y.frequency).sum::<f64>().sqrt();
    Some(dot / (norm_a * norm_b))
}
