//! Driver rewards in PAILOT tokens

use pailot_platform::{Delivery, DeliveryStatus};

pub const BASE_REWARD: u32 = 5;
pub const ON_TIME_BONUS: u32 = 2;
pub const HIGH_RATING_BONUS: u32 = 3;
pub const LONG_DISTANCE_BONUS: u32 = 2;

/// Ratings at or above this earn the rating bonus
pub const HIGH_RATING: f64 = 4.5;

/// Kilometres beyond which a delivery counts as long distance
pub const LONG_DISTANCE_KM: f64 = 10.0;

/// Tokens earned for a delivery
pub fn calculate_reward(delivery: &Delivery) -> u32 {
    let mut reward = BASE_REWARD;

    if delivery.status == DeliveryStatus::Completed && delivery.completed_on_time {
        reward += ON_TIME_BONUS;
    }

    if delivery.rating.is_some_and(|rating| rating >= HIGH_RATING) {
        reward += HIGH_RATING_BONUS;
    }

    if delivery.distance > LONG_DISTANCE_KM {
        reward += LONG_DISTANCE_BONUS;
    }

    reward
}
