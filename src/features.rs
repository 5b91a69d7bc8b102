use crate::types::{FrameLandmarks, HandSide};

pub const HAND_POINTS: usize = 21;
pub const POSE_POINTS: usize = 15;
pub const HAND_SPAN: usize = HAND_POINTS * 3;
pub const POSE_SPAN: usize = POSE_POINTS * 3;
pub const FEATURE_DIM: usize = HAND_SPAN * 2 + POSE_SPAN;

const LEFT_HAND_OFFSET: usize = 0;
const RIGHT_HAND_OFFSET: usize = HAND_SPAN;
const POSE_OFFSET: usize = HAND_SPAN * 2;

/// Per-frame model input: left hand, right hand, then the upper-body pose
/// keypoints, each as (x, y, z) triples. Absent parts stay zero.
pub type FeatureVector = [f32; FEATURE_DIM];

pub fn extract(frame: &FrameLandmarks) -> FeatureVector {
    let mut features = [0.0f32; FEATURE_DIM];

    // Last detection per side wins. The segment is cleared before each write
    // so a shorter later detection cannot leave stale values behind.
    for hand in &frame.hands {
        let offset = match hand.side {
            HandSide::Left => LEFT_HAND_OFFSET,
            HandSide::Right => RIGHT_HAND_OFFSET,
        };
        features[offset..offset + HAND_SPAN].fill(0.0);
        for (slot, point) in hand.landmarks.iter().take(HAND_POINTS).enumerate() {
            let base = offset + slot * 3;
            features[base] = point.x;
            features[base + 1] = point.y;
            features[base + 2] = point.z;
        }
    }

    if let Some(pose) = &frame.pose {
        for (slot, point) in pose.iter().take(POSE_POINTS).enumerate() {
            let base = POSE_OFFSET + slot * 3;
            features[base] = point.x;
            features[base + 1] = point.y;
            features[base + 2] = point.z;
        }
    }

    features
}
