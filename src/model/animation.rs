//! Animation and keyframe track types

use glam::{Quat, Vec3};

use super::Skeleton;
use crate::error::{Error, Result};

/// One time-stamped transform sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub time: f32,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

/// The keyframe track for one bone within one animation.
///
/// A track with no keys is legal and means the bone keeps its bind pose
/// for the whole animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub bone: u32,
    pub keys: Vec<Keyframe>,
}

impl Track {
    pub fn empty(bone: u32) -> Self {
        Self {
            bone,
            keys: Vec::new(),
        }
    }
}

/// A named animation with per-bone tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl Animation {
    /// Check key ordering and, when a skeleton is present, track targets.
    pub(crate) fn validate(&self, skeleton: Option<&Skeleton>) -> Result<()> {
        for track in &self.tracks {
            if let Some(skeleton) = skeleton {
                if track.bone as usize >= skeleton.bones.len() {
                    return Err(Error::InvalidModel(format!(
                        "animation '{}' has a track for bone {} but the \
                         skeleton has {} bones",
                        self.name,
                        track.bone,
                        skeleton.bones.len()
                    )));
                }
            }
            for pair in track.keys.windows(2) {
                if pair[1].time <= pair[0].time {
                    return Err(Error::InvalidModel(format!(
                        "animation '{}' track for bone {} has non-increasing \
                         key times ({} then {})",
                        self.name, track.bone, pair[0].time, pair[1].time
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Bone;

    fn key(time: f32) -> Keyframe {
        Keyframe {
            time,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    #[test]
    fn increasing_times_pass() {
        let anim = Animation {
            name: "walk".into(),
            duration: 1.0,
            tracks: vec![Track {
                bone: 0,
                keys: vec![key(0.0), key(0.5), key(1.0)],
            }],
        };
        anim.validate(None).unwrap();
    }

    #[test]
    fn non_increasing_times_fail() {
        let anim = Animation {
            name: "walk".into(),
            duration: 1.0,
            tracks: vec![Track {
                bone: 0,
                keys: vec![key(0.5), key(0.5)],
            }],
        };
        assert!(anim.validate(None).is_err());
    }

    #[test]
    fn track_for_missing_bone_fails_against_skeleton() {
        let skeleton = Skeleton {
            bones: vec![Bone::root("base")],
        };
        let anim = Animation {
            name: "walk".into(),
            duration: 1.0,
            tracks: vec![Track::empty(3)],
        };
        assert!(anim.validate(Some(&skeleton)).is_err());
        anim.validate(None).unwrap();
    }
}
