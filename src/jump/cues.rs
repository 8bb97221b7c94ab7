//! Jump domain: which cue each charge event plays.

use crate::audio::CueRequest;
use crate::content::SoundConfig;

/// Rising tick as the charge reaches a new power level.
pub fn charge_level_cue(sound: &SoundConfig, level: u8) -> Option<CueRequest> {
    if !sound.enable_charge {
        return None;
    }
    let level = level as u32;
    Some(
        CueRequest::from_def(&sound.charge)
            .higher(level * 15)
            .louder(level * 5),
    )
}

/// Cue for a committed jump; louder and higher with more power.
pub fn jump_cue(sound: &SoundConfig, level: u8, full_charge: bool) -> Option<CueRequest> {
    if !sound.enable_jump {
        return None;
    }
    let level = level as u32;
    let cue = CueRequest::from_def(&sound.jump)
        .louder(level * 3)
        .higher(level * 5);
    Some(if full_charge { cue.louder(20) } else { cue })
}

pub fn failure_cue(sound: &SoundConfig) -> Option<CueRequest> {
    sound
        .enable_failure
        .then(|| CueRequest::from_def(&sound.failure))
}
