//! UI domain: on-screen feedback for the charged jump.

mod indicator;


pub use indicator::{IndicatorArrow, IndicatorFill, level_color};

use bevy::prelude::*;

use crate::ui::indicator::{
    attach_indicator_parts, cleanup_indicator_parts, update_charge_indicators,
};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                attach_indicator_parts,
                update_charge_indicators,
                cleanup_indicator_parts,
            )
                .chain(),
        );
    }
}
