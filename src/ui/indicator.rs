//! UI domain: world-space charge indicator drawn above the party leader.

use bevy::prelude::*;

use crate::content::JumpConfig;
use crate::jump::{ChargeIndicator, IndicatorReading, PartyLeader};

const INDICATOR_WIDTH: f32 = 40.0;
const INDICATOR_HEIGHT: f32 = 6.0;
const INDICATOR_OFFSET_Y: f32 = 34.0;
const ARROW_RADIUS: f32 = 30.0;
const ARROW_SIZE: Vec2 = Vec2::new(12.0, 4.0);
const INDICATOR_Z: f32 = 20.0;

const INVALID_COLOR: Color = Color::srgb(0.55, 0.15, 0.15);
const FULL_CHARGE_COLOR: Color = Color::srgb(1.0, 0.85, 0.2);

/// Fill portion of a charge indicator
#[derive(Component)]
pub struct IndicatorFill {
    pub owner: Entity,
}

/// Heading arrow of a charge indicator
#[derive(Component)]
pub struct IndicatorArrow {
    pub owner: Entity,
}

/// Fill color: pale at level 0 warming towards orange, gold once fully
/// charged, dark red when the landing is refused.
pub fn level_color(reading: &IndicatorReading, levels: u8) -> Color {
    if !reading.valid {
        return INVALID_COLOR;
    }
    if reading.full_charge {
        return FULL_CHARGE_COLOR;
    }
    let span = levels.saturating_sub(1).max(1) as f32;
    let t = (reading.power_level as f32 / span).clamp(0.0, 1.0);
    Color::srgb(0.9, 0.95 - 0.45 * t, 0.7 - 0.6 * t)
}

pub(crate) fn attach_indicator_parts(
    mut commands: Commands,
    added: Query<Entity, Added<ChargeIndicator>>,
) {
    for indicator in &added {
        // Background (dark)
        commands.entity(indicator).try_insert((
            Sprite {
                color: Color::srgba(0.1, 0.1, 0.1, 0.8),
                custom_size: Some(Vec2::new(INDICATOR_WIDTH + 2.0, INDICATOR_HEIGHT + 2.0)),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, INDICATOR_Z),
        ));

        commands.spawn((
            IndicatorFill { owner: indicator },
            Sprite {
                color: level_color(&IndicatorReading::default(), 2),
                custom_size: Some(Vec2::new(0.0, INDICATOR_HEIGHT)),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, INDICATOR_Z + 1.0),
        ));

        commands.spawn((
            IndicatorArrow { owner: indicator },
            Sprite::from_color(Color::WHITE, ARROW_SIZE),
            Transform::from_xyz(0.0, 0.0, INDICATOR_Z + 1.0),
            Visibility::Hidden,
        ));
    }
}

pub(crate) fn update_charge_indicators(
    config: Res<JumpConfig>,
    leader: Query<&Transform, (With<PartyLeader>, Without<ChargeIndicator>)>,
    mut indicators: Query<
        (&IndicatorReading, &mut Transform),
        (
            With<ChargeIndicator>,
            Without<IndicatorFill>,
            Without<IndicatorArrow>,
        ),
    >,
    mut fills: Query<
        (&IndicatorFill, &mut Transform, &mut Sprite),
        (
            Without<PartyLeader>,
            Without<ChargeIndicator>,
            Without<IndicatorArrow>,
        ),
    >,
    mut arrows: Query<
        (&IndicatorArrow, &mut Transform, &mut Visibility),
        (
            Without<PartyLeader>,
            Without<ChargeIndicator>,
            Without<IndicatorFill>,
        ),
    >,
) {
    let Ok(leader_transform) = leader.single() else {
        return;
    };
    let anchor = leader_transform.translation.truncate();
    let bar_center = anchor + Vec2::new(0.0, INDICATOR_OFFSET_Y);

    for (_, mut transform) in &mut indicators {
        transform.translation.x = bar_center.x;
        transform.translation.y = bar_center.y;
    }

    for (fill, mut transform, mut sprite) in &mut fills {
        let Ok((reading, _)) = indicators.get(fill.owner) else {
            continue;
        };
        let fill_width = INDICATOR_WIDTH * reading.progress.clamp(0.0, 1.0);
        // Left-aligned within the background
        transform.translation.x = bar_center.x - (INDICATOR_WIDTH - fill_width) / 2.0;
        transform.translation.y = bar_center.y;
        sprite.custom_size = Some(Vec2::new(fill_width, INDICATOR_HEIGHT));
        sprite.color = level_color(reading, config.charge_levels);
    }

    for (arrow, mut transform, mut visibility) in &mut arrows {
        let Ok((reading, _)) = indicators.get(arrow.owner) else {
            continue;
        };
        if reading.direction.is_none() {
            *visibility = Visibility::Hidden;
            continue;
        }
        let angle = reading.direction.screen_angle();
        let position = anchor + Vec2::from_angle(angle) * ARROW_RADIUS;
        transform.translation.x = position.x;
        transform.translation.y = position.y;
        transform.rotation = Quat::from_rotation_z(angle);
        *visibility = Visibility::Visible;
    }
}

/// Parts outlive their indicator by at most one frame.
pub(crate) fn cleanup_indicator_parts(
    mut commands: Commands,
    indicators: Query<(), With<ChargeIndicator>>,
    fills: Query<(Entity, &IndicatorFill)>,
    arrows: Query<(Entity, &IndicatorArrow)>,
) {
    for (entity, fill) in &fills {
        if indicators.get(fill.owner).is_err() {
            commands.entity(entity).despawn();
        }
    }
    for (entity, arrow) in &arrows {
        if indicators.get(arrow.owner).is_err() {
            commands.entity(entity).despawn();
        }
    }
}
