use bevy::prelude::*;
use funnel_core::AgentKind;
use funnel_sim::SimulationClock;
use funnel_sim::pipeline::{LatestFrame, SimSpeed};
use funnel_sim::state::SimState;

const HUD_CLR: Color = Color::srgb(250.0 / 255.0, 250.0 / 255.0, 250.0 / 255.0);
const INTEREST_CLR: Color = Color::srgb(100.0 / 255.0, 255.0 / 255.0, 100.0 / 255.0);
const HUD_FONT: f32 = 22.0;
const LEGEND_FONT: f32 = 16.0;

/// Marker for the aggregate stats panel (left)
#[derive(Component)]
pub struct HudText;

/// Marker for the depositors' interest readout (right)
#[derive(Component)]
pub struct InterestText;

/// HUD frame counter for throttling
#[derive(Resource, Default)]
pub struct HudThrottle {
    pub frame: u32,
}

/// Whole units with thousands separators: 53000.4 -> "53,000"
pub fn fmt_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn hud_text(text: String, size: f32, color: Color, node: Node) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
        node,
    )
}

fn absolute(top: f32, left: f32) -> Node {
    Node {
        position_type: PositionType::Absolute,
        top: Val::Px(top),
        left: Val::Px(left),
        ..default()
    }
}

/// Spawn the HUD overlay and the in-funnel labels
pub fn spawn_hud(mut commands: Commands, clock: Res<SimulationClock>) {
    let funnel = clock.population().funnel();
    let g = funnel.geometry;
    let top_pct = clock.config().top_percentile * 100.0;
    let (_, mouth_right) = funnel.bounds(g.top);
    let (throat_left, _) = funnel.bounds(g.bottom);

    commands.spawn((
        hud_text(String::new(), HUD_FONT, HUD_CLR, absolute(20.0, 20.0)),
        HudText,
    ));
    commands.spawn((
        hud_text(
            String::new(),
            HUD_FONT,
            INTEREST_CLR,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(20.0),
                right: Val::Px(20.0),
                ..default()
            },
        ),
        InterestText,
    ));

    commands.spawn(hud_text(
        "New Credit In ->".to_string(),
        HUD_FONT,
        HUD_CLR,
        absolute(g.bottom - 15.0, throat_left - 170.0),
    ));
    commands.spawn(hud_text(
        format!("<- Top {:.0}%", top_pct),
        HUD_FONT,
        HUD_CLR,
        absolute(g.top - 15.0, mouth_right + 10.0),
    ));
}

/// Color key for the two kinds of money and for interest
pub fn spawn_legend(mut commands: Commands, clock: Res<SimulationClock>) {
    let g = clock.config().funnel;
    let swatch = g.marker_radius * 2.0;

    let entries = [
        (AgentKind::Principal.name(), {
            let c = AgentKind::Principal.color();
            Color::srgba(c[0], c[1], c[2], c[3])
        }),
        (AgentKind::Credit.name(), {
            let c = AgentKind::Credit.color();
            Color::srgba(c[0], c[1], c[2], c[3])
        }),
        ("Interest Earned", INTEREST_CLR),
    ];

    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(90.0),
            right: Val::Px(40.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(12.0),
            ..default()
        })
        .with_children(|legend| {
            for (label, color) in entries {
                legend
                    .spawn(Node {
                        flex_direction: FlexDirection::Row,
                        align_items: AlignItems::Center,
                        column_gap: Val::Px(10.0),
                        ..default()
                    })
                    .with_children(|row| {
                        row.spawn((
                            Node {
                                width: Val::Px(swatch),
                                height: Val::Px(swatch),
                                ..default()
                            },
                            BackgroundColor(color),
                        ));
                        row.spawn((
                            Text::new(label),
                            TextFont {
                                font_size: LEGEND_FONT,
                                ..default()
                            },
                            TextColor(HUD_CLR),
                        ));
                    });
            }
        });
}

/// Update HUD text every 10th frame (string formatting is expensive)
pub fn update_hud(
    latest: Res<LatestFrame>,
    clock: Res<SimulationClock>,
    state: Res<State<SimState>>,
    speed: Res<SimSpeed>,
    mut throttle: ResMut<HudThrottle>,
    mut hud_query: Query<&mut Text, (With<HudText>, Without<InterestText>)>,
    mut interest_query: Query<&mut Text, (With<InterestText>, Without<HudText>)>,
) {
    throttle.frame = throttle.frame.wrapping_add(1);
    if throttle.frame % 10 != 0 {
        return;
    }
    let Some(report) = latest.0 else {
        return;
    };
    if report.reset {
        return;
    }
    let stats = report.stats;

    if let Ok(mut text) = hud_query.get_single_mut() {
        let paused = if *state.get() == SimState::Paused {
            " [PAUSED]"
        } else {
            ""
        };
        **text = format!(
            "Years:    {:>6.1}{}\n\
             Deposits: {:>10} ₳\n\
             Credit:   {:>10} ₳\n\
             Total:    {:>10} ₳\n\
             Elite {:.0}%: {:>8.1}%\n\
             Cycle {} | Agents {} | {}x",
            report.elapsed_years,
            paused,
            fmt_thousands(stats.principal_total),
            fmt_thousands(stats.credit_total),
            fmt_thousands(stats.grand_total),
            clock.config().top_percentile * 100.0,
            stats.elite_share_percent(),
            report.cycle,
            stats.agent_count(),
            speed.0,
        );
    }

    if let Ok(mut text) = interest_query.get_single_mut() {
        **text = format!(
            "Interest Earned: {} ₳",
            fmt_thousands(stats.depositors_interest)
        );
    }
}

/// Keyboard controls: Space pauses, 1-3 pick the speed, Escape quits
pub fn sim_control_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<State<SimState>>,
    mut next_state: ResMut<NextState<SimState>>,
    mut speed: ResMut<SimSpeed>,
    mut exit: EventWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
    }
    if keyboard.just_pressed(KeyCode::Space) {
        next_state.set(match state.get() {
            SimState::Running => SimState::Paused,
            SimState::Paused => SimState::Running,
        });
    }
    if keyboard.just_pressed(KeyCode::Digit1) {
        speed.0 = 1;
    }
    if keyboard.just_pressed(KeyCode::Digit2) {
        speed.0 = 4;
    }
    if keyboard.just_pressed(KeyCode::Digit3) {
        speed.0 = 16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_thousands() {
        assert_eq!(fmt_thousands(0.0), "0");
        assert_eq!(fmt_thousands(999.4), "999");
        assert_eq!(fmt_thousands(53_000.4), "53,000");
        assert_eq!(fmt_thousands(1_234_567.0), "1,234,567");
        assert_eq!(fmt_thousands(-3_000.0), "-3,000");
    }
}
