use snake_arena_core::Direction;
use snake_arena_rendering_macroquad::{frame_input_from_observations, KeyObservations};

fn keys(up: bool, down: bool, left: bool, right: bool) -> KeyObservations {
    KeyObservations {
        up,
        down,
        left,
        right,
        space: false,
    }
}

fn replay(sequence: &[KeyObservations]) -> Vec<Vec<Direction>> {
    sequence
        .iter()
        .map(|observed| frame_input_from_observations(*observed).held.iter().collect())
        .collect()
}

#[test]
fn held_key_sequence_maps_deterministically() {
    let sequence = [
        keys(false, false, false, false),
        keys(true, false, false, false),
        keys(true, false, true, false),
        keys(false, true, false, true),
        keys(true, true, true, true),
    ];
    let expected = vec![
        vec![],
        vec![Direction::North],
        vec![Direction::North, Direction::East],
        vec![Direction::South, Direction::West],
        vec![
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ],
    ];

    let first_run = replay(&sequence);
    let second_run = replay(&sequence);

    assert_eq!(first_run, expected);
    assert_eq!(first_run, second_run, "key replay diverged between runs");
}

#[test]
fn space_requests_restart_without_steering() {
    let input = frame_input_from_observations(KeyObservations {
        space: true,
        ..KeyObservations::default()
    });

    assert!(input.restart);
    assert_eq!(input.held.first(), None);
}
