use super::*;
use crate::doc::{Diagram, Step};
use crate::sequencer::Sequencer;
use uuid::Uuid;

fn two_step_diagram() -> Diagram {
    let mut diagram = Diagram::new();
    let frames = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
    for (i, frame) in frames.iter().enumerate() {
        diagram.insert_frame(*frame, format!("f{i}"));
    }
    for i in 0..2 {
        let edge = Uuid::new_v4();
        diagram.insert_edge(edge, frames[i], frames[i + 1], String::new());
        diagram.push_step(Step {
            parent: Some(frames[i]),
            child: frames[i + 1],
            edge: Some(edge),
            is_return: false,
        });
    }
    diagram
}

#[test]
fn previous_keys_map_to_prev() {
    for name in ["p", "ArrowLeft"] {
        assert_eq!(ControlEvent::from_key(&Key(name.to_owned())), Some(ControlEvent::Prev));
    }
}

#[test]
fn next_keys_map_to_next() {
    for name in ["n", "ArrowRight"] {
        assert_eq!(ControlEvent::from_key(&Key(name.to_owned())), Some(ControlEvent::Next));
    }
}

#[test]
fn unbound_keys_map_to_nothing() {
    for name in ["Escape", "N", "ArrowUp", "", " "] {
        assert_eq!(ControlEvent::from_key(&Key(name.to_owned())), None);
    }
}

#[test]
fn state_at_the_end_disables_next_only() {
    let state = ControlState::of(&Sequencer::new(two_step_diagram()));
    assert!(state.prev_enabled);
    assert!(!state.next_enabled);
    assert_eq!(state.slider_max, 1);
    assert_eq!(state.slider_value, 1);
}

#[test]
fn state_at_the_start_disables_prev_only() {
    let state = ControlState::of(&Sequencer::with_start(two_step_diagram(), Some(0)));
    assert!(!state.prev_enabled);
    assert!(state.next_enabled);
    assert_eq!(state.slider_value, 0);
}

#[test]
fn empty_sequence_renders_fully_disabled() {
    let state = ControlState::of(&Sequencer::new(Diagram::new()));
    assert!(!state.prev_enabled);
    assert!(!state.next_enabled);
    assert_eq!(state.slider_max, 0);
    assert_eq!(state.slider_value, 0);
}
