use super::*;
use crate::doc::StepRole;
use crate::ingest::ingest;
use crate::sequencer::Sequencer;
use crate::tree::TreeNode;

/// Record `factorial(3)`: three nested calls unwinding in order.
fn factorial_run() -> Recorder {
    let mut recorder = Recorder::new();
    recorder.enter("factorial(3)").unwrap();
    recorder.enter("factorial(2)").unwrap();
    recorder.enter("factorial(1)").unwrap();
    recorder.leave("1").unwrap();
    recorder.leave("2").unwrap();
    recorder.leave("6").unwrap();
    recorder
}

#[test]
fn nested_run_emits_interleaved_call_and_return_ordinals() {
    let markup = factorial_run().finish();

    // Three call frames plus the synthetic result frame.
    assert_eq!(markup.nodes.len(), 4);
    assert_eq!(markup.nodes[0].title, "f0");
    assert_eq!(markup.nodes[3].title, "result");

    let titled: Vec<(&str, &str)> = markup
        .edges
        .iter()
        .map(|edge| (edge.title.as_str(), edge.text.as_str()))
        .collect();
    assert_eq!(
        titled,
        [
            ("f0->f1", "(#0)"),
            ("f1->f2", "(#1)"),
            ("f1->f2:c", "1 (#2)"),
            ("f0->f1:c", "2 (#3)"),
            ("result->f0:c", "6 (#4)"),
        ]
    );
}

#[test]
fn recorded_markup_ingests_cleanly() {
    let diagram = ingest(&factorial_run().finish()).unwrap();
    assert_eq!(diagram.len(), 5);
    assert!(!diagram.steps()[0].is_return);
    assert!(!diagram.steps()[1].is_return);
    assert!(diagram.steps()[2].is_return);
    assert!(diagram.steps()[3].is_return);
    assert!(diagram.steps()[4].is_return);
}

#[test]
fn recorded_run_steps_in_execution_order() {
    let diagram = ingest(&factorial_run().finish()).unwrap();
    let mut sequencer = Sequencer::with_start(diagram, Some(0));

    // Only the first call edge is reached at step 0.
    assert!(sequencer.is_activated(0, StepRole::Edge));
    assert!(!sequencer.is_activated(1, StepRole::Edge));

    sequencer.next();
    assert!(sequencer.is_activated(1, StepRole::Edge));
    assert!(!sequencer.is_activated(2, StepRole::Edge));
}

#[test]
fn branching_run_rebuilds_the_call_tree() {
    let mut recorder = Recorder::new();
    recorder.enter("fib(2)").unwrap();
    recorder.enter("fib(1)").unwrap();
    recorder.leave("1").unwrap();
    recorder.enter("fib(0)").unwrap();
    recorder.leave("0").unwrap();
    recorder.leave("1").unwrap();

    let tree = recorder.tree().unwrap();
    assert_eq!(
        tree,
        TreeNode::branch("fib(2)", vec![TreeNode::leaf("fib(1)"), TreeNode::leaf("fib(0)")])
    );
}

#[test]
fn no_tree_before_the_first_call() {
    assert_eq!(Recorder::new().tree(), None);
}

#[test]
fn run_without_a_return_has_no_result_frame() {
    let mut recorder = Recorder::new();
    recorder.enter("spin()").unwrap();
    let markup = recorder.finish();

    assert_eq!(markup.nodes.len(), 1);
    assert!(markup.edges.is_empty());
    assert!(ingest(&markup).unwrap().is_empty());
}

#[test]
fn call_budget_stops_runaway_recursion() {
    let mut recorder = Recorder::with_budget(2);
    recorder.enter("f(2)").unwrap();
    recorder.enter("f(1)").unwrap();
    let err = recorder.enter("f(0)").unwrap_err();
    assert!(matches!(err, TraceError::CallBudgetExceeded(2)));
    assert_eq!(recorder.call_count(), 2);
}

#[test]
fn leave_without_an_open_call_is_an_error() {
    let mut recorder = Recorder::new();
    assert!(matches!(recorder.leave("1"), Err(TraceError::NoOpenCall)));

    recorder.enter("f(0)").unwrap();
    recorder.leave("1").unwrap();
    assert!(matches!(recorder.leave("1"), Err(TraceError::NoOpenCall)));
}
