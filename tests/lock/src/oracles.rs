//! Engine-independent reference checks.

use std::collections::{HashSet, VecDeque};
use std::fmt::Debug;

use waypoint_search::{Cost, DomainAdapter, Solution};

/// Every state reachable from the initial state, found by a plain
/// breadth-first walk over `successors`.
///
/// # Panics
///
/// Panics if more than `cap` states are reachable.
pub fn reachable_states<D: DomainAdapter>(adapter: &D, cap: usize) -> HashSet<D::State> {
    let root = adapter.initial_state();
    let mut seen = HashSet::from([root.clone()]);
    let mut queue = VecDeque::from([root]);
    while let Some(state) = queue.pop_front() {
        for succ in adapter.successors(&state) {
            if seen.insert(succ.state.clone()) {
                assert!(
                    seen.len() <= cap,
                    "{} has more than {cap} reachable states",
                    adapter.domain_id()
                );
                queue.push_back(succ.state);
            }
        }
    }
    seen
}

/// Replay `solution.actions` through `successors` from the initial state and
/// check that the visited states and summed cost match the solution.
///
/// # Panics
///
/// Panics on the first mismatch.
pub fn assert_replays<D>(adapter: &D, solution: &Solution<D::State, D::Action>)
where
    D: DomainAdapter,
    D::Action: PartialEq + Debug,
{
    assert_eq!(solution.states.len(), solution.actions.len() + 1);
    let mut state = adapter.initial_state();
    assert_eq!(solution.states[0], state, "plan does not start at the initial state");
    let mut cost: Cost = 0;
    for (step, action) in solution.actions.iter().enumerate() {
        let succ = adapter
            .successors(&state)
            .into_iter()
            .find(|s| s.action == *action)
            .unwrap_or_else(|| panic!("step {step}: {action:?} is not legal in {state:?}"));
        cost += succ.step_cost;
        state = succ.state;
        assert_eq!(solution.states[step + 1], state, "step {step}: state diverges");
    }
    assert!(adapter.is_goal(&state), "replayed plan does not end at a goal");
    assert_eq!(cost, solution.cost, "replayed cost differs");
}
