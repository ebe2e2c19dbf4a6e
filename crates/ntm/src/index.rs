//! The machine definition: per-state transition lookup and accept flags.
//!
//! A container built once from the parsed transition stream and then
//! queried many times per simulated branch. The state and symbol space is
//! unbounded at compile time, so states are grown on demand rather than
//! stored in a fixed-size array.

use smallvec::SmallVec;

use crate::symbol::{Move, State, Symbol, Transition};

/// Below this many distinct input symbols at a state, `lookup` scans linearly
/// instead of binary searching. Alphabets in practice are small; this is a
/// tunable design constant, not an invariant.
const LINEAR_THRESHOLD: usize = 4;

#[derive(Debug, Clone, Default)]
struct InputEntry {
    input: Symbol,
    transitions: SmallVec<[Transition; 2]>,
}

#[derive(Debug, Clone, Default)]
struct StateEntry {
    accept: bool,
    entries: Vec<InputEntry>,
}

impl StateEntry {
    fn find(&self, input: Symbol) -> Option<usize> {
        if self.entries.len() <= LINEAR_THRESHOLD {
            self.entries.iter().position(|e| e.input == input)
        } else {
            self.entries.binary_search_by_key(&input, |e| e.input).ok()
        }
    }
}

/// A fully built machine definition: the state set, their accept flags, and
/// the per-state sorted map from input symbol to transition list.
#[derive(Debug, Clone, Default)]
pub struct TransitionIndex {
    states: Vec<StateEntry>,
}

impl TransitionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest state number that appeared as a `q_in` or `q_out` so far.
    pub fn max_state(&self) -> Option<u32> {
        self.states.len().checked_sub(1).map(|n| n as u32)
    }

    fn ensure_state(&mut self, state: State) {
        let index = state.get() as usize;
        if index >= self.states.len() {
            self.states.resize(index + 1, StateEntry::default());
        }
    }

    /// Accumulate one transition record. Idempotent: records sharing
    /// `(q_in, input)` extend that key's transition list rather than
    /// replacing it.
    pub fn insert(
        &mut self,
        q_in: State,
        input: Symbol,
        output: Symbol,
        move_: Move,
        q_out: State,
    ) {
        self.ensure_state(q_in);
        self.ensure_state(q_out);
        let entries = &mut self.states[q_in.get() as usize].entries;
        let transition = Transition {
            output,
            move_,
            next_state: q_out,
        };
        match entries.binary_search_by_key(&input, |e| e.input) {
            Ok(pos) => entries[pos].transitions.push(transition),
            Err(pos) => {
                let mut entry = InputEntry {
                    input,
                    transitions: SmallVec::new(),
                };
                entry.transitions.push(transition);
                entries.insert(pos, entry);
            }
        }
    }

    /// Mark `state` as accepting. Silently ignored if `state` is beyond
    /// every state number the `tr` stream has introduced so far.
    pub fn mark_accept(&mut self, state: State) {
        if let Some(entry) = self.states.get_mut(state.get() as usize) {
            entry.accept = true;
        }
    }

    pub fn is_accept(&self, state: State) -> bool {
        self.states
            .get(state.get() as usize)
            .map(|e| e.accept)
            .unwrap_or(false)
    }

    /// Lookup the transitions defined for `(state, input)`. Empty if absent.
    pub fn lookup(&self, state: State, input: Symbol) -> &[Transition] {
        let Some(entry) = self.states.get(state.get() as usize) else {
            return &[];
        };
        match entry.find(input) {
            Some(pos) => &entry.entries[pos].transitions,
            None => &[],
        }
    }
}
