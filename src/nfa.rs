use super::{AutomatonError, State, EPSILON};
use serde::{Deserialize, Serialize};
use std::{
	collections::{BTreeSet, HashMap},
	iter,
};
use tracing::trace;

/// A non-deterministic finite automaton with epsilon transitions.
///
/// States are registered under unique names and linked by symbol-labeled
/// transitions. Simulation walks a *frontier* of simultaneously active
/// states, expanding it through [`e_closure`](NFA::e_closure) before and
/// after every consumed symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NFA {
	sigma: BTreeSet<char>,
	states: HashMap<String, State>,
	start: Option<String>,
	finals: BTreeSet<String>,
}

impl Default for NFA {
	fn default() -> Self {
		Self {
			sigma: iter::once(EPSILON).collect(),
			states: HashMap::new(),
			start: None,
			finals: BTreeSet::new(),
		}
	}
}

impl NFA {
	/// Creates a new empty automaton.
	/// The alphabet starts out holding only [`EPSILON`].
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a new automaton with a single registered state marked as start.
	pub fn with_start<N>(name: N) -> Self
	where
		N: Into<String>,
	{
		let mut nfa = Self::new();
		let state = State::new(name);
		nfa.start = Some(state.name().to_owned());
		nfa.states.insert(state.name().to_owned(), state);
		nfa
	}

	/// Creates a new automaton with a given set of states & transitions.
	/// Transition symbols are added to the alphabet as a side effect.
	pub fn from_transitions<'a, V, F, T>(
		start: &str,
		states: V,
		finals: F,
		transitions: T,
	) -> Result<Self, AutomatonError>
	where
		V: IntoIterator<Item = &'a str>,
		F: IntoIterator<Item = &'a str>,
		T: IntoIterator<Item = (&'a str, char, &'a str)>,
	{
		let mut nfa = Self::new();
		for name in states {
			nfa.add_state(name)?;
		}
		nfa.set_start(start)?;
		for name in finals {
			nfa.set_final(name)?;
		}
		for (from, symbol, to) in transitions {
			nfa.add_sigma(symbol);
			nfa.add_transition(from, Some(to), symbol)?;
		}
		Ok(nfa)
	}

	/// Registers a new state without transitions.
	/// Returns an `AutomatonError::DuplicateState` error if the name is taken.
	pub fn add_state<N>(&mut self, name: N) -> Result<(), AutomatonError>
	where
		N: Into<String>,
	{
		let state = State::new(name);
		if self.states.contains_key(state.name()) {
			return Err(AutomatonError::DuplicateState(state.name().to_owned()));
		}
		self.states.insert(state.name().to_owned(), state);
		Ok(())
	}

	/// Marks a registered state as the start state, replacing any prior one.
	pub fn set_start(&mut self, name: &str) -> Result<(), AutomatonError> {
		if !self.has_state(name) {
			return Err(AutomatonError::UnknownState(name.to_owned()));
		}
		self.start = Some(name.to_owned());
		Ok(())
	}

	/// Adds a registered state to the final set. Idempotent.
	pub fn set_final(&mut self, name: &str) -> Result<(), AutomatonError> {
		if !self.has_state(name) {
			return Err(AutomatonError::UnknownState(name.to_owned()));
		}
		self.finals.insert(name.to_owned());
		Ok(())
	}

	/// Adds a symbol to the alphabet. Idempotent.
	pub fn add_sigma(&mut self, symbol: char) {
		self.sigma.insert(symbol);
	}

	/// Returns the alphabet, epsilon included.
	pub fn sigma(&self) -> &BTreeSet<char> {
		&self.sigma
	}

	/// Returns a reference to the requested state, if registered.
	pub fn state(&self, name: &str) -> Option<&State> {
		self.states.get(name)
	}

	/// Checks whether the states of the automaton include a name.
	pub fn has_state(&self, name: &str) -> bool {
		self.states.contains_key(name)
	}

	/// Checks whether a name belongs to the final set.
	/// False for unknown names.
	pub fn is_final(&self, name: &str) -> bool {
		self.finals.contains(name)
	}

	/// Checks whether a name is the start state.
	/// False for unknown names or while no start is set.
	pub fn is_start(&self, name: &str) -> bool {
		self.start.as_deref() == Some(name)
	}

	/// Adds one transition per destination from `from` under `symbol`.
	///
	/// The symbol must be in the alphabet (epsilon always is), and the source
	/// and every destination must be registered. All destinations are
	/// validated before any edge is inserted, so a failed call leaves the
	/// automaton unchanged. Duplicate edges are absorbed by set semantics.
	pub fn add_transition<'a, T>(
		&mut self,
		from: &str,
		to: T,
		symbol: char,
	) -> Result<(), AutomatonError>
	where
		T: IntoIterator<Item = &'a str>,
	{
		if symbol != EPSILON && !self.sigma.contains(&symbol) {
			return Err(AutomatonError::UnknownSymbol(symbol));
		}
		if !self.has_state(from) {
			return Err(AutomatonError::UnknownState(from.to_owned()));
		}
		let to: Vec<&str> = to.into_iter().collect();
		for name in &to {
			if !self.has_state(name) {
				return Err(AutomatonError::UnknownState((*name).to_owned()));
			}
		}
		let state = self
			.states
			.get_mut(from)
			.ok_or_else(|| AutomatonError::UnknownState(from.to_owned()))?;
		for name in to {
			state.add_transition(symbol, name.to_owned());
		}
		Ok(())
	}

	/// Computes the set of states reachable from `state` through zero or more
	/// epsilon transitions, `state` itself included.
	#[tracing::instrument(skip_all)]
	pub fn e_closure<'a>(&'a self, state: &'a State) -> BTreeSet<&'a str> {
		self.closure_from(state.name())
	}

	/// Worklist traversal of the epsilon graph. The visited set doubles as
	/// the result and guarantees termination on epsilon cycles.
	fn closure_from<'a>(&'a self, name: &'a str) -> BTreeSet<&'a str> {
		let mut closure = BTreeSet::new();
		let mut stack = vec![name];
		while let Some(current) = stack.pop() {
			if !closure.insert(current) {
				continue;
			}
			if let Some(state) = self.states.get(current) {
				for next in state.to_states(EPSILON) {
					if !closure.contains(next) {
						stack.push(next);
					}
				}
			}
		}
		closure
	}

	/// Performs a single frontier transition: one real move on `symbol` per
	/// active state, each destination expanded through its epsilon closure.
	fn step<'a>(&'a self, frontier: &BTreeSet<&'a str>, symbol: char) -> BTreeSet<&'a str> {
		let mut next = BTreeSet::new();
		for &name in frontier {
			if let Some(state) = self.states.get(name) {
				for to in state.to_states(symbol) {
					// closures are transitively closed, so members of
					// `next` already carry their closure with them
					if !next.contains(to) {
						next.extend(self.closure_from(to));
					}
				}
			}
		}
		next
	}

	/// Runs the frontier simulation over `input` and returns the final
	/// frontier together with the widest frontier observed, the initial
	/// closed start frontier included. Shared by [`accepts`](NFA::accepts)
	/// and [`max_copies`](NFA::max_copies) so both agree on every step.
	fn simulate<'a>(&'a self, input: &str) -> Result<(BTreeSet<&'a str>, usize), AutomatonError> {
		let start = match &self.start {
			Some(name) => name.as_str(),
			None => return Err(AutomatonError::NoStartState),
		};
		let mut frontier = self.closure_from(start);
		let mut copies = frontier.len();
		for symbol in input.chars() {
			frontier = self.step(&frontier, symbol);
			trace!(%symbol, width = frontier.len(), "consumed symbol");
			copies = copies.max(frontier.len());
			// stuck: nothing can revive an empty frontier
			if frontier.is_empty() {
				break;
			}
		}
		Ok((frontier, copies))
	}

	/// Checks whether the automaton accepts `input`, i.e. whether at least
	/// one final state is active once the whole input is consumed.
	/// Returns an `AutomatonError::NoStartState` error if no start is set.
	#[tracing::instrument(skip(self))]
	pub fn accepts(&self, input: &str) -> Result<bool, AutomatonError> {
		let (frontier, _) = self.simulate(input)?;
		Ok(frontier.into_iter().any(|name| self.finals.contains(name)))
	}

	/// Returns the largest number of parallel automaton copies a naive
	/// non-deterministic run over `input` would track simultaneously.
	/// Returns an `AutomatonError::NoStartState` error if no start is set.
	#[tracing::instrument(skip(self))]
	pub fn max_copies(&self, input: &str) -> Result<usize, AutomatonError> {
		let (_, copies) = self.simulate(input)?;
		Ok(copies)
	}
}
