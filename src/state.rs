use serde::{Deserialize, Serialize};
use std::{
	collections::{BTreeMap, BTreeSet},
	fmt,
};

/// A single named state and its outgoing transitions.
///
/// Destinations are held by name rather than by reference, so self-loops and
/// epsilon cycles need no special handling. The owning [`NFA`](crate::NFA)
/// resolves names back to states during simulation.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct State {
	name: String,
	transitions: BTreeMap<char, BTreeSet<String>>,
}

impl State {
	pub(crate) fn new<N>(name: N) -> Self
	where
		N: Into<String>,
	{
		Self {
			name: name.into(),
			transitions: BTreeMap::new(),
		}
	}

	/// Returns the name of the state.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the destination states reachable on `symbol` with a single move.
	/// Empty for symbols without outgoing transitions.
	pub fn to_states(&self, symbol: char) -> impl Iterator<Item = &str> {
		self.transitions
			.get(&symbol)
			.into_iter()
			.flatten()
			.map(String::as_str)
	}

	pub(crate) fn add_transition(&mut self, symbol: char, to: String) {
		self.transitions
			.entry(symbol)
			.or_insert_with(BTreeSet::new)
			.insert(to);
	}
}

impl fmt::Display for State {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&self.name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn transitions() {
		let mut state = State::new("q0");
		assert_eq!("q0", state.name(), "Incorrect state name");
		assert_eq!(
			0,
			state.to_states('a').count(),
			"Fresh state has outgoing transitions"
		);

		state.add_transition('a', "q1".to_string());
		state.add_transition('a', "q2".to_string());
		state.add_transition('a', "q1".to_string());
		let on_a: Vec<_> = state.to_states('a').collect();
		assert_eq!(
			vec!["q1", "q2"],
			on_a,
			"Incorrect destinations after duplicate insert"
		);
		assert_eq!(
			0,
			state.to_states('b').count(),
			"Unmapped symbol yields destinations"
		);
	}
}
