use std::fmt;

/// Reserved symbol consumed by "free" moves between states.
///
/// Epsilon is part of every alphabet from construction on, so epsilon
/// transitions are always legal to add.
pub const EPSILON: char = 'e';

/// Enum representing an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
	/// A state with this name already exists.
	DuplicateState(String),
	/// No state with this name exists.
	UnknownState(String),
	/// The symbol is not part of the alphabet.
	UnknownSymbol(char),
	/// A simulation query was made before a start state was set.
	NoStartState,
}

impl fmt::Display for AutomatonError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::DuplicateState(name) => write!(f, "Duplicate state name \"{}\"", name),
			Self::UnknownState(name) => write!(f, "Unknown state name \"{}\"", name),
			Self::UnknownSymbol(symbol) => write!(f, "Symbol '{}' is not in the alphabet", symbol),
			Self::NoStartState => write!(f, "No start state configured"),
		}
	}
}

impl std::error::Error for AutomatonError {}
