use thiserror::Error;

use crate::automaton::{State, Symbol};

/// Abstracts the types of errors that can occur when assembling a [`crate::DFA`] through a
/// [`crate::DFABuilder`] or when running input on it. The rendered messages are stable, callers
/// may rely on their wording.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Error)]
#[allow(missing_docs)]
pub enum DfaError {
    #[error("state {0} not in state set")]
    UnknownState(State),
    #[error("next state {0} not in state set")]
    UnknownNextState(State),
    #[error("symbol {0} not in alphabet")]
    UnknownSymbol(Symbol),
    #[error("transition δ({0}, {1}) already defined")]
    DuplicateTransition(State, Symbol),
    #[error("FSM must have at least one state")]
    EmptyStates,
    #[error("FSM must have at least one symbol in alphabet")]
    EmptyAlphabet,
    #[error("FSM must have an initial state")]
    MissingInitialState,
    #[error("FSM must have at least one final state")]
    EmptyFinalStates,
    #[error("initial state must be in state set")]
    InitialStateNotInStates(State),
    #[error("transition δ({0}, {1}) is not defined")]
    MissingTransition(State, Symbol),
    #[error("no transition defined for δ({0}, {1})")]
    TransitionUndefined(State, Symbol),
}

/// The coarse classification of a [`DfaError`]. Both an unknown origin and an unknown
/// target of a transition are reported as [`ErrorKind::UnknownState`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[allow(missing_docs)]
pub enum ErrorKind {
    UnknownState,
    UnknownSymbol,
    DuplicateTransition,
    EmptyStates,
    EmptyAlphabet,
    MissingInitialState,
    EmptyFinalStates,
    InitialStateNotInStates,
    MissingTransition,
    TransitionUndefined,
}

impl DfaError {
    /// Returns the [`ErrorKind`] of `self`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DfaError::UnknownState(_) | DfaError::UnknownNextState(_) => ErrorKind::UnknownState,
            DfaError::UnknownSymbol(_) => ErrorKind::UnknownSymbol,
            DfaError::DuplicateTransition(..) => ErrorKind::DuplicateTransition,
            DfaError::EmptyStates => ErrorKind::EmptyStates,
            DfaError::EmptyAlphabet => ErrorKind::EmptyAlphabet,
            DfaError::MissingInitialState => ErrorKind::MissingInitialState,
            DfaError::EmptyFinalStates => ErrorKind::EmptyFinalStates,
            DfaError::InitialStateNotInStates(_) => ErrorKind::InitialStateNotInStates,
            DfaError::MissingTransition(..) => ErrorKind::MissingTransition,
            DfaError::TransitionUndefined(..) => ErrorKind::TransitionUndefined,
        }
    }
}
