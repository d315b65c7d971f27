use itertools::Itertools;
use tracing::{debug, trace};

use crate::math::{Map, Set};
use crate::prelude::*;

/// The domain of the transition function, a pair consisting of a state and a symbol.
#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct TransitionKey {
    /// The state in which the transition originates.
    pub state: State,
    /// The symbol on which the transition is taken.
    pub symbol: Symbol,
}

impl TransitionKey {
    /// Creates a new key for the transition leaving `state` on `symbol`.
    pub fn new(state: impl Into<State>, symbol: impl Into<Symbol>) -> Self {
        Self {
            state: state.into(),
            symbol: symbol.into(),
        }
    }
}

impl<Q: Into<State>, A: Into<Symbol>> From<(Q, A)> for TransitionKey {
    fn from((state, symbol): (Q, A)) -> Self {
        Self::new(state, symbol)
    }
}

impl Show for TransitionKey {
    fn show(&self) -> String {
        format!("δ({}, {})", self.state, self.symbol)
    }
}

/// A group of transitions as it is handed to [`DFABuilder::add_transitions`].
pub type TransitionGroup = Map<TransitionKey, State>;

/// Helper struct for the incremental construction of a [`DFA`]. It accumulates states, alphabet symbols,
/// the initial state, final states and transitions. Every addition that refers to states or symbols is
/// checked against what has been added so far, and [`DFABuilder::build`] verifies that the result is a
/// proper DFA, i.e. that the transition function is total.
///
/// Failing operations do not roll back what they already did, the builder stays usable and can be
/// inspected or corrected after an error. In particular, [`DFABuilder::add_final_states`] and
/// [`DFABuilder::add_transitions`] keep everything that was added before the offending element.
///
/// # Example
///
/// We want to create a DFA that computes the remainder of a binary number when dividing by three. It has
/// three states `S0`, `S1` and `S2` over the alphabet `['0', '1']`, where `Si` is reached if the remainder
/// is `i`. This can be done as follows
/// ```
/// use fsmbuilder::prelude::*;
///
/// let mut builder = DFABuilder::new();
/// builder.add_states(["S0", "S1", "S2"]).add_symbols(['0', '1']);
/// builder
///     .set_initial_state("S0")?
///     .add_final_states(["S0", "S1", "S2"])?
///     .add_transitions([
///         [(("S0", '0'), "S0"), (("S0", '1'), "S1")],
///         [(("S1", '0'), "S2"), (("S1", '1'), "S0")],
///         [(("S2", '0'), "S1"), (("S2", '1'), "S2")],
///     ])?;
/// let mut dfa = builder.build()?;
///
/// dfa.process_input("1101")?;
/// assert_eq!(dfa.current_state(), &State::from("S1"));
/// # Ok::<(), DfaError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct DFABuilder {
    states: Set<State>,
    alphabet: Set<Symbol>,
    initial: Option<State>,
    final_states: Set<State>,
    transitions: Map<TransitionKey, State>,
}

impl DFABuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the given states. Adding a state that already exists has no effect.
    pub fn add_states<I>(&mut self, states: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<State>,
    {
        for state in states {
            let state = state.into();
            trace!("adding state {}", state.show());
            self.states.insert(state);
        }
        self
    }

    /// Adds the given symbols to the alphabet. Adding a symbol that already exists has no effect.
    pub fn add_symbols<I>(&mut self, symbols: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Symbol>,
    {
        for symbol in symbols {
            let symbol = symbol.into();
            trace!("adding symbol {}", symbol.show());
            self.alphabet.insert(symbol);
        }
        self
    }

    /// Designates `state` as the initial state, replacing any previously set initial state. The
    /// state must already have been added.
    pub fn set_initial_state(&mut self, state: impl Into<State>) -> Result<&mut Self, DfaError> {
        let state = self.known_state(state.into())?;
        trace!("setting initial state {}", state.show());
        self.initial = Some(state);
        Ok(self)
    }

    /// Marks the given states as final. Stops at the first state that has not been added, states
    /// preceding it remain final.
    pub fn add_final_states<I>(&mut self, states: I) -> Result<&mut Self, DfaError>
    where
        I: IntoIterator,
        I::Item: Into<State>,
    {
        for state in states {
            let state = self.known_state(state.into())?;
            trace!("adding final state {}", state.show());
            self.final_states.insert(state);
        }
        Ok(self)
    }

    /// Registers the transition from `state` on `symbol` to `next`. Both states and the symbol have
    /// to be known already, and there may not yet be a transition for `state` on `symbol`.
    pub fn add_transition(
        &mut self,
        state: impl Into<State>,
        symbol: impl Into<Symbol>,
        next: impl Into<State>,
    ) -> Result<&mut Self, DfaError> {
        let state = self.known_state(state.into())?;
        let next = next.into();
        if !self.states.contains(&next) {
            return Err(DfaError::UnknownNextState(next));
        }
        let symbol = symbol.into();
        if !self.alphabet.contains(&symbol) {
            return Err(DfaError::UnknownSymbol(symbol));
        }

        let key = TransitionKey { state, symbol };
        if self.transitions.contains_key(&key) {
            return Err(DfaError::DuplicateTransition(key.state, key.symbol));
        }
        trace!("adding transition {} = {}", key.show(), next.show());
        self.transitions.insert(key, next);
        Ok(self)
    }

    /// Adds a batch of transitions, which is given as a sequence of groups. The groups are processed in
    /// order, each entry is added through [`DFABuilder::add_transition`]. Stops at the first failing
    /// entry, all transitions added before it are kept.
    pub fn add_transitions<I, G, K, Q>(&mut self, groups: I) -> Result<&mut Self, DfaError>
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = (K, Q)>,
        K: Into<TransitionKey>,
        Q: Into<State>,
    {
        for group in groups {
            for (key, next) in group {
                let TransitionKey { state, symbol } = key.into();
                self.add_transition(state, symbol, next)?;
            }
        }
        Ok(self)
    }

    /// Returns the states that were added so far.
    pub fn states(&self) -> &Set<State> {
        &self.states
    }

    /// Returns the alphabet symbols that were added so far.
    pub fn alphabet(&self) -> &Set<Symbol> {
        &self.alphabet
    }

    /// Returns the initial state, if one has been set.
    pub fn initial_state(&self) -> Option<&State> {
        self.initial.as_ref()
    }

    /// Returns the final states that were added so far.
    pub fn final_states(&self) -> &Set<State> {
        &self.final_states
    }

    /// Returns the transitions that were added so far.
    pub fn transitions(&self) -> &Map<TransitionKey, State> {
        &self.transitions
    }

    /// Validates the accumulated parts and creates a [`DFA`] from them, which starts out in its initial
    /// state. The checks are performed in a fixed order and the first violation is reported:
    /// 1. there is at least one state,
    /// 2. there is at least one symbol,
    /// 3. an initial state is set,
    /// 4. there is at least one final state,
    /// 5. the initial state is one of the states,
    /// 6. for every state and every symbol, a transition exists.
    ///
    /// The builder is not consumed and stays as it is, regardless of the outcome.
    pub fn build(&self) -> Result<DFA, DfaError> {
        if self.states.is_empty() {
            return Err(DfaError::EmptyStates);
        }
        if self.alphabet.is_empty() {
            return Err(DfaError::EmptyAlphabet);
        }
        let initial = match &self.initial {
            Some(initial) if !initial.is_empty() => initial.clone(),
            _ => return Err(DfaError::MissingInitialState),
        };
        if self.final_states.is_empty() {
            return Err(DfaError::EmptyFinalStates);
        }
        if !self.states.contains(&initial) {
            return Err(DfaError::InitialStateNotInStates(initial));
        }

        // pairs are scanned in sorted order, so the reported gap does not depend on hashing
        if let Some((state, symbol)) = self
            .states
            .iter()
            .sorted()
            .cartesian_product(self.alphabet.iter().sorted())
            .find(|(state, symbol)| {
                !self
                    .transitions
                    .contains_key(&TransitionKey::new(*state, *symbol))
            })
        {
            return Err(DfaError::MissingTransition(state.clone(), symbol.clone()));
        }

        debug!(
            "built DFA with {} states over {} symbols, initial state {}, final states {}",
            self.states.len(),
            self.alphabet.len(),
            initial.show(),
            self.final_states.show()
        );
        Ok(DFA {
            states: self.states.clone(),
            alphabet: self.alphabet.clone(),
            initial: initial.clone(),
            final_states: self.final_states.clone(),
            transitions: self.transitions.clone(),
            current: initial,
        })
    }

    fn known_state(&self, state: State) -> Result<State, DfaError> {
        if self.states.contains(&state) {
            Ok(state)
        } else {
            Err(DfaError::UnknownState(state))
        }
    }
}
