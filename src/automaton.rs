use std::fmt::{Debug, Display};

use tracing::{debug, trace};

use crate::builder::TransitionKey;
use crate::math::{Map, Set};
use crate::prelude::*;

/// Renders the transition table of a [`DFA`].
#[cfg(feature = "table")]
pub mod table;

macro_rules! label_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
        pub struct $name(String);

        impl $name {
            /// Returns the label as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the label is the empty string.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Show for $name {
            fn show(&self) -> String {
                self.0.clone()
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&$name> for $name {
            fn from(value: &$name) -> Self {
                value.clone()
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

label_type!(
    /// A state of a [`DFA`], identified by its label. Two states with the same label are the same state.
    State
);

label_type!(
    /// A symbol of the input alphabet of a [`DFA`], identified by its label.
    Symbol
);

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        Self(value.to_string())
    }
}

/// A deterministic finite automaton (DFA), i.e. a 5-tuple consisting of a set of states, an input
/// alphabet, an initial state, a set of final (accepting) states and a total transition function.
/// On top of that, a DFA tracks the state it currently is in, which is moved by [`DFA::step`]-ing
/// through input symbols.
///
/// A `DFA` can only be obtained through [`DFABuilder::build`], which guarantees that the transition
/// function is total. Apart from the current state, the automaton is immutable.
///
/// # Example
/// ```
/// use fsmbuilder::prelude::*;
///
/// let mut builder = DFABuilder::new();
/// builder.add_states(["even", "odd"]).add_symbols(['1']);
/// builder
///     .set_initial_state("even")?
///     .add_final_states(["even"])?
///     .add_transition("even", '1', "odd")?
///     .add_transition("odd", '1', "even")?;
/// let mut dfa = builder.build()?;
///
/// assert!(dfa.process_input("11")?);
/// assert!(!dfa.process_input("111")?);
/// assert_eq!(dfa.current_state(), &State::from("odd"));
/// # Ok::<(), DfaError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DFA {
    pub(crate) states: Set<State>,
    pub(crate) alphabet: Set<Symbol>,
    pub(crate) initial: State,
    pub(crate) final_states: Set<State>,
    pub(crate) transitions: Map<TransitionKey, State>,
    pub(crate) current: State,
}

impl DFA {
    /// Moves the automaton back into its initial state.
    pub fn reset(&mut self) {
        self.current = self.initial.clone();
    }

    /// Returns the state the automaton is currently in.
    pub fn current_state(&self) -> &State {
        &self.current
    }

    /// Returns the designated initial state.
    pub fn initial_state(&self) -> &State {
        &self.initial
    }

    /// Looks up the successor of `state` on `symbol`. Returns `None` if either of them is unknown.
    pub fn transition(&self, state: impl Into<State>, symbol: impl Into<Symbol>) -> Option<&State> {
        self.transitions.get(&TransitionKey::new(state, symbol))
    }

    /// Takes a single transition on `symbol` from the current state. Fails if the symbol is not part
    /// of the alphabet, or if there is no transition for it, in which case the current state is
    /// left unchanged.
    pub fn step(&mut self, symbol: impl Into<Symbol>) -> Result<(), DfaError> {
        let symbol = symbol.into();
        let next = self.successor(&self.current, symbol.clone())?.clone();
        trace!("δ({}, {}) = {}", self.current.show(), symbol.show(), next.show());
        self.current = next;
        Ok(())
    }

    /// Feeds all symbols of `input` into the automaton, starting from the current state. Processing stops
    /// at the first symbol that cannot be consumed, the automaton then stays in the state it reached
    /// up to that point.
    pub fn process_string<W: FiniteWord + ?Sized>(&mut self, input: &W) -> Result<(), DfaError> {
        for symbol in input.symbols() {
            self.step(symbol)?;
        }
        Ok(())
    }

    /// Returns true if the current state is a final state.
    pub fn is_final_state(&self) -> bool {
        self.final_states.contains(&self.current)
    }

    /// Resets the automaton and processes `input` from the initial state. Gives back whether the
    /// reached state is final, or the first error encountered during processing.
    pub fn process_input<W: FiniteWord + ?Sized>(&mut self, input: &W) -> Result<bool, DfaError> {
        self.reset();
        self.process_string(input)?;
        let accepted = self.is_final_state();
        debug!(
            "input processed, reached {} which is {}",
            self.current.show(),
            if accepted { "accepting" } else { "rejecting" }
        );
        Ok(accepted)
    }

    /// Runs `input` from the initial state without touching the current state of `self`, and gives
    /// back the state that is reached.
    pub fn reached_state<W: FiniteWord + ?Sized>(&self, input: &W) -> Result<&State, DfaError> {
        input
            .symbols()
            .try_fold(&self.initial, |state, symbol| self.successor(state, symbol))
    }

    /// Decides whether `input` is accepted, i.e. whether running it from the initial state leads
    /// to a final state. Unlike [`DFA::process_input`], this leaves the current state untouched.
    pub fn accepts<W: FiniteWord + ?Sized>(&self, input: &W) -> Result<bool, DfaError> {
        Ok(self.final_states.contains(self.reached_state(input)?))
    }

    /// Returns a copy of the set of states.
    pub fn states(&self) -> Set<State> {
        self.states.clone()
    }

    /// Returns a copy of the alphabet.
    pub fn alphabet(&self) -> Set<Symbol> {
        self.alphabet.clone()
    }

    /// Returns a copy of the set of final states.
    pub fn final_states(&self) -> Set<State> {
        self.final_states.clone()
    }

    fn successor(&self, state: &State, symbol: Symbol) -> Result<&State, DfaError> {
        if !self.alphabet.contains(&symbol) {
            return Err(DfaError::UnknownSymbol(symbol));
        }
        let key = TransitionKey {
            state: state.clone(),
            symbol,
        };
        match self.transitions.get(&key) {
            Some(next) => Ok(next),
            None => Err(DfaError::TransitionUndefined(key.state, key.symbol)),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use itertools::Itertools;

    use crate::prelude::*;

    pub fn mod3() -> DFA {
        let mut builder = DFABuilder::new();
        builder
            .add_states(["S0", "S1", "S2"])
            .add_symbols(["0", "1"]);
        builder
            .set_initial_state("S0")
            .unwrap()
            .add_final_states(["S0", "S1", "S2"])
            .unwrap()
            .add_transitions([
                [(("S0", "0"), "S0")],
                [(("S0", "1"), "S1")],
                [(("S1", "0"), "S2")],
                [(("S1", "1"), "S0")],
                [(("S2", "0"), "S1")],
                [(("S2", "1"), "S2")],
            ])
            .unwrap();
        builder.build().unwrap()
    }

    fn ab_loop() -> DFA {
        let mut builder = DFABuilder::new();
        builder.add_states(["p", "q"]).add_symbols(['a', 'b']);
        builder
            .set_initial_state("p")
            .unwrap()
            .add_final_states(["q"])
            .unwrap()
            .add_transition("p", 'a', "q")
            .unwrap()
            .add_transition("p", 'b', "p")
            .unwrap()
            .add_transition("q", 'a', "q")
            .unwrap()
            .add_transition("q", 'b', "p")
            .unwrap();
        builder.build().unwrap()
    }

    #[test_log::test]
    fn mod3_golden() {
        let mut dfa = mod3();
        for (word, expected) in [
            ("110", "S0"),
            ("1101", "S1"),
            ("1011", "S2"),
            ("", "S0"),
            ("0", "S0"),
            ("11111111", "S0"),
        ] {
            assert!(dfa.process_input(word).unwrap());
            assert_eq!(dfa.current_state(), expected, "on input {word}");
        }
    }

    #[test]
    fn mod3_matches_remainder() {
        let dfa = mod3();
        for n in 0u32..200 {
            let word = format!("{n:b}");
            let reached = dfa.reached_state(word.as_str()).unwrap();
            assert_eq!(reached.as_str(), format!("S{}", n % 3));
        }
    }

    #[test]
    fn totality() {
        let mut dfa = ab_loop();
        let (states, alphabet) = (dfa.states(), dfa.alphabet());
        for (q, a) in states.iter().cartesian_product(alphabet.iter()) {
            dfa.current = q.clone();
            dfa.step(a).unwrap();
            assert!(states.contains(dfa.current_state()));
        }
    }

    #[test]
    fn determinism() {
        let mut dfa = ab_loop();
        for word in ["", "a", "ab", "abba", "bbbba", "abababab"] {
            let first = dfa.process_input(word).unwrap();
            let first_state = dfa.current_state().clone();
            dfa.process_string("aab").unwrap();
            let second = dfa.process_input(word).unwrap();
            assert_eq!(first, second);
            assert_eq!(&first_state, dfa.current_state());
        }
    }

    #[test]
    fn reset_is_idempotent() {
        let mut dfa = ab_loop();
        dfa.process_string("a").unwrap();
        assert_eq!(dfa.current_state(), "q");
        dfa.reset();
        let once = dfa.current_state().clone();
        dfa.reset();
        assert_eq!(&once, dfa.current_state());
        assert_eq!(dfa.current_state(), dfa.initial_state());
    }

    #[test]
    fn process_string_continues_from_current_state() {
        let mut dfa = ab_loop();
        dfa.process_string("a").unwrap();
        dfa.process_string("b").unwrap();
        assert_eq!(dfa.current_state(), "p");
        dfa.process_string("a").unwrap();
        assert!(dfa.is_final_state());
    }

    #[test_log::test]
    fn unknown_symbol_during_processing() {
        let mut dfa = ab_loop();
        let err = dfa.process_input("c").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownSymbol);
        assert_eq!(err.to_string(), "symbol c not in alphabet");

        // processing stops where the offending symbol occurs
        let err = dfa.process_input("aca").unwrap_err();
        assert_eq!(err, DfaError::UnknownSymbol('c'.into()));
        assert_eq!(dfa.current_state(), "q");
    }

    #[test]
    fn step_checks_for_missing_transitions() {
        let mut dfa = ab_loop();
        dfa.transitions.remove(&TransitionKey::new("p", 'b'));
        let err = dfa.step('b').unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransitionUndefined);
        assert_eq!(err.to_string(), "no transition defined for δ(p, b)");
        assert_eq!(dfa.current_state(), "p");
        assert!(dfa.accepts("b").is_err());
    }

    #[test]
    fn accepts_leaves_current_state_untouched() {
        let mut dfa = ab_loop();
        dfa.process_string("a").unwrap();
        assert!(!dfa.accepts("ab").unwrap());
        assert!(dfa.accepts("bba").unwrap());
        assert_eq!(dfa.current_state(), "q");
        assert_eq!(dfa.reached_state("ab").unwrap(), "p");
    }

    #[test]
    fn shared_automaton_across_threads() {
        let dfa = mod3();
        std::thread::scope(|scope| {
            let handles = (0u32..8)
                .map(|offset| {
                    let dfa = &dfa;
                    scope.spawn(move || {
                        (offset * 50..offset * 50 + 50).all(|n| {
                            let word = format!("{n:b}");
                            dfa.reached_state(word.as_str()).unwrap().as_str()
                                == format!("S{}", n % 3)
                        })
                    })
                })
                .collect_vec();
            assert!(handles.into_iter().all(|h| h.join().unwrap()));
        });
    }

    #[test]
    fn symbol_sequences_as_input() {
        let mut builder = DFABuilder::new();
        builder.add_states(["idle", "open"]).add_symbols(["SYN", "FIN"]);
        builder
            .set_initial_state("idle")
            .unwrap()
            .add_final_states(["idle"])
            .unwrap()
            .add_transition("idle", "SYN", "open")
            .unwrap()
            .add_transition("idle", "FIN", "idle")
            .unwrap()
            .add_transition("open", "SYN", "open")
            .unwrap()
            .add_transition("open", "FIN", "idle")
            .unwrap();
        let mut dfa = builder.build().unwrap();

        let session = vec![Symbol::from("SYN"), Symbol::from("FIN")];
        assert!(dfa.process_input(&session).unwrap());
        assert!(!dfa.process_input(&[Symbol::from("SYN")]).unwrap());
        // strings are split into characters, which are not part of this alphabet
        assert_eq!(
            dfa.process_input("SYN").unwrap_err(),
            DfaError::UnknownSymbol('S'.into())
        );
    }

    #[test]
    fn snapshots_are_copies() {
        let dfa = mod3();
        let mut states = dfa.states();
        states.insert("S3".into());
        assert_eq!(dfa.states().len(), 3);
        assert_eq!(
            dfa.alphabet(),
            ["0", "1"].into_iter().map(Symbol::from).collect::<Set<_>>()
        );
        assert_eq!(dfa.final_states(), dfa.states());
        assert_eq!(dfa.transition("S1", "0"), Some(&State::from("S2")));
        assert_eq!(dfa.transition("S1", "2"), None);
    }
}
