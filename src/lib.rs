//! Library for constructing and running deterministic finite automata (DFAs) in Rust.
//!
//! A DFA is a 5-tuple consisting of a finite set of states $Q$, a finite input alphabet $\Sigma$, an initial
//! state $q_0 \in Q$, a set of final (accepting) states $F \subseteq Q$ and a transition function
//! $\delta : Q \times \Sigma \to Q$ which is total, meaning it is defined for every combination of state and symbol.
//! States and symbols are identified by their labels, see [`State`] and [`Symbol`].
//!
//! Automata are assembled through a [`DFABuilder`], which checks every addition against what is already known
//! and verifies the whole 5-tuple once [`DFABuilder::build`] is called. The resulting [`DFA`] is immutable, except
//! for the state it currently is in. It can be moved symbol by symbol using [`DFA::step`], or fed an entire
//! input through [`DFA::process_string`] and [`DFA::process_input`]. Inputs are anything that implements
//! [`word::FiniteWord`], for strings every `char` is one symbol.
//!
//! All fallible operations report a [`DfaError`], whose rendered message is stable and names the offending
//! states and symbols.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use fsmbuilder::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        automaton::{State, Symbol, DFA},
        builder::{DFABuilder, TransitionGroup, TransitionKey},
        error::{DfaError, ErrorKind},
        math::{self, Set},
        show::Show,
        word::FiniteWord,
    };
}

/// This module contains the type aliases for sets and maps which are used throughout the crate.
pub mod math;

mod show;
pub use show::Show;

/// Module that contains the definition of finite words, which are the inputs of a [`DFA`].
pub mod word;

/// Defines the errors that can occur when building or running a [`DFA`].
pub mod error;
pub use error::{DfaError, ErrorKind};

/// Contains the [`DFABuilder`], which is used to assemble and validate a [`DFA`].
pub mod builder;
pub use builder::DFABuilder;

/// Defines states, symbols and the [`DFA`] itself, together with the logic for running input on it.
#[allow(clippy::upper_case_acronyms)]
pub mod automaton;
pub use automaton::{State, Symbol, DFA};
