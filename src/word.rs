use crate::automaton::Symbol;

/// A finite word is anything that can be decomposed into a finite sequence of [`Symbol`]s.
/// For strings, every `char` becomes one symbol, so an alphabet that should be used with string
/// input has to be declared using single character symbols.
///
/// # Example
/// ```
/// use fsmbuilder::prelude::*;
///
/// let symbols: Vec<Symbol> = "abc".symbols().collect();
/// assert_eq!(symbols, vec![Symbol::from('a'), Symbol::from('b'), Symbol::from('c')]);
/// ```
pub trait FiniteWord {
    /// Type for an iterator over the symbols making up the word.
    type Symbols<'this>: Iterator<Item = Symbol>
    where
        Self: 'this;

    /// Returns an iterator over the symbols of the word, in order.
    fn symbols(&self) -> Self::Symbols<'_>;

    /// Gives the length of the word, i.e. the number of symbols.
    fn len(&self) -> usize {
        self.symbols().count()
    }

    /// Returns true if the word consists of no symbols.
    fn is_empty(&self) -> bool {
        self.symbols().next().is_none()
    }
}

impl FiniteWord for str {
    type Symbols<'this> = std::iter::Map<std::str::Chars<'this>, fn(char) -> Symbol>;

    fn symbols(&self) -> Self::Symbols<'_> {
        self.chars().map(char_symbol as fn(char) -> Symbol)
    }
}

fn char_symbol(c: char) -> Symbol {
    Symbol::from(c)
}

impl FiniteWord for String {
    type Symbols<'this> = <str as FiniteWord>::Symbols<'this>;

    fn symbols(&self) -> Self::Symbols<'_> {
        self.as_str().symbols()
    }
}

impl FiniteWord for [Symbol] {
    type Symbols<'this> = std::iter::Cloned<std::slice::Iter<'this, Symbol>>;

    fn symbols(&self) -> Self::Symbols<'_> {
        self.iter().cloned()
    }

    fn len(&self) -> usize {
        <[Symbol]>::len(self)
    }
}

impl FiniteWord for Vec<Symbol> {
    type Symbols<'this> = <[Symbol] as FiniteWord>::Symbols<'this>;

    fn symbols(&self) -> Self::Symbols<'_> {
        self.as_slice().symbols()
    }
}

impl<const N: usize> FiniteWord for [Symbol; N] {
    type Symbols<'this> = <[Symbol] as FiniteWord>::Symbols<'this>;

    fn symbols(&self) -> Self::Symbols<'_> {
        self.as_slice().symbols()
    }
}
