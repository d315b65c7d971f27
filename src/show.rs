use itertools::Itertools;

use crate::math::Set;

/// Helper trait which can be used to display states, symbols, transitions and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state that should be
    /// its label, e.g. q0, and for a transition key (q0, a) it should be (q0, a).
    /// This is mainly used for debugging and tracing purposes.
    fn show(&self) -> String;

    /// Show a collection of the thing, for a collection of states this should be {q0, q1, q2, ...}.
    /// The default implementation sorts the rendered elements, so that the output does not
    /// depend on the iteration order of the underlying collection.
    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        format!(
            "{{{}}}",
            iter.into_iter().map(|x| x.show()).sorted().join(", ")
        )
    }
}

impl Show for String {
    fn show(&self) -> String {
        self.clone()
    }
}

impl Show for str {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for char {
    fn show(&self) -> String {
        self.to_string()
    }

    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        format!("\"{}\"", iter.into_iter().join(""))
    }
}

impl Show for bool {
    fn show(&self) -> String {
        match self {
            true => "+",
            false => "-",
        }
        .to_string()
    }
}

impl<S: Show, T: Show> Show for (S, T) {
    fn show(&self) -> String {
        format!("({}, {})", self.0.show(), self.1.show())
    }
}

impl<S: Show> Show for Set<S> {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        format!("[{}]", self.iter().map(|x| x.show()).join(", "))
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        self.as_slice().show()
    }
}

impl<S: Show + ?Sized> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}
