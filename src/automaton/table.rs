use itertools::Itertools;
use owo_colors::OwoColorize;

use crate::prelude::*;

impl DFA {
    fn build_transition_table<SD, TD>(&self, state_decorator: SD, target_decorator: TD) -> String
    where
        SD: Fn(&State, String) -> String,
        TD: Fn(&State) -> String,
    {
        let symbols = self.alphabet.iter().sorted().collect_vec();

        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(symbols.iter().map(|s| s.show())),
        );
        for state in self.states.iter().sorted() {
            let mut marker = String::new();
            if state == &self.initial {
                marker.push('→');
            }
            if self.final_states.contains(state) {
                marker.push('*');
            }
            let mut row = vec![state_decorator(state, format!("{marker}{}", state.show()))];
            for symbol in &symbols {
                row.push(
                    self.transition(state, *symbol)
                        .map(&target_decorator)
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }

    /// Returns a string representation of the transition table. There is one row per state and one
    /// column per symbol, both sorted by their labels. The initial state is marked with `→`, final
    /// states are marked with `*`.
    pub fn transition_table(&self) -> String {
        self.build_transition_table(|_, label| label, |target| target.show())
    }

    /// Like [`DFA::transition_table`], but highlights final states and the current state using
    /// ANSI colors, which is helpful when printing to a terminal.
    pub fn colored_transition_table(&self) -> String {
        self.build_transition_table(
            |state, label| match (state == &self.current, self.final_states.contains(state)) {
                (true, true) => label.bold().green().to_string(),
                (true, false) => label.bold().to_string(),
                (false, true) => label.green().to_string(),
                (false, false) => label,
            },
            |target| target.show().blue().to_string(),
        )
    }
}

impl std::fmt::Display for DFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.transition_table())
    }
}

#[cfg(test)]
mod tests {
    use crate::automaton::tests::mod3;

    #[test]
    fn mod3_table() {
        let dfa = mod3();
        let table = dfa.transition_table();
        let rows = table
            .lines()
            .filter(|line| line.starts_with('│'))
            .map(|line| {
                line.split('│')
                    .map(str::trim)
                    .filter(|cell| !cell.is_empty())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        assert_eq!(
            rows,
            vec![
                vec!["State", "0", "1"],
                vec!["→*S0", "S0", "S1"],
                vec!["*S1", "S2", "S0"],
                vec!["*S2", "S1", "S2"],
            ]
        );
        assert_eq!(dfa.to_string(), table);
    }

    #[test]
    fn colored_table_keeps_labels() {
        let dfa = mod3();
        let table = dfa.colored_transition_table();
        for label in ["S0", "S1", "S2"] {
            assert!(table.contains(label));
        }
        assert_ne!(table, dfa.transition_table());
    }
}
