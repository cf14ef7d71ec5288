//! Navigation-related state types.

/// Specifying the widget receiving key input.
///
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum Focus {
    #[default]
    Todo,
    Translator,
    Weather,
}

impl Focus {
    pub fn next(&self) -> Focus {
        match self {
            Focus::Todo => Focus::Translator,
            Focus::Translator => Focus::Weather,
            Focus::Weather => Focus::Todo,
        }
    }

    pub fn previous(&self) -> Focus {
        match self {
            Focus::Todo => Focus::Weather,
            Focus::Translator => Focus::Todo,
            Focus::Weather => Focus::Translator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_both_ways() {
        let mut focus = Focus::default();
        for _ in 0..3 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Todo);
        assert_eq!(Focus::Todo.previous(), Focus::Weather);
        assert_eq!(Focus::Weather.next().previous(), Focus::Weather);
    }
}
