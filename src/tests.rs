use super::*;

fn find_all<'h>(automaton: &Automaton, haystack: &'h str) -> Vec<&'h str> {
    automaton
        .find_iter(haystack)
        .map(|m| std::str::from_utf8(m.as_bytes()).unwrap())
        .collect()
}

/// The same pattern compiled as an NFA, a plain DFA and a minimized DFA.
fn all_engines(pattern: &str) -> Vec<Automaton> {
    vec![
        compile(pattern, false).unwrap(),
        Compiler::new().determinize(true).compile(pattern).unwrap(),
        compile(pattern, true).unwrap(),
    ]
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn automata_are_send_sync() {
    assert_send_sync::<Nfa>();
    assert_send_sync::<Dfa>();
    assert_send_sync::<Automaton>();
    assert_send_sync::<Compiler>();
    assert_send_sync::<Error>();
}

#[cfg(test)]
mod compiler {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kinds() {
        assert!(matches!(compile("a", false).unwrap(), Automaton::Nfa(_)));
        assert!(matches!(compile("a", true).unwrap(), Automaton::Dfa(_)));
        assert!(matches!(
            Compiler::new().determinize(true).compile("a").unwrap(),
            Automaton::Dfa(_)
        ));
        assert!(matches!(Compiler::new().compile("a").unwrap(), Automaton::Nfa(_)));
    }

    #[test]
    fn minimize_implies_determinize() {
        let automaton = Compiler::new()
            .determinize(false)
            .minimize(true)
            .compile("cat|dog")
            .unwrap();

        let Automaton::Dfa(dfa) = automaton else {
            panic!("expected a DFA");
        };
        assert_eq!(dfa.state_count(), 6);
    }

    #[test]
    fn determinize_without_minimize() {
        let automaton = Compiler::new().determinize(true).compile("cat|dog").unwrap();

        let Automaton::Dfa(dfa) = automaton else {
            panic!("expected a DFA");
        };
        assert_eq!(dfa.state_count(), 7);
    }

    #[test]
    fn repeat_limit() {
        let compiler = Compiler::new().repeat_limit(3);

        assert!(compiler.compile("a{3}").is_ok());
        assert_eq!(
            compiler.compile("a{2,4}").unwrap_err(),
            Error::RepeatTooLarge { limit: 3 }
        );
        assert!(compile("a{1000}", true).is_ok());
        assert_eq!(
            compile("a{1001}", true).unwrap_err(),
            Error::RepeatTooLarge {
                limit: DEFAULT_REPEAT_LIMIT
            }
        );
    }

    #[test]
    fn errors() {
        for minimize in [false, true] {
            assert_eq!(
                compile("(ab", minimize).unwrap_err(),
                Error::UnclosedGroup { offset: 0 }
            );
            assert_eq!(
                compile("ab)", minimize).unwrap_err(),
                Error::UnmatchedParen { offset: 2 }
            );
            assert_eq!(
                compile("[ab", minimize).unwrap_err(),
                Error::UnclosedClass { offset: 0 }
            );
            assert_eq!(
                compile("[b-a]", minimize).unwrap_err(),
                Error::InvalidRange {
                    start: b'b',
                    end: b'a'
                }
            );
            assert_eq!(
                compile("a{1", minimize).unwrap_err(),
                Error::UnclosedRepeat { offset: 1 }
            );
            assert_eq!(
                compile("a{1;2}", minimize).unwrap_err(),
                Error::InvalidRepeat {
                    offset: 3,
                    byte: b';'
                }
            );
            assert_eq!(
                compile("a{5,1}", minimize).unwrap_err(),
                Error::RepeatOutOfOrder { min: 5, max: 1 }
            );
            assert_eq!(
                compile("((a{1000}){1000}){1000}", minimize).unwrap_err(),
                Error::PatternTooLarge { limit: NODE_LIMIT }
            );
        }
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            Error::UnclosedGroup { offset: 3 }.to_string(),
            "unclosed group, '(' at offset 3 has no matching ')'"
        );
        assert_eq!(
            Error::InvalidRange {
                start: b'z',
                end: b'a'
            }
            .to_string(),
            "invalid character range [z-a]"
        );
        assert_eq!(
            Error::RepeatOutOfOrder { min: 3, max: 2 }.to_string(),
            "out of repeat order {3,2}"
        );
    }
}

#[cfg(test)]
mod engines {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn literal() {
        for automaton in all_engines("abc") {
            assert_eq!(automaton.is_match("xabcxabc"), false);
            assert_eq!(automaton.is_match("abc"), true);
            assert_eq!(find_all(&automaton, "xabcxabc"), vec!["abc", "abc"]);
        }
    }

    #[test]
    fn digits() {
        for automaton in all_engines("[0-9]+") {
            assert_eq!(find_all(&automaton, "ab12cd345"), vec!["12", "345"]);
        }
        for automaton in all_engines("[^0-9]+") {
            assert_eq!(find_all(&automaton, "12ab34"), vec!["ab"]);
        }
    }

    #[test]
    fn union() {
        for automaton in all_engines("cat|dog") {
            assert_eq!(automaton.is_match("cat"), true);
            assert_eq!(automaton.is_match("dog"), true);
            assert_eq!(automaton.is_match("car"), false);
        }
    }

    #[test]
    fn bounded_repeat() {
        for automaton in all_engines("a{2,3}") {
            assert_eq!(automaton.is_match("a"), false);
            assert_eq!(automaton.is_match("aa"), true);
            assert_eq!(automaton.is_match("aaa"), true);
            assert_eq!(automaton.is_match("aaaa"), false);
            assert_eq!(find_all(&automaton, "aaaa"), vec!["aaa"]);
        }
    }

    #[test]
    fn zero_repeat() {
        for automaton in all_engines("x{0,0}") {
            assert_eq!(automaton.is_match(""), true);
            assert_eq!(automaton.is_match("x"), false);
        }
    }

    #[test]
    fn rescan() {
        for automaton in all_engines("[a-z]+") {
            let haystack = "one, two; three";
            let first = find_all(&automaton, haystack);
            let joined = first.join(" ");

            assert_eq!(first, vec!["one", "two", "three"]);
            assert_eq!(find_all(&automaton, &joined), first);
            assert_eq!(automaton.find_all(haystack).len(), 3);
        }
    }
}
