//! Turn the parse tree into an expression tree, resolving names against
//! the static context.
mod compiler_core;
mod path;

pub use compiler_core::{compile, compile_ast};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::StaticContextBuilder;
    use crate::error::Error;

    fn printed(source: &str) -> String {
        let static_context = StaticContextBuilder::default().build().unwrap();
        compile(source, &static_context).unwrap().to_string()
    }

    #[test]
    fn test_sequence_flattens_single_item() {
        insta::assert_snapshot!(printed("(1)"), @"(literal 1)");
        insta::assert_snapshot!(printed("1, 'a'"), @"(sequence (literal 1) (literal 'a'))");
        insta::assert_snapshot!(printed("()"), @"(empty)");
    }

    #[test]
    fn test_for() {
        insta::assert_snapshot!(
            printed("for $x in 1 to 3 return $x * 2"),
            @"(for $x (range (literal 1) (literal 3)) (multiply (variable $x) (literal 2)))"
        );
    }

    #[test]
    fn test_path_folds_left() {
        insta::assert_snapshot!(
            printed("a/b[1]/@id"),
            @"(path (path (step child::a) (step child::b (literal 1))) (step flag::id))"
        );
        insta::assert_snapshot!(
            printed("//a"),
            @"(path (path (root) (step descendant-or-self::node())) (step child::a))"
        );
    }

    #[test]
    fn test_rooted_paths() {
        insta::assert_snapshot!(printed("/x"), @"(path (root) (step child::x))");
        insta::assert_snapshot!(
            printed("//x/y"),
            @"(path (path (path (root) (step descendant-or-self::node())) (step child::x)) (step child::y))"
        );
        insta::assert_snapshot!(printed("/"), @"(root)");
    }

    #[test]
    fn test_simple_map() {
        insta::assert_snapshot!(
            printed("(1, 2) ! ."),
            @"(simple-map (sequence (literal 1) (literal 2)) (context-item))"
        );
    }

    #[test]
    fn test_unbound_prefix() {
        let static_context = StaticContextBuilder::default().build().unwrap();
        let err = compile("nope:a", &static_context).unwrap_err();
        assert_eq!(err.error, Error::MPST0081);
        assert!(err.span.is_some());
    }
}
