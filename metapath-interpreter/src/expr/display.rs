// S-expression rendering of the expression tree, used for debugging and
// regression baselines.

use std::fmt;

use super::expr_core::{Expr, KeySpecifier, NodeTest, Quantifier, Step};

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(atomic) => write!(f, "(literal {})", atomic.display_representation()),
            Expr::Empty => write!(f, "(empty)"),
            Expr::Sequence(exprs) => list(f, "sequence", exprs),
            Expr::ContextItem => write!(f, "(context-item)"),
            Expr::VariableRef(name) => write!(f, "(variable ${})", name.to_full_name()),
            Expr::Root => write!(f, "(root)"),
            Expr::Path { base, step } => write!(f, "(path {} {})", base, step),
            Expr::Step(step) => write!(f, "{}", step),
            Expr::Filter { base, predicate } => write!(f, "(filter {} {})", base, predicate),
            Expr::And(left, right) => write!(f, "(and {} {})", left, right),
            Expr::Or(left, right) => write!(f, "(or {} {})", left, right),
            Expr::ValueComparison {
                operator,
                left,
                right,
            } => write!(f, "(value-{} {} {})", operator.name(), left, right),
            Expr::GeneralComparison {
                operator,
                left,
                right,
            } => write!(f, "(general-{} {} {})", operator.name(), left, right),
            Expr::NodeComparison {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", operator.name(), left, right),
            Expr::StringConcat(left, right) => write!(f, "(string-concat {} {})", left, right),
            Expr::Range(left, right) => write!(f, "(range {} {})", left, right),
            Expr::Arithmetic {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", operator.name(), left, right),
            Expr::Negate(operand) => write!(f, "(negate {})", operand),
            Expr::UnaryPlus(operand) => write!(f, "(plus {})", operand),
            Expr::Union(left, right) => write!(f, "(union {} {})", left, right),
            Expr::Intersect(left, right) => write!(f, "(intersect {} {})", left, right),
            Expr::Except(left, right) => write!(f, "(except {} {})", left, right),
            Expr::SimpleMap(left, right) => write!(f, "(simple-map {} {})", left, right),
            Expr::For {
                var_name,
                binding,
                return_expr,
            } => write!(
                f,
                "(for ${} {} {})",
                var_name.to_full_name(),
                binding,
                return_expr
            ),
            Expr::Let {
                var_name,
                binding,
                return_expr,
            } => write!(
                f,
                "(let ${} {} {})",
                var_name.to_full_name(),
                binding,
                return_expr
            ),
            Expr::Quantified {
                quantifier,
                bindings,
                satisfies,
            } => {
                let quantifier = match quantifier {
                    Quantifier::Some => "some",
                    Quantifier::Every => "every",
                };
                write!(f, "({}", quantifier)?;
                for (name, binding) in bindings {
                    write!(f, " (${} {})", name.to_full_name(), binding)?;
                }
                write!(f, " {})", satisfies)
            }
            Expr::If {
                condition,
                then,
                else_,
            } => write!(f, "(if {} {} {})", condition, then, else_),
            Expr::FunctionCall {
                function,
                arguments,
            } => {
                write!(f, "(call {}#{}", function.name().to_full_name(), function.arity())?;
                for argument in arguments {
                    write!(f, " {}", argument)?;
                }
                write!(f, ")")
            }
            Expr::DynamicCall { base, arguments } => {
                write!(f, "(dynamic-call {}", base)?;
                for argument in arguments {
                    write!(f, " {}", argument)?;
                }
                write!(f, ")")
            }
            Expr::Lookup { base, key } => write!(f, "(lookup {} {})", base, key),
            Expr::UnaryLookup(key) => write!(f, "(unary-lookup {})", key),
            Expr::MapConstructor(entries) => {
                write!(f, "(map")?;
                for (key, value) in entries {
                    write!(f, " (entry {} {})", key, value)?;
                }
                write!(f, ")")
            }
            Expr::SquareArray(members) => list(f, "array", members),
            Expr::CurlyArray(expr) => write!(f, "(curly-array {})", expr),
            Expr::InstanceOf {
                expr,
                sequence_type,
            } => write!(f, "(instance-of {} {})", expr, sequence_type),
            Expr::Treat {
                expr,
                sequence_type,
            } => write!(f, "(treat {} {})", expr, sequence_type),
            Expr::Castable {
                expr,
                data_type,
                optional,
            } => write!(
                f,
                "(castable {} {}{})",
                expr,
                data_type.local_name(),
                if *optional { "?" } else { "" }
            ),
            Expr::Cast {
                expr,
                data_type,
                optional,
            } => write!(
                f,
                "(cast {} {}{})",
                expr,
                data_type.local_name(),
                if *optional { "?" } else { "" }
            ),
        }
    }
}

fn list(f: &mut fmt::Formatter<'_>, head: &str, exprs: &[Expr]) -> fmt::Result {
    write!(f, "({}", head)?;
    for expr in exprs {
        write!(f, " {}", expr)?;
    }
    write!(f, ")")
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(step {}::{}", self.axis.name(), self.node_test)?;
        for predicate in &self.predicates {
            write!(f, " {}", predicate)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for NodeTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeTest::Kind(kind_test) => write!(f, "{}", kind_test),
            NodeTest::Name(name) => write!(f, "{}", name.to_uri_qualified()),
            NodeTest::AnyName => write!(f, "*"),
            NodeTest::Namespace(uri) => write!(f, "Q{{{}}}*", uri),
            NodeTest::LocalName(local_name) => write!(f, "*:{}", local_name),
        }
    }
}

impl fmt::Display for KeySpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySpecifier::NcName(name) => write!(f, "{}", name),
            KeySpecifier::Integer(i) => write!(f, "{}", i),
            KeySpecifier::Expr(expr) => write!(f, "{}", expr),
            KeySpecifier::Star => write!(f, "*"),
        }
    }
}
