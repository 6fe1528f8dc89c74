use std::rc::Rc;

use ibig::IBig;
use metapath_ast::ast::Axis;
use metapath_name::Name;
use metapath_schema_type::DataType;

use crate::atomic::{Atomic, AtomicCompareValue};
use crate::function::StaticFunction;
use crate::types::{KindTest, SequenceType};

pub use metapath_ast::ast::Quantifier;

#[derive(Debug, Clone)]
pub enum Expr {
    Literal(Atomic),
    /// `()`
    Empty,
    /// `a, b, ...`
    Sequence(Vec<Expr>),
    /// `.`
    ContextItem,
    VariableRef(Name),
    /// The root of the tree containing the context node: `/` by itself, and
    /// the start of a rooted path.
    Root,
    /// `base/step`: evaluate `step` with each item of `base` as the focus.
    Path {
        base: Box<Expr>,
        step: Box<Expr>,
    },
    Step(Box<Step>),
    /// A predicate on a primary expression: `base[predicate]`.
    Filter {
        base: Box<Expr>,
        predicate: Box<Expr>,
    },
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    ValueComparison {
        operator: AtomicCompareValue,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    GeneralComparison {
        operator: AtomicCompareValue,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    NodeComparison {
        operator: NodeComparisonOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `a || b`
    StringConcat(Box<Expr>, Box<Expr>),
    /// `a to b`
    Range(Box<Expr>, Box<Expr>),
    Arithmetic {
        operator: ArithmeticOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Negate(Box<Expr>),
    UnaryPlus(Box<Expr>),
    Union(Box<Expr>, Box<Expr>),
    Intersect(Box<Expr>, Box<Expr>),
    Except(Box<Expr>, Box<Expr>),
    /// `a ! b`
    SimpleMap(Box<Expr>, Box<Expr>),
    For {
        var_name: Name,
        binding: Box<Expr>,
        return_expr: Box<Expr>,
    },
    Let {
        var_name: Name,
        binding: Box<Expr>,
        return_expr: Box<Expr>,
    },
    Quantified {
        quantifier: Quantifier,
        bindings: Vec<(Name, Expr)>,
        satisfies: Box<Expr>,
    },
    If {
        condition: Box<Expr>,
        then: Box<Expr>,
        else_: Box<Expr>,
    },
    FunctionCall {
        function: Rc<StaticFunction>,
        arguments: Vec<Expr>,
    },
    /// Calling a map or an array: `$map("key")`, `$array(1)`.
    DynamicCall {
        base: Box<Expr>,
        arguments: Vec<Expr>,
    },
    /// `base?key`
    Lookup {
        base: Box<Expr>,
        key: KeySpecifier,
    },
    /// `?key`, a lookup on the context item.
    UnaryLookup(KeySpecifier),
    MapConstructor(Vec<(Expr, Expr)>),
    /// `[a, b]`: one member per expression.
    SquareArray(Vec<Expr>),
    /// `array { a, b }`: one member per item.
    CurlyArray(Box<Expr>),
    InstanceOf {
        expr: Box<Expr>,
        sequence_type: SequenceType,
    },
    Treat {
        expr: Box<Expr>,
        sequence_type: SequenceType,
    },
    Castable {
        expr: Box<Expr>,
        data_type: DataType,
        optional: bool,
    },
    Cast {
        expr: Box<Expr>,
        data_type: DataType,
        optional: bool,
    },
}

/// An axis step: `axis::test[predicate]...`.
#[derive(Debug, Clone)]
pub struct Step {
    pub axis: Axis,
    pub node_test: NodeTest,
    pub predicates: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeTest {
    Kind(KindTest),
    Name(Name),
    /// `*`
    AnyName,
    /// `prefix:*` and `Q{uri}*`
    Namespace(String),
    /// `*:local`, and unprefixed names when wildcard matching is enabled
    LocalName(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOperator {
    Add,
    Sub,
    Mul,
    Div,
    IntDiv,
    Mod,
}

impl ArithmeticOperator {
    pub fn name(&self) -> &'static str {
        match self {
            ArithmeticOperator::Add => "add",
            ArithmeticOperator::Sub => "subtract",
            ArithmeticOperator::Mul => "multiply",
            ArithmeticOperator::Div => "divide",
            ArithmeticOperator::IntDiv => "integer-divide",
            ArithmeticOperator::Mod => "mod",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeComparisonOperator {
    Is,
    Precedes,
    Follows,
}

impl NodeComparisonOperator {
    pub fn name(&self) -> &'static str {
        match self {
            NodeComparisonOperator::Is => "is",
            NodeComparisonOperator::Precedes => "precedes",
            NodeComparisonOperator::Follows => "follows",
        }
    }
}

#[derive(Debug, Clone)]
pub enum KeySpecifier {
    NcName(String),
    Integer(IBig),
    Expr(Box<Expr>),
    Star,
}
