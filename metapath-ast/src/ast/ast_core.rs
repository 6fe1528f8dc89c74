use ibig::IBig;
use rust_decimal::Decimal;

pub use crate::operator::BinaryOperator;
pub use crate::span::{Span, Spanned};

pub type ExprS = Spanned<Expr>;
pub type ExprSingleS = Spanned<ExprSingle>;
pub type PrimaryExprS = Spanned<PrimaryExpr>;
pub type StepExprS = Spanned<StepExpr>;
pub type NameS = Spanned<EQName>;

/// A comma separated list of expressions. Never empty; `()` is a
/// parenthesized expression without content.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Expr(pub Vec<ExprSingleS>);

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExprSingle {
    Path(PathExpr),
    // an associative operator applied to two or more operands
    Chain(ChainExpr),
    // a non-associative operator: comparisons and range
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Apply(ApplyExpr),
    Arrow(ArrowExpr),
    For(ForExpr),
    Let(LetExpr),
    Quantified(QuantifiedExpr),
    If(IfExpr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChainExpr {
    pub first: Box<ExprSingleS>,
    // at least one entry
    pub rest: Vec<(BinaryOperator, ExprSingleS)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BinaryExpr {
    pub operator: BinaryOperator,
    pub left: Box<ExprSingleS>,
    pub right: Box<ExprSingleS>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UnaryOperator {
    Plus,
    Minus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UnaryExpr {
    // outermost first
    pub operators: Vec<UnaryOperator>,
    pub operand: Box<ExprSingleS>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ApplyExpr {
    pub expr: Box<ExprSingleS>,
    pub operator: ApplyOperator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ApplyOperator {
    InstanceOf(crate::ast::SequenceType),
    Treat(crate::ast::SequenceType),
    Castable(SingleType),
    Cast(SingleType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SingleType {
    pub name: NameS,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArrowExpr {
    pub base: Box<ExprSingleS>,
    // applied left to right
    pub calls: Vec<ArrowCall>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArrowCall {
    pub name: NameS,
    pub arguments: Vec<ExprSingleS>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Binding {
    pub var_name: NameS,
    pub var_expr: ExprSingleS,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ForExpr {
    pub bindings: Vec<Binding>,
    pub return_expr: Box<ExprSingleS>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LetExpr {
    pub bindings: Vec<Binding>,
    pub return_expr: Box<ExprSingleS>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Quantifier {
    Some,
    Every,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QuantifiedExpr {
    pub quantifier: Quantifier,
    pub bindings: Vec<Binding>,
    pub satisfies_expr: Box<ExprSingleS>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IfExpr {
    pub condition: ExprS,
    pub then: Box<ExprSingleS>,
    pub else_: Box<ExprSingleS>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PathExpr {
    /// `/` by itself
    Root,
    /// `/a/b` or, with `descendant` set, `//a/b`
    Rooted {
        descendant: bool,
        relative: RelativePathExpr,
    },
    Relative(RelativePathExpr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PathSeparator {
    Slash,
    DoubleSlash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RelativePathExpr {
    pub first: StepExprS,
    pub rest: Vec<(PathSeparator, StepExprS)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StepExpr {
    Postfix {
        primary: PrimaryExprS,
        postfixes: Vec<Postfix>,
    },
    Axis(AxisStep),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Postfix {
    Predicate(ExprS),
    ArgumentList(Vec<ExprSingleS>, Span),
    Lookup(KeySpecifier),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AxisStep {
    pub axis: Axis,
    pub node_test: NodeTest,
    pub predicates: Vec<ExprS>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Axis {
    Ancestor,
    AncestorOrSelf,
    Child,
    Descendant,
    DescendantOrSelf,
    Flag,
    Following,
    FollowingSibling,
    Parent,
    Preceding,
    PrecedingSibling,
    Self_,
}

impl Axis {
    pub fn by_name(name: &str) -> Option<Axis> {
        use Axis::*;
        let axis = match name {
            "ancestor" => Ancestor,
            "ancestor-or-self" => AncestorOrSelf,
            "child" => Child,
            "descendant" => Descendant,
            "descendant-or-self" => DescendantOrSelf,
            "flag" => Flag,
            "following" => Following,
            "following-sibling" => FollowingSibling,
            "parent" => Parent,
            "preceding" => Preceding,
            "preceding-sibling" => PrecedingSibling,
            "self" => Self_,
            _ => return None,
        };
        Some(axis)
    }

    pub fn name(&self) -> &'static str {
        use Axis::*;
        match self {
            Ancestor => "ancestor",
            AncestorOrSelf => "ancestor-or-self",
            Child => "child",
            Descendant => "descendant",
            DescendantOrSelf => "descendant-or-self",
            Flag => "flag",
            Following => "following",
            FollowingSibling => "following-sibling",
            Parent => "parent",
            Preceding => "preceding",
            PrecedingSibling => "preceding-sibling",
            Self_ => "self",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NodeTest {
    KindTest(crate::ast::KindTest),
    NameTest(NameTest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NameTest {
    Name(NameS),
    /// `*`
    Star,
    /// `prefix:*`
    Prefix(String, Span),
    /// `Q{uri}*`
    Namespace(String),
    /// `*:local`
    LocalName(String),
}

/// A name as written in the source; the compiler resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EQName {
    Unprefixed(String),
    Prefixed { prefix: String, local_name: String },
    URIQualified { uri: String, local_name: String },
}

impl EQName {
    pub fn local_name(&self) -> &str {
        match self {
            EQName::Unprefixed(local_name) => local_name,
            EQName::Prefixed { local_name, .. } => local_name,
            EQName::URIQualified { local_name, .. } => local_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PrimaryExpr {
    Literal(Literal),
    VarRef(NameS),
    /// `( ... )`; `None` for the empty sequence `()`.
    Parenthesized(Option<ExprS>),
    ContextItem,
    FunctionCall(FunctionCall),
    MapConstructor(MapConstructor),
    ArrayConstructor(ArrayConstructor),
    UnaryLookup(KeySpecifier),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Literal {
    Integer(IBig),
    Decimal(Decimal),
    Double(Decimal),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FunctionCall {
    pub name: NameS,
    pub arguments: Vec<ExprSingleS>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MapConstructor {
    pub entries: Vec<MapConstructorEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MapConstructorEntry {
    pub key: ExprSingleS,
    pub value: ExprSingleS,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ArrayConstructor {
    Square(Vec<ExprSingleS>),
    Curly(Option<ExprS>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum KeySpecifier {
    NcName(String),
    Integer(IBig),
    Expr(Option<ExprS>),
    Star,
}
