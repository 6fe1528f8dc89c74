use metapath_ast::ast;
use metapath_ast::BinaryOperator;
use metapath_name::{Name, NameKind};

use crate::atomic::{Atomic, AtomicCompareValue};
use crate::context::StaticContext;
use crate::error;
use crate::expr::{ArithmeticOperator, Expr, KeySpecifier, NodeComparisonOperator};
use crate::types::{resolve_data_type, resolve_name, SequenceType};

/// Compile an expression from source.
///
/// `.` is compiled to the context item expression directly.
pub fn compile(source: &str, static_context: &StaticContext) -> error::SpannedResult<Expr> {
    log::debug!("compiling expression: {}", source);
    if source.trim() == "." {
        return Ok(Expr::ContextItem);
    }
    let ast = metapath_ast::parse_expression(source)?;
    compile_ast(&ast, static_context)
}

/// Compile an already parsed expression.
pub fn compile_ast(ast: &ast::ExprS, static_context: &StaticContext) -> error::SpannedResult<Expr> {
    Compiler::new(static_context).expr(ast)
}

pub(super) struct Compiler<'a> {
    pub(super) static_context: &'a StaticContext,
}

impl<'a> Compiler<'a> {
    fn new(static_context: &'a StaticContext) -> Self {
        Self { static_context }
    }

    pub(super) fn resolve(
        &self,
        name: &ast::NameS,
        kind: NameKind,
    ) -> error::SpannedResult<Name> {
        resolve_name(self.static_context.namespaces(), &name.value, kind)
            .map_err(|e| e.with_ast_span(name.span))
    }

    pub(super) fn expr(&self, expr: &ast::ExprS) -> error::SpannedResult<Expr> {
        let mut exprs = expr
            .value
            .0
            .iter()
            .map(|expr_single| self.expr_single(expr_single))
            .collect::<error::SpannedResult<Vec<_>>>()?;
        if exprs.len() == 1 {
            Ok(exprs.remove(0))
        } else {
            Ok(Expr::Sequence(exprs))
        }
    }

    pub(super) fn expr_single(&self, expr: &ast::ExprSingleS) -> error::SpannedResult<Expr> {
        match &expr.value {
            ast::ExprSingle::Path(path) => self.path_expr(path),
            ast::ExprSingle::Chain(chain) => self.chain(chain),
            ast::ExprSingle::Binary(binary) => self.binary(binary),
            ast::ExprSingle::Unary(unary) => self.unary(unary),
            ast::ExprSingle::Apply(apply) => self.apply(apply),
            ast::ExprSingle::Arrow(arrow) => self.arrow(arrow),
            ast::ExprSingle::For(for_expr) => self.for_expr(for_expr),
            ast::ExprSingle::Let(let_expr) => self.let_expr(let_expr),
            ast::ExprSingle::Quantified(quantified) => self.quantified(quantified),
            ast::ExprSingle::If(if_expr) => self.if_expr(if_expr),
        }
    }

    fn chain(&self, chain: &ast::ChainExpr) -> error::SpannedResult<Expr> {
        let mut result = self.expr_single(&chain.first)?;
        for (operator, operand) in &chain.rest {
            let operand = self.expr_single(operand)?;
            result = binary_expr(*operator, result, operand);
        }
        Ok(result)
    }

    fn binary(&self, binary: &ast::BinaryExpr) -> error::SpannedResult<Expr> {
        let left = self.expr_single(&binary.left)?;
        let right = self.expr_single(&binary.right)?;
        Ok(binary_expr(binary.operator, left, right))
    }

    fn unary(&self, unary: &ast::UnaryExpr) -> error::SpannedResult<Expr> {
        let mut result = self.expr_single(&unary.operand)?;
        for operator in unary.operators.iter().rev() {
            result = match operator {
                ast::UnaryOperator::Minus => Expr::Negate(Box::new(result)),
                ast::UnaryOperator::Plus => Expr::UnaryPlus(Box::new(result)),
            };
        }
        Ok(result)
    }

    fn apply(&self, apply: &ast::ApplyExpr) -> error::SpannedResult<Expr> {
        let expr = Box::new(self.expr_single(&apply.expr)?);
        let namespaces = self.static_context.namespaces();
        match &apply.operator {
            ast::ApplyOperator::InstanceOf(sequence_type) => Ok(Expr::InstanceOf {
                expr,
                sequence_type: SequenceType::from_ast(sequence_type, namespaces)?,
            }),
            ast::ApplyOperator::Treat(sequence_type) => Ok(Expr::Treat {
                expr,
                sequence_type: SequenceType::from_ast(sequence_type, namespaces)?,
            }),
            ast::ApplyOperator::Castable(single_type) => {
                let data_type = self.cast_target(single_type)?;
                Ok(Expr::Castable {
                    expr,
                    data_type,
                    optional: single_type.optional,
                })
            }
            ast::ApplyOperator::Cast(single_type) => {
                let data_type = self.cast_target(single_type)?;
                Ok(Expr::Cast {
                    expr,
                    data_type,
                    optional: single_type.optional,
                })
            }
        }
    }

    fn cast_target(
        &self,
        single_type: &ast::SingleType,
    ) -> error::SpannedResult<metapath_schema_type::DataType> {
        let data_type = resolve_data_type(self.static_context.namespaces(), &single_type.name)?;
        if data_type.is_abstract() {
            return Err(error::Error::MPST0080.with_ast_span(single_type.name.span));
        }
        Ok(data_type)
    }

    fn arrow(&self, arrow: &ast::ArrowExpr) -> error::SpannedResult<Expr> {
        let mut result = self.expr_single(&arrow.base)?;
        for call in &arrow.calls {
            let mut arguments = vec![result];
            for argument in &call.arguments {
                arguments.push(self.expr_single(argument)?);
            }
            result = self.static_function_call(&call.name, arguments, call.span)?;
        }
        Ok(result)
    }

    pub(super) fn function_call(
        &self,
        call: &ast::FunctionCall,
        span: metapath_ast::Span,
    ) -> error::SpannedResult<Expr> {
        let arguments = call
            .arguments
            .iter()
            .map(|argument| self.expr_single(argument))
            .collect::<error::SpannedResult<Vec<_>>>()?;
        self.static_function_call(&call.name, arguments, span)
    }

    /// Resolve a call against the function registry. Functions are bound
    /// at compile time; an unknown name or arity is `MPST0017`.
    fn static_function_call(
        &self,
        name: &ast::NameS,
        arguments: Vec<Expr>,
        span: metapath_ast::Span,
    ) -> error::SpannedResult<Expr> {
        let name = self.resolve(name, NameKind::Function)?;
        let function = self
            .static_context
            .function_registry()
            .get(&name, arguments.len())
            .ok_or_else(|| error::Error::MPST0017.with_ast_span(span))?;
        Ok(Expr::FunctionCall {
            function,
            arguments,
        })
    }

    fn for_expr(&self, for_expr: &ast::ForExpr) -> error::SpannedResult<Expr> {
        let mut result = self.expr_single(&for_expr.return_expr)?;
        for binding in for_expr.bindings.iter().rev() {
            result = Expr::For {
                var_name: self.resolve(&binding.var_name, NameKind::Variable)?,
                binding: Box::new(self.expr_single(&binding.var_expr)?),
                return_expr: Box::new(result),
            };
        }
        Ok(result)
    }

    fn let_expr(&self, let_expr: &ast::LetExpr) -> error::SpannedResult<Expr> {
        let mut result = self.expr_single(&let_expr.return_expr)?;
        for binding in let_expr.bindings.iter().rev() {
            result = Expr::Let {
                var_name: self.resolve(&binding.var_name, NameKind::Variable)?,
                binding: Box::new(self.expr_single(&binding.var_expr)?),
                return_expr: Box::new(result),
            };
        }
        Ok(result)
    }

    fn quantified(&self, quantified: &ast::QuantifiedExpr) -> error::SpannedResult<Expr> {
        let bindings = quantified
            .bindings
            .iter()
            .map(|binding| {
                Ok((
                    self.resolve(&binding.var_name, NameKind::Variable)?,
                    self.expr_single(&binding.var_expr)?,
                ))
            })
            .collect::<error::SpannedResult<Vec<_>>>()?;
        Ok(Expr::Quantified {
            quantifier: quantified.quantifier,
            bindings,
            satisfies: Box::new(self.expr_single(&quantified.satisfies_expr)?),
        })
    }

    fn if_expr(&self, if_expr: &ast::IfExpr) -> error::SpannedResult<Expr> {
        Ok(Expr::If {
            condition: Box::new(self.expr(&if_expr.condition)?),
            then: Box::new(self.expr_single(&if_expr.then)?),
            else_: Box::new(self.expr_single(&if_expr.else_)?),
        })
    }

    pub(super) fn primary(&self, primary: &ast::PrimaryExprS) -> error::SpannedResult<Expr> {
        match &primary.value {
            ast::PrimaryExpr::Literal(literal) => Ok(Expr::Literal(literal_atomic(literal))),
            ast::PrimaryExpr::VarRef(name) => {
                Ok(Expr::VariableRef(self.resolve(name, NameKind::Variable)?))
            }
            ast::PrimaryExpr::Parenthesized(None) => Ok(Expr::Empty),
            ast::PrimaryExpr::Parenthesized(Some(expr)) => self.expr(expr),
            ast::PrimaryExpr::ContextItem => Ok(Expr::ContextItem),
            ast::PrimaryExpr::FunctionCall(call) => self.function_call(call, primary.span),
            ast::PrimaryExpr::MapConstructor(map) => {
                let entries = map
                    .entries
                    .iter()
                    .map(|entry| Ok((self.expr_single(&entry.key)?, self.expr_single(&entry.value)?)))
                    .collect::<error::SpannedResult<Vec<_>>>()?;
                Ok(Expr::MapConstructor(entries))
            }
            ast::PrimaryExpr::ArrayConstructor(ast::ArrayConstructor::Square(members)) => {
                let members = members
                    .iter()
                    .map(|member| self.expr_single(member))
                    .collect::<error::SpannedResult<Vec<_>>>()?;
                Ok(Expr::SquareArray(members))
            }
            ast::PrimaryExpr::ArrayConstructor(ast::ArrayConstructor::Curly(expr)) => {
                let expr = match expr {
                    Some(expr) => self.expr(expr)?,
                    None => Expr::Empty,
                };
                Ok(Expr::CurlyArray(Box::new(expr)))
            }
            ast::PrimaryExpr::UnaryLookup(key) => Ok(Expr::UnaryLookup(self.key_specifier(key)?)),
        }
    }

    pub(super) fn key_specifier(&self, key: &ast::KeySpecifier) -> error::SpannedResult<KeySpecifier> {
        match key {
            ast::KeySpecifier::NcName(name) => Ok(KeySpecifier::NcName(name.clone())),
            ast::KeySpecifier::Integer(i) => Ok(KeySpecifier::Integer(i.clone())),
            ast::KeySpecifier::Expr(Some(expr)) => {
                Ok(KeySpecifier::Expr(Box::new(self.expr(expr)?)))
            }
            ast::KeySpecifier::Expr(None) => Ok(KeySpecifier::Expr(Box::new(Expr::Empty))),
            ast::KeySpecifier::Star => Ok(KeySpecifier::Star),
        }
    }
}

/// Double literals produce decimals, as there is no binary floating point
/// type.
fn literal_atomic(literal: &ast::Literal) -> Atomic {
    match literal {
        ast::Literal::Integer(i) => Atomic::from(i.clone()),
        ast::Literal::Decimal(d) | ast::Literal::Double(d) => Atomic::from(*d),
        ast::Literal::String(s) => Atomic::from(s.as_str()),
    }
}

fn binary_expr(operator: BinaryOperator, left: Expr, right: Expr) -> Expr {
    use BinaryOperator::*;
    let left = Box::new(left);
    let right = Box::new(right);
    match operator {
        Or => Expr::Or(left, right),
        And => Expr::And(left, right),
        ValueEq => value_comparison(AtomicCompareValue::Eq, left, right),
        ValueNe => value_comparison(AtomicCompareValue::Ne, left, right),
        ValueLt => value_comparison(AtomicCompareValue::Lt, left, right),
        ValueLe => value_comparison(AtomicCompareValue::Le, left, right),
        ValueGt => value_comparison(AtomicCompareValue::Gt, left, right),
        ValueGe => value_comparison(AtomicCompareValue::Ge, left, right),
        GenEq => general_comparison(AtomicCompareValue::Eq, left, right),
        GenNe => general_comparison(AtomicCompareValue::Ne, left, right),
        GenLt => general_comparison(AtomicCompareValue::Lt, left, right),
        GenLe => general_comparison(AtomicCompareValue::Le, left, right),
        GenGt => general_comparison(AtomicCompareValue::Gt, left, right),
        GenGe => general_comparison(AtomicCompareValue::Ge, left, right),
        Is => node_comparison(NodeComparisonOperator::Is, left, right),
        Precedes => node_comparison(NodeComparisonOperator::Precedes, left, right),
        Follows => node_comparison(NodeComparisonOperator::Follows, left, right),
        Concat => Expr::StringConcat(left, right),
        Range => Expr::Range(left, right),
        Add => arithmetic(ArithmeticOperator::Add, left, right),
        Sub => arithmetic(ArithmeticOperator::Sub, left, right),
        Mul => arithmetic(ArithmeticOperator::Mul, left, right),
        Div => arithmetic(ArithmeticOperator::Div, left, right),
        IntDiv => arithmetic(ArithmeticOperator::IntDiv, left, right),
        Mod => arithmetic(ArithmeticOperator::Mod, left, right),
        Union => Expr::Union(left, right),
        Intersect => Expr::Intersect(left, right),
        Except => Expr::Except(left, right),
        SimpleMap => Expr::SimpleMap(left, right),
    }
}

fn value_comparison(operator: AtomicCompareValue, left: Box<Expr>, right: Box<Expr>) -> Expr {
    Expr::ValueComparison {
        operator,
        left,
        right,
    }
}

fn general_comparison(operator: AtomicCompareValue, left: Box<Expr>, right: Box<Expr>) -> Expr {
    Expr::GeneralComparison {
        operator,
        left,
        right,
    }
}

fn node_comparison(operator: NodeComparisonOperator, left: Box<Expr>, right: Box<Expr>) -> Expr {
    Expr::NodeComparison {
        operator,
        left,
        right,
    }
}

fn arithmetic(operator: ArithmeticOperator, left: Box<Expr>, right: Box<Expr>) -> Expr {
    Expr::Arithmetic {
        operator,
        left,
        right,
    }
}
