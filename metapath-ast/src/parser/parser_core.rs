use chumsky::{input::ValueInput, prelude::*};

use metapath_lexer::Token;

use crate::ast::{self, BinaryOperator};
use crate::error::ParserError;
use crate::span::WithSpan;

use super::axis_node_test::{parser_axis_node_test, ParserAxisNodeTestOutput};
use super::kind_test::{parser_kind_test, ParserKindTestOutput};
use super::name::{keyword, parser_name, ParserNameOutput};
use super::primary::{check_reserved, parser_primary, ParserPrimaryOutput};
use super::sequence_type::{parser_type, ParserTypeOutput};
use super::signature::{parser_signature, ParserSignatureOutput};
use super::types::BoxedParser;

// arity is tracked as a u8 by the function registry
const MAX_ARGUMENTS: usize = u8::MAX as usize;

#[derive(Clone)]
pub(crate) struct ParserOutput<'a, I>
where
    I: ValueInput<'a, Token = Token<'a>, Span = SimpleSpan>,
{
    pub(crate) expr: BoxedParser<'a, I, ast::ExprS>,
    pub(crate) sequence_type: BoxedParser<'a, I, ast::SequenceType>,
    pub(crate) single_type: BoxedParser<'a, I, ast::SingleType>,
    pub(crate) signature: BoxedParser<'a, I, ast::Signature>,
}

pub(crate) fn parser<'a, I>() -> ParserOutput<'a, I>
where
    I: ValueInput<'a, Token = Token<'a>, Span = SimpleSpan>,
{
    let ParserNameOutput { eqname, ncname } = parser_name();

    let ParserPrimaryOutput {
        literal,
        var_ref,
        context_item_expr,
    } = parser_primary(eqname.clone());

    let empty_call = just(Token::LeftParen)
        .ignore_then(just(Token::RightParen))
        .boxed();

    let ParserKindTestOutput { kind_test } = parser_kind_test(eqname.clone(), empty_call.clone());

    let ParserTypeOutput {
        sequence_type,
        single_type,
    } = parser_type(eqname.clone(), empty_call, kind_test.clone());

    let ParserAxisNodeTestOutput {
        axis_node_test,
        name_node_test,
    } = parser_axis_node_test(eqname.clone(), kind_test);

    let ParserSignatureOutput { signature } =
        parser_signature(eqname.clone(), ncname, sequence_type.clone());

    let expr_single = recursive(|expr_single| {
        let expr_single: BoxedParser<'a, I, ast::ExprSingleS> = expr_single.boxed();
        let expr = parser_expr(expr_single.clone());

        let parenthesized_expr = expr
            .clone()
            .or_not()
            .delimited_by(just(Token::LeftParen), just(Token::RightParen))
            .map(ast::PrimaryExpr::Parenthesized)
            .boxed();

        let argument_list = expr_single
            .clone()
            .separated_by(just(Token::Comma))
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LeftParen), just(Token::RightParen))
            // reported from a successful parse so backtracking cannot hide it
            .validate(|arguments, span, emitter| {
                if arguments.len() > MAX_ARGUMENTS {
                    emitter.emit(ParserError::ArityOverflow { span: span.span().into() })
                }
                arguments
            })
            .boxed();

        let key_specifier = select! {
            Token::NCName(name) => ast::KeySpecifier::NcName(name.to_string()),
            Token::IntegerLiteral(i) => ast::KeySpecifier::Integer(i),
            Token::Asterisk => ast::KeySpecifier::Star,
        }
        .or(expr
            .clone()
            .or_not()
            .delimited_by(just(Token::LeftParen), just(Token::RightParen))
            .map(ast::KeySpecifier::Expr))
        .boxed();

        let unary_lookup = just(Token::QuestionMark)
            .ignore_then(key_specifier.clone())
            .map(ast::PrimaryExpr::UnaryLookup)
            .boxed();

        let function_call = eqname
            .clone()
            .then(argument_list.clone())
            .validate(|(name, arguments), _, emitter| {
                if let Err(err) = check_reserved(&name) {
                    emitter.emit(err)
                }
                ast::PrimaryExpr::FunctionCall(ast::FunctionCall { name, arguments })
            })
            .boxed();

        let map_constructor_entry = expr_single
            .clone()
            .then_ignore(just(Token::Colon))
            .then(expr_single.clone())
            .map(|(key, value)| ast::MapConstructorEntry { key, value })
            .boxed();

        let map_constructor = keyword("map")
            .ignore_then(
                map_constructor_entry
                    .separated_by(just(Token::Comma))
                    .collect::<Vec<_>>()
                    .delimited_by(just(Token::LeftBrace), just(Token::RightBrace)),
            )
            .map(|entries| ast::PrimaryExpr::MapConstructor(ast::MapConstructor { entries }))
            .boxed();

        let square_array_constructor = expr_single
            .clone()
            .separated_by(just(Token::Comma))
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LeftBracket), just(Token::RightBracket))
            .map(ast::ArrayConstructor::Square)
            .boxed();
        let curly_array_constructor = keyword("array")
            .ignore_then(
                expr.clone()
                    .or_not()
                    .delimited_by(just(Token::LeftBrace), just(Token::RightBrace)),
            )
            .map(ast::ArrayConstructor::Curly)
            .boxed();
        let array_constructor = square_array_constructor
            .or(curly_array_constructor)
            .map(ast::PrimaryExpr::ArrayConstructor)
            .boxed();

        // constructors come before function calls, which come before
        // plain names in the step alternatives
        let primary_expr = literal
            .or(var_ref)
            .or(parenthesized_expr)
            .or(context_item_expr)
            .or(unary_lookup)
            .or(map_constructor)
            .or(array_constructor)
            .or(function_call)
            .map_with(|primary, extra| primary.with_span(extra.span()))
            .boxed();

        let predicate = expr
            .clone()
            .delimited_by(just(Token::LeftBracket), just(Token::RightBracket))
            .boxed();

        let postfix = predicate
            .clone()
            .map(ast::Postfix::Predicate)
            .or(argument_list
                .clone()
                .map_with(|arguments, extra| {
                    ast::Postfix::ArgumentList(arguments, extra.span().into())
                }))
            .or(just(Token::QuestionMark)
                .ignore_then(key_specifier)
                .map(ast::Postfix::Lookup))
            .boxed();

        let postfix_expr = primary_expr
            .then(postfix.repeated().collect::<Vec<_>>())
            .map(|(primary, postfixes)| ast::StepExpr::Postfix { primary, postfixes })
            .boxed();

        let predicate_list = predicate.repeated().collect::<Vec<_>>().boxed();
        let axis_step = |node_test: BoxedParser<'a, I, (ast::Axis, ast::NodeTest)>| {
            node_test
                .then(predicate_list.clone())
                .map(|((axis, node_test), predicates)| {
                    ast::StepExpr::Axis(ast::AxisStep {
                        axis,
                        node_test,
                        predicates,
                    })
                })
                .boxed()
        };

        let step_expr = axis_step(axis_node_test)
            .or(postfix_expr)
            .or(axis_step(name_node_test))
            .map_with(|step, extra| step.with_span(extra.span()))
            .boxed();

        let path_separator = just(Token::Slash)
            .to(ast::PathSeparator::Slash)
            .or(just(Token::DoubleSlash).to(ast::PathSeparator::DoubleSlash))
            .boxed();

        let relative_path_expr = step_expr
            .clone()
            .then(
                path_separator
                    .then(step_expr)
                    .repeated()
                    .collect::<Vec<_>>(),
            )
            .map(|(first, rest)| ast::RelativePathExpr { first, rest })
            .boxed();

        let doubleslash_prefix_path_expr = just(Token::DoubleSlash)
            .ignore_then(relative_path_expr.clone())
            .map(|relative| ast::PathExpr::Rooted {
                descendant: true,
                relative,
            })
            .boxed();

        // a lone slash is the root; anything that can start a step
        // continues the path
        let slash_prefix_path_expr = just(Token::Slash)
            .ignore_then(relative_path_expr.clone().or_not())
            .map(|relative| match relative {
                Some(relative) => ast::PathExpr::Rooted {
                    descendant: false,
                    relative,
                },
                None => ast::PathExpr::Root,
            })
            .boxed();

        let path_expr = doubleslash_prefix_path_expr
            .or(slash_prefix_path_expr)
            .or(relative_path_expr.map(ast::PathExpr::Relative))
            .map_with(|path, extra| ast::ExprSingle::Path(path).with_span(extra.span()))
            .boxed();

        let simple_map_expr = chain_expr(
            path_expr,
            just(Token::ExclamationMark)
                .to(BinaryOperator::SimpleMap)
                .boxed(),
        );

        let unary_operator = just(Token::Minus)
            .to(ast::UnaryOperator::Minus)
            .or(just(Token::Plus).to(ast::UnaryOperator::Plus))
            .boxed();

        let unary_expr = unary_operator
            .repeated()
            .collect::<Vec<_>>()
            .then(simple_map_expr)
            .map_with(|(operators, operand), extra| {
                if operators.is_empty() {
                    operand
                } else {
                    ast::ExprSingle::Unary(ast::UnaryExpr {
                        operators,
                        operand: Box::new(operand),
                    })
                    .with_span(extra.span())
                }
            })
            .boxed();

        let arrow_call = just(Token::Arrow)
            .ignore_then(eqname.clone())
            .then(argument_list)
            .map_with(|(name, arguments), extra| ast::ArrowCall {
                name,
                arguments,
                span: extra.span().into(),
            })
            .boxed();

        let arrow_expr = unary_expr
            .then(arrow_call.repeated().collect::<Vec<_>>())
            .map_with(|(base, calls), extra| {
                if calls.is_empty() {
                    base
                } else {
                    ast::ExprSingle::Arrow(ast::ArrowExpr {
                        base: Box::new(base),
                        calls,
                    })
                    .with_span(extra.span())
                }
            })
            .boxed();

        let cast_expr = apply_expr(
            arrow_expr,
            keyword("cast")
                .ignore_then(keyword("as"))
                .ignore_then(single_type.clone())
                .map(ast::ApplyOperator::Cast)
                .boxed(),
        );
        let castable_expr = apply_expr(
            cast_expr,
            keyword("castable")
                .ignore_then(keyword("as"))
                .ignore_then(single_type.clone())
                .map(ast::ApplyOperator::Castable)
                .boxed(),
        );
        let treat_expr = apply_expr(
            castable_expr,
            keyword("treat")
                .ignore_then(keyword("as"))
                .ignore_then(sequence_type.clone())
                .map(ast::ApplyOperator::Treat)
                .boxed(),
        );
        let instance_of_expr = apply_expr(
            treat_expr,
            keyword("instance")
                .ignore_then(keyword("of"))
                .ignore_then(sequence_type.clone())
                .map(ast::ApplyOperator::InstanceOf)
                .boxed(),
        );

        let intersect_except_operator = select! {
            Token::NCName("intersect") => BinaryOperator::Intersect,
            Token::NCName("except") => BinaryOperator::Except,
        }
        .boxed();
        let intersect_except_expr = chain_expr(instance_of_expr, intersect_except_operator);

        let union_operator = select! {
            Token::Pipe => BinaryOperator::Union,
            Token::NCName("union") => BinaryOperator::Union,
        }
        .boxed();
        let union_expr = chain_expr(intersect_except_expr, union_operator);

        let multiplicative_operator = select! {
            Token::Asterisk => BinaryOperator::Mul,
            Token::NCName("div") => BinaryOperator::Div,
            Token::NCName("idiv") => BinaryOperator::IntDiv,
            Token::NCName("mod") => BinaryOperator::Mod,
        }
        .boxed();
        let multiplicative_expr = chain_expr(union_expr, multiplicative_operator);

        let additive_operator = select! {
            Token::Plus => BinaryOperator::Add,
            Token::Minus => BinaryOperator::Sub,
        }
        .boxed();
        let additive_expr = chain_expr(multiplicative_expr, additive_operator);

        let range_expr =
            binary_expr(additive_expr, keyword("to").to(BinaryOperator::Range).boxed());

        let string_concat_expr =
            chain_expr(range_expr, just(Token::DoublePipe).to(BinaryOperator::Concat).boxed());

        let comparison_operator = select! {
            Token::Equal => BinaryOperator::GenEq,
            Token::NotEqual => BinaryOperator::GenNe,
            Token::LessThan => BinaryOperator::GenLt,
            Token::LessThanEqual => BinaryOperator::GenLe,
            Token::GreaterThan => BinaryOperator::GenGt,
            Token::GreaterThanEqual => BinaryOperator::GenGe,
            Token::NCName("eq") => BinaryOperator::ValueEq,
            Token::NCName("ne") => BinaryOperator::ValueNe,
            Token::NCName("lt") => BinaryOperator::ValueLt,
            Token::NCName("le") => BinaryOperator::ValueLe,
            Token::NCName("gt") => BinaryOperator::ValueGt,
            Token::NCName("ge") => BinaryOperator::ValueGe,
            Token::NCName("is") => BinaryOperator::Is,
            Token::Precedes => BinaryOperator::Precedes,
            Token::Follows => BinaryOperator::Follows,
        }
        .boxed();
        let comparison_expr = binary_expr(string_concat_expr, comparison_operator);

        let and_expr = chain_expr(comparison_expr, keyword("and").to(BinaryOperator::And).boxed());
        let or_expr = chain_expr(and_expr, keyword("or").to(BinaryOperator::Or).boxed());

        let binding = |separator: BoxedParser<'a, I, Token<'a>>| {
            just(Token::Dollar)
                .ignore_then(eqname.clone())
                .then_ignore(separator)
                .then(expr_single.clone())
                .map(|(var_name, var_expr)| ast::Binding { var_name, var_expr })
                .separated_by(just(Token::Comma))
                .at_least(1)
                .collect::<Vec<_>>()
                .boxed()
        };
        let in_bindings = binding(keyword("in"));
        let let_bindings = binding(just(Token::ColonEqual).boxed());

        let for_expr = keyword("for")
            .ignore_then(in_bindings.clone())
            .then_ignore(keyword("return"))
            .then(expr_single.clone())
            .map_with(|(bindings, return_expr), extra| {
                ast::ExprSingle::For(ast::ForExpr {
                    bindings,
                    return_expr: Box::new(return_expr),
                })
                .with_span(extra.span())
            })
            .boxed();

        let let_expr = keyword("let")
            .ignore_then(let_bindings)
            .then_ignore(keyword("return"))
            .then(expr_single.clone())
            .map_with(|(bindings, return_expr), extra| {
                ast::ExprSingle::Let(ast::LetExpr {
                    bindings,
                    return_expr: Box::new(return_expr),
                })
                .with_span(extra.span())
            })
            .boxed();

        let quantifier = keyword("some")
            .to(ast::Quantifier::Some)
            .or(keyword("every").to(ast::Quantifier::Every))
            .boxed();

        let quantified_expr = quantifier
            .then(in_bindings)
            .then_ignore(keyword("satisfies"))
            .then(expr_single.clone())
            .map_with(|((quantifier, bindings), satisfies_expr), extra| {
                ast::ExprSingle::Quantified(ast::QuantifiedExpr {
                    quantifier,
                    bindings,
                    satisfies_expr: Box::new(satisfies_expr),
                })
                .with_span(extra.span())
            })
            .boxed();

        let if_expr = keyword("if")
            .ignore_then(expr.delimited_by(just(Token::LeftParen), just(Token::RightParen)))
            .then_ignore(keyword("then"))
            .then(expr_single.clone())
            .then_ignore(keyword("else"))
            .then(expr_single)
            .map_with(|((condition, then), else_), extra| {
                ast::ExprSingle::If(ast::IfExpr {
                    condition,
                    then: Box::new(then),
                    else_: Box::new(else_),
                })
                .with_span(extra.span())
            })
            .boxed();

        // keywords are ordinary names unless the rest of the construct
        // follows, so each of these falls back to a path
        for_expr
            .or(let_expr)
            .or(quantified_expr)
            .or(if_expr)
            .or(or_expr)
            .boxed()
    })
    .boxed();

    let expr = parser_expr(expr_single).then_ignore(end()).boxed();
    let sequence_type = sequence_type.then_ignore(end()).boxed();
    let single_type = single_type.then_ignore(end()).boxed();
    let signature = signature.then_ignore(end()).boxed();

    ParserOutput {
        expr,
        sequence_type,
        single_type,
        signature,
    }
}

fn parser_expr<'a, I>(
    expr_single: BoxedParser<'a, I, ast::ExprSingleS>,
) -> BoxedParser<'a, I, ast::ExprS>
where
    I: ValueInput<'a, Token = Token<'a>, Span = SimpleSpan>,
{
    expr_single
        .separated_by(just(Token::Comma))
        .at_least(1)
        .collect::<Vec<_>>()
        .map_with(|exprs, extra| ast::Expr(exprs).with_span(extra.span()))
        .boxed()
}

// operands joined by an associative operator; a single operand is
// returned as is
fn chain_expr<'a, I>(
    operand: BoxedParser<'a, I, ast::ExprSingleS>,
    operator: BoxedParser<'a, I, BinaryOperator>,
) -> BoxedParser<'a, I, ast::ExprSingleS>
where
    I: ValueInput<'a, Token = Token<'a>, Span = SimpleSpan>,
{
    operand
        .clone()
        .then(operator.then(operand).repeated().collect::<Vec<_>>())
        .map_with(|(first, rest), extra| {
            if rest.is_empty() {
                first
            } else {
                ast::ExprSingle::Chain(ast::ChainExpr {
                    first: Box::new(first),
                    rest,
                })
                .with_span(extra.span())
            }
        })
        .boxed()
}

// at most one application of a non-associative operator
fn binary_expr<'a, I>(
    operand: BoxedParser<'a, I, ast::ExprSingleS>,
    operator: BoxedParser<'a, I, BinaryOperator>,
) -> BoxedParser<'a, I, ast::ExprSingleS>
where
    I: ValueInput<'a, Token = Token<'a>, Span = SimpleSpan>,
{
    operand
        .clone()
        .then(operator.then(operand).or_not())
        .map_with(|(left, right), extra| match right {
            Some((operator, right)) => ast::ExprSingle::Binary(ast::BinaryExpr {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            })
            .with_span(extra.span()),
            None => left,
        })
        .boxed()
}

fn apply_expr<'a, I>(
    operand: BoxedParser<'a, I, ast::ExprSingleS>,
    operator: BoxedParser<'a, I, ast::ApplyOperator>,
) -> BoxedParser<'a, I, ast::ExprSingleS>
where
    I: ValueInput<'a, Token = Token<'a>, Span = SimpleSpan>,
{
    operand
        .then(operator.or_not())
        .map_with(|(expr, operator), extra| match operator {
            Some(operator) => ast::ExprSingle::Apply(ast::ApplyExpr {
                expr: Box::new(expr),
                operator,
            })
            .with_span(extra.span()),
            None => expr,
        })
        .boxed()
}
