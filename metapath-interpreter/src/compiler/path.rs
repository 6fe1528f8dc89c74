use metapath_ast::ast;
use metapath_name::NameKind;

use crate::error;
use crate::expr::{Expr, NodeTest, Step};
use crate::types::KindTest;

use super::compiler_core::Compiler;

impl<'a> Compiler<'a> {
    pub(super) fn path_expr(&self, path_expr: &ast::PathExpr) -> error::SpannedResult<Expr> {
        match path_expr {
            ast::PathExpr::Root => Ok(Expr::Root),
            ast::PathExpr::Rooted {
                descendant,
                relative,
            } => {
                let base = if *descendant {
                    path(Expr::Root, descendant_or_self())
                } else {
                    Expr::Root
                };
                self.relative_path(Some(base), relative)
            }
            ast::PathExpr::Relative(relative) => self.relative_path(None, relative),
        }
    }

    /// Fold the steps left to right. `a//b` is `a/descendant-or-self::node()/b`.
    fn relative_path(
        &self,
        base: Option<Expr>,
        relative: &ast::RelativePathExpr,
    ) -> error::SpannedResult<Expr> {
        let first = self.step_expr(&relative.first)?;
        let mut result = match base {
            Some(base) => path(base, first),
            None => first,
        };
        for (separator, step) in &relative.rest {
            if *separator == ast::PathSeparator::DoubleSlash {
                result = path(result, descendant_or_self());
            }
            result = path(result, self.step_expr(step)?);
        }
        Ok(result)
    }

    fn step_expr(&self, step: &ast::StepExprS) -> error::SpannedResult<Expr> {
        match &step.value {
            ast::StepExpr::Postfix { primary, postfixes } => {
                let mut result = self.primary(primary)?;
                for postfix in postfixes {
                    result = match postfix {
                        ast::Postfix::Predicate(predicate) => Expr::Filter {
                            base: Box::new(result),
                            predicate: Box::new(self.expr(predicate)?),
                        },
                        ast::Postfix::ArgumentList(arguments, _) => Expr::DynamicCall {
                            base: Box::new(result),
                            arguments: arguments
                                .iter()
                                .map(|argument| self.expr_single(argument))
                                .collect::<error::SpannedResult<Vec<_>>>()?,
                        },
                        ast::Postfix::Lookup(key) => Expr::Lookup {
                            base: Box::new(result),
                            key: self.key_specifier(key)?,
                        },
                    };
                }
                Ok(result)
            }
            ast::StepExpr::Axis(axis_step) => self.axis_step(axis_step),
        }
    }

    fn axis_step(&self, axis_step: &ast::AxisStep) -> error::SpannedResult<Expr> {
        let node_test = self.node_test(axis_step.axis, &axis_step.node_test)?;
        let predicates = axis_step
            .predicates
            .iter()
            .map(|predicate| self.expr(predicate))
            .collect::<error::SpannedResult<Vec<_>>>()?;
        Ok(Expr::Step(Box::new(Step {
            axis: axis_step.axis,
            node_test,
            predicates,
        })))
    }

    /// Names on the flag axis are flag names; on all other axes they are
    /// model names.
    fn node_test(&self, axis: ast::Axis, node_test: &ast::NodeTest) -> error::SpannedResult<NodeTest> {
        let namespaces = self.static_context.namespaces();
        match node_test {
            ast::NodeTest::KindTest(kind_test) => {
                Ok(NodeTest::Kind(KindTest::from_ast(kind_test, namespaces)?))
            }
            ast::NodeTest::NameTest(name_test) => match name_test {
                ast::NameTest::Name(name) => {
                    let kind = if axis == ast::Axis::Flag {
                        NameKind::Flag
                    } else {
                        NameKind::Model
                    };
                    let wildcard = kind == NameKind::Model
                        && matches!(name.value, ast::EQName::Unprefixed(_))
                        && namespaces.default_model_namespace().is_none()
                        && self
                            .static_context
                            .use_wildcard_when_namespace_not_defaulted();
                    if wildcard {
                        Ok(NodeTest::LocalName(name.value.local_name().to_string()))
                    } else {
                        Ok(NodeTest::Name(self.resolve(name, kind)?))
                    }
                }
                ast::NameTest::Star => Ok(NodeTest::AnyName),
                ast::NameTest::Prefix(prefix, span) => namespaces
                    .by_prefix(prefix)
                    .map(|uri| NodeTest::Namespace(uri.to_string()))
                    .ok_or_else(|| error::Error::MPST0081.with_ast_span(*span)),
                ast::NameTest::Namespace(uri) => Ok(NodeTest::Namespace(uri.clone())),
                ast::NameTest::LocalName(local_name) => {
                    Ok(NodeTest::LocalName(local_name.clone()))
                }
            },
        }
    }
}

fn path(base: Expr, step: Expr) -> Expr {
    Expr::Path {
        base: Box::new(base),
        step: Box::new(step),
    }
}

fn descendant_or_self() -> Expr {
    Expr::Step(Box::new(Step {
        axis: ast::Axis::DescendantOrSelf,
        node_test: NodeTest::Kind(KindTest::Any),
        predicates: Vec::new(),
    }))
}
