use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BinaryOperator {
    // logical
    Or,
    And,
    // value comp
    ValueEq,
    ValueNe,
    ValueLt,
    ValueLe,
    ValueGt,
    ValueGe,
    // general comp
    GenEq,
    GenNe,
    GenLt,
    GenLe,
    GenGt,
    GenGe,
    // node comp
    Is,
    Precedes,
    Follows,
    // string concat
    Concat,
    // range
    Range,
    // arithmetic
    Add,
    Sub,
    Mul,
    Div,
    IntDiv,
    Mod,
    // set
    Union,
    Intersect,
    Except,
    // simple map
    SimpleMap,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        use BinaryOperator::*;
        match self {
            Or => "or",
            And => "and",
            ValueEq => "eq",
            ValueNe => "ne",
            ValueLt => "lt",
            ValueLe => "le",
            ValueGt => "gt",
            ValueGe => "ge",
            GenEq => "=",
            GenNe => "!=",
            GenLt => "<",
            GenLe => "<=",
            GenGt => ">",
            GenGe => ">=",
            Is => "is",
            Precedes => "<<",
            Follows => ">>",
            Concat => "||",
            Range => "to",
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "div",
            IntDiv => "idiv",
            Mod => "mod",
            Union => "union",
            Intersect => "intersect",
            Except => "except",
            SimpleMap => "!",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
