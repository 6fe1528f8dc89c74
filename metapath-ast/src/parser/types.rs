use chumsky::{extra::Full, prelude::*};

use crate::error::ParserError;

pub(crate) type Extra = Full<ParserError, (), ()>;

pub(crate) type BoxedParser<'a, I, T> = Boxed<'a, 'a, I, T, Extra>;
