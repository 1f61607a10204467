//! Typed-lambda AST.
//!
//! These types are pure data — no behavior beyond construction, display and
//! alpha-equivalence. Bodies never contain nested lambdas: every edge
//! expression is a single-argument lambda whose body references at most its
//! own parameter, which is what keeps substitution a plain node-for-subtree
//! replacement.

use std::fmt;

use crate::model::TypeKey;

/// A lambda's single parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: String,
    pub ty: TypeKey,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeKey) -> Self {
        Self { name: name.into(), ty }
    }

    pub fn of<T: 'static>(name: impl Into<String>) -> Self {
        Self::new(name, TypeKey::of::<T>())
    }
}

/// Expression body node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Reference to an enclosing lambda's parameter.
    Parameter(Param),
    /// Member access: `target.name`.
    Field { target: Box<Expr>, name: String },
    /// Named function application.
    Call { function: String, args: Vec<Expr> },
    /// Constant.
    Literal(Literal),
}

impl Expr {
    pub fn param(p: &Param) -> Self {
        Expr::Parameter(p.clone())
    }

    pub fn field(target: Expr, name: impl Into<String>) -> Self {
        Expr::Field { target: Box::new(target), name: name.into() }
    }

    pub fn call(function: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call { function: function.into(), args }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

/// A single-argument typed lambda: `|param: From| body`, producing `result`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub param: Param,
    pub body: Expr,
    pub result: TypeKey,
}

impl Lambda {
    pub fn new(param: Param, body: Expr, result: TypeKey) -> Self {
        Self { param, body, result }
    }

    pub fn source(&self) -> TypeKey {
        self.param.ty
    }

    pub fn result(&self) -> TypeKey {
        self.result
    }

    /// Structural equality up to parameter renaming.
    pub fn alpha_eq(&self, other: &Lambda) -> bool {
        if self.param.ty != other.param.ty || self.result != other.result {
            return false;
        }
        let renamed =
            super::compose::substitute(&other.body, &other.param, &Expr::param(&self.param));
        renamed == self.body
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Parameter(p) => f.write_str(&p.name),
            Expr::Field { target, name } => write!(f, "{target}.{name}"),
            Expr::Call { function, args } => {
                write!(f, "{function}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Expr::Literal(lit) => match lit {
                Literal::Int(v) => write!(f, "{v}"),
                Literal::Float(v) => write!(f, "{v}"),
                Literal::Text(v) => write!(f, "{v:?}"),
                Literal::Bool(v) => write!(f, "{v}"),
            },
        }
    }
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|{}: {}| {}", self.param.name, self.param.ty, self.body)
    }
}
