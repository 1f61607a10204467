//! Substitution fold: merging a lambda chain into one expression.

use tracing::debug;

use crate::model::{MapOptions, TypePath};
use crate::resolve::EdgeResolver;
use crate::{Error, Result};

use super::ast::{Expr, Lambda, Param};

/// Replace every reference to `param` in `body` with `replacement`.
///
/// This is the entire substitution algebra: bodies hold no nested lambdas,
/// so there is no capture or shadowing to handle — a parameter node either
/// matches or it doesn't.
pub fn substitute(body: &Expr, param: &Param, replacement: &Expr) -> Expr {
    match body {
        Expr::Parameter(p) if p == param => replacement.clone(),
        Expr::Parameter(p) => Expr::Parameter(p.clone()),
        Expr::Field { target, name } => Expr::Field {
            target: Box::new(substitute(target, param, replacement)),
            name: name.clone(),
        },
        Expr::Call { function, args } => Expr::Call {
            function: function.clone(),
            args: args.iter().map(|arg| substitute(arg, param, replacement)).collect(),
        },
        Expr::Literal(lit) => Expr::Literal(lit.clone()),
    }
}

/// Left-to-right fold of a lambda chain.
///
/// The composed lambda keeps the first lambda's parameter; each subsequent
/// body has its own parameter replaced by the body composed so far. `None`
/// for an empty chain.
pub fn compose(lambdas: &[Lambda]) -> Option<Lambda> {
    let (first, rest) = lambdas.split_first()?;
    let mut body = first.body.clone();
    let mut result = first.result;
    for next in rest {
        body = substitute(&next.body, &next.param, &body);
        result = next.result;
    }
    Some(Lambda::new(first.param.clone(), body, result))
}

/// Retrieve one lambda per hop of `path` and fold them into a single
/// composed expression.
///
/// A hop whose expression is unavailable after path resolution yields the
/// aggregate NotFound for the overall pair. Any other hop failure — the
/// resolver erroring, or adjacent lambdas that don't line up — is wrapped
/// with the overall pair as a projection failure; hop boundaries are an
/// implementation detail callers never see.
pub(crate) fn compose_chain<R: EdgeResolver + ?Sized>(
    resolver: &R,
    path: &TypePath,
    options: &MapOptions,
) -> Result<Lambda> {
    let source = path.source();
    let destination = path.destination();

    let mut lambdas = Vec::with_capacity(path.hops());
    for (from, to) in path.edges() {
        let lambda = resolver
            .expression(from, to, options)
            .map_err(|cause| Error::Projection { source, destination, cause })?
            .ok_or(Error::NotFound { source, destination })?;
        lambdas.push(lambda);
    }

    for window in lambdas.windows(2) {
        if window[1].param.ty != window[0].result {
            return Err(Error::Projection {
                source,
                destination,
                cause: format!(
                    "adjacent hop expressions do not line up: {} feeds {}",
                    window[0].result, window[1].param.ty
                )
                .into(),
            });
        }
    }

    debug!(chain = %path, hops = lambdas.len(), "composing projection");
    compose(&lambdas).ok_or(Error::NotFound { source, destination })
}
