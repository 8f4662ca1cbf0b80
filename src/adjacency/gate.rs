//! Variant-specific edge conditions.
//!
//! Two facing connectors are necessary but not always sufficient for an
//! edge. A `Gate` adds the extra condition: a switch conducts only while
//! on, a pipe only joins pipes of the same channel.

use crate::core::{Piece, PieceKind};

/// Extra condition an edge must satisfy beyond facing connectors.
pub trait Gate {
    /// Whether `a` and `b` may form an edge, given facing connectors.
    fn allows(&self, a: &Piece, b: &Piece) -> bool;
}

/// Gate used by every built-in variant.
///
/// - A `Switch` piece conducts only while `switch_on`.
/// - Two pieces with different pipe channels never connect. A piece
///   without a channel connects to anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardGate;

impl StandardGate {
    fn conducts(piece: &Piece) -> bool {
        piece.kind != PieceKind::Switch || piece.aux.switch_on
    }
}

impl Gate for StandardGate {
    fn allows(&self, a: &Piece, b: &Piece) -> bool {
        if !Self::conducts(a) || !Self::conducts(b) {
            return false;
        }
        match (a.aux.channel, b.aux.channel) {
            (Some(x), Some(y)) => x == y,
            _ => true,
        }
    }
}

/// Gate that accepts every pair.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenGate;

impl Gate for OpenGate {
    fn allows(&self, _a: &Piece, _b: &Piece) -> bool {
        true
    }
}

impl<F> Gate for F
where
    F: Fn(&Piece, &Piece) -> bool,
{
    fn allows(&self, a: &Piece, b: &Piece) -> bool {
        self(a, b)
    }
}
