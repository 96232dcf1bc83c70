//! What a history entry remembers so a move can be taken back exactly.

use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    Castle,
    EnPassant,
    Promotion,
}

/// Single history record for `make_move` / `unmake_move`.
///
/// Castling rights and the en-passant target cannot be recomputed from the
/// move alone, so the values from before the move are stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    /// Differs from `to` only for en passant.
    pub captured_square: Option<Square>,
    pub kind: MoveKind,
    /// `None` while a promotion choice is still pending.
    pub promoted_to: Option<PieceKind>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
}
