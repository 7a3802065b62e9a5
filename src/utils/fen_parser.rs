//! FEN-to-GameState parser.
//!
//! Builds a complete `GameState` from a Forsyth-Edwards Notation string and
//! rejects anything that could not arise in a game: wrong field count, bad
//! rank layout, missing or extra kings, pawns on a back rank, or the side not
//! on move standing in check.
//!
//! FEN carries no move history, so the move bitset is inferred: pawns off
//! their start rank count as moved, as do kings and rooks whose castling
//! rights are absent.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{castling_rights_of, CASTLING_FLANKS};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::utils::algebraic::parse_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() != 6 {
        return Err(invalid(format!(
            "expected 6 whitespace-separated fields, found {}",
            fields.len()
        )));
    }

    let mut game_state = GameState::new_empty();

    parse_board(fields[0], &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(fields[1])?;
    game_state.castling_rights = parse_castling_rights(fields[2])?;
    game_state.en_passant_square = parse_en_passant_square(fields[3], game_state.side_to_move)?;
    game_state.halfmove_clock = fields[4]
        .parse::<u16>()
        .map_err(|_| invalid(format!("bad halfmove clock '{}'", fields[4])))?;
    game_state.fullmove_number = fields[5]
        .parse::<u16>()
        .map_err(|_| invalid(format!("bad fullmove number '{}'", fields[5])))?;

    validate_kings(&game_state)?;
    validate_pawns(&game_state)?;

    drop_unbacked_castling_rights(&mut game_state);
    infer_move_bits(&mut game_state);

    if is_in_check(&game_state, game_state.side_to_move.opposite()) {
        return Err(invalid(format!(
            "{} is in check but it is {} to move",
            game_state.side_to_move.opposite(),
            game_state.side_to_move
        )));
    }

    game_state.record_position();
    Ok(game_state)
}

#[inline]
fn invalid(reason: String) -> ChessError {
    ChessError::InvalidFen(reason)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid(format!(
            "board layout must contain 8 ranks, found {}",
            ranks.len()
        )));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid(format!("rank {} has too many files", board_rank + 1)));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| invalid(format!("invalid piece character '{ch}'")))?;
            if file >= 8 {
                return Err(invalid(format!("rank {} has too many files", board_rank + 1)));
            }

            game_state.board[square_at(file, board_rank) as usize] = piece;
            file += 1;
        }

        if file != 8 {
            return Err(invalid(format!(
                "rank {} does not sum to 8 files",
                board_rank + 1
            )));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(invalid(format!("invalid side-to-move field '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => return Err(invalid(format!("invalid castling character '{ch}'"))),
        }
    }
    Ok(rights)
}

/// The target must sit on the rank a double push of the side not on move
/// passes over.
fn parse_en_passant_square(en_passant_part: &str, side_to_move: Color) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = parse_square(en_passant_part)
        .map_err(|_| invalid(format!("invalid en-passant square '{en_passant_part}'")))?;
    let expected_rank = match side_to_move {
        Color::Light => 5,
        Color::Dark => 2,
    };
    if rank_of(square) != expected_rank {
        return Err(invalid(format!(
            "en-passant square '{en_passant_part}' is not on the passed rank"
        )));
    }
    Ok(Some(square))
}

fn validate_kings(game_state: &GameState) -> ChessResult<()> {
    for color in Color::BOTH {
        let kings = game_state.count(color, PieceKind::King);
        if kings != 1 {
            return Err(invalid(format!("{color} must have exactly one king, found {kings}")));
        }
    }
    Ok(())
}

fn validate_pawns(game_state: &GameState) -> ChessResult<()> {
    for (square, piece) in game_state.board.iter().enumerate() {
        let rank = rank_of(square as Square);
        if piece.is_kind(PieceKind::Pawn) && (rank == 0 || rank == 7) {
            return Err(invalid("pawn on a back rank".to_owned()));
        }
    }
    Ok(())
}

/// Rights whose king or rook is not on its home square cannot be exercised.
fn drop_unbacked_castling_rights(game_state: &mut GameState) {
    for flank in CASTLING_FLANKS.iter() {
        let king_home = game_state
            .piece_at(flank.king_from)
            .is(flank.color, PieceKind::King);
        let rook_home = game_state
            .piece_at(flank.rook_from)
            .is(flank.color, PieceKind::Rook);
        if !king_home || !rook_home {
            game_state.castling_rights &= !flank.right;
        }
    }
}

fn infer_move_bits(game_state: &mut GameState) {
    for square in 0..64u8 {
        let piece = game_state.piece_at(square);
        let (Some(color), Some(kind)) = (piece.color(), piece.kind()) else {
            continue;
        };

        let moved = match kind {
            PieceKind::Pawn => rank_of(square) != color.pawn_start_rank(),
            PieceKind::King => game_state.castling_rights & castling_rights_of(color) == 0,
            PieceKind::Rook => !CASTLING_FLANKS.iter().any(|flank| {
                flank.rook_from == square
                    && flank.color == color
                    && game_state.castling_rights & flank.right != 0
            }),
            _ => false,
        };
        game_state.set_moved(square, moved);
    }
}
