//! PGN read/write utilities for game history interchange.
//!
//! Writes a move list as PGN with standard algebraic movetext and reads PGN
//! back into a replayable move list. Movetext tokens may be SAN or long
//! algebraic.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::move_generator::{GenerationOptions, PromotionPolicy};
use crate::moves::move_descriptions::LegalMove;
use crate::utils::long_algebraic::long_algebraic_to_legal_move;
use crate::utils::standard_algebraic::move_to_san;

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub initial_state: GameState,
    pub moves: Vec<LegalMove>,
    pub final_state: GameState,
    pub result: String,
}

/// PGN `Date` header value, e.g. `2024.03.09`.
pub fn pgn_date(date: NaiveDate) -> String {
    date.format("%Y.%m.%d").to_string()
}

/// Seven-tag roster for a local game played today.
pub fn default_headers(initial_state: &GameState, result: &str) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "neural_chess game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), pgn_date(Local::now().date_naive()));
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), normalize_result(result).to_owned());

    let initial_fen = initial_state.get_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }

    headers
}

pub fn write_pgn(initial_state: &GameState, moves: &[LegalMove], result: &str) -> ChessResult<String> {
    write_pgn_with_headers(initial_state, moves, &default_headers(initial_state, result))
}

/// Fails with `IllegalMove` when a move in `moves` is not legal where it is
/// played.
pub fn write_pgn_with_headers(
    initial_state: &GameState,
    moves: &[LegalMove],
    headers: &BTreeMap<String, String>,
) -> ChessResult<String> {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let mut state = initial_state.clone();
    let mut sans = Vec::<String>::with_capacity(moves.len());
    for mv in moves {
        let legal = generate_legal_moves(
            &mut state,
            GenerationOptions::with_promotion_policy(PromotionPolicy::AllPieces),
        );
        if !legal.contains(mv) {
            return Err(ChessError::IllegalMove {
                from: mv.from,
                to: mv.to,
            });
        }

        sans.push(move_to_san(&mut state, *mv));
        make_move(&mut state, *mv);
    }

    let result = headers
        .get("Result")
        .map(|x| normalize_result(x))
        .unwrap_or("*");
    let movetext = number_movetext(initial_state.side_to_move, initial_state.fullmove_number, &sans);
    if !movetext.is_empty() {
        out.push_str(&movetext);
        out.push(' ');
    }
    out.push_str(result);
    out.push('\n');

    Ok(out)
}

/// Join per-ply notation into numbered movetext (`1. e4 e5 2. Nf3`). A
/// record that starts with black to move opens with `N...`.
pub fn number_movetext(first_side: Color, first_fullmove: u16, notations: &[String]) -> String {
    let mut parts = Vec::<String>::with_capacity(notations.len());
    let mut side = first_side;
    let mut fullmove = first_fullmove;

    for (ply, notation) in notations.iter().enumerate() {
        match (side, ply) {
            (Color::Light, _) => parts.push(format!("{fullmove}. {notation}")),
            (Color::Dark, 0) => parts.push(format!("{fullmove}... {notation}")),
            (Color::Dark, _) => parts.push(notation.clone()),
        }
        if side == Color::Dark {
            fullmove += 1;
        }
        side = side.opposite();
    }

    parts.join(" ")
}

pub fn read_pgn(pgn: &str) -> ChessResult<PgnGame> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<String>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            let (k, v) = parse_header_line(trimmed)?;
            headers.insert(k, v);
        } else {
            movetext_lines.push(trimmed.to_owned());
        }
    }

    let initial_state = if headers.get("SetUp").map(|x| x.as_str()) == Some("1") {
        let fen = headers
            .get("FEN")
            .ok_or_else(|| ChessError::InvalidPgn("SetUp is 1 but the FEN header is missing".to_owned()))?;
        GameState::from_fen(fen)?
    } else {
        GameState::new_game()
    };

    let mut state = initial_state.clone();
    let mut moves = Vec::<LegalMove>::new();
    let mut result = "*".to_owned();

    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join(" "));
    for token in movetext.split_whitespace() {
        if is_move_number_token(token) {
            continue;
        }

        let cleaned = trim_annotation_suffix(strip_move_number_prefix(token));
        if is_result_token(cleaned) {
            result = cleaned.to_owned();
            break;
        }

        let mv = resolve_movetext_token(cleaned, &mut state)?;
        make_move(&mut state, mv);
        moves.push(mv);
    }

    if let Some(header_result) = headers.get("Result") {
        result = normalize_result(header_result).to_owned();
    }

    Ok(PgnGame {
        headers,
        initial_state,
        moves,
        final_state: state,
        result,
    })
}

/// Match a SAN token against the SAN of every legal move, falling back to
/// long algebraic.
fn resolve_movetext_token(token: &str, state: &mut GameState) -> ChessResult<LegalMove> {
    let wanted = token.replace('0', "O");
    let legal = generate_legal_moves(
        state,
        GenerationOptions::with_promotion_policy(PromotionPolicy::AllPieces),
    );
    for mv in legal {
        let san = move_to_san(state, mv);
        if trim_annotation_suffix(&san) == wanted {
            return Ok(mv);
        }
    }

    long_algebraic_to_legal_move(token, state)
        .map_err(|_| ChessError::InvalidPgn(format!("unrecognised move '{token}'")))
}

fn parse_header_line(line: &str) -> ChessResult<(String, String)> {
    let invalid = || ChessError::InvalidPgn(format!("bad header line: {line}"));

    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (key, value_raw) = inner.split_once(' ').ok_or_else(invalid)?;
    let value = value_raw
        .trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(invalid)?;

    Ok((key.trim().to_owned(), value.replace("\\\"", "\"")))
}

fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' => paren_depth = paren_depth.saturating_add(1),
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

fn is_move_number_token(token: &str) -> bool {
    let digits = token.trim_end_matches('.');
    digits.len() < token.len() && !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// `12.e4` and `12...e5` written without a space.
fn strip_move_number_prefix(token: &str) -> &str {
    let digits_end = token.find(|c: char| !c.is_ascii_digit()).unwrap_or(token.len());
    if digits_end == 0 || !token[digits_end..].starts_with('.') {
        return token;
    }
    token[digits_end..].trim_start_matches('.')
}

fn trim_annotation_suffix(token: &str) -> &str {
    token.trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'))
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &mut GameState, texts: &[&str]) -> Vec<LegalMove> {
        texts
            .iter()
            .map(|text| {
                let mv = long_algebraic_to_legal_move(text, game).expect("move should be legal");
                make_move(game, mv);
                mv
            })
            .collect()
    }

    #[test]
    fn date_header_uses_dotted_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("date should be valid");
        assert_eq!(pgn_date(date), "2024.03.09");
    }

    #[test]
    fn numbering_starts_mid_move_for_black() {
        let sans = ["Kd7".to_owned(), "e4".to_owned(), "Ke6".to_owned()];
        assert_eq!(number_movetext(Color::Dark, 7, &sans), "7... Kd7 8. e4 Ke6");
        assert_eq!(number_movetext(Color::Light, 1, &sans[..2]), "1. Kd7 e4");
        assert_eq!(number_movetext(Color::Light, 1, &[]), "");
    }

    #[test]
    fn writes_numbered_san_movetext() {
        let mut game = GameState::new_game();
        let moves = play(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6", "f1b5"]);

        let pgn = write_pgn(&GameState::new_game(), &moves, "*").expect("PGN should write");
        assert!(pgn.contains("[Result \"*\"]"));
        assert!(!pgn.contains("[FEN"));
        assert!(pgn.ends_with("1. e4 e5 2. Nf3 Nc6 3. Bb5 *\n"), "{pgn}");
    }

    #[test]
    fn pgn_round_trip_start_position_history() {
        let mut game = GameState::new_game();
        let moves = play(&mut game, &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"]);

        let pgn = write_pgn(&GameState::new_game(), &moves, "1-0").expect("PGN should write");
        assert!(pgn.contains("4. Qxf7# 1-0"), "{pgn}");

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.moves, moves);
        assert_eq!(parsed.final_state.get_fen(), game.get_fen());
        assert_eq!(parsed.result, "1-0");
    }

    #[test]
    fn pgn_round_trip_custom_fen_setup() {
        let initial = GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 7").expect("FEN should parse");
        let mut game = initial.clone();
        let moves = play(&mut game, &["e8d7", "e2e4"]);

        let pgn = write_pgn(&initial, &moves, "1/2-1/2").expect("PGN should write");
        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.contains("7... Kd7 8. e4 1/2-1/2"), "{pgn}");

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.initial_state.get_fen(), initial.get_fen());
        assert_eq!(parsed.moves, moves);
        assert_eq!(parsed.result, "1/2-1/2");
    }

    #[test]
    fn reads_comments_and_long_algebraic_tokens() {
        let pgn = "[Event \"x\"]\n\n1. e2e4 {book} e5 2.Nf3 (2. f4 exf4) Nc6 *\n";
        let parsed = read_pgn(pgn).expect("PGN should parse");
        assert_eq!(parsed.moves.len(), 4);
        assert_eq!(parsed.moves[2], LegalMove::new(6, 21));
    }

    #[test]
    fn rejects_illegal_history_and_bad_tokens() {
        let bogus = [LegalMove::new(12, 36)];
        assert!(matches!(
            write_pgn(&GameState::new_game(), &bogus, "*"),
            Err(ChessError::IllegalMove { .. })
        ));
        assert!(matches!(read_pgn("1. e5 *"), Err(ChessError::InvalidPgn(_))));
        assert!(matches!(read_pgn("[Event x]\n1. e4 *"), Err(ChessError::InvalidPgn(_))));
    }
}
