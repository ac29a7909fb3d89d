//! Text input tokens shared by both games.
//!
//! Matching is case-sensitive: `d` follows the WASD layout (right) while `D`
//! is the single-letter script form of down.

use grid_arcade_core::Direction;
use thiserror::Error;
use tracing::warn;

/// Player intent decoded from one input token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Token {
    /// Move the actor or steer the trail.
    Move(Direction),
    /// Reload the current puzzle level.
    Restart,
    /// Toggle the trail's pause state.
    Pause,
    /// Advance the trail one tick without steering.
    Wait,
    /// Stop playing.
    Quit,
}

/// Word that does not name any token.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unrecognised input `{word}`")]
pub(crate) struct UnknownToken {
    /// Offending word.
    pub(crate) word: String,
}

fn token(word: &str) -> Option<Token> {
    let token = match word {
        "up" | "w" | "k" | "U" => Token::Move(Direction::Up),
        "down" | "s" | "j" | "D" => Token::Move(Direction::Down),
        "left" | "a" | "h" | "L" => Token::Move(Direction::Left),
        "right" | "d" | "l" | "R" => Token::Move(Direction::Right),
        "r" | "restart" => Token::Restart,
        "p" | "pause" => Token::Pause,
        "q" | "quit" | "esc" => Token::Quit,
        "." | "wait" => Token::Wait,
        _ => return None,
    };
    Some(token)
}

fn script_direction(letter: char) -> Option<Token> {
    let direction = match letter {
        'U' => Direction::Up,
        'D' => Direction::Down,
        'L' => Direction::Left,
        'R' => Direction::Right,
        _ => return None,
    };
    Some(Token::Move(direction))
}

fn push_word(word: &str, out: &mut Vec<Token>) -> Result<(), UnknownToken> {
    if let Some(token) = token(word) {
        out.push(token);
        return Ok(());
    }

    let run: Option<Vec<Token>> = word.chars().map(script_direction).collect();
    match run {
        Some(run) if !run.is_empty() => {
            out.extend(run);
            Ok(())
        }
        _ => Err(UnknownToken {
            word: word.to_owned(),
        }),
    }
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|word| !word.is_empty())
}

/// Parses a whole move script, rejecting it at the first unknown word.
pub(crate) fn parse_script(script: &str) -> Result<Vec<Token>, UnknownToken> {
    let mut tokens = Vec::new();
    for word in words(script) {
        push_word(word, &mut tokens)?;
    }
    Ok(tokens)
}

/// Parses one interactive line, skipping words it does not understand.
pub(crate) fn parse_line_lenient(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for word in words(line) {
        if let Err(error) = push_word(word, &mut tokens) {
            warn!(%error, "ignoring input");
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_distinguishes_wasd_from_script_letters() {
        assert_eq!(
            parse_script("d D l L").expect("valid"),
            vec![
                Token::Move(Direction::Right),
                Token::Move(Direction::Down),
                Token::Move(Direction::Right),
                Token::Move(Direction::Left),
            ]
        );
    }

    #[test]
    fn contiguous_script_letters_expand() {
        assert_eq!(
            parse_script("RRD, up").expect("valid"),
            vec![
                Token::Move(Direction::Right),
                Token::Move(Direction::Right),
                Token::Move(Direction::Down),
                Token::Move(Direction::Up),
            ]
        );
    }

    #[test]
    fn control_words_are_recognised() {
        assert_eq!(
            parse_script("r restart p pause . wait q esc").expect("valid"),
            vec![
                Token::Restart,
                Token::Restart,
                Token::Pause,
                Token::Pause,
                Token::Wait,
                Token::Wait,
                Token::Quit,
                Token::Quit,
            ]
        );
    }

    #[test]
    fn script_rejects_unknown_words() {
        assert_eq!(
            parse_script("up jump"),
            Err(UnknownToken {
                word: "jump".to_owned()
            })
        );
        assert!(parse_script("RRx").is_err());
    }

    #[test]
    fn interactive_lines_skip_unknown_words() {
        assert_eq!(
            parse_line_lenient("jump left"),
            vec![Token::Move(Direction::Left)]
        );
        assert!(parse_line_lenient("   ").is_empty());
    }
}
