//! Interactive play over a line protocol
//!
//! One command per line, one reply block per command:
//!
//! ```text
//! board                      print the board
//! moves <sq>                 legal destinations of a piece
//! move <from> <to> [piece]   play a move, optionally choosing a promotion
//! abilities                  activated abilities of the side to move
//! activate <ability> <sq>    start an ability with the piece on <sq>
//! target <sq>                resolve the pending ability
//! cancel                     drop the pending ability
//! resign                     the side to move resigns
//! state                      snapshot as JSON
//! quit                       leave
//! ```
//!
//! Rejected commands print `error: ...` and leave the game as it was.

use nation_chess::{AbilityId, GameEngine, PieceType, Square};
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Parsed form of one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Board,
    Moves(Square),
    Move {
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    },
    Abilities,
    Activate {
        ability: AbilityId,
        square: Square,
    },
    Target(Square),
    Cancel,
    Resign,
    State,
    Quit,
}

impl Command {
    /// Parses one line; `Ok(None)` for a blank line
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = words.split_first() else {
            return Ok(None);
        };
        let square = |i: usize| -> Result<Square, String> {
            args.get(i)
                .ok_or_else(|| format!("'{name}' needs a square"))?
                .parse()
        };

        let command = match name {
            "board" => Command::Board,
            "moves" => Command::Moves(square(0)?),
            "move" => Command::Move {
                from: square(0)?,
                to: square(1)?,
                promotion: args.get(2).map(|p| p.parse()).transpose()?,
            },
            "abilities" => Command::Abilities,
            "activate" => Command::Activate {
                ability: args
                    .first()
                    .ok_or_else(|| "'activate' needs an ability id".to_string())?
                    .parse()?,
                square: square(1)?,
            },
            "target" => Command::Target(square(0)?),
            "cancel" => Command::Cancel,
            "resign" => Command::Resign,
            "state" => Command::State,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command '{other}'")),
        };
        Ok(Some(command))
    }
}

/// Runs commands from `input` until `quit` or end of input
///
/// # Arguments
///
/// * `promotion` - Promotion used when a `move` names none
pub fn run_session<R: BufRead, W: Write>(
    engine: &mut GameEngine,
    promotion: PieceType,
    input: R,
    mut out: W,
) -> io::Result<()> {
    writeln!(out, "{}", engine.board().render())?;
    for line in input.lines() {
        let line = line?;
        match Command::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => {
                debug!("[ENGINE] Command {:?}", command);
                if let Err(message) = execute(engine, promotion, command, &mut out)? {
                    writeln!(out, "error: {message}")?;
                }
            }
            Err(message) => writeln!(out, "error: {message}")?,
        }
        out.flush()?;
    }
    Ok(())
}

/// Outer result is output failure, inner is a rejected command
fn execute<W: Write>(
    engine: &mut GameEngine,
    promotion: PieceType,
    command: Command,
    out: &mut W,
) -> io::Result<Result<(), String>> {
    match command {
        Command::Board => writeln!(out, "{}", engine.board().render())?,
        Command::Moves(square) => {
            let targets: Vec<String> = engine
                .legal_moves(square)
                .iter()
                .map(|m| m.to.notation())
                .collect();
            writeln!(out, "{}", targets.join(" "))?;
        }
        Command::Move {
            from,
            to,
            promotion: chosen,
        } => match engine.make_move(from, to, Some(chosen.unwrap_or(promotion))) {
            Ok(outcome) => {
                writeln!(out, "{}", outcome.notation)?;
                for effect in &outcome.effects {
                    writeln!(out, "  {:?}", effect)?;
                }
                if let Some(reason) = outcome.game_over {
                    writeln!(out, "game over: {reason}")?;
                }
            }
            Err(e) => return Ok(Err(e.to_string())),
        },
        Command::Abilities => {
            let color = engine.current_turn();
            for view in engine.available_abilities(color) {
                let squares: Vec<String> = view
                    .pieces
                    .iter()
                    .filter_map(|id| engine.board().find(*id))
                    .map(|p| p.square.notation())
                    .collect();
                writeln!(out, "{} ({}): {}", view.ability, view.name, squares.join(" "))?;
            }
        }
        Command::Activate { ability, square } => {
            let Some(piece) = engine.board().get(square).map(|p| p.id) else {
                return Ok(Err(format!("no piece at {square}")));
            };
            match engine.activate_ability(ability, piece) {
                Ok(activation) if activation.needs_target() => {
                    let targets: Vec<String> =
                        activation.targets.iter().map(|sq| sq.notation()).collect();
                    writeln!(out, "targets: {}", targets.join(" "))?;
                }
                Ok(_) => writeln!(out, "no targets")?,
                Err(e) => return Ok(Err(e.to_string())),
            }
        }
        Command::Target(square) => match engine.execute_ability(square) {
            Ok(outcome) => {
                writeln!(out, "{} resolved on {}", outcome.ability, outcome.target)?;
                if let Some(reason) = engine.end_reason() {
                    writeln!(out, "game over: {reason}")?;
                }
            }
            Err(e) => return Ok(Err(e.to_string())),
        },
        Command::Cancel => {
            let cancelled = engine.cancel_ability();
            writeln!(out, "{}", if cancelled { "cancelled" } else { "nothing pending" })?;
        }
        Command::Resign => {
            let color = engine.current_turn();
            if let Err(e) = engine.resign(color) {
                return Ok(Err(e.to_string()));
            }
            writeln!(out, "{color} resigns")?;
        }
        Command::State => {
            let json = serde_json::to_string_pretty(&engine.game_state())
                .map_err(io::Error::other)?;
            writeln!(out, "{json}")?;
        }
        Command::Quit => {}
    }
    Ok(Ok(()))
}
