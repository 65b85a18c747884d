use std::fmt;
use std::io::{self, BufRead, Write};
use sweeper_core::*;

use crate::read_line;

const HELP: &str = "Commands: r X Y (reveal), f X Y (flag), n (new game), q (quit)";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Play(Coord2, Action),
    NewGame,
    Quit,
    Help,
}

impl Command {
    pub(crate) fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let command = match words.next()? {
            "r" | "reveal" => Self::Play(parse_coords(&mut words)?, Action::Reveal),
            "f" | "flag" => Self::Play(parse_coords(&mut words)?, Action::ToggleFlag),
            "n" | "new" => Self::NewGame,
            "q" | "quit" => Self::Quit,
            "h" | "help" | "?" => Self::Help,
            _ => return None,
        };
        words.next().is_none().then_some(command)
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Option<Coord2> {
    let x = words.next()?.parse().ok()?;
    let y = words.next()?.parse().ok()?;
    Some((x, y))
}

/// Text snapshot of the board: column ruler, one line per row, then the status counters.
pub(crate) fn render<G>(game: &Game<G>) -> String {
    let mut out = String::new();
    // Writing into a `String` cannot fail.
    write_board(&mut out, game).ok();
    out
}

fn write_board<G>(out: &mut impl fmt::Write, game: &Game<G>) -> fmt::Result {
    let board = game.board();
    out.write_str("    ")?;
    for x in 0..board.width() {
        write!(out, "{:>3}", x)?;
    }
    out.write_char('\n')?;

    let width = usize::from(board.width());
    let cells: Vec<Cell> = board.cells().collect();
    for (y, row) in cells.chunks(width).enumerate() {
        write!(out, "{:>3} ", y)?;
        for cell in row {
            write!(out, "{:>3}", cell.icon())?;
        }
        out.write_char('\n')?;
    }

    writeln!(
        out,
        "Mines: {} | Flags: {} | Steps: {}",
        game.mine_count(),
        game.flag_count(),
        game.steps()
    )
}

pub(crate) struct Session<G> {
    game: Game<G>,
}

impl<G: MineGenerator> Session<G> {
    pub(crate) fn new(game: Game<G>) -> Self {
        Self { game }
    }

    pub(crate) fn run(&mut self, mut input: impl BufRead, mut output: impl Write) -> io::Result<()> {
        writeln!(output, "{}", HELP)?;
        write!(output, "{}", render(&self.game))?;

        while let Some(line) = read_line(&mut input, &mut output, "> ")? {
            if line.is_empty() {
                continue;
            }

            let Some(command) = Command::parse(&line) else {
                writeln!(output, "Unknown command '{}'. {}", line, HELP)?;
                continue;
            };

            match command {
                Command::Quit => return Ok(()),
                Command::Help => writeln!(output, "{}", HELP)?,
                Command::NewGame => self.new_game(&mut output)?,
                Command::Play(coords, action) => match self.game.apply(coords, action) {
                    Ok(GameState::InProgress) => write!(output, "{}", render(&self.game))?,
                    Ok(state) => {
                        write!(output, "{}", render(&self.game))?;
                        if !self.play_again(state, &mut input, &mut output)? {
                            return Ok(());
                        }
                    }
                    Err(err) => {
                        log::debug!("Rejected {:?} at {:?}: {}", action, coords, err);
                        writeln!(output, "{}", err)?;
                    }
                },
            }
        }
        Ok(())
    }

    fn new_game(&mut self, output: &mut impl Write) -> io::Result<()> {
        if let Err(err) = self.game.reset() {
            log::error!("Could not start a new game: {}", err);
            return writeln!(output, "{}", err);
        }
        write!(output, "{}", render(&self.game))
    }

    fn play_again(&mut self, state: GameState, input: &mut impl BufRead, output: &mut impl Write) -> io::Result<bool> {
        let steps = self.game.steps();
        match state {
            GameState::Lost => writeln!(output, "Boom! You lost in {} steps.", steps)?,
            _ => writeln!(output, "Congratulations, you won in {} steps!", steps)?,
        }

        let answer = read_line(input, output, "Play again? [y/n] ")?;
        if matches!(answer.as_deref(), Some("y" | "yes" | "")) {
            self.new_game(output)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(width: Coord, height: Coord, mines: &[Coord2]) -> Session<FixedMineGenerator> {
        let config = BoardConfig::new(width, height, mines.len() as CellCount).unwrap();
        Session::new(Game::with_generator(config, FixedMineGenerator::new(mines)).unwrap())
    }

    fn play(session: &mut Session<FixedMineGenerator>, script: &str) -> String {
        let mut output = Vec::new();
        session.run(script.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("r 3 4"), Some(Command::Play((3, 4), Action::Reveal)));
        assert_eq!(Command::parse("flag 0 1"), Some(Command::Play((0, 1), Action::ToggleFlag)));
        assert_eq!(Command::parse("  n "), Some(Command::NewGame));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("?"), Some(Command::Help));
    }

    #[test]
    fn rejects_malformed_commands() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("r 3"), None);
        assert_eq!(Command::parse("r -1 2"), None);
        assert_eq!(Command::parse("r 1 2 3"), None);
        assert_eq!(Command::parse("x 1 2"), None);
    }

    #[test]
    fn renders_icons_and_counters() {
        let mut game = Game::with_generator(
            BoardConfig::new(3, 2, 1).unwrap(),
            FixedMineGenerator::new([(0, 0)]),
        )
        .unwrap();
        game.toggle_flag((0, 0)).unwrap();
        game.reveal((1, 0)).unwrap();

        assert_eq!(
            render(&game),
            "      0  1  2\n  0   F  1  #\n  1   #  #  #\nMines: 1 | Flags: 1 | Steps: 1\n"
        );
    }

    #[test]
    fn board_writer_stops_at_first_error() {
        struct Full(usize);

        impl fmt::Write for Full {
            fn write_str(&mut self, s: &str) -> fmt::Result {
                self.0 = self.0.checked_sub(s.len()).ok_or(fmt::Error)?;
                Ok(())
            }
        }

        let game = Game::with_generator(
            BoardConfig::new(3, 2, 1).unwrap(),
            FixedMineGenerator::new([(0, 0)]),
        )
        .unwrap();
        let rendered = render(&game);
        assert_eq!(write_board(&mut Full(rendered.len()), &game), Ok(()));
        assert_eq!(write_board(&mut Full(8), &game), Err(fmt::Error));
    }

    #[test]
    fn winning_then_quitting() {
        let mut session = session(3, 3, &[(0, 0)]);
        let output = play(&mut session, "r 2 2\nn\n");
        assert!(output.contains("Congratulations, you won in 1 steps!"));
        assert_eq!(session.game.state(), GameState::Won);
    }

    #[test]
    fn losing_then_playing_again() {
        let mut session = session(3, 3, &[(0, 0)]);
        let output = play(&mut session, "r 0 0\ny\nf 1 1\nq\n");
        assert!(output.contains("Boom! You lost in 1 steps."));
        assert_eq!(session.game.state(), GameState::InProgress);
        assert_eq!(session.game.flag_count(), 1);
    }

    #[test]
    fn errors_do_not_end_the_session() {
        let mut session = session(3, 3, &[(0, 0)]);
        let output = play(&mut session, "r 7 7\nbogus\nr 1 1\n");
        assert!(output.contains("Coordinates out of bounds"));
        assert!(output.contains("Unknown command 'bogus'"));
        assert_eq!(session.game.steps(), 1);
    }
}
