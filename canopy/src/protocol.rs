use std::io::BufRead;
use std::str::{FromStr, SplitWhitespace};

use crate::{Board, Cell, PlayerSummary, ProtocolError, Tree, TurnState};

/// Wire sentinel for "no neighbor in that direction".
const NO_NEIGHBOR: i64 = -1;

const NEIGHBOR_FIELDS: [&str; 6] = [
    "neighbor 0", "neighbor 1", "neighbor 2", "neighbor 3", "neighbor 4", "neighbor 5",
];

/// Reads referee input line by line, tracking the 1-based line number for
/// error reporting.
pub struct LineReader<R> {
    input: R,
    // A re-usable buffer for IO.
    buf: String,
    consumed: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            buf: String::new(),
            consumed: 0,
        }
    }

    /// The tokens of the next line, or `None` at end of stream.
    fn tokens(&mut self) -> Result<Option<Tokens<'_>>, ProtocolError> {
        let line = self.consumed + 1;
        match self.next_line()? {
            Some(text) => Ok(Some(Tokens::new(line, text))),
            None => Ok(None),
        }
    }

    /// The tokens of the next line; end of stream is a protocol violation.
    fn require_tokens(&mut self, expected: &'static str) -> Result<Tokens<'_>, ProtocolError> {
        let line = self.consumed + 1;
        match self.next_line()? {
            Some(text) => Ok(Tokens::new(line, text)),
            None => Err(ProtocolError::UnexpectedEof { line, expected }),
        }
    }

    /// The next line verbatim (without its newline); end of stream is a
    /// protocol violation.
    fn require_line(&mut self, expected: &'static str) -> Result<&str, ProtocolError> {
        let line = self.consumed + 1;
        match self.next_line()? {
            Some(text) => Ok(text),
            None => Err(ProtocolError::UnexpectedEof { line, expected }),
        }
    }

    fn next_line(&mut self) -> Result<Option<&str>, ProtocolError> {
        self.buf.clear();
        match self.input.read_line(&mut self.buf) {
            Ok(0) => Ok(None),
            Ok(_) => {
                self.consumed += 1;
                Ok(Some(self.buf.trim_end_matches(['\r', '\n'])))
            }
            Err(source) => Err(ProtocolError::Read {
                line: self.consumed + 1,
                source,
            }),
        }
    }
}

/// Whitespace-separated tokens of one input line.
struct Tokens<'a> {
    line: usize,
    tokens: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(line: usize, text: &'a str) -> Self {
        Self {
            line,
            tokens: text.split_whitespace(),
        }
    }

    fn next(&mut self, field: &'static str) -> Result<&'a str, ProtocolError> {
        self.tokens.next().ok_or(ProtocolError::MissingToken {
            line: self.line,
            field,
        })
    }

    fn int<T: FromStr>(&mut self, field: &'static str) -> Result<T, ProtocolError> {
        let token = self.next(field)?;
        token.parse().map_err(|_| ProtocolError::InvalidInteger {
            line: self.line,
            field,
            token: token.to_string(),
        })
    }

    fn bool(&mut self, field: &'static str) -> Result<bool, ProtocolError> {
        match self.next(field)? {
            "0" => Ok(false),
            "1" => Ok(true),
            token => Err(ProtocolError::InvalidBool {
                line: self.line,
                field,
                token: token.to_string(),
            }),
        }
    }

    fn index(&mut self, field: &'static str, num_cells: usize) -> Result<usize, ProtocolError> {
        let value: i64 = self.int(field)?;
        if value < 0 || value >= num_cells as i64 {
            return Err(ProtocolError::OutOfRange {
                line: self.line,
                field,
                value,
                num_cells,
            });
        }
        Ok(value as usize)
    }

    fn neighbor(
        &mut self,
        field: &'static str,
        num_cells: usize,
    ) -> Result<Option<usize>, ProtocolError> {
        let value: i64 = self.int(field)?;
        if value == NO_NEIGHBOR {
            return Ok(None);
        }
        if value < 0 || value >= num_cells as i64 {
            return Err(ProtocolError::OutOfRange {
                line: self.line,
                field,
                value,
                num_cells,
            });
        }
        Ok(Some(value as usize))
    }
}

/// Reads the startup block: the cell count, then one line per cell.
///
/// Runs exactly once. Failure is fatal to the caller; there is no meaningful
/// fallback without a board.
pub fn read_board<R: BufRead>(reader: &mut LineReader<R>) -> Result<Board, ProtocolError> {
    let num_cells: usize = reader.require_tokens("the cell count")?.int("cell count")?;

    let mut cells = Vec::with_capacity(num_cells);
    for _ in 0..num_cells {
        let mut tokens = reader.require_tokens("a cell line")?;
        let index = tokens.index("cell index", num_cells)?;
        let richness = tokens.int("richness")?;
        let mut neighbors = [None; 6];
        for (direction, slot) in neighbors.iter_mut().enumerate() {
            *slot = tokens.neighbor(NEIGHBOR_FIELDS[direction], num_cells)?;
        }
        cells.push(Cell {
            index,
            richness,
            neighbors,
        });
    }

    Ok(Board::new(cells))
}

/// Reads one turn's dynamic state.
///
/// Returns `Ok(None)` when the stream ends exactly on the day line, which is
/// how the referee signals normal game completion. Anywhere else, a
/// premature end of stream is a [`ProtocolError`].
pub fn read_turn<R: BufRead>(
    reader: &mut LineReader<R>,
) -> Result<Option<TurnState>, ProtocolError> {
    let day: u32 = match reader.tokens()? {
        Some(mut tokens) => tokens.int("day")?,
        None => return Ok(None),
    };

    let nutrients: i32 = reader.require_tokens("the nutrient pool")?.int("nutrients")?;

    let me = {
        let mut tokens = reader.require_tokens("my sun and score")?;
        PlayerSummary {
            sun: tokens.int("sun")?,
            score: tokens.int("score")?,
            // The referee never reports our own asleep flag.
            asleep: false,
        }
    };

    let opponent = {
        let mut tokens = reader.require_tokens("the opponent's sun, score and asleep flag")?;
        PlayerSummary {
            sun: tokens.int("sun")?,
            score: tokens.int("score")?,
            asleep: tokens.bool("opponent asleep flag")?,
        }
    };

    let tree_count: usize = reader.require_tokens("the tree count")?.int("tree count")?;
    let mut trees = Vec::with_capacity(tree_count);
    for _ in 0..tree_count {
        let mut tokens = reader.require_tokens("a tree line")?;
        trees.push(Tree {
            cell: tokens.int("tree cell")?,
            size: tokens.int("tree size")?,
            is_mine: tokens.bool("tree owner flag")?,
            is_dormant: tokens.bool("tree dormant flag")?,
        });
    }

    let action_count: usize = reader
        .require_tokens("the action count")?
        .int("action count")?;
    let mut legal_actions = Vec::with_capacity(action_count);
    for _ in 0..action_count {
        legal_actions.push(reader.require_line("an action line")?.to_string());
    }

    Ok(Some(TurnState {
        day,
        nutrients,
        me,
        opponent,
        trees,
        legal_actions,
    }))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::StartupBlock;

    fn reader(text: &str) -> LineReader<Cursor<String>> {
        LineReader::new(Cursor::new(text.to_string()))
    }

    #[test]
    fn reads_a_small_board() {
        let mut input = reader("2\n0 3 1 -1 -1 -1 -1 -1\n1 2 -1 -1 -1 0 -1 -1\n");
        let board = read_board(&mut input).unwrap();
        assert_eq!(board.num_cells(), 2);
        assert_eq!(
            board.cell(0),
            Some(&Cell {
                index: 0,
                richness: 3,
                neighbors: [Some(1), None, None, None, None, None],
            })
        );
        assert_eq!(board.neighbor(1, 3), Some(0));
    }

    #[test]
    fn board_with_no_cells_is_valid() {
        let board = read_board(&mut reader("0\n")).unwrap();
        assert_eq!(board.num_cells(), 0);
    }

    #[test]
    fn non_integer_cell_count_is_rejected() {
        let err = read_board(&mut reader("many\n")).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::InvalidInteger { line: 1, field: "cell count", .. }
        ));
    }

    #[test]
    fn short_cell_line_is_rejected() {
        let err = read_board(&mut reader("1\n0 3 -1 -1\n")).unwrap_err();
        assert!(matches!(err, ProtocolError::MissingToken { line: 2, .. }));
    }

    #[test]
    fn missing_cell_line_is_rejected() {
        let err = read_board(&mut reader("2\n0 3 -1 -1 -1 -1 -1 -1\n")).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::UnexpectedEof { line: 3, expected: "a cell line" }
        ));
    }

    #[test]
    fn neighbor_outside_the_board_is_rejected() {
        let err = read_board(&mut reader("1\n0 3 5 -1 -1 -1 -1 -1\n")).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::OutOfRange { line: 2, value: 5, num_cells: 1, .. }
        ));
    }

    #[test]
    fn reads_a_full_turn() {
        let text = "3\n18\n12 5\n9 4 1\n2\n7 3 1 0\n10 0 0 1\n2\nWAIT\nGROW 7\n";
        let turn = read_turn(&mut reader(text)).unwrap().unwrap();
        assert_eq!(turn.day, 3);
        assert_eq!(turn.nutrients, 18);
        assert_eq!(
            turn.me,
            PlayerSummary { sun: 12, score: 5, asleep: false }
        );
        assert_eq!(
            turn.opponent,
            PlayerSummary { sun: 9, score: 4, asleep: true }
        );
        assert_eq!(
            turn.trees,
            vec![
                Tree { cell: 7, size: 3, is_mine: true, is_dormant: false },
                Tree { cell: 10, size: 0, is_mine: false, is_dormant: true },
            ]
        );
        assert_eq!(turn.legal_actions, vec!["WAIT", "GROW 7"]);
    }

    #[test]
    fn declared_counts_match_parsed_lengths() {
        let text = "0\n20\n1 0\n1 0 0\n1\n4 1 1 0\n3\nWAIT\nSEED 4 12\nGROW 4\n";
        let turn = read_turn(&mut reader(text)).unwrap().unwrap();
        assert_eq!(turn.trees.len(), 1);
        assert_eq!(turn.legal_actions.len(), 3);
    }

    #[test]
    fn end_of_stream_on_the_day_line_is_game_over() {
        assert_eq!(read_turn(&mut reader("")).unwrap(), None);
    }

    #[test]
    fn end_of_stream_mid_turn_is_rejected() {
        let err = read_turn(&mut reader("3\n18\n12 5\n")).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::UnexpectedEof { line: 4, .. }
        ));
    }

    #[test]
    fn truncated_tree_block_is_rejected() {
        let err = read_turn(&mut reader("3\n18\n12 5\n9 4 1\n2\n7 3 1 0\n")).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::UnexpectedEof { line: 7, expected: "a tree line" }
        ));
    }

    #[test]
    fn malformed_boolean_is_rejected() {
        let err = read_turn(&mut reader("3\n18\n12 5\n9 4 x\n0\n0\n")).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::InvalidBool { line: 4, field: "opponent asleep flag", .. }
        ));
    }

    #[test]
    fn turn_parsing_is_idempotent() {
        let text = "3\n18\n12 5\n9 4 1\n1\n7 3 1 0\n1\nWAIT\n";
        let first = read_turn(&mut reader(text)).unwrap();
        let second = read_turn(&mut reader(text)).unwrap();
        assert_eq!(first, second);
    }

    quickcheck! {
        fn well_formed_startup_blocks_build_valid_boards(block: StartupBlock) -> bool {
            let board = read_board(&mut reader(&block.text)).unwrap();
            board.num_cells() == block.num_cells
                && board.cells().iter().all(|cell| {
                    cell.neighbors
                        .iter()
                        .all(|slot| slot.map_or(true, |i| i < block.num_cells))
                })
        }

        fn board_parsing_is_idempotent(block: StartupBlock) -> bool {
            let first = read_board(&mut reader(&block.text)).unwrap();
            let second = read_board(&mut reader(&block.text)).unwrap();
            first == second
        }
    }
}
