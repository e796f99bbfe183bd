/// One player's public resources for the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerSummary {
    pub sun: u32,
    pub score: u32,
    pub asleep: bool,
}

/// A tree on the board.
///
/// The tree list is rebuilt from scratch every turn; there is no cross-turn
/// identity to track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tree {
    /// The cell the tree stands on.
    pub cell: usize,
    /// Size of this tree: 0-3.
    pub size: u8,
    pub is_mine: bool,
    pub is_dormant: bool,
}

/// The complete dynamic state for one turn.
///
/// Created fresh each turn and fully superseded by the next; never merged
/// with prior state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnState {
    /// The game lasts 24 days: 0-23.
    pub day: u32,
    /// The base score gained from the next COMPLETE action.
    pub nutrients: i32,
    pub me: PlayerSummary,
    pub opponent: PlayerSummary,
    pub trees: Vec<Tree>,
    /// All legal actions for this turn, as opaque lines of text.
    pub legal_actions: Vec<String>,
}
