/// Result of a block parser's `try_open`/`try_continue` call, driving the
/// block processor's per-line state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockState {
    /// No match; stop offering the line to blocks deeper in the open chain.
    None,
    /// No match for this block, but keep walking the open chain.
    Skip,
    /// The block stays open and the line (or what the parser consumed of
    /// it) belongs to it.
    Continue,
    /// The block stays open but the line is not appended to it.
    ContinueDiscard,
    /// The block closes after taking this line.
    Break,
    /// The block closes and the line is not appended; the remainder is not
    /// offered to other parsers.
    BreakDiscard,
}

impl BlockState {
    /// Whether the block remains open after this result.
    pub fn is_continue(self) -> bool {
        matches!(self, BlockState::Continue | BlockState::ContinueDiscard)
    }

    /// Whether the current line must not be appended to the block.
    pub fn is_discard(self) -> bool {
        matches!(self, BlockState::ContinueDiscard | BlockState::BreakDiscard)
    }

    pub fn is_break(self) -> bool {
        matches!(self, BlockState::Break | BlockState::BreakDiscard)
    }
}
