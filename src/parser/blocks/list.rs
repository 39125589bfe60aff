use crate::parser::arena::{BlockData, ListData, ListItemData};
use crate::parser::{BlockId, BlockParser, BlockProcessor, BlockState};
use crate::text::column::is_space_or_tab;

/// Lists and list items. One parser owns both levels: the list block only
/// skips during continuation, items decide indentation-based continuation,
/// and a new marker either reuses a compatible open list or force-closes an
/// incompatible one.
pub struct ListParser;

struct ListMarker {
    ordered: bool,
    ordinal: u64,
    marker: char,
    /// Characters making up the marker, delimiter included.
    width: usize,
}

fn scan_marker(processor: &BlockProcessor) -> Option<ListMarker> {
    let c = processor.current_char();
    if matches!(c, '-' | '+' | '*') {
        return Some(ListMarker {
            ordered: false,
            ordinal: 0,
            marker: c,
            width: 1,
        });
    }
    if !c.is_ascii_digit() {
        return None;
    }
    let mut digits = 0;
    let mut ordinal: u64 = 0;
    loop {
        let d = processor.peek_char(digits);
        if d.is_ascii_digit() {
            digits += 1;
            // Ordinals are capped at nine digits, so this cannot overflow.
            if digits > 9 {
                return None;
            }
            ordinal = ordinal * 10 + (d as u64 - '0' as u64);
        } else {
            break;
        }
    }
    let delimiter = processor.peek_char(digits);
    if delimiter != '.' && delimiter != ')' {
        return None;
    }
    Some(ListMarker {
        ordered: true,
        ordinal,
        marker: delimiter,
        width: digits + 1,
    })
}

impl BlockParser for ListParser {
    fn opening_characters(&self) -> &[char] {
        &[
            '-', '+', '*', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
        ]
    }

    fn try_open(&self, processor: &mut BlockProcessor) -> BlockState {
        if processor.is_code_indent() {
            return BlockState::None;
        }
        let Some(marker) = scan_marker(processor) else {
            return BlockState::None;
        };
        let after = processor.peek_char(marker.width);
        if after != '\0' && !is_space_or_tab(after) {
            return BlockState::None;
        }
        let rest_blank = {
            let mut offset = marker.width;
            loop {
                let c = processor.peek_char(offset);
                if c == '\0' {
                    break true;
                }
                if !is_space_or_tab(c) {
                    break false;
                }
                offset += 1;
            }
        };

        // Interrupting a paragraph takes a non-empty item, and for ordered
        // lists a start of 1. The current block is also a paragraph when an
        // enclosing item just failed to continue; the marker is a sibling
        // item then, and the restriction does not apply.
        if !processor.is_lazy_continuation()
            && matches!(
                processor.current_block_data(),
                Some(BlockData::Paragraph { .. })
            )
            && (rest_blank || (marker.ordered && marker.ordinal != 1))
        {
            return BlockState::None;
        }

        let start_column = processor.column();
        for _ in 0..marker.width {
            processor.next_char();
        }
        let marker_end = processor.column();

        let mut opened_with_blank = false;
        let content_column;
        if rest_blank {
            opened_with_blank = true;
            content_column = marker_end + 1;
        } else {
            processor.parse_indent();
            let spaces = processor.column() - marker_end;
            if spaces > 4 {
                // More than four spaces: the item starts with indented
                // code, and only one marker space belongs to the marker.
                content_column = marker_end + 1;
                processor.go_to_column(content_column);
            } else {
                content_column = processor.column();
            }
        }

        let item = ListItemData {
            content_column,
            opened_with_blank,
        };

        match surrounding_list(processor) {
            Surrounding::InsideOpenItem | Surrounding::NoList => {
                processor.push_block(
                    BlockData::List(ListData {
                        ordered: marker.ordered,
                        start: if marker.ordered { marker.ordinal } else { 1 },
                        marker: marker.marker,
                        loose: false,
                        pending_blank: false,
                    }),
                    start_column,
                );
                processor.push_block(BlockData::ListItem(item), start_column);
            }
            Surrounding::List(list_id) => {
                let compatible = match &processor.block(list_id).data {
                    BlockData::List(list) => {
                        list.ordered == marker.ordered && list.marker == marker.marker
                    }
                    _ => false,
                };
                if compatible {
                    // Keep the list alive so closing stops above it, then
                    // let attachment close the previous item.
                    processor.mark_open(list_id);
                    if let BlockData::List(list) = &mut processor.block_mut(list_id).data {
                        if list.pending_blank {
                            list.pending_blank = false;
                            list.loose = true;
                        }
                    }
                    processor.push_block(BlockData::ListItem(item), start_column);
                } else {
                    processor.close(list_id);
                    processor.push_block(
                        BlockData::List(ListData {
                            ordered: marker.ordered,
                            start: if marker.ordered { marker.ordinal } else { 1 },
                            marker: marker.marker,
                            loose: false,
                            pending_blank: false,
                        }),
                        start_column,
                    );
                    processor.push_block(BlockData::ListItem(item), start_column);
                }
            }
        }
        BlockState::Continue
    }

    fn try_continue(&self, processor: &mut BlockProcessor, block: BlockId) -> BlockState {
        let node = processor.block(block);
        match &node.data {
            // The list itself defers to its current item.
            BlockData::List(_) => BlockState::Skip,
            BlockData::ListItem(item) => {
                let content_column = item.content_column;
                let opened_with_blank = item.opened_with_blank;
                let has_children = !node.children.is_empty();
                let parent = node.parent;

                if processor.is_blank_line() {
                    // An item that started blank ends on a second blank.
                    if opened_with_blank && !has_children {
                        return BlockState::None;
                    }
                    if !blank_absorbed_by_leaf(processor) {
                        if let Some(list_id) = parent {
                            if let BlockData::List(list) =
                                &mut processor.block_mut(list_id).data
                            {
                                list.pending_blank = true;
                            }
                        }
                    }
                    return BlockState::ContinueDiscard;
                }

                if processor.column() >= content_column {
                    processor.go_to_column(content_column);
                    if has_children {
                        if let Some(list_id) = parent {
                            if let BlockData::List(list) =
                                &mut processor.block_mut(list_id).data
                            {
                                if list.pending_blank {
                                    list.pending_blank = false;
                                    list.loose = true;
                                }
                            }
                        }
                    }
                    return BlockState::Continue;
                }
                BlockState::None
            }
            _ => BlockState::None,
        }
    }
}

enum Surrounding {
    /// The deepest container is a still-continued item: the marker starts a
    /// nested list.
    InsideOpenItem,
    /// A list is in scope and its last item did not continue: the marker is
    /// a sibling item.
    List(BlockId),
    NoList,
}

fn surrounding_list(processor: &BlockProcessor) -> Surrounding {
    let container = processor.current_container();
    match &processor.block(container).data {
        BlockData::ListItem(_) => {
            if processor.block(container).is_open {
                Surrounding::InsideOpenItem
            } else {
                match processor.block(container).parent {
                    Some(list_id)
                        if matches!(processor.block(list_id).data, BlockData::List(_)) =>
                    {
                        Surrounding::List(list_id)
                    }
                    _ => Surrounding::NoList,
                }
            }
        }
        BlockData::List(_) => Surrounding::List(container),
        _ => Surrounding::NoList,
    }
}

/// Whether the deepest open leaf takes blank lines as content, in which
/// case the blank says nothing about list looseness.
fn blank_absorbed_by_leaf(processor: &BlockProcessor) -> bool {
    matches!(
        processor.current_block_data(),
        Some(BlockData::FencedCode(_)) | Some(BlockData::Html { .. })
    )
}
