//! Paged directory maintenance.
//!
//! A directory is an on-ledger paged list of entry indexes under a
//! `(base, kind)` pair, used to index secondary relationships such as an
//! account's credit lines. Pages hold at most [`DIR_NODE_MAX`] keys.
//! [`dir_add`] returns the page number that received the key, so a later
//! [`dir_delete`] can remove it without scanning the directory.
//!
//! Deletion coalesces empty pages only at the `first_node`/`last_node`
//! boundaries. Interior pages emptied by deletion are left in place: the
//! root's range never develops gaps at its ends, but holes inside the
//! range are permitted and traversal skips them.

use crate::delta::{EntryAction, LedgerDelta};
use crate::result::TxResultCode;
use clearwater_common::Uint256;
use clearwater_ledger::{index, DirNode, DirRoot, EntryKind, LedgerState, DIR_NODE_MAX};
use tracing::debug;

/// Append `entry_key` to the directory for `(base, kind)`.
///
/// Creates the root and first page on demand, appends to the last page
/// while it has room, and allocates a fresh last page when it is full.
/// Returns the page number now holding the key.
///
/// # Errors
///
/// [`TxResultCode::DirectoryFull`] when the page numbers are exhausted.
pub fn dir_add(
    state: &LedgerState,
    delta: &mut LedgerDelta,
    kind: EntryKind,
    base: Uint256,
    entry_key: Uint256,
) -> Result<u64, TxResultCode> {
    let root_index = index::dir_root_index(base, kind);
    let existing_root = state.get_dir_root(root_index);
    let root_is_new = existing_root.is_none();

    let mut root = existing_root.unwrap_or_else(|| {
        debug!(index = %root_index, "dir_add: creating directory root");
        DirRoot {
            index: root_index,
            first_node: 1,
            last_node: 1,
        }
    });

    let mut node_no = root.last_node;
    let node_index = index::dir_node_index(base, kind, node_no);
    // A fresh root cannot have pages yet; skip the lookup.
    let last_node = if root_is_new {
        None
    } else {
        state.get_dir_node(node_index)
    };

    if root_is_new {
        delta.push(EntryAction::Create, root.clone());
    }

    if let Some(mut node) = last_node {
        if node.indexes.len() < DIR_NODE_MAX {
            // Last page is not full, append.
            node.indexes.push(entry_key);
            delta.push(EntryAction::Modify, node);
            return Ok(node_no);
        }

        // Last page is full, move the root's boundary to a fresh page.
        node_no = match node_no.checked_add(1) {
            Some(next) => next,
            None => return Err(TxResultCode::DirectoryFull),
        };
        debug!(node_no, "dir_add: allocating new last page");
        root.last_node = node_no;
        delta.push(EntryAction::Modify, root);
    }

    let node = DirNode {
        index: index::dir_node_index(base, kind, node_no),
        indexes: vec![entry_key],
    };
    debug!(index = %node.index, "dir_add: creating dir page");
    delta.push(EntryAction::Create, node);

    Ok(node_no)
}

/// Remove a known occurrence of `entry_key` from page `node_no`.
///
/// Removal swaps the key with the page's last element, so order within a
/// page is not preserved. If the page empties and sits at a root boundary,
/// it is deleted and the boundary shrinks past any further empty pages; an
/// empty directory deletes its root. Interior pages are never reclaimed:
/// that would take a scan and the page number contract is O(1) removal.
pub fn dir_delete(
    state: &LedgerState,
    delta: &mut LedgerDelta,
    node_no: u64,
    kind: EntryKind,
    base: Uint256,
    entry_key: Uint256,
) -> TxResultCode {
    let mut node_cur = node_no;
    let Some(mut node) = state.get_dir_node(index::dir_node_index(base, kind, node_cur)) else {
        debug!(node_no, "dir_delete: no such page");
        return TxResultCode::NodeNotFound;
    };

    let Some(pos) = node.indexes.iter().position(|key| *key == entry_key) else {
        debug!(node_no, "dir_delete: key not mentioned on page");
        return TxResultCode::NodeNotMentioned;
    };

    let Some(mut root) = state.get_dir_root(index::dir_root_index(base, kind)) else {
        debug!("dir_delete: directory root is missing");
        return TxResultCode::NodeNoRoot;
    };

    let first_orig = root.first_node;
    let last_orig = root.last_node;
    let mut first = first_orig;
    let mut last = last_orig;

    node.indexes.swap_remove(pos);

    if !node.indexes.is_empty() || (first != node_cur && last != node_cur) {
        // Page survives: still populated, or interior and not reclaimable.
        delta.push(EntryAction::Modify, node.clone());
    }

    // Shrink the boundaries past empty pages.
    while first != 0 && node.indexes.is_empty() && (first == node_cur || last == node_cur) {
        delta.push(EntryAction::Delete, node.clone());

        if first == last {
            // Directory is empty.
            first = 0;
        } else {
            if first == node_cur {
                node_cur += 1;
                first += 1;
            } else {
                node_cur -= 1;
                last -= 1;
            }

            match state.get_dir_node(index::dir_node_index(base, kind, node_cur)) {
                Some(next) => node = next,
                // Hole at the new boundary; stop here and keep the
                // shrunken range.
                None => break,
            }
        }
    }

    if first == first_orig && last == last_orig {
        // Boundaries unchanged, root stands as-is.
    } else if first != 0 {
        root.first_node = first;
        root.last_node = last;
        delta.push(EntryAction::Modify, root);
    } else {
        debug!(index = %root.index, "dir_delete: directory empty, deleting root");
        delta.push(EntryAction::Delete, root);
    }

    TxResultCode::Success
}
