//! Host block merging for OpenSSH client config files
//!
//! A host block starts at a line whose trimmed form begins with
//! `Host <alias>` and runs up to (not including) the next `Host ` line or
//! end of file. Merging replaces the block for one alias and leaves every
//! other line where it was.

use log::debug;

const HOST_KEYWORD: &str = "Host ";

/// Does this trimmed line open the block for `alias`?
fn is_header_for(trimmed: &str, alias: &str) -> bool {
    trimmed
        .strip_prefix(HOST_KEYWORD)
        .and_then(|rest| rest.strip_prefix(alias))
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

/// Strip surrounding blank lines and terminate with a single `\n`
fn normalize_block(block: &str) -> String {
    let start = block
        .split_inclusive('\n')
        .take_while(|line| line.trim().is_empty())
        .map(str::len)
        .sum::<usize>();

    let body = block[start..].trim_end();
    if body.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(body.len() + 1);
    out.push_str(body);
    out.push('\n');
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    InsideTarget,
}

/// Merge `block` into `existing` as the only block for `alias`.
///
/// The first `Host <alias>` block is replaced in place; any further blocks
/// for the same alias are dropped. Every line of a replaced block is dropped,
/// blank lines included. Without a matching block the new block is appended,
/// separated from existing content by a newline when one is missing. Line
/// endings of untouched lines are preserved.
///
/// `block` should start with its own `Host <alias>` line so that merging the
/// output again yields the same text.
pub fn merge(existing: &str, alias: &str, block: &str) -> String {
    let block = normalize_block(block);

    let mut out = String::with_capacity(existing.len() + block.len() + 1);
    let mut state = State::Outside;
    let mut replaced = false;

    for line in existing.split_inclusive('\n') {
        let trimmed = line.trim();

        if is_header_for(trimmed, alias) {
            if !replaced {
                out.push_str(&block);
                replaced = true;
            }
            state = State::InsideTarget;
            continue;
        }

        if state == State::InsideTarget {
            if !trimmed.starts_with(HOST_KEYWORD) {
                continue;
            }
            state = State::Outside;
        }

        out.push_str(line);
    }

    if replaced {
        debug!("replaced existing Host {} block", alias);
        return out;
    }

    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&block);
    debug!("appended Host {} block", alias);
    out
}
