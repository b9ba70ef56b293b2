use core::ops::{Range, RangeFrom, RangeInclusive};

/**
A range of arguments expressed relative to the cursor, used by
[`CurrentArgument::consume`][crate::CurrentArgument::consume].

The start offset is always relative to the cursor. The end offset is relative
to the cursor when it is non-negative, and relative to the end of the argument
list when it is negative, so `1..=-1` means "everything after this argument"
and `1..=-2` means "everything after this argument, except the last one".
*/
pub trait RelativeRange {
    /// Resolve into absolute, inclusive `(start, end)` indices, given the
    /// cursor position and the number of arguments.
    fn resolve(&self, index: isize, len: usize) -> (isize, isize);
}

fn signed_len(len: usize) -> isize {
    isize::try_from(len).unwrap_or(isize::MAX)
}

fn resolve_end(index: isize, len: usize, end: isize) -> isize {
    match end < 0 {
        true => signed_len(len).saturating_add(end),
        false => index.saturating_add(end),
    }
}

impl RelativeRange for RangeInclusive<isize> {
    fn resolve(&self, index: isize, len: usize) -> (isize, isize) {
        (
            index.saturating_add(*self.start()),
            resolve_end(index, len, *self.end()),
        )
    }
}

impl RelativeRange for Range<isize> {
    fn resolve(&self, index: isize, len: usize) -> (isize, isize) {
        (
            index.saturating_add(self.start),
            resolve_end(index, len, self.end).saturating_sub(1),
        )
    }
}

impl RelativeRange for RangeFrom<isize> {
    fn resolve(&self, index: isize, len: usize) -> (isize, isize) {
        (index.saturating_add(self.start), signed_len(len) - 1)
    }
}
