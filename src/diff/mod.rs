//! Line-level comparison of two response bodies.
//!
//! The alignment is a greedy two-cursor walk with a membership lookahead. It
//! is linear on near-identical inputs but not minimal: shuffled inputs can
//! produce more removed/added pairs than a longest-common-subsequence diff.

mod render;

pub use render::{diff_bodies, normalize_body, render_unified, UnifiedOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTag {
    Unchanged,
    Added,
    Removed,
}

impl DiffTag {
    pub fn symbol(self) -> char {
        match self {
            DiffTag::Unchanged => ' ',
            DiffTag::Added => '+',
            DiffTag::Removed => '-',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub text: String,
    pub tag: DiffTag,
}

impl DiffLine {
    fn new(text: &str, tag: DiffTag) -> Self {
        Self {
            text: text.to_string(),
            tag,
        }
    }
}

/// Aligns `left` against `right`.
///
/// Dropping `Added` lines from the result yields `left`; dropping `Removed`
/// lines yields `right`.
pub fn diff_lines<S: AsRef<str>>(left: &[S], right: &[S]) -> Vec<DiffLine> {
    let mut result = Vec::with_capacity(left.len().max(right.len()));
    let (mut i, mut j) = (0, 0);

    while i < left.len() || j < right.len() {
        let current = (
            left.get(i).map(<S as AsRef<str>>::as_ref),
            right.get(j).map(<S as AsRef<str>>::as_ref),
        );
        match current {
            (Some(l), Some(r)) if l == r => {
                result.push(DiffLine::new(l, DiffTag::Unchanged));
                i += 1;
                j += 1;
            }
            (Some(l), None) => {
                result.push(DiffLine::new(l, DiffTag::Removed));
                i += 1;
            }
            (None, Some(r)) => {
                result.push(DiffLine::new(r, DiffTag::Added));
                j += 1;
            }
            (Some(l), Some(r)) => {
                let left_later = right[j..].iter().any(|line| line.as_ref() == l);
                let right_later = left[i..].iter().any(|line| line.as_ref() == r);
                match (left_later, right_later) {
                    (true, false) => {
                        result.push(DiffLine::new(r, DiffTag::Added));
                        j += 1;
                    }
                    (false, true) => {
                        result.push(DiffLine::new(l, DiffTag::Removed));
                        i += 1;
                    }
                    _ => {
                        result.push(DiffLine::new(l, DiffTag::Removed));
                        result.push(DiffLine::new(r, DiffTag::Added));
                        i += 1;
                        j += 1;
                    }
                }
            }
            (None, None) => break,
        }
    }

    result
}

/// Splits both texts on `\n` and aligns them.
pub fn diff_texts(left: &str, right: &str) -> Vec<DiffLine> {
    let left: Vec<&str> = left.split('\n').collect();
    let right: Vec<&str> = right.split('\n').collect();
    diff_lines(&left, &right)
}
