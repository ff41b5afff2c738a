//! Styled document model.
//!
//! Responsibilities:
//! - character storage (Rope)
//! - inline image anchors
//! - bold attribute ranges
//! - cursor and selection
//!
//! All positions are char offsets. An embedded image occupies exactly one
//! position, held by [`OBJECT_ANCHOR`] in the rope; the k-th anchor refers to
//! `images[k]`. Text entering the document never carries a raw anchor, so the
//! two sequences cannot drift apart.

use super::image_store::ImageId;
use super::selection::Selection;
use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

pub const OBJECT_ANCHOR: char = '\u{FFFC}';
const ANCHOR_SUBSTITUTE: char = '\u{FFFD}';

/// Borrow a `RopeSlice` as `&str` when it is contiguous.
pub fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

fn sanitize(text: &str) -> Cow<'_, str> {
    if text.contains(OBJECT_ANCHOR) {
        Cow::Owned(text.replace(OBJECT_ANCHOR, &ANCHOR_SUBSTITUTE.to_string()))
    } else {
        Cow::Borrowed(text)
    }
}

/// A contiguous piece of the document sharing one attribute set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Run {
    Text { text: String, bold: bool },
    Image(ImageId),
}

#[derive(Debug, Clone)]
pub struct Document {
    rope: Rope,
    images: Vec<ImageId>,
    /// Sorted, disjoint, non-adjacent.
    bold: Vec<Range<usize>>,
    cursor: usize,
    anchor: Option<usize>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            images: Vec::new(),
            bold: Vec::new(),
            cursor: 0,
            anchor: None,
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(&sanitize(text)),
            ..Self::new()
        }
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// The literal characters, without image anchors. This is what gets saved.
    pub fn plain_text(&self) -> String {
        self.rope.chars().filter(|&ch| ch != OBJECT_ANCHOR).collect()
    }

    pub fn char_at(&self, pos: usize) -> Option<char> {
        (pos < self.rope.len_chars()).then(|| self.rope.char(pos))
    }

    pub fn image_ids(&self) -> &[ImageId] {
        &self.images
    }

    pub fn image_at(&self, pos: usize) -> Option<ImageId> {
        if self.char_at(pos)? != OBJECT_ANCHOR {
            return None;
        }
        self.images.get(self.anchors_before(pos)).copied()
    }

    fn anchors_before(&self, pos: usize) -> usize {
        self.rope
            .slice(..pos)
            .chars()
            .filter(|&ch| ch == OBJECT_ANCHOR)
            .count()
    }

    // ==================== Cursor / selection ====================

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor and drop any selection.
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.len_chars());
        self.anchor = None;
    }

    pub fn select(&mut self, anchor: usize, cursor: usize) {
        let len = self.len_chars();
        self.anchor = Some(anchor.min(len));
        self.cursor = cursor.min(len);
    }

    pub fn select_all(&mut self) {
        self.select(0, self.len_chars());
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// The active selection, if it spans at least one position.
    pub fn selection(&self) -> Option<Selection> {
        let sel = Selection::new(self.anchor?, self.cursor);
        (!sel.is_empty()).then_some(sel)
    }

    pub fn has_selection(&self) -> bool {
        self.selection().is_some()
    }

    pub fn selected_text(&self) -> Option<String> {
        let sel = self.selection()?;
        Some(
            self.rope
                .slice(sel.range())
                .chars()
                .filter(|&ch| ch != OBJECT_ANCHOR)
                .collect(),
        )
    }

    // ==================== Lines ====================

    pub fn line_of(&self, pos: usize) -> usize {
        self.rope.char_to_line(pos.min(self.len_chars()))
    }

    pub fn line_start(&self, line: usize) -> usize {
        self.rope.line_to_char(line.min(self.len_lines().saturating_sub(1)))
    }

    /// Offset of the end of `line`, before its line break.
    pub fn line_end(&self, line: usize) -> usize {
        let line = line.min(self.len_lines().saturating_sub(1));
        let start = self.rope.line_to_char(line);
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        while len > 0 {
            match slice.char(len - 1) {
                '\n' | '\r' => len -= 1,
                _ => break,
            }
        }
        start + len
    }

    /// Text of `line` without its line break; image anchors included.
    pub fn line_text(&self, line: usize) -> String {
        let start = self.line_start(line);
        let end = self.line_end(line);
        slice_to_cow(self.rope.slice(start..end)).into_owned()
    }

    /// `(row, col)` of the cursor, col counted in chars.
    pub fn cursor_row_col(&self) -> (usize, usize) {
        let row = self.line_of(self.cursor);
        (row, self.cursor - self.line_start(row))
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        if pos == 0 {
            return 0;
        }
        let line = self.line_of(pos);
        let start = self.rope.line_to_char(line);
        if pos == start {
            return pos - 1;
        }
        let text = slice_to_cow(self.rope.slice(start..pos));
        let last = text
            .graphemes(true)
            .next_back()
            .map(|g| g.chars().count())
            .unwrap_or(1);
        pos - last
    }

    fn next_boundary(&self, pos: usize) -> usize {
        let len = self.len_chars();
        if pos >= len {
            return len;
        }
        let line = self.line_of(pos);
        let end = if line + 1 < self.len_lines() {
            self.rope.line_to_char(line + 1)
        } else {
            len
        };
        let text = slice_to_cow(self.rope.slice(pos..end));
        let first = text
            .graphemes(true)
            .next()
            .map(|g| g.chars().count())
            .unwrap_or(1);
        pos + first
    }

    // ==================== Movement ====================

    fn move_to(&mut self, pos: usize, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else {
            self.anchor = None;
        }
        self.cursor = pos.min(self.len_chars());
    }

    pub fn move_left(&mut self, extend: bool) {
        if !extend {
            if let Some(sel) = self.selection() {
                self.move_to(sel.start(), false);
                return;
            }
        }
        let pos = self.prev_boundary(self.cursor);
        self.move_to(pos, extend);
    }

    pub fn move_right(&mut self, extend: bool) {
        if !extend {
            if let Some(sel) = self.selection() {
                self.move_to(sel.end(), false);
                return;
            }
        }
        let pos = self.next_boundary(self.cursor);
        self.move_to(pos, extend);
    }

    pub fn move_vertical(&mut self, delta: isize, extend: bool) {
        let (row, col) = self.cursor_row_col();
        let last = self.len_lines().saturating_sub(1);
        let target = if delta < 0 {
            row.saturating_sub(delta.unsigned_abs())
        } else {
            (row + delta as usize).min(last)
        };
        if target == row {
            let pos = if delta < 0 {
                self.line_start(row)
            } else {
                self.line_end(row)
            };
            self.move_to(pos, extend);
            return;
        }
        let start = self.line_start(target);
        let end = self.line_end(target);
        self.move_to((start + col).min(end), extend);
    }

    pub fn move_line_start(&mut self, extend: bool) {
        let pos = self.line_start(self.line_of(self.cursor));
        self.move_to(pos, extend);
    }

    pub fn move_line_end(&mut self, extend: bool) {
        let pos = self.line_end(self.line_of(self.cursor));
        self.move_to(pos, extend);
    }

    pub fn move_doc_start(&mut self, extend: bool) {
        self.move_to(0, extend);
    }

    pub fn move_doc_end(&mut self, extend: bool) {
        let len = self.len_chars();
        self.move_to(len, extend);
    }

    // ==================== Editing ====================

    /// Insert plain text at `pos`. Text landing strictly inside a bold span
    /// is bold; at a span's edge it is not. Returns the number of chars
    /// inserted.
    pub fn insert_at(&mut self, pos: usize, text: &str) -> usize {
        let text = sanitize(text);
        let n = text.chars().count();
        if n == 0 {
            return 0;
        }
        let pos = pos.min(self.len_chars());
        self.rope.insert(pos, &text);
        self.shift_for_insert(pos, n);
        n
    }

    /// Typing: replace the selection (if any) with `text` at the cursor.
    pub fn insert_text(&mut self, text: &str) -> usize {
        self.delete_selection();
        let n = self.insert_at(self.cursor, text);
        self.anchor = None;
        n
    }

    /// Anchor an image at the cursor.
    pub fn insert_image(&mut self, id: ImageId) {
        let pos = self.cursor;
        let idx = self.anchors_before(pos);
        self.rope.insert_char(pos, OBJECT_ANCHOR);
        self.images.insert(idx, id);
        self.shift_for_insert(pos, 1);
    }

    /// Remove `range`, including any image anchors inside it. Returns the
    /// number of chars removed.
    pub fn delete_range(&mut self, range: Range<usize>) -> usize {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start >= end {
            return 0;
        }

        let first_image = self.anchors_before(start);
        let removed_images = self
            .rope
            .slice(start..end)
            .chars()
            .filter(|&ch| ch == OBJECT_ANCHOR)
            .count();
        self.images.drain(first_image..first_image + removed_images);
        self.rope.remove(start..end);

        let map = |m: usize| {
            if m >= end {
                m - (end - start)
            } else if m > start {
                start
            } else {
                m
            }
        };
        self.cursor = map(self.cursor);
        self.anchor = self.anchor.map(map);
        for span in &mut self.bold {
            *span = map(span.start)..map(span.end);
        }
        self.normalize_bold();
        end - start
    }

    pub fn delete_selection(&mut self) -> usize {
        let Some(sel) = self.selection() else {
            return 0;
        };
        let removed = self.delete_range(sel.range());
        self.anchor = None;
        removed
    }

    /// Backspace: delete the selection, or the grapheme before the cursor.
    pub fn delete_backward(&mut self) -> usize {
        if self.has_selection() {
            return self.delete_selection();
        }
        self.anchor = None;
        let start = self.prev_boundary(self.cursor);
        self.delete_range(start..self.cursor)
    }

    /// Delete: delete the selection, or the grapheme after the cursor.
    pub fn delete_forward(&mut self) -> usize {
        if self.has_selection() {
            return self.delete_selection();
        }
        self.anchor = None;
        let end = self.next_boundary(self.cursor);
        self.delete_range(self.cursor..end)
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn shift_for_insert(&mut self, pos: usize, n: usize) {
        let shift = |m: usize| if m >= pos { m + n } else { m };
        self.cursor = shift(self.cursor);
        self.anchor = self.anchor.map(shift);

        let mut spans = Vec::with_capacity(self.bold.len() + 1);
        for span in self.bold.drain(..) {
            if span.end <= pos {
                spans.push(span);
            } else if span.start >= pos {
                spans.push(span.start + n..span.end + n);
            } else {
                spans.push(span.start..span.end + n);
            }
        }
        self.bold = spans;
    }

    // ==================== Bold ====================

    pub fn is_bold_at(&self, pos: usize) -> bool {
        self.bold.iter().any(|span| span.contains(&pos))
    }

    pub fn bold_ranges(&self) -> &[Range<usize>] {
        &self.bold
    }

    pub fn add_bold(&mut self, range: Range<usize>) {
        let len = self.len_chars();
        let range = range.start.min(len)..range.end.min(len);
        if range.is_empty() {
            return;
        }
        self.bold.push(range);
        self.normalize_bold();
    }

    pub fn remove_bold(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let mut spans = Vec::with_capacity(self.bold.len() + 1);
        for span in self.bold.drain(..) {
            if span.end <= range.start || span.start >= range.end {
                spans.push(span);
                continue;
            }
            if span.start < range.start {
                spans.push(span.start..range.start);
            }
            if span.end > range.end {
                spans.push(range.end..span.end);
            }
        }
        self.bold = spans;
    }

    fn normalize_bold(&mut self) {
        self.bold.retain(|span| span.start < span.end);
        self.bold.sort_by_key(|span| span.start);
        let mut merged: Vec<Range<usize>> = Vec::with_capacity(self.bold.len());
        for span in self.bold.drain(..) {
            match merged.last_mut() {
                Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
                _ => merged.push(span),
            }
        }
        self.bold = merged;
    }

    // ==================== Runs ====================

    pub fn runs(&self) -> Vec<Run> {
        self.runs_in(0..self.len_chars())
    }

    /// Runs covering `range`. Text runs never merge across an image.
    pub fn runs_in(&self, range: Range<usize>) -> Vec<Run> {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len);
        let mut runs = Vec::new();
        if start >= end {
            return runs;
        }

        let mut image_idx = self.anchors_before(start);
        let mut span_idx = 0;
        let mut text = String::new();
        let mut text_bold = false;

        for (offset, ch) in self.rope.slice(start..end).chars().enumerate() {
            let pos = start + offset;
            if ch == OBJECT_ANCHOR {
                if !text.is_empty() {
                    runs.push(Run::Text {
                        text: std::mem::take(&mut text),
                        bold: text_bold,
                    });
                }
                if let Some(id) = self.images.get(image_idx) {
                    runs.push(Run::Image(*id));
                }
                image_idx += 1;
                continue;
            }

            while span_idx < self.bold.len() && self.bold[span_idx].end <= pos {
                span_idx += 1;
            }
            let bold = self
                .bold
                .get(span_idx)
                .is_some_and(|span| span.start <= pos);
            if bold != text_bold && !text.is_empty() {
                runs.push(Run::Text {
                    text: std::mem::take(&mut text),
                    bold: text_bold,
                });
            }
            text_bold = bold;
            text.push(ch);
        }

        if !text.is_empty() {
            runs.push(Run::Text {
                text,
                bold: text_bold,
            });
        }
        runs
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/document.rs"]
mod tests;
