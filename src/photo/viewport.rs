use std::ops::Range;

/// Number of columns shown when a folder is opened
pub const INIT_FRAME_SIZE: usize = 3;
pub const MIN_FRAME_SIZE: usize = 1;
pub const MAX_FRAME_SIZE: usize = 6;

/// Navigation step over the photo list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    First,
    PrevPage,
    Prev,
    Next,
    NextPage,
    Last,
}

/// Thumbnails to render and release after the window moved or resized.
///
/// `load` lists indices that must be rendered at the current scale,
/// `unload` lists indices that left the window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameChange {
    pub load: Vec<usize>,
    pub unload: Vec<usize>,
}

impl FrameChange {
    pub fn is_empty(&self) -> bool {
        self.load.is_empty() && self.unload.is_empty()
    }

    fn between(old: Range<usize>, new: Range<usize>) -> Self {
        Self {
            load: new.clone().filter(|i| !old.contains(i)).collect(),
            unload: old.filter(|i| !new.contains(i)).collect(),
        }
    }

    fn rescale(old: Range<usize>, new: Range<usize>) -> Self {
        Self {
            load: new.clone().collect(),
            unload: old.filter(|i| !new.contains(i)).collect(),
        }
    }
}

/// Sliding window of visible columns over a list of `len` photos.
///
/// The window always lies inside `[0, len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pos: usize,
    size: usize,
    len: usize,
}

impl Viewport {
    pub fn new(len: usize) -> Self {
        Self::with_size(len, INIT_FRAME_SIZE)
    }

    /// Window at the start of the list with a preferred column count
    pub fn with_size(len: usize, size: usize) -> Self {
        let size = size.clamp(MIN_FRAME_SIZE, MAX_FRAME_SIZE).min(len);
        Self { pos: 0, size, len }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.pos..self.pos + self.size
    }

    pub fn can_add_column(&self) -> bool {
        self.size < MAX_FRAME_SIZE && self.size < self.len
    }

    pub fn can_remove_column(&self) -> bool {
        self.size > MIN_FRAME_SIZE
    }

    pub fn can_scroll_back(&self) -> bool {
        self.pos > 0
    }

    pub fn can_scroll_forward(&self) -> bool {
        self.pos + self.size < self.len
    }

    /// Move the window start to `pos`, clamped to the list bounds
    pub fn scroll_to(&mut self, pos: isize) -> FrameChange {
        let last = self.len - self.size;
        let pos = usize::try_from(pos).unwrap_or(0).min(last);

        let old = self.range();
        self.pos = pos;
        FrameChange::between(old, self.range())
    }

    pub fn scroll(&mut self, step: Scroll) -> FrameChange {
        let pos = self.pos as isize;
        let size = self.size as isize;
        let target = match step {
            Scroll::First => 0,
            Scroll::PrevPage => pos - size,
            Scroll::Prev => pos - 1,
            Scroll::Next => pos + 1,
            Scroll::NextPage => pos + size,
            Scroll::Last => self.len as isize,
        };
        self.scroll_to(target)
    }

    /// Widen the window by one column.
    ///
    /// The new column is taken from the right, or from the left when the
    /// window already ends at the last photo. Returns `None` at the limit.
    pub fn add_column(&mut self) -> Option<FrameChange> {
        if !self.can_add_column() {
            return None;
        }
        let old = self.range();
        if self.pos + self.size == self.len {
            self.pos -= 1;
        }
        self.size += 1;
        Some(FrameChange::rescale(old, self.range()))
    }

    /// Narrow the window by dropping its rightmost column
    pub fn remove_column(&mut self) -> Option<FrameChange> {
        if !self.can_remove_column() {
            return None;
        }
        let old = self.range();
        self.size -= 1;
        Some(FrameChange::rescale(old, self.range()))
    }
}
