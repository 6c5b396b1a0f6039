/// One level of `[...]` nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Frame<'i> {
    /// The variable token immediately preceding the opening bracket, if any.
    pub owner: Option<&'i str>,
    /// Offset of the opening bracket.
    pub open: usize,
    /// Offset of the first character of content, just past the bracket.
    pub start: usize,
    /// Characters seen at this level. Text belonging to nested frames is
    /// accumulated in those frames instead.
    pub content: String,
}

impl<'i> Frame<'i> {
    fn root() -> Frame<'i> {
        Frame {
            owner: None,
            open: 0,
            start: 0,
            content: String::new(),
        }
    }
}

/// The stack of open frames during a scan. There is always an implicit root
/// frame at the bottom which can never be popped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Frames<'i> {
    stack: Vec<Frame<'i>>,
}

impl<'i> Frames<'i> {
    pub(crate) fn new() -> Frames<'i> {
        Frames {
            stack: vec![Frame::root()],
        }
    }

    /// Number of brackets opened and not yet closed.
    pub(crate) fn depth(&self) -> usize {
        self.stack
            .len()
            - 1
    }

    pub(crate) fn push(&mut self, owner: Option<&'i str>, open: usize) {
        self.stack
            .push(Frame {
                owner,
                open,
                start: open + 1,
                content: String::new(),
            });
    }

    /// Pop the innermost frame, or None if only the root remains (which is
    /// to say the closing bracket was unmatched).
    pub(crate) fn pop(&mut self) -> Option<Frame<'i>> {
        if self.depth() == 0 {
            None
        } else {
            self.stack
                .pop()
        }
    }

    pub(crate) fn append(&mut self, text: &str) {
        if let Some(frame) = self
            .stack
            .last_mut()
        {
            frame
                .content
                .push_str(text);
        }
    }

    /// Owners of the open frames, innermost first.
    pub(crate) fn owners(&self) -> impl Iterator<Item = &'i str> + '_ {
        self.stack
            .iter()
            .rev()
            .filter_map(|frame| frame.owner)
    }

    /// Consume the stack, returning the frames that were never closed in the
    /// order they were opened.
    pub(crate) fn unclosed(mut self) -> Vec<Frame<'i>> {
        self.stack
            .remove(0);
        self.stack
    }
}
