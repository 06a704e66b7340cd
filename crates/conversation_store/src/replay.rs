use crate::schema::Message;

/// Finite, side-effect-free pass over a transcript in insertion order.
///
/// Cloning a `Replay` or calling [`Replay::restart`] starts over from the
/// first message.
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    messages: &'a [Message],
    position: usize,
}

impl<'a> Replay<'a> {
    pub(crate) fn new(messages: &'a [Message]) -> Self {
        Self {
            messages,
            position: 0,
        }
    }

    pub fn restart(&mut self) {
        self.position = 0;
    }
}

impl<'a> Iterator for Replay<'a> {
    type Item = &'a Message;

    fn next(&mut self) -> Option<Self::Item> {
        let message = self.messages.get(self.position)?;
        self.position += 1;
        Some(message)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.messages.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Replay<'_> {}
