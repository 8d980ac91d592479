//! User input of a form that posts to the server.
//!
//! The typed value survives until the request it was submitted with comes
//! back successfully; a failed request leaves it in place for another try.

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Draft<T> {
    value: T,
    in_flight: bool,
}

impl<T: Default> Draft<T> {
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
    }

    /// The current value went out with a request.
    pub fn submitted(&mut self) {
        self.in_flight = true;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Outcome of whichever mutation just finished. Only clears the value if
    /// this draft was the one submitted and the server accepted it.
    pub fn settled(&mut self, accepted: bool) {
        if self.in_flight && accepted {
            self.value = T::default();
        }
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_submit_keeps_the_text() {
        let mut note = Draft::<String>::default();
        note.set("Called, asked for a quote".into());
        note.submitted();
        note.settled(false);

        assert_eq!(note.value(), "Called, asked for a quote");
        assert!(!note.is_in_flight());

        note.submitted();
        note.settled(true);
        assert_eq!(note.value(), "");
    }

    #[test]
    fn unrelated_success_does_not_clear() {
        let mut title = Draft::<String>::default();
        title.set("Send contract".into());
        title.settled(true);
        assert_eq!(title.value(), "Send contract");
    }
}
