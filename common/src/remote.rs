use crate::error::ApiError;

/// Server-backed data as a screen shows it.
///
/// A failed load or mutation never touches `data`: the last server truth stays
/// on screen and the failure is kept alongside it for the error panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Remote<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Self { data: None, loading: false, error: None }
    }
}

impl<T> Remote<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded(data: T) -> Self {
        Self { data: Some(data), loading: false, error: None }
    }

    /// A request went out. Current data stays visible while it runs.
    pub fn start(&mut self) {
        self.loading = true;
    }

    pub fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.loading = false;
        self.error = None;
    }

    pub fn fail(&mut self, err: &ApiError) {
        self.loading = false;
        self.error = Some(err.user_message());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        self.data.as_mut()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_keeps_previous_data() {
        let mut remote = Remote::loaded(vec![1, 2, 3]);
        remote.start();
        assert!(remote.is_loading());

        remote.fail(&ApiError::Server { status: 400, message: Some("Nope".into()) });
        assert_eq!(remote.data(), Some(&vec![1, 2, 3]));
        assert_eq!(remote.error(), Some("Nope"));
        assert!(!remote.is_loading());

        remote.succeed(vec![4]);
        assert_eq!(remote.data(), Some(&vec![4]));
        assert_eq!(remote.error(), None);
    }
}
