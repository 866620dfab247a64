/// The back and forward stacks of visited routes.
///
/// The stacks only hold routes that are no longer current; the current route is owned by whoever
/// drives the navigation and is handed in when traversing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationHistory<T> {
    backward: Vec<T>,
    forward: Vec<T>,
}

impl<T> Default for NavigationHistory<T> {
    fn default() -> Self {
        Self {
            backward: Vec::new(),
            forward: Vec::new(),
        }
    }
}

impl<T: Clone + PartialEq> NavigationHistory<T> {
    /// Create empty stacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `previous` was left for `next`.
    ///
    /// Leaving a route for itself is not recorded. Any recorded future is discarded.
    ///
    /// ```rust
    /// # use hashnav_history::NavigationHistory;
    /// let mut history = NavigationHistory::new();
    /// history.record("home", &"blog");
    /// history.record("blog", &"blog");
    /// assert_eq!(history.backward_stack(), &["home"]);
    /// ```
    pub fn record(&mut self, previous: T, next: &T) {
        // don't push the same route twice
        if &previous == next {
            return;
        }
        self.backward.push(previous);
        self.forward.clear();
    }

    /// Check whether there is a previous route to go back to.
    pub fn can_go_back(&self) -> bool {
        !self.backward.is_empty()
    }

    /// Check whether there is a future route to go forward to.
    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    /// Step back from `current`, returning the route to show next.
    ///
    /// `current` moves onto the forward stack. Does nothing if there is nothing to go back to.
    pub fn go_back(&mut self, current: T) -> Option<T> {
        let previous = self.backward.pop()?;
        self.forward.push(current);
        Some(previous)
    }

    /// Step forward from `current`, returning the route to show next.
    ///
    /// `current` moves onto the backward stack. Does nothing if there is nothing to go forward to.
    pub fn go_forward(&mut self, current: T) -> Option<T> {
        let next = self.forward.pop()?;
        self.backward.push(current);
        Some(next)
    }

    /// Routes that can be reached by going back, oldest first.
    pub fn backward_stack(&self) -> &[T] {
        &self.backward
    }

    /// Routes that can be reached by going forward, furthest first.
    pub fn forward_stack(&self) -> &[T] {
        &self.forward
    }
}
