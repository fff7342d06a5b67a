use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirtyState {
	Clean,
	Dirty,
}

/// Compares the edited content against the last saved version.
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
	baseline: String,
	current: String,
}

impl DirtyTracker {
	pub fn new(content: impl Into<String>) -> Self {
		let mut tracker = Self::default();
		tracker.select(content);
		tracker
	}

	/// Starts tracking a freshly loaded document.
	pub fn select(&mut self, content: impl Into<String>) {
		self.baseline = content.into();
		self.current.clone_from(&self.baseline);
	}

	pub fn edit(&mut self, content: impl Into<String>) {
		self.current = content.into();
	}

	pub fn content(&self) -> &str {
		&self.current
	}

	pub fn baseline(&self) -> &str {
		&self.baseline
	}

	pub fn is_dirty(&self) -> bool {
		self.current != self.baseline
	}

	pub fn state(&self) -> DirtyState {
		if self.is_dirty() {
			DirtyState::Dirty
		} else {
			DirtyState::Clean
		}
	}

	pub fn discard(&mut self) {
		self.current.clone_from(&self.baseline);
	}

	/// Moves the baseline once the backend confirmed `content` was stored.
	pub fn mark_saved(&mut self, content: impl Into<String>) {
		self.baseline = content.into();
	}
}
