/// Marker opening and closing a fenced code block.
pub const FENCE_MARKER: &str = "```";

/// Whether the scan is currently inside a fenced code block.
///
/// Unbalanced fences are not reported as errors; a document ending while
/// `Inside` simply leaves its tail untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FenceState {
	#[default]
	Outside,
	Inside,
}

impl FenceState {
	/// Check whether a line opens or closes a fenced code block.
	pub fn is_fence_line(line: &str) -> bool {
		line.trim().starts_with(FENCE_MARKER)
	}

	/// Update the state with the next line of the document.
	///
	/// Returns `true` if the line was a fence marker (and the state toggled).
	pub fn observe(&mut self, line: &str) -> bool {
		if !Self::is_fence_line(line) {
			return false;
		}

		*self = match self {
			FenceState::Outside => FenceState::Inside,
			FenceState::Inside => FenceState::Outside,
		};
		true
	}

	pub fn is_inside(self) -> bool {
		self == FenceState::Inside
	}
}
