use serde::{Deserialize, Serialize};

/// Persisted TUI position (stored under `view_state`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Index of the board that was open
    #[serde(default)]
    pub board_index: usize,
    /// Focused column within that board
    #[serde(default)]
    pub column: usize,
    /// Focused card within the column
    #[serde(default)]
    pub row: usize,
}

impl ViewState {
    /// Clamp a restored position to a board list that may have changed since
    pub fn clamped(self, board_count: usize) -> ViewState {
        if self.board_index < board_count {
            self
        } else {
            ViewState::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_zero() {
        let view: ViewState = serde_json::from_str(r#"{"boardIndex":2}"#).unwrap();
        assert_eq!(
            view,
            ViewState {
                board_index: 2,
                column: 0,
                row: 0
            }
        );
    }

    #[test]
    fn stale_board_index_resets() {
        let view = ViewState {
            board_index: 4,
            column: 1,
            row: 3,
        };
        assert_eq!(view.clamped(5), view);
        assert_eq!(view.clamped(4), ViewState::default());
    }
}
