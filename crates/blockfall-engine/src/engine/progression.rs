use std::time::Duration;

/// Points for clearing 0, 1, 2, 3, or 4 rows with a single lock.
pub const LINE_POINTS: [u64; 5] = [0, 40, 100, 300, 1200];

/// Score, cleared-row count, and gravity speed.
///
/// # Scoring
///
/// A clear of `n` rows scores `LINE_POINTS[n] * (LEVEL + 1)`. The level is a
/// constant; there is no level progression.
///
/// # Speed
///
/// Every time the cumulative cleared-row count lands on a positive multiple of
/// [`Self::SPEED_UP_ROWS`], the drop interval is halved. There is no lower bound.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::Progression;
///
/// let mut progression = Progression::new();
/// progression.apply_line_clear(4);
/// progression.apply_line_clear(1);
///
/// assert_eq!(progression.score(), 1200 * 2 + 40 * 2);
/// assert_eq!(progression.total_cleared_rows(), 5);
/// assert_eq!(progression.drop_interval(), Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    score: u64,
    total_cleared_rows: u64,
    drop_interval: Duration,
    locked_pieces: u64,
    line_clear_counts: [u64; 4],
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    /// Fixed level used as the score multiplier base.
    pub const LEVEL: u64 = 1;
    pub const INITIAL_DROP_INTERVAL: Duration = Duration::from_millis(1000);
    /// Cleared-row step at which gravity doubles its speed.
    pub const SPEED_UP_ROWS: u64 = 5;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            total_cleared_rows: 0,
            drop_interval: Self::INITIAL_DROP_INTERVAL,
            locked_pieces: 0,
            line_clear_counts: [0; 4],
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn total_cleared_rows(&self) -> u64 {
        self.total_cleared_rows
    }

    /// Time between automatic one-row drops of the active piece.
    #[must_use]
    pub const fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    /// Returns the number of pieces locked into the board.
    #[must_use]
    pub const fn locked_pieces(&self) -> u64 {
        self.locked_pieces
    }

    /// Returns how often each clear size occurred.
    ///
    /// - `[0]`: single (1 row)
    /// - `[1]`: double (2 rows)
    /// - `[2]`: triple (3 rows)
    /// - `[3]`: quadruple (4 rows)
    #[must_use]
    pub const fn line_clear_counts(&self) -> &[u64; 4] {
        &self.line_clear_counts
    }

    /// Records that a piece was locked into the board.
    pub fn record_lock(&mut self) {
        self.locked_pieces += 1;
    }

    /// Applies the result of one row-clearing pass.
    ///
    /// Clearing zero rows changes nothing. Clears larger than four rows are
    /// scored like four. Returns `true` if the drop interval was halved.
    pub fn apply_line_clear(&mut self, cleared_rows: usize) -> bool {
        if cleared_rows == 0 {
            return false;
        }
        let index = usize::min(cleared_rows, LINE_POINTS.len() - 1);
        self.score += LINE_POINTS[index] * (Self::LEVEL + 1);
        self.line_clear_counts[index - 1] += 1;
        self.total_cleared_rows += cleared_rows as u64;

        if self.total_cleared_rows % Self::SPEED_UP_ROWS == 0 {
            self.drop_interval /= 2;
            log::info!(
                "cleared {} rows in total, drop interval now {:?}",
                self.total_cleared_rows,
                self.drop_interval
            );
            return true;
        }
        false
    }
}
