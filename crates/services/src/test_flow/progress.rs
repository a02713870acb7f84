/// Where the test-taker is within the question list, for the header and progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestProgress {
    /// 1-based number of the question on screen.
    pub number: usize,
    pub total: usize,
    /// `number / total` as a whole percentage.
    pub percent: u8,
    pub is_first: bool,
    pub is_last: bool,
}

impl TestProgress {
    #[must_use]
    pub fn new(position: usize, total: usize) -> Self {
        let number = position + 1;
        let percent = if total == 0 {
            0
        } else {
            u8::try_from((number.min(total) * 100) / total).unwrap_or(100)
        };
        Self {
            number,
            total,
            percent,
            is_first: position == 0,
            is_last: number >= total,
        }
    }
}
